use crate::arithmetic::{FieldElement, Point, PrimeField};
use crate::EccError;

use num_bigint::BigInt;

use std::fmt;

/// Short Weierstrass curve `y^2 = x^3 + a*x + b` over a prime field.
///
/// Construction rejects composite moduli and curves with a vanishing
/// discriminant, so every `Curve` value describes a genuine group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Curve {
    field: PrimeField,
    a: FieldElement,
    b: FieldElement,
    verify_points: bool,
}

impl Curve {
    pub fn new<T: Into<BigInt>>(field: PrimeField, a: T, b: T) -> Result<Self, EccError> {
        if !field.is_prime() {
            return Err(EccError::CompositeModulus(BigInt::from(
                field.modulus().clone(),
            )));
        }
        let a = field.element(a);
        let b = field.element(b);
        Self::from_elements(field, a, b)
    }

    pub fn from_params<T: Into<BigInt>>(p: T, a: T, b: T) -> Result<Self, EccError> {
        Self::new(PrimeField::new(p)?, a, b)
    }

    fn from_elements(
        field: PrimeField,
        a: FieldElement,
        b: FieldElement,
    ) -> Result<Self, EccError> {
        let curve = Self {
            field,
            a,
            b,
            verify_points: false,
        };
        if curve.discriminant().is_zero() {
            return Err(EccError::DegenerateCurve(BigInt::from(
                curve.field.modulus().clone(),
            )));
        }
        Ok(curve)
    }

    /// Re-checks every group law output against the curve equation, also
    /// in release builds. Debug builds always check.
    pub fn with_verification(mut self, verify_points: bool) -> Self {
        self.verify_points = verify_points;
        self
    }

    pub fn verifies_points(&self) -> bool {
        self.verify_points
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    // 4a^3 + 27b^2
    fn discriminant_core(&self) -> FieldElement {
        let field = &self.field;
        let a3 = field.mul(&field.square(&self.a), &self.a);
        let b2 = field.square(&self.b);
        field.add(
            &field.mul(&field.from_u64(4), &a3),
            &field.mul(&field.from_u64(27), &b2),
        )
    }

    /// `-16 (4a^3 + 27b^2) mod p`
    pub fn discriminant(&self) -> FieldElement {
        let field = &self.field;
        field.neg(&field.mul(&field.from_u64(16), &self.discriminant_core()))
    }

    /// `1728 * 4a^3 / (4a^3 + 27b^2)`
    pub fn j_invariant(&self) -> Result<FieldElement, EccError> {
        let field = &self.field;
        let four_a3 = field.mul(
            &field.from_u64(4),
            &field.mul(&field.square(&self.a), &self.a),
        );
        let denominator = field.inverse(&self.discriminant_core())?;
        Ok(field.mul(&field.mul(&field.from_u64(1728), &four_a3), &denominator))
    }

    /// Right hand side of the curve equation, `x^3 + a*x + b`.
    pub fn rhs(&self, x: &FieldElement) -> FieldElement {
        let field = &self.field;
        let x3 = field.mul(&field.square(x), x);
        field.add(&field.add(&x3, &field.mul(&self.a, x)), &self.b)
    }

    pub fn is_on_curve(&self, x: &FieldElement, y: &FieldElement) -> bool {
        self.field.square(y) == self.rhs(x)
    }

    pub fn contains(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => true,
            Point::Affine(coords) => self.is_on_curve(coords.x(), coords.y()),
        }
    }

    pub fn point<T: Into<BigInt>>(&self, x: T, y: T) -> Result<Point, EccError> {
        let x = self.field.element(x);
        let y = self.field.element(y);
        if !self.is_on_curve(&x, &y) {
            return Err(EccError::NotOnCurve {
                x: x.to_bigint(),
                y: y.to_bigint(),
            });
        }
        Ok(Point::affine(x, y))
    }

    /// A point with abscissa `x`, if `x^3 + ax + b` is a square.
    pub fn lift_x(&self, x: &FieldElement) -> Option<Point> {
        self.field.sqrt(&self.rhs(x)).map(|y| Point::affine(x.clone(), y))
    }

    /// Smallest quadratic non-residue modulo an odd `p`.
    pub fn non_residue(&self) -> Option<FieldElement> {
        let field = &self.field;
        let mut d = field.from_u64(2);
        while !d.is_zero() {
            if field.legendre(&d) == -1 {
                return Some(d);
            }
            d = field.add(&d, &field.one());
        }
        None
    }

    /// `y^2 = x^3 + a*d^2*x + b*d^3`. For a non-residue `d` the orders
    /// of the curve and its twist add up to `2p + 2`.
    pub fn quadratic_twist(&self, d: &FieldElement) -> Result<Curve, EccError> {
        let field = &self.field;
        let d2 = field.square(d);
        let d3 = field.mul(&d2, d);
        let twist = Self::from_elements(
            field.clone(),
            field.mul(&self.a, &d2),
            field.mul(&self.b, &d3),
        )?;
        Ok(twist.with_verification(self.verify_points))
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "y^2 = x^3 + {}x + {} (mod {})",
            self.a,
            self.b,
            self.field.modulus()
        )
    }
}
