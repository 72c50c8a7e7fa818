use super::field::FieldElement;
use crate::Curve;

use num_bigint::{BigInt, BigUint, Sign};

use std::fmt;

const WINDOW_SIZE: usize = 16;

/// Affine coordinates of a point known to satisfy its curve equation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AffineCoords {
    x: FieldElement,
    y: FieldElement,
}

impl AffineCoords {
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }
}

/// A point of `E(F_p)`. Points do not carry their curve: affine points are
/// only produced by [`Curve`] methods, which keep them on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Point {
    Infinity,
    Affine(AffineCoords),
}

impl Point {
    pub const IDENTITY: Self = Self::Infinity;

    /// Callers must have checked the curve equation.
    pub(crate) fn affine(x: FieldElement, y: FieldElement) -> Self {
        Self::Affine(AffineCoords { x, y })
    }

    #[inline(always)]
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        match self {
            Self::Infinity => None,
            Self::Affine(coords) => Some((&coords.x, &coords.y)),
        }
    }

    pub fn x(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(_, y)| y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Infinity => write!(f, "O"),
            Self::Affine(coords) => write!(f, "({}, {})", coords.x, coords.y),
        }
    }
}

impl Curve {
    pub fn negate(&self, point: &Point) -> Point {
        match point {
            Point::Infinity => Point::Infinity,
            Point::Affine(coords) => Point::affine(coords.x.clone(), self.field().neg(&coords.y)),
        }
    }

    /// Chord-and-tangent addition in affine coordinates.
    pub fn add(&self, lhs: &Point, rhs: &Point) -> Point {
        let (x1, y1, x2, y2) = match (lhs, rhs) {
            (Point::Infinity, _) => return rhs.clone(),
            (_, Point::Infinity) => return lhs.clone(),
            (Point::Affine(lhs), Point::Affine(rhs)) => (&lhs.x, &lhs.y, &rhs.x, &rhs.y),
        };
        let field = self.field();

        // vertical line, this also covers doubling a point with y = 0
        if x1 == x2 && *y1 == field.neg(y2) {
            return Point::Infinity;
        }

        let (numerator, denominator) = if x1 == x2 {
            let x1_sq = field.square(x1);
            let three_x1_sq = field.add(&field.double(&x1_sq), &x1_sq);
            (field.add(&three_x1_sq, self.a()), field.double(y1))
        } else {
            (field.sub(y2, y1), field.sub(x2, x1))
        };

        // the denominator is only singular on the vertical cases handled
        // above, so a failed inversion can only mean the identity
        let slope = match field.inverse(&denominator) {
            Ok(inv) => field.mul(&numerator, &inv),
            Err(_) => return Point::Infinity,
        };

        let x3 = field.sub(&field.sub(&field.square(&slope), x1), x2);
        let y3 = field.sub(&field.mul(&slope, &field.sub(x1, &x3)), y1);

        self.checked(Point::affine(x3, y3))
    }

    pub fn double(&self, point: &Point) -> Point {
        self.add(point, point)
    }

    pub fn sub(&self, lhs: &Point, rhs: &Point) -> Point {
        self.add(lhs, &self.negate(rhs))
    }

    /// `k * P` for any signed `k`; negative scalars multiply `-P` by `|k|`.
    pub fn scalar_mul(&self, point: &Point, scalar: &BigInt) -> Point {
        if scalar.sign() == Sign::Minus {
            self.mul_unsigned(&self.negate(point), scalar.magnitude())
        } else {
            self.mul_unsigned(point, scalar.magnitude())
        }
    }

    pub fn mul_u64(&self, point: &Point, scalar: u64) -> Point {
        self.mul_unsigned(point, &BigUint::from(scalar))
    }

    /// Fixed 4-bit window double-and-add over the hex digits of the scalar.
    pub fn mul_unsigned(&self, point: &Point, scalar: &BigUint) -> Point {
        let mut lookup = Vec::with_capacity(WINDOW_SIZE);
        let mut current = Point::IDENTITY;
        for _ in 0..WINDOW_SIZE {
            lookup.push(current.clone());
            current = self.add(&current, point);
        }

        let mut q = Point::IDENTITY;
        for digit in scalar.to_radix_be(WINDOW_SIZE as u32) {
            q = self.double(&q);
            q = self.double(&q);
            q = self.double(&q);
            q = self.double(&q);
            q = self.add(&q, &lookup[digit as usize]);
        }
        q
    }

    fn checked(&self, point: Point) -> Point {
        if self.verifies_points() || cfg!(debug_assertions) {
            assert!(
                self.contains(&point),
                "group law left the curve: {} on {}",
                point,
                self
            );
        }
        point
    }
}
