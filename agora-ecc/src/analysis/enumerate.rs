use super::Budget;
use crate::arithmetic::Point;
use crate::{Curve, EccError};

use num_bigint::BigUint;
use num_traits::ToPrimitive;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

fn small_modulus(curve: &Curve, limit: u64) -> Result<u64, EccError> {
    let modulus = curve.field().modulus();
    match modulus.to_u64() {
        Some(p) if p <= limit => Ok(p),
        _ => Err(EccError::ComputationTooExpensive(format!(
            "modulus {} exceeds the enumeration limit {}",
            modulus, limit
        ))),
    }
}

// number of y with (x, y) on the curve
fn solutions(curve: &Curve, x: u64, budget: &Budget) -> Result<u64, EccError> {
    budget.check()?;
    let field = curve.field();
    let rhs = curve.rhs(&field.from_u64(x));
    Ok(match field.legendre(&rhs) {
        0 => 1,
        1 => 2,
        _ => 0,
    })
}

/// `#E(F_p)` by a Legendre symbol per abscissa, plus the point at infinity.
pub(crate) fn count(curve: &Curve, limit: u64, budget: &Budget) -> Result<BigUint, EccError> {
    let p = small_modulus(curve, limit)?;

    #[cfg(feature = "parallel")]
    let iter = (0..p).into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = 0..p;

    let affine = iter
        .map(|x| solutions(curve, x, budget))
        .sum::<Result<u64, EccError>>()?;

    Ok(BigUint::from(affine + 1))
}

/// Every point of `E(F_p)`, the identity first, then by increasing `x`.
pub fn points(curve: &Curve, limit: u64) -> Result<Vec<Point>, EccError> {
    let p = small_modulus(curve, limit)?;
    let field = curve.field();

    let mut points = vec![Point::IDENTITY];
    for x in 0..p {
        let x = field.from_u64(x);
        if let Some(point) = curve.lift_x(&x) {
            let negated = curve.negate(&point);
            if negated == point {
                points.push(point);
            } else if point.y() < negated.y() {
                points.extend([point, negated]);
            } else {
                points.extend([negated, point]);
            }
        }
    }
    Ok(points)
}
