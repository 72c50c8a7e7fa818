//! Input screening of the old web form.
//!
//! Coarser than the discriminant check done by [`Curve`](crate::Curve): it
//! rejects valid curves such as `a = 0, b = 5` and lets degenerate ones
//! through. Nothing in the library calls it.

use num_bigint::BigInt;
use num_traits::Zero;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Argument p was too small")]
    ModulusTooSmall,
    #[error("Arguments a and b dont't have to be 0")]
    ZeroCoefficient,
}

pub fn check(p: &BigInt, a: &BigInt, b: &BigInt) -> Result<(), Rejection> {
    if p < &BigInt::from(2u8) {
        return Err(Rejection::ModulusTooSmall);
    }
    if a.is_zero() || b.is_zero() {
        return Err(Rejection::ZeroCoefficient);
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Curve, EccError};

    fn check_i64(p: i64, a: i64, b: i64) -> Result<(), Rejection> {
        check(&BigInt::from(p), &BigInt::from(a), &BigInt::from(b))
    }

    #[test]
    fn legacy_messages() {
        assert_eq!(
            check_i64(1, 1, 1).unwrap_err().to_string(),
            "Argument p was too small"
        );
        assert_eq!(
            check_i64(23, 0, 1).unwrap_err().to_string(),
            "Arguments a and b dont't have to be 0"
        );
        assert_eq!(check_i64(23, 1, 0), Err(Rejection::ZeroCoefficient));
        assert_eq!(check_i64(23, 1, 1), Ok(()));
    }

    #[test]
    fn disagrees_with_discriminant() {
        // rejected here, yet a perfectly good curve
        assert!(check_i64(23, 0, 5).is_err());
        assert!(Curve::from_params(23, 0, 5).is_ok());
        // accepted here, yet singular: 4(-3)^3 + 27(2)^2 = 0
        assert!(check_i64(23, -3, 2).is_ok());
        assert!(matches!(
            Curve::from_params(23, -3, 2),
            Err(EccError::DegenerateCurve(_))
        ));
    }
}
