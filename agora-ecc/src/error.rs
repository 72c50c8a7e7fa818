use num_bigint::BigInt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EccError {
    #[error("modulus must be at least 2, got {0}")]
    InvalidModulus(BigInt),
    #[error("modulus {0} is not prime")]
    CompositeModulus(BigInt),
    #[error("degenerate curve: 4a^3 + 27b^2 vanishes modulo {0}")]
    DegenerateCurve(BigInt),
    #[error("{value} is not invertible modulo {modulus}")]
    NotInvertible { value: BigInt, modulus: BigInt },
    #[error("point ({x}, {y}) is not on the curve")]
    NotOnCurve { x: BigInt, y: BigInt },
    #[error("computation too expensive: {0}")]
    ComputationTooExpensive(String),
}
