mod field;
mod point;

pub use field::{is_probable_prime, FieldElement, PrimeField};
pub use point::{AffineCoords, Point};
