use crate::arithmetic::Point;
use crate::Curve;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Prime factorization by trial division, as `(prime, exponent)` pairs in
/// increasing order. Only meant for group orders of small curves.
pub fn factorize(number: &BigUint) -> Vec<(BigUint, u32)> {
    let mut factors = Vec::new();
    if number.is_zero() {
        return factors;
    }

    let mut rest = number.clone();
    let mut divisor = BigUint::from(2u8);
    while &divisor * &divisor <= rest {
        let mut exponent = 0;
        loop {
            let (quotient, remainder) = rest.div_rem(&divisor);
            if !remainder.is_zero() {
                break;
            }
            rest = quotient;
            exponent += 1;
        }
        if exponent > 0 {
            factors.push((divisor.clone(), exponent));
        }
        divisor += if divisor == BigUint::from(2u8) { 1u8 } else { 2u8 };
    }
    if !rest.is_one() {
        factors.push((rest, 1));
    }
    factors
}

/// Order of `point`, given any `multiple` with `multiple * point = O`:
/// strips every prime factor of the multiple that still annihilates it.
pub fn point_order(curve: &Curve, point: &Point, multiple: &BigUint) -> BigUint {
    debug_assert!(curve.mul_unsigned(point, multiple).is_identity());
    let mut order = multiple.clone();
    for (prime, exponent) in factorize(multiple) {
        for _ in 0..exponent {
            let candidate = &order / &prime;
            if curve.mul_unsigned(point, &candidate).is_identity() {
                order = candidate;
            } else {
                break;
            }
        }
    }
    order
}
