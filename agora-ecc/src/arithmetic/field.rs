use crate::EccError;

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use std::borrow::Cow;
use std::fmt;

/// Bases for the Miller-Rabin test. Using all of them is deterministic
/// for every n < 3.3 * 10^24.
const MILLER_RABIN_BASES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// A residue in `[0, p)`. Only a [`PrimeField`] can produce one. Handing it
/// to a field with a smaller modulus reduces it first, so every result is
/// canonical for the field that computed it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldElement(BigUint);

impl FieldElement {
    pub fn inner(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.0.clone())
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Integers modulo `p` for a runtime modulus `p >= 2`.
///
/// Every operation is a pure function of its arguments and the modulus.
/// Composite moduli are accepted here: [`PrimeField::inverse`] uses the
/// extended Euclidean algorithm and reports [`EccError::NotInvertible`]
/// whenever `gcd(x, p) != 1`. [`PrimeField::legendre`] and
/// [`PrimeField::sqrt`] are only meaningful for prime `p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    pub fn new<T: Into<BigInt>>(modulus: T) -> Result<Self, EccError> {
        let modulus = modulus.into();
        if modulus < BigInt::from(2u8) {
            return Err(EccError::InvalidModulus(modulus));
        }
        let (_, magnitude) = modulus.into_parts();
        Ok(Self { modulus: magnitude })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn is_prime(&self) -> bool {
        is_probable_prime(&self.modulus)
    }

    pub fn zero(&self) -> FieldElement {
        FieldElement(BigUint::zero())
    }

    pub fn one(&self) -> FieldElement {
        FieldElement(BigUint::one())
    }

    /// Reduces any signed integer to its least non-negative residue.
    pub fn element<T: Into<BigInt>>(&self, number: T) -> FieldElement {
        let (sign, magnitude) = number.into().into_parts();
        let reduced = self.reduce(magnitude);
        if sign == Sign::Minus {
            self.neg(&reduced)
        } else {
            reduced
        }
    }

    pub fn from_u64(&self, number: u64) -> FieldElement {
        self.reduce(BigUint::from(number))
    }

    fn reduce(&self, number: BigUint) -> FieldElement {
        if number < self.modulus {
            FieldElement(number)
        } else {
            FieldElement(number % &self.modulus)
        }
    }

    // elements of another field are reduced into this one
    fn canonical<'a>(&self, element: &'a FieldElement) -> Cow<'a, FieldElement> {
        if element.0 < self.modulus {
            Cow::Borrowed(element)
        } else {
            Cow::Owned(self.reduce(element.0.clone()))
        }
    }

    pub fn add(&self, lhs: &FieldElement, rhs: &FieldElement) -> FieldElement {
        let (lhs, rhs) = (self.canonical(lhs), self.canonical(rhs));
        let sum = &lhs.0 + &rhs.0;
        if sum >= self.modulus {
            FieldElement(sum - &self.modulus)
        } else {
            FieldElement(sum)
        }
    }

    pub fn sub(&self, lhs: &FieldElement, rhs: &FieldElement) -> FieldElement {
        let (lhs, rhs) = (self.canonical(lhs), self.canonical(rhs));
        if lhs.0 >= rhs.0 {
            FieldElement(&lhs.0 - &rhs.0)
        } else {
            FieldElement(&lhs.0 + &self.modulus - &rhs.0)
        }
    }

    pub fn neg(&self, element: &FieldElement) -> FieldElement {
        let element = self.canonical(element);
        if element.is_zero() {
            self.zero()
        } else {
            FieldElement(&self.modulus - &element.0)
        }
    }

    pub fn mul(&self, lhs: &FieldElement, rhs: &FieldElement) -> FieldElement {
        FieldElement((&lhs.0 * &rhs.0) % &self.modulus)
    }

    pub fn double(&self, element: &FieldElement) -> FieldElement {
        self.add(element, element)
    }

    pub fn square(&self, element: &FieldElement) -> FieldElement {
        self.mul(element, element)
    }

    pub fn pow(&self, base: &FieldElement, exponent: &BigUint) -> FieldElement {
        FieldElement(self.canonical(base).0.modpow(exponent, &self.modulus))
    }

    /// Extended Euclid with the Bezout coefficient kept reduced mod `p`,
    /// so it needs no signed arithmetic. Invariant: `t_i * x = r_i (mod p)`.
    pub fn inverse(&self, element: &FieldElement) -> Result<FieldElement, EccError> {
        let element = self.canonical(element);
        let mut r0 = self.modulus.clone();
        let mut r1 = element.0.clone();
        let mut t0 = self.zero();
        let mut t1 = self.one();

        while !r1.is_zero() {
            let (quotient, remainder) = r0.div_rem(&r1);
            r0 = std::mem::replace(&mut r1, remainder);
            let qt = self.mul(&self.reduce(quotient), &t1);
            let t2 = self.sub(&t0, &qt);
            t0 = std::mem::replace(&mut t1, t2);
        }

        if r0.is_one() {
            Ok(t0)
        } else {
            Err(EccError::NotInvertible {
                value: element.to_bigint(),
                modulus: BigInt::from(self.modulus.clone()),
            })
        }
    }

    /// Legendre symbol by Euler's criterion. Assumes `p` is prime.
    pub fn legendre(&self, element: &FieldElement) -> i8 {
        let element = self.canonical(element);
        if element.is_zero() {
            return 0;
        }
        if self.modulus == BigUint::from(2u8) {
            return 1;
        }
        let exponent = (&self.modulus - 1u8) >> 1;
        if self.pow(&element, &exponent).0.is_one() {
            1
        } else {
            -1
        }
    }

    pub fn is_square(&self, element: &FieldElement) -> bool {
        self.legendre(element) >= 0
    }

    /// Square root for prime `p`, `None` for non-residues.
    pub fn sqrt(&self, element: &FieldElement) -> Option<FieldElement> {
        let element = self.canonical(element);
        if element.is_zero() || self.modulus == BigUint::from(2u8) {
            return Some(element.into_owned());
        }
        if self.legendre(&element) != 1 {
            return None;
        }

        if (&self.modulus % 4u8) == BigUint::from(3u8) {
            let exponent = (&self.modulus + 1u8) >> 2;
            return Some(self.pow(&element, &exponent));
        }

        self.tonelli_shanks(&element)
    }

    fn tonelli_shanks(&self, element: &FieldElement) -> Option<FieldElement> {
        let p_minus_one = &self.modulus - 1u8;
        let s = p_minus_one.trailing_zeros().unwrap_or(0);
        let q = &p_minus_one >> s;

        let mut z = self.from_u64(2);
        while self.legendre(&z) != -1 {
            z = self.add(&z, &self.one());
        }

        let mut m = s;
        let mut c = self.pow(&z, &q);
        let mut t = self.pow(element, &q);
        let mut r = self.pow(element, &((&q + 1u8) >> 1));

        loop {
            if t.0.is_one() {
                return Some(r);
            }

            let mut i = 0;
            let mut t_pow = t.clone();
            while !t_pow.0.is_one() {
                t_pow = self.square(&t_pow);
                i += 1;
                if i == m {
                    return None;
                }
            }

            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = self.square(&b);
            }
            m = i;
            c = self.square(&b);
            t = self.mul(&t, &c);
            r = self.mul(&r, &b);
        }
    }
}

/// Miller-Rabin over the first 13 primes.
pub fn is_probable_prime(number: &BigUint) -> bool {
    if number < &BigUint::from(2u8) {
        return false;
    }
    for &base in MILLER_RABIN_BASES.iter() {
        let base = BigUint::from(base);
        if number == &base {
            return true;
        }
        if (number % &base).is_zero() {
            return false;
        }
    }

    let n_minus_one = number - 1u8;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;
    let two = BigUint::from(2u8);

    'witness: for &base in MILLER_RABIN_BASES.iter() {
        let mut x = BigUint::from(base).modpow(&d, number);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, number);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn operations_with_small_modulus() {
        let field = PrimeField::new(17).unwrap();
        let a = field.from_u64(15);
        let b = field.from_u64(9);
        assert_eq!(field.add(&a, &b), field.from_u64(7));
        assert_eq!(field.mul(&a, &b), field.from_u64(16));
        assert_eq!(field.sub(&a, &b), field.from_u64(6));
        assert_eq!(field.sub(&b, &a), field.from_u64(11));
        assert_eq!(field.neg(&a), field.from_u64(2));
        assert_eq!(field.neg(&field.zero()), field.zero());
        assert_eq!(field.pow(&b, &BigUint::from(16u8)), field.one());
    }

    #[test]
    fn canonical_residues() {
        let field = PrimeField::new(23).unwrap();
        assert_eq!(field.element(-1), field.from_u64(22));
        assert_eq!(field.element(-23), field.zero());
        assert_eq!(field.element(-47), field.from_u64(22));
        assert_eq!(field.element(100), field.from_u64(8));
        assert!(field.element(-5).inner() < field.modulus());
    }

    #[test]
    fn elements_of_another_field() {
        let small = PrimeField::new(5).unwrap();
        let large = PrimeField::new(23).unwrap();
        let x = large.from_u64(22);
        let y = large.from_u64(9);

        assert_eq!(small.add(&x, &x), small.from_u64(4));
        assert_eq!(small.sub(&y, &x), small.from_u64(2));
        assert_eq!(small.neg(&x), small.from_u64(3));
        assert_eq!(small.mul(&x, &y), small.from_u64(3));
        assert_eq!(small.pow(&x, &BigUint::from(3u8)), small.from_u64(3));
        assert_eq!(small.inverse(&x), Ok(small.from_u64(3)));
        assert_eq!(small.legendre(&x), -1);
        assert_eq!(small.legendre(&large.from_u64(20)), 0);
        assert_eq!(small.sqrt(&y).map(|r| small.square(&r)), Some(small.from_u64(4)));
        for result in [small.add(&x, &y), small.sub(&x, &y), small.neg(&y)] {
            assert!(result.inner() < small.modulus());
        }
    }

    #[test]
    fn invalid_modulus() {
        assert_eq!(
            PrimeField::new(1),
            Err(EccError::InvalidModulus(BigInt::from(1)))
        );
        assert!(PrimeField::new(-7).is_err());
        assert!(PrimeField::new(2).is_ok());
    }

    #[test]
    fn inverse() {
        let field = PrimeField::new(23).unwrap();
        for x in 1..23 {
            let x = field.from_u64(x);
            let inv = field.inverse(&x).unwrap();
            assert_eq!(field.mul(&x, &inv), field.one());
        }
        assert!(field.inverse(&field.zero()).is_err());

        let tiny = PrimeField::new(2).unwrap();
        assert_eq!(tiny.inverse(&tiny.one()), Ok(tiny.one()));
        let three = PrimeField::new(3).unwrap();
        assert_eq!(three.inverse(&three.from_u64(2)), Ok(three.from_u64(2)));

        // composite modulus: 6 shares a factor with 15, 7 does not
        let composite = PrimeField::new(15).unwrap();
        assert_eq!(
            composite.inverse(&composite.from_u64(6)),
            Err(EccError::NotInvertible {
                value: BigInt::from(6),
                modulus: BigInt::from(15)
            })
        );
        let inv = composite.inverse(&composite.from_u64(7)).unwrap();
        assert_eq!(inv, composite.from_u64(13));
    }

    #[test]
    fn square_roots() {
        // 23 = 3 (mod 4), 17 and 41 = 1 (mod 8) go through tonelli-shanks
        for p in [5u64, 13, 17, 23, 41, 97] {
            let field = PrimeField::new(p).unwrap();
            let mut residues = 0;
            for x in 1..p {
                let x = field.from_u64(x);
                match field.sqrt(&x) {
                    Some(root) => {
                        assert_eq!(field.square(&root), x);
                        assert_eq!(field.legendre(&x), 1);
                        residues += 1;
                    }
                    None => assert_eq!(field.legendre(&x), -1),
                }
            }
            assert_eq!(residues, (p - 1) / 2);
        }

        let tiny = PrimeField::new(2).unwrap();
        assert_eq!(tiny.sqrt(&tiny.one()), Some(tiny.one()));
    }

    #[test]
    fn primality() {
        let primes: Vec<u64> = (0..100u64)
            .filter(|n| is_probable_prime(&BigUint::from(*n)))
            .collect();
        assert_eq!(
            primes,
            vec![
                2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73,
                79, 83, 89, 97
            ]
        );
        // carmichael number
        assert!(!is_probable_prime(&BigUint::from(561u32)));
        assert!(is_probable_prime(&BigUint::from(1_000_000_007u64)));
        assert!(is_probable_prime(&BigUint::from(18_446_744_073_709_551_557u64)));
        assert!(!is_probable_prime(&BigUint::from(18_446_744_073_709_551_555u64)));
    }
}
