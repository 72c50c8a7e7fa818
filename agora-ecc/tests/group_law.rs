use agora_ecc::arithmetic::Point;
use agora_ecc::Curve;

use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn curves() -> Vec<Curve> {
    [
        (23i64, 1i64, 1i64),
        (97, 2, 3),
        (1_009, -3, 7),
        (10_007, 0, 5),
        (2_305_843_009_213_693_951, 486_662, 1),
    ]
    .into_iter()
    .map(|(p, a, b)| Curve::from_params(p, a, b).unwrap().with_verification(true))
    .collect()
}

fn random_point<R: Rng>(rng: &mut R, curve: &Curve) -> Point {
    let field = curve.field();
    loop {
        let x = field.from_u64(rng.gen());
        if let Some(point) = curve.lift_x(&x) {
            return if rng.gen() { point } else { curve.negate(&point) };
        }
    }
}

#[test]
fn identity_and_inverse() {
    let mut rng = StdRng::seed_from_u64(7);
    for curve in curves() {
        for _ in 0..20 {
            let p = random_point(&mut rng, &curve);
            assert!(curve.contains(&p));
            assert_eq!(curve.add(&p, &Point::IDENTITY), p);
            assert_eq!(curve.add(&Point::IDENTITY, &p), p);
            assert!(curve.add(&p, &curve.negate(&p)).is_identity());
            assert_eq!(curve.negate(&curve.negate(&p)), p);
            assert!(curve.sub(&p, &p).is_identity());
        }
    }
}

#[test]
fn commutativity_and_associativity() {
    let mut rng = StdRng::seed_from_u64(11);
    for curve in curves() {
        for _ in 0..20 {
            let p = random_point(&mut rng, &curve);
            let q = random_point(&mut rng, &curve);
            let r = random_point(&mut rng, &curve);
            assert_eq!(curve.add(&p, &q), curve.add(&q, &p));
            assert_eq!(
                curve.add(&curve.add(&p, &q), &r),
                curve.add(&p, &curve.add(&q, &r))
            );
            assert!(curve.contains(&curve.add(&p, &q)));
        }
    }
}

#[test]
fn doubling_matches_addition() {
    let mut rng = StdRng::seed_from_u64(13);
    for curve in curves() {
        for _ in 0..20 {
            let p = random_point(&mut rng, &curve);
            assert_eq!(curve.double(&p), curve.add(&p, &p));
            assert_eq!(curve.mul_u64(&p, 2), curve.double(&p));
        }
    }
}

#[test]
fn scalar_multiplication() {
    let mut rng = StdRng::seed_from_u64(17);
    for curve in curves() {
        let p = random_point(&mut rng, &curve);
        assert!(curve.scalar_mul(&p, &BigInt::from(0)).is_identity());
        assert_eq!(curve.scalar_mul(&p, &BigInt::from(1)), p);
        assert_eq!(curve.scalar_mul(&p, &BigInt::from(-1)), curve.negate(&p));

        let mut expected = Point::IDENTITY;
        for k in 0..40u64 {
            assert_eq!(curve.mul_u64(&p, k), expected);
            expected = curve.add(&expected, &p);
        }

        for _ in 0..10 {
            let k: i64 = rng.gen_range(-1_000_000..1_000_000);
            let l: i64 = rng.gen_range(-1_000_000..1_000_000);
            let kp = curve.scalar_mul(&p, &BigInt::from(k));
            let lp = curve.scalar_mul(&p, &BigInt::from(l));
            assert_eq!(curve.add(&kp, &lp), curve.scalar_mul(&p, &BigInt::from(k + l)));
            assert_eq!(
                curve.scalar_mul(&kp, &BigInt::from(l)),
                curve.scalar_mul(&p, &(BigInt::from(k) * BigInt::from(l)))
            );
            assert_eq!(
                curve.scalar_mul(&p, &BigInt::from(-k)),
                curve.negate(&kp)
            );
        }
    }
}
