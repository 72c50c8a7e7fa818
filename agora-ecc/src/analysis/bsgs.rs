//! Mestre's baby-step giant-step point counting.
//!
//! `#E` lies in the Hasse interval `[p + 1 - 2√p, p + 1 + 2√p]` and is
//! annihilated by every point order. Points of `E` and of its quadratic
//! twist `E'` are sampled until the lcm of their orders leaves a single
//! candidate, using `#E + #E' = 2p + 2`. For `p > 229` one of the two
//! curves always has a point that pins the order; smaller fields may stay
//! ambiguous and are reported as such.

use super::Budget;
use crate::arithmetic::Point;
use crate::{Curve, EccError};

use log::{debug, trace, warn};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive};

use std::collections::HashMap;

const MAX_ROUNDS: usize = 64;
const MAX_CANDIDATES: u64 = 1 << 16;
// the table grows past this while the budget is checked
const TABLE_PREALLOCATION: u64 = 1 << 16;

struct HasseInterval {
    low: BigUint,
    high: BigUint,
}

impl HasseInterval {
    fn new(modulus: &BigUint) -> Self {
        // floor(2√p) = floor(√(4p))
        let radius = (modulus << 2u8).sqrt();
        let middle = modulus + 1u8;
        Self {
            low: &middle - &radius,
            high: middle + radius,
        }
    }

    fn width(&self) -> BigUint {
        &self.high - &self.low
    }

    /// First multiple of `step` inside the interval and how many there are.
    fn multiples(&self, step: &BigUint) -> (BigUint, BigUint) {
        let first = Integer::div_ceil(&self.low, step) * step;
        if first > self.high {
            (first, BigUint::from(0u8))
        } else {
            let count = (&self.high - &first) / step + 1u8;
            (first, count)
        }
    }
}

enum Search {
    /// The only multiple of the point's order inside the interval.
    Unique(BigUint),
    Order(BigUint),
    Empty,
}

/// All `m` in the interval with `m * point = O`, stopping at the second
/// one: two consecutive hits differ by exactly the order of the point.
fn search(
    curve: &Curve,
    point: &Point,
    interval: &HasseInterval,
    max_baby_steps: u64,
    budget: &Budget,
) -> Result<Search, EccError> {
    let steps = interval.width().sqrt() + 1u8;
    let baby_steps = steps
        .to_u64()
        .filter(|steps| *steps <= max_baby_steps)
        .ok_or_else(|| {
            EccError::ComputationTooExpensive(format!(
                "{} baby steps exceed the limit of {}",
                steps, max_baby_steps
            ))
        })?;

    let mut table = HashMap::with_capacity(baby_steps.min(TABLE_PREALLOCATION) as usize);
    let mut current = Point::IDENTITY;
    for j in 0..baby_steps {
        budget.check()?;
        if j > 0 && current.is_identity() {
            return Ok(Search::Order(BigUint::from(j)));
        }
        table.insert(current.clone(), j);
        current = curve.add(&current, point);
    }
    if current.is_identity() {
        return Ok(Search::Order(steps));
    }

    // the order now exceeds the block length, so each block of `steps`
    // consecutive multiples holds at most one hit
    let giant = current;
    let mut base = interval.low.clone();
    let mut giant_point = curve.mul_unsigned(point, &base);
    let mut first_hit: Option<BigUint> = None;
    while base <= interval.high {
        budget.check()?;
        if let Some(j) = table.get(&curve.negate(&giant_point)) {
            let hit = &base + *j;
            if hit <= interval.high {
                match first_hit.take() {
                    None => first_hit = Some(hit),
                    Some(previous) => return Ok(Search::Order(hit - previous)),
                }
            }
        }
        giant_point = curve.add(&giant_point, &giant);
        base += &steps;
    }

    Ok(match first_hit {
        Some(hit) => Search::Unique(hit),
        None => Search::Empty,
    })
}

struct Sampler {
    curve: Curve,
    next_x: BigUint,
    order_lcm: BigUint,
}

impl Sampler {
    fn new(curve: Curve) -> Self {
        Self {
            curve,
            next_x: BigUint::from(0u8),
            order_lcm: BigUint::one(),
        }
    }

    // deterministic walk over the abscissas
    fn next_point(&mut self) -> Option<Point> {
        let field = self.curve.field();
        while &self.next_x < field.modulus() {
            let x = field.element(self.next_x.clone());
            self.next_x += 1u8;
            if let Some(point) = self.curve.lift_x(&x) {
                return Some(point);
            }
        }
        None
    }
}

/// Candidates for `#E`: multiples of `lcm` in the interval whose twist
/// cofactor `2p + 2 - n` is a multiple of `twist_lcm`.
fn resolve(
    interval: &HasseInterval,
    lcm: &BigUint,
    twist_lcm: &BigUint,
    twist_sum: &BigUint,
) -> Option<BigUint> {
    let (first, count) = interval.multiples(lcm);
    let (twist_first, twist_count) = interval.multiples(twist_lcm);

    let mut candidates = Vec::new();
    if count <= twist_count {
        let count = count.to_u64().filter(|count| *count <= MAX_CANDIDATES)?;
        let mut n = first;
        for _ in 0..count {
            if ((twist_sum - &n) % twist_lcm) == BigUint::from(0u8) {
                candidates.push(n.clone());
            }
            n += lcm;
        }
    } else {
        let count = twist_count
            .to_u64()
            .filter(|count| *count <= MAX_CANDIDATES)?;
        let mut n = twist_first;
        for _ in 0..count {
            let order = twist_sum - &n;
            if (&order % lcm) == BigUint::from(0u8) {
                candidates.push(order);
            }
            n += twist_lcm;
        }
    }

    if candidates.len() == 1 {
        candidates.pop()
    } else {
        None
    }
}

/// `Ok(None)` when the order could not be pinned down within the round
/// limit; the caller decides whether to fall back to enumeration.
pub(crate) fn count(
    curve: &Curve,
    max_baby_steps: u64,
    budget: &Budget,
) -> Result<Option<BigUint>, EccError> {
    let modulus = curve.field().modulus();
    let interval = HasseInterval::new(modulus);
    let twist_sum = (modulus + 1u8) << 1u8;

    let twist = match curve.non_residue() {
        Some(d) => curve.quadratic_twist(&d)?,
        None => return Ok(None),
    };
    let mut samplers = [Sampler::new(curve.clone()), Sampler::new(twist)];

    for round in 0..MAX_ROUNDS {
        let on_twist = round % 2 == 1;
        let sampler = &mut samplers[round % 2];
        let point = match sampler.next_point() {
            Some(point) => point,
            None => continue,
        };

        let order = match search(&sampler.curve, &point, &interval, max_baby_steps, budget)? {
            Search::Unique(n) => {
                let order = if on_twist { &twist_sum - n } else { n };
                debug!(
                    "round {}: point {} pins #E = {} (twist: {})",
                    round, point, order, on_twist
                );
                return Ok(Some(order));
            }
            Search::Order(order) => order,
            Search::Empty => {
                warn!("no multiple of the order of {} in the Hasse interval", point);
                return Ok(None);
            }
        };

        sampler.order_lcm = sampler.order_lcm.lcm(&order);
        trace!(
            "round {}: point {} has order {} (twist: {}), lcm {}",
            round,
            point,
            order,
            on_twist,
            sampler.order_lcm
        );

        if let Some(order) = resolve(
            &interval,
            &samplers[0].order_lcm,
            &samplers[1].order_lcm,
            &twist_sum,
        ) {
            debug!("round {}: lcm of point orders pins #E = {}", round, order);
            return Ok(Some(order));
        }
    }

    Ok(None)
}
