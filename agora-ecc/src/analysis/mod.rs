mod bsgs;
mod enumerate;
mod order;

pub use enumerate::points;
pub use order::{factorize, point_order};

use crate::arithmetic::Point;
use crate::config::{AnalysisConfig, CountingMethod};
use crate::{Curve, EccError};

use log::{debug, warn};
use num_bigint::{BigInt, BigUint};

use std::fmt;
use std::time::Instant;

/// Wall clock bound shared by the counting algorithms.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Budget {
    deadline: Option<Instant>,
}

impl Budget {
    pub(crate) fn new(config: &AnalysisConfig) -> Self {
        Self {
            deadline: config.deadline().map(|deadline| Instant::now() + deadline),
        }
    }

    #[cfg(test)]
    pub(crate) fn unlimited() -> Self {
        Self { deadline: None }
    }

    pub(crate) fn check(&self) -> Result<(), EccError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(
                EccError::ComputationTooExpensive("deadline exceeded".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// The result of analysing one curve: its group order and how it was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveSummary {
    curve: Curve,
    order: BigUint,
    method: CountingMethod,
}

impl CurveSummary {
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// `#E(F_p)`, the point at infinity included.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// The algorithm that produced the order, never `Auto`.
    pub fn method(&self) -> CountingMethod {
        self.method
    }

    /// Frobenius trace `p + 1 - #E`.
    pub fn trace(&self) -> BigInt {
        let modulus = BigInt::from(self.curve.field().modulus().clone());
        modulus + 1 - BigInt::from(self.order.clone())
    }
}

impl fmt::Display for CurveSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} has {} points", self.curve, self.order)
    }
}

fn enumeration_allowed(curve: &Curve, config: &AnalysisConfig) -> bool {
    curve.field().modulus() <= &BigUint::from(config.max_enumeration_modulus)
}

fn count_by_enumeration(
    curve: &Curve,
    config: &AnalysisConfig,
    budget: &Budget,
) -> Result<CurveSummary, EccError> {
    let order = enumerate::count(curve, config.max_enumeration_modulus, budget)?;
    Ok(CurveSummary {
        curve: curve.clone(),
        order,
        method: CountingMethod::Enumerate,
    })
}

fn count_by_bsgs(
    curve: &Curve,
    config: &AnalysisConfig,
    budget: &Budget,
) -> Result<CurveSummary, EccError> {
    let bits = curve.field().modulus().bits();
    if bits > config.max_modulus_bits {
        return Err(EccError::ComputationTooExpensive(format!(
            "{}-bit modulus exceeds the {}-bit limit",
            bits, config.max_modulus_bits
        )));
    }

    match bsgs::count(curve, config.max_baby_steps, budget)? {
        Some(order) => Ok(CurveSummary {
            curve: curve.clone(),
            order,
            method: CountingMethod::BabyStepGiantStep,
        }),
        None if enumeration_allowed(curve, config) => {
            warn!(
                "baby-step giant-step could not pin the order of {}, enumerating",
                curve
            );
            count_by_enumeration(curve, config, budget)
        }
        None => Err(EccError::ComputationTooExpensive(format!(
            "could not determine the order of {}",
            curve
        ))),
    }
}

/// Counts the points of `curve` with the configured method.
pub fn count_points(curve: &Curve, config: &AnalysisConfig) -> Result<CurveSummary, EccError> {
    let budget = Budget::new(config);
    let method = match config.method {
        CountingMethod::Auto if enumeration_allowed(curve, config) => CountingMethod::Enumerate,
        CountingMethod::Auto => CountingMethod::BabyStepGiantStep,
        method => method,
    };
    debug!("counting points of {} with {:?}", curve, method);

    let summary = match method {
        CountingMethod::Enumerate => count_by_enumeration(curve, config, &budget)?,
        _ => count_by_bsgs(curve, config, &budget)?,
    };
    debug!("{}", summary);
    Ok(summary)
}

/// Order of a specific point, using the group order as a known multiple.
pub fn group_order_of_point(
    curve: &Curve,
    point: &Point,
    config: &AnalysisConfig,
) -> Result<BigUint, EccError> {
    if let Some((x, y)) = point.coordinates() {
        if !curve.contains(point) {
            return Err(EccError::NotOnCurve {
                x: x.to_bigint(),
                y: y.to_bigint(),
            });
        }
    }
    let summary = count_points(curve, config)?;
    Ok(point_order(curve, point, summary.order()))
}
