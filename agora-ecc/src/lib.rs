#![deny(clippy::dbg_macro)]
#![deny(clippy::all)]

pub mod analysis;
pub mod arithmetic;
pub mod config;
mod curve;
mod error;
pub mod prefilter;

pub use crate::analysis::CurveSummary;
pub use crate::config::{AnalysisConfig, CountingMethod};
pub use crate::curve::Curve;
pub use crate::error::EccError;

use num_bigint::BigInt;

/// Validates `y^2 = x^3 + ax + b` over `F_p` and counts its points.
pub fn analyze<T: Into<BigInt>>(
    p: T,
    a: T,
    b: T,
    config: &AnalysisConfig,
) -> Result<CurveSummary, EccError> {
    let curve = Curve::from_params(p, a, b)?.with_verification(config.verify_points);
    analysis::count_points(&curve, config)
}

pub fn get_result_with<T: Into<BigInt>>(
    p: T,
    a: T,
    b: T,
    config: &AnalysisConfig,
) -> Result<String, EccError> {
    analyze(p, a, b, config).map(|summary| summary.to_string())
}

/// Human readable analysis of a curve with the default configuration.
pub fn get_result<T: Into<BigInt>>(p: T, a: T, b: T) -> Result<String, EccError> {
    get_result_with(p, a, b, &AnalysisConfig::default())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn textbook_result() {
        assert_eq!(
            get_result(23, 1, 1).unwrap(),
            "y^2 = x^3 + 1x + 1 (mod 23) has 28 points"
        );
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            get_result(0, 1, 1),
            Err(EccError::InvalidModulus(_))
        ));
        assert!(matches!(
            get_result(23, 0, 0),
            Err(EccError::DegenerateCurve(_))
        ));
        assert!(matches!(
            get_result(2, 1, 1),
            Err(EccError::DegenerateCurve(_))
        ));
        assert!(matches!(
            get_result(15, 1, 1),
            Err(EccError::CompositeModulus(_))
        ));
        assert_eq!(
            get_result(2, 1, 1).unwrap_err().to_string(),
            "degenerate curve: 4a^3 + 27b^2 vanishes modulo 2"
        );
    }

    #[test]
    fn verification_mode_keeps_results() {
        let config = AnalysisConfig {
            verify_points: true,
            ..AnalysisConfig::default()
        };
        let summary = analyze(3, 1, 1, &config).unwrap();
        assert!(summary.curve().verifies_points());
        assert_eq!(summary.to_string(), "y^2 = x^3 + 1x + 1 (mod 3) has 4 points");
    }
}
