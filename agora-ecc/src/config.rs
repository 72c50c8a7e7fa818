use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

use std::time::Duration;

pub const DEFAULT_MAX_ENUMERATION_MODULUS: u64 = 1 << 20;
pub const DEFAULT_MAX_MODULUS_BITS: u64 = 64;
pub const DEFAULT_MAX_BABY_STEPS: u64 = 1 << 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingMethod {
    /// Enumerate small fields, baby-step giant-step otherwise.
    #[default]
    Auto,
    /// Legendre symbol of `x^3 + ax + b` for every `x`, `O(p)`.
    Enumerate,
    /// Mestre's baby-step giant-step search in the Hasse interval.
    BabyStepGiantStep,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub method: CountingMethod,
    /// Largest modulus that may be counted by enumeration.
    pub max_enumeration_modulus: u64,
    /// Largest modulus, in bits, accepted by baby-step giant-step.
    pub max_modulus_bits: u64,
    /// Size of the baby-step table, checked before it is built.
    pub max_baby_steps: u64,
    pub deadline_ms: Option<u64>,
    /// Check group law outputs against the curve equation in release builds.
    pub verify_points: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            method: CountingMethod::default(),
            max_enumeration_modulus: DEFAULT_MAX_ENUMERATION_MODULUS,
            max_modulus_bits: DEFAULT_MAX_MODULUS_BITS,
            max_baby_steps: DEFAULT_MAX_BABY_STEPS,
            deadline_ms: None,
            verify_points: false,
        }
    }
}

impl AnalysisConfig {
    /// Defaults overridden by `ECC_*` environment variables, e.g.
    /// `ECC_METHOD=enumerate` or `ECC_DEADLINE_MS=500`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .add_source(Environment::with_prefix("ECC").try_parsing(true))
            .build()?;
        Self::from_config(conf)
    }

    pub fn from_config(conf: Config) -> Result<Self, ConfigError> {
        conf.try_deserialize()
    }

    pub fn with_method(mut self, method: CountingMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline_ms = Some(u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }
}
