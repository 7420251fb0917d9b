//! Engine settings.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::numeric::DEFAULT_DIGITS;

/// Numeric settings shared by evaluation and definite integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Significant digits kept in evaluated results
    #[serde(default = "default_digits")]
    pub digits: usize,
    /// Subintervals used by composite Simpson quadrature
    #[serde(default = "default_simpson_steps")]
    pub simpson_steps: usize,
}

fn default_digits() -> usize {
    DEFAULT_DIGITS
}

fn default_simpson_steps() -> usize {
    1000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            digits: default_digits(),
            simpson_steps: default_simpson_steps(),
        }
    }
}

impl EngineConfig {
    /// Reject unusable settings and round an odd step count up to even.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.digits == 0 {
            return Err(ConfigError::BadSetting("digits must be positive".into()));
        }
        if self.simpson_steps == 0 {
            return Err(ConfigError::BadSetting(
                "simpson_steps must be positive".into(),
            ));
        }
        Ok(Self {
            simpson_steps: self.simpson_steps + self.simpson_steps % 2,
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_steps_round_up_and_zero_is_rejected() {
        let cfg = EngineConfig {
            simpson_steps: 7,
            ..EngineConfig::default()
        };
        assert_eq!(cfg.validated().unwrap().simpson_steps, 8);

        let cfg = EngineConfig {
            simpson_steps: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(cfg.validated(), Err(ConfigError::BadSetting(_))));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"simpson_steps": 200}"#).unwrap();
        assert_eq!(cfg.digits, 28);
        assert_eq!(cfg.simpson_steps, 200);
    }
}
