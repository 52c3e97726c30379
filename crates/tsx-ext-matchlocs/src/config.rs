//! Extraction options.
//!
//! Applied from `key=value` control strings, e.g.
//! `"policy=hold-repeated, initial_capacity=16, growth=2"`.

use tracing::warn;
use tsx_error::{Result, TsError};

use crate::locate::ExclusionPolicy;

pub const DEFAULT_INITIAL_CAPACITY: usize = 6;
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.5;
/// Largest accepted growth factor.
pub const MAX_GROWTH_FACTOR: f64 = 8.0;

/// Policy and buffer schedule for one extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractorConfig {
    policy: ExclusionPolicy,
    initial_capacity: usize,
    growth_factor: f64,
}

impl ExtractorConfig {
    #[must_use]
    pub const fn new(policy: ExclusionPolicy) -> Self {
        Self {
            policy,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Parse a comma-separated list of `key=value` options over the
    /// defaults.
    pub fn parse(options: &str) -> Result<Self> {
        let mut config = Self::default();
        for item in options.split(',').filter(|s| !s.trim().is_empty()) {
            config.apply_option(item)?;
        }
        Ok(config)
    }

    /// Apply a single `key=value` option.
    pub fn apply_option(&mut self, option: &str) -> Result<()> {
        let trimmed = option.trim();
        let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
            warn!(option = trimmed, "extractor option without value");
            return Err(TsError::invalid_option(trimmed, "expected key=value"));
        };
        let key = raw_key.trim().to_ascii_lowercase().replace('-', "_");
        let value = raw_value.trim();

        let applied = match key.as_str() {
            "policy" => value.parse().map(|policy| self.policy = policy),
            "initial_capacity" => value
                .parse::<usize>()
                .map(|n| self.initial_capacity = n)
                .map_err(|_| TsError::invalid_option(&key, format!("not a count: '{value}'"))),
            "growth" | "growth_factor" => match value.parse::<f64>() {
                Ok(factor) if growth_in_range(factor) => {
                    self.growth_factor = factor;
                    Ok(())
                }
                _ => Err(TsError::invalid_option(
                    &key,
                    format!("growth must be between 1 and {MAX_GROWTH_FACTOR}, got '{value}'"),
                )),
            },
            _ => Err(TsError::invalid_option(&key, "unrecognized extractor option")),
        };
        if let Err(err) = &applied {
            warn!(option = %key, value, error = %err, "extractor option rejected");
        }
        applied
    }

    /// Fail if the growth factor is outside `1.0..=MAX_GROWTH_FACTOR`.
    pub fn validate(&self) -> Result<()> {
        if growth_in_range(self.growth_factor) {
            Ok(())
        } else {
            Err(TsError::invalid_option(
                "growth",
                format!("growth must be between 1 and {MAX_GROWTH_FACTOR}, got {}", self.growth_factor),
            ))
        }
    }

    #[must_use]
    pub const fn with_policy(mut self, policy: ExclusionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Growth factors outside the accepted range are caught by
    /// [`validate`](Self::validate) when a buffer is created.
    #[must_use]
    pub const fn with_growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> ExclusionPolicy {
        self.policy
    }

    #[must_use]
    pub const fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    #[must_use]
    pub const fn growth_factor(&self) -> f64 {
        self.growth_factor
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::new(ExclusionPolicy::Canonical)
    }
}

fn growth_in_range(factor: f64) -> bool {
    factor.is_finite() && (1.0..=MAX_GROWTH_FACTOR).contains(&factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.policy(), ExclusionPolicy::Canonical);
        assert_eq!(config.initial_capacity(), 6);
        assert!((config.growth_factor() - 1.5).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_options() {
        let config =
            ExtractorConfig::parse("policy=advance-through-skip, initial-capacity=16, growth=2")
                .unwrap();
        assert_eq!(config.policy(), ExclusionPolicy::AdvanceThroughSkip);
        assert_eq!(config.initial_capacity(), 16);
        assert!((config.growth_factor() - 2.0).abs() < f64::EPSILON);
        assert_eq!(ExtractorConfig::parse("").unwrap(), ExtractorConfig::default());
    }

    #[test]
    fn test_apply_rejects_bad_options() {
        let mut config = ExtractorConfig::default();
        assert!(config.apply_option("policy=sideways").is_err());
        assert!(config.apply_option("growth=0.5").is_err());
        assert!(config.apply_option("growth=NaN").is_err());
        assert!(config.apply_option("growth=100").is_err());
        assert!(config.apply_option("initial_capacity=-1").is_err());
        assert!(config.apply_option("secure-delete=1").is_err());
        assert!(config.apply_option("policy").is_err());
        assert_eq!(config, ExtractorConfig::default());
    }

    #[test]
    fn test_validate_catches_builder_values() {
        let config = ExtractorConfig::default().with_growth_factor(0.9);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TsError::InvalidOption { ref option, .. } if option == "growth"));
    }
}
