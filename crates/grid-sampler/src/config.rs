//! Sampler configuration.

use crate::error::{GridError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpolation method for point sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationMethod {
    /// Value of the closest grid point.
    Nearest,
    /// Bilinear over the four surrounding points, tolerating one hole.
    #[default]
    Bilinear,
}

impl InterpolationMethod {
    /// Parse from string (case-insensitive), defaulting to bilinear.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nearest" | "nn" => Self::Nearest,
            _ => Self::Bilinear,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for batch sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Interpolation method used when building interpolators from a dataset.
    pub interpolation: InterpolationMethod,

    /// Batches with at least this many coordinates are sampled in parallel.
    pub parallel_threshold: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interpolation: InterpolationMethod::Bilinear,
            parallel_threshold: 4096,
        }
    }
}

impl SamplerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_INTERPOLATION") {
            config.interpolation = InterpolationMethod::from_str(&val);
        }

        if let Ok(val) = std::env::var("SAMPLER_PARALLEL_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                config.parallel_threshold = threshold;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_threshold == 0 {
            return Err(GridError::invalid_config("parallel_threshold must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SamplerConfig::default();
        assert_eq!(config.interpolation, InterpolationMethod::Bilinear);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_invalid() {
        let config = SamplerConfig {
            parallel_threshold: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(GridError::InvalidConfig(_))));
    }

    #[test]
    fn test_interpolation_from_str() {
        assert_eq!(InterpolationMethod::from_str("NEAREST"), InterpolationMethod::Nearest);
        assert_eq!(InterpolationMethod::from_str("bilinear"), InterpolationMethod::Bilinear);
        assert_eq!(InterpolationMethod::from_str("unknown"), InterpolationMethod::Bilinear);
        assert_eq!(InterpolationMethod::Nearest.to_string(), "nearest");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&InterpolationMethod::Nearest).unwrap();
        assert_eq!(json, "\"nearest\"");
    }
}
