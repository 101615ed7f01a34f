//! Inspector configuration.

use anyhow::{bail, Result};
use epak_parser::RunLengthPolicy;
use grid_sampler::SamplerConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Elements sampled for each block's content hash (0 hashes everything).
    pub hash_samples: usize,

    /// Emit logs as JSON lines instead of plain text.
    pub json_logs: bool,

    /// Policy for packed-delta run lengths.
    pub run_length_policy: RunLengthPolicy,

    /// Interpolation settings for `sample`.
    pub sampler: SamplerConfig,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            hash_samples: 1000,
            json_logs: false,
            run_length_policy: RunLengthPolicy::Clamp,
            sampler: SamplerConfig::default(),
        }
    }
}

impl InspectConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            sampler: SamplerConfig::from_env(),
            ..Self::default()
        };

        if let Ok(val) = env::var("EPAK_HASH_SAMPLES") {
            config.hash_samples = val
                .parse()
                .map_err(|_| anyhow::anyhow!("EPAK_HASH_SAMPLES must be a number, got {val:?}"))?;
        }

        if let Ok(val) = env::var("EPAK_LOG_JSON") {
            config.json_logs = val.to_lowercase() == "true" || val == "1";
        }

        if let Ok(val) = env::var("EPAK_RUN_LENGTH_POLICY") {
            config.run_length_policy = RunLengthPolicy::from_str(&val);
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Err(e) = self.sampler.validate() {
            bail!("invalid sampler config: {e}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = InspectConfig::default();
        assert_eq!(config.hash_samples, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_sampler_rejected() {
        let mut config = InspectConfig::default();
        config.sampler.parallel_threshold = 0;
        assert!(config.validate().is_err());
    }
}
