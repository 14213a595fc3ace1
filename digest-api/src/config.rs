//! Server configuration from environment variables

use digest_services::{OrchestrationPolicy, PipelineConfig, ScoringPreset, MAX_CACHE_TTL_SECS};
use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;

/// Errors raised while reading the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Everything the binary needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Preset used to score category digests
    pub scoring: ScoringPreset,
    pub pipeline: PipelineConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`; unset variables use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut pipeline = PipelineConfig::default();

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("SERVER_PORT", &raw, e))?,
            None => DEFAULT_PORT,
        };

        if let Some(raw) = lookup("DIGEST_ORCHESTRATION") {
            pipeline.orchestration = raw
                .parse::<OrchestrationPolicy>()
                .map_err(|e| ConfigError::invalid("DIGEST_ORCHESTRATION", &raw, e))?;
        }

        let mut scoring = ScoringPreset::default();
        if let Some(raw) = lookup("DIGEST_SCORING") {
            scoring = raw
                .parse::<ScoringPreset>()
                .map_err(|e| ConfigError::invalid("DIGEST_SCORING", &raw, e))?;
            pipeline.category_scoring = scoring.policy();
        }

        if let Some(raw) = lookup("DIGEST_MAX_ARTICLES") {
            let max = raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::invalid("DIGEST_MAX_ARTICLES", &raw, e))?;
            if max == 0 {
                return Err(ConfigError::invalid(
                    "DIGEST_MAX_ARTICLES",
                    &raw,
                    "must be at least 1",
                ));
            }
            pipeline = pipeline.with_max_articles(max);
        }

        if let Some(raw) = lookup("DIGEST_CACHE_TTL_SECS") {
            let ttl = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("DIGEST_CACHE_TTL_SECS", &raw, e))?;
            if ttl > MAX_CACHE_TTL_SECS {
                return Err(ConfigError::invalid(
                    "DIGEST_CACHE_TTL_SECS",
                    &raw,
                    format!("must be at most {}", MAX_CACHE_TTL_SECS),
                ));
            }
            pipeline.cache_ttl_secs = ttl;
        }

        Ok(Self {
            port,
            scoring,
            pipeline,
        })
    }
}
