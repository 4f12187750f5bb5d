//! Bracket engine configuration.

use serde::{Deserialize, Serialize};

/// Smallest bracket that can produce a champion
pub const MIN_BRACKET_SIZE: usize = 2;

/// Default maximum participant name length in characters
pub const DEFAULT_MAX_NAME_LEN: usize = 64;

/// Engine limits and roster policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketConfig {
    /// Participants required before a bracket can be generated (at least 2)
    pub min_participants: usize,

    /// Roster cap (`None` = unlimited)
    pub max_participants: Option<usize>,

    /// Maximum participant name length in characters
    pub max_name_len: usize,

    /// Strip surrounding whitespace from names before validating
    pub trim_names: bool,

    /// Seed for a reproducible shuffle (`None` = OS entropy)
    pub shuffle_seed: Option<u64>,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            min_participants: MIN_BRACKET_SIZE,
            max_participants: None,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            trim_names: true,
            shuffle_seed: None,
        }
    }
}

impl BracketConfig {
    /// Load configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `BRACKET_MIN_PARTICIPANTS`: participants needed to start (default: 2)
    /// - `BRACKET_MAX_PARTICIPANTS`: roster cap (default: unlimited)
    /// - `BRACKET_MAX_NAME_LEN`: name length limit (default: 64)
    /// - `BRACKET_TRIM_NAMES`: trim names before validation (default: true)
    /// - `BRACKET_SHUFFLE_SEED`: fixed shuffle seed (default: unset)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but cannot be
    /// parsed, or if the resulting configuration fails [`Self::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            min_participants: parse_env("BRACKET_MIN_PARTICIPANTS")?
                .unwrap_or(defaults.min_participants),
            max_participants: parse_env("BRACKET_MAX_PARTICIPANTS")?,
            max_name_len: parse_env("BRACKET_MAX_NAME_LEN")?.unwrap_or(defaults.max_name_len),
            trim_names: parse_env("BRACKET_TRIM_NAMES")?.unwrap_or(defaults.trim_names),
            shuffle_seed: parse_env("BRACKET_SHUFFLE_SEED")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_participants < MIN_BRACKET_SIZE {
            return Err(ConfigError::Invalid {
                var: "BRACKET_MIN_PARTICIPANTS".to_string(),
                reason: format!("Must be at least {MIN_BRACKET_SIZE}"),
            });
        }

        if self
            .max_participants
            .is_some_and(|max| max < self.min_participants)
        {
            return Err(ConfigError::Invalid {
                var: "BRACKET_MAX_PARTICIPANTS".to_string(),
                reason: format!(
                    "Must be at least min participants ({})",
                    self.min_participants
                ),
            });
        }

        if self.max_name_len == 0 {
            return Err(ConfigError::Invalid {
                var: "BRACKET_MAX_NAME_LEN".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Read and parse an optional environment variable.
///
/// Unset (or empty) yields `Ok(None)`; set but unparseable is an error.
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Invalid {
                    var: key.to_string(),
                    reason: format!("Cannot parse {value:?}"),
                })
        }
        _ => Ok(None),
    }
}
