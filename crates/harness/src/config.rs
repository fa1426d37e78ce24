//! Harness configuration
//!
//! Settings resolve in layers: built-in defaults, then an optional TOML file,
//! then `VARACCESS_*` environment variables. Every field has a serde default,
//! so a partial file is valid.
//!
//! ```toml
//! iters = 10
//! weak_attempts = 10
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding [`HarnessConfig::iters`]
pub const ITERS_ENV: &str = "VARACCESS_ITERS";

/// Environment variable overriding [`HarnessConfig::weak_attempts`]
pub const WEAK_ATTEMPTS_ENV: &str = "VARACCESS_WEAK_ATTEMPTS";

/// Errors loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting has an unusable value
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Setting name
        key: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Iteration profile
///
/// Repeating every scenario many times lets an optimizing runtime reach its
/// compiled code paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunProfile {
    /// A handful of iterations
    #[default]
    Interpreted,
    /// Enough iterations to warm up compiled paths
    Compiled,
}

impl RunProfile {
    /// Iterations per looped scenario
    pub const fn iters(self) -> usize {
        match self {
            RunProfile::Interpreted => 10,
            RunProfile::Compiled => 20_000,
        }
    }
}

impl fmt::Display for RunProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunProfile::Interpreted => write!(f, "interpreted"),
            RunProfile::Compiled => write!(f, "compiled"),
        }
    }
}

impl FromStr for RunProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "interpreted" => Ok(RunProfile::Interpreted),
            "compiled" => Ok(RunProfile::Compiled),
            other => Err(ConfigError::InvalidValue {
                key: "profile",
                reason: format!("unknown profile '{}'", other),
            }),
        }
    }
}

/// Runner settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Repetitions of each scenario that requires looping
    #[serde(default = "default_iters")]
    pub iters: usize,

    /// Attempts allowed for a weak compare-and-set before the check fails
    #[serde(default = "default_weak_attempts")]
    pub weak_attempts: u32,
}

fn default_iters() -> usize {
    RunProfile::Interpreted.iters()
}

fn default_weak_attempts() -> u32 {
    10
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iters: default_iters(),
            weak_attempts: default_weak_attempts(),
        }
    }
}

impl HarnessConfig {
    /// Defaults with the iteration count of `profile`
    pub fn for_profile(profile: RunProfile) -> Self {
        Self {
            iters: profile.iters(),
            ..Self::default()
        }
    }

    /// Parse from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: HarnessConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(target: "varaccess::runner", path = %path.display(), ?config, "Loaded config file");
        Ok(config)
    }

    /// Apply `VARACCESS_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, a stand-in for the environment
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ITERS_ENV) {
            self.iters = parse_var(ITERS_ENV, &raw)?;
        }
        if let Some(raw) = lookup(WEAK_ATTEMPTS_ENV) {
            self.weak_attempts = parse_var(WEAK_ATTEMPTS_ENV, &raw)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject settings that would make the run meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.iters == 0 {
            return Err(ConfigError::InvalidValue {
                key: "iters",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.weak_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "weak_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Default configuration rendered as TOML
    pub fn default_toml() -> String {
        format!(
            "# Repetitions of each looped scenario ({} interpreted, {} compiled)\n\
             iters = {}\n\
             \n\
             # Attempts allowed for a weak compare-and-set to succeed\n\
             weak_attempts = {}\n",
            RunProfile::Interpreted.iters(),
            RunProfile::Compiled.iters(),
            default_iters(),
            default_weak_attempts(),
        )
    }
}

fn parse_var<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        reason: format!("'{}' is not a positive integer", raw),
    })
}
