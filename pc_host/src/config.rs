//! Host configuration management.
//!
//! Consolidates environment variable reads and command-line overrides into a
//! validated [`HostConfig`].

use pico_args::Arguments;
use poker_copilot::session::SessionConfig;
use std::str::FromStr;

pub const ENV_HERO_NAME: &str = "COPILOT_HERO_NAME";
pub const ENV_DEFAULT_CHIPS: &str = "COPILOT_DEFAULT_CHIPS";
pub const ENV_EQUITY_TRIALS: &str = "COPILOT_EQUITY_TRIALS";
pub const ENV_MAX_SEATS: &str = "COPILOT_MAX_SEATS";
pub const ENV_SEED: &str = "COPILOT_SEED";

/// Complete host configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    /// Configuration handed to the session
    pub session: SessionConfig,
    /// Seed for the host's generator; `None` seeds from the OS
    pub seed: Option<u64>,
}

/// Values given on the command line, taking priority over the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub hero: Option<String>,
    pub trials: Option<u32>,
    pub seed: Option<u64>,
}

impl Overrides {
    /// Read `--hero`, `--trials` and `--seed`.
    pub fn from_args(args: &mut Arguments) -> Result<Self, ConfigError> {
        Ok(Self {
            hero: opt_flag(args, "--hero")?,
            trials: opt_flag(args, "--trials")?,
            seed: opt_flag(args, "--seed")?,
        })
    }
}

fn opt_flag<T>(args: &mut Arguments, flag: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    args.opt_value_from_str(flag).map_err(|e| match e {
        pico_args::Error::OptionWithoutAValue(_) => ConfigError::MissingRequired {
            var: flag.to_string(),
            hint: format!("Pass a value, e.g. {flag} <VALUE>"),
        },
        other => ConfigError::Invalid {
            var: flag.to_string(),
            reason: other.to_string(),
        },
    })
}

impl HostConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F, overrides: Overrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SessionConfig::default();

        let hero_name = overrides
            .hero
            .or_else(|| lookup(ENV_HERO_NAME))
            .unwrap_or(defaults.hero_name);

        let equity_trials = match overrides.trials {
            Some(trials) => trials,
            None => parse_env_or(&lookup, ENV_EQUITY_TRIALS, defaults.equity_trials)?,
        };

        let seed = match overrides.seed {
            Some(seed) => Some(seed),
            None => lookup(ENV_SEED)
                .map(|raw| parse_value(ENV_SEED, &raw))
                .transpose()?,
        };

        let session = SessionConfig {
            hero_name,
            default_chips: parse_env_or(&lookup, ENV_DEFAULT_CHIPS, defaults.default_chips)?,
            equity_trials,
            max_seats: parse_env_or(&lookup, ENV_MAX_SEATS, defaults.max_seats)?,
        };

        Ok(HostConfig { session, seed })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.session
            .validate()
            .map_err(|reason| ConfigError::Invalid {
                var: "session".to_string(),
                reason,
            })
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required value for {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var: key.to_string(),
        reason: e.to_string(),
    })
}

/// Parse an environment variable, falling back to `default` when unset.
/// A set but malformed value is an error rather than a silent default.
fn parse_env_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}
