//! Drill configuration loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::generator::Generator;
use crate::operation::{default_operations, Operation};
use crate::session::Countdown;
use crate::validator::{Validator, DEFAULT_POINTS, DEFAULT_PRECISION, DEFAULT_TOLERANCE};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "numdrill.toml";

/// Overrides `session.duration_secs`.
pub const DURATION_ENV_VAR: &str = "NUMDRILL_DURATION_SECS";

/// Top-level numdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    /// The operation table. Omitting it keeps the standard seven operations.
    #[serde(default = "default_operations")]
    pub operations: Vec<Operation>,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            validation: ValidationConfig::default(),
            operations: default_operations(),
        }
    }
}

/// Timing and scoring for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Time budget in seconds.
    #[serde(default = "default_duration")]
    pub duration_secs: u32,
    /// Points per correct answer.
    #[serde(default = "default_points")]
    pub points_per_correct: u32,
    /// Remaining seconds at which the clock is shown as a warning.
    #[serde(default = "default_warning")]
    pub warning_secs: u32,
}

fn default_duration() -> u32 {
    60
}
fn default_points() -> u32 {
    DEFAULT_POINTS
}
fn default_warning() -> u32 {
    10
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_duration(),
            points_per_correct: default_points(),
            warning_secs: default_warning(),
        }
    }
}

/// Answer checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Decimal places for non-integral expected values.
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}
fn default_precision() -> usize {
    DEFAULT_PRECISION
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            precision: default_precision(),
        }
    }
}

impl DrillConfig {
    /// Reject settings that would make a session meaningless or emit bad problems.
    pub fn check(&self) -> Result<(), DrillError> {
        if self.session.duration_secs == 0 {
            return Err(DrillError::ZeroDuration);
        }
        self.validator()?;
        Generator::from_config(self)?;
        Ok(())
    }

    pub fn validator(&self) -> Result<Validator, DrillError> {
        Validator::new(
            self.validation.tolerance,
            self.validation.precision,
            self.session.points_per_correct,
        )
    }

    pub fn countdown(&self) -> Countdown {
        Countdown::new(self.session.duration_secs, self.session.warning_secs)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(DURATION_ENV_VAR) {
            match raw.trim().parse::<u32>() {
                Ok(secs) => self.session.duration_secs = secs,
                Err(_) => tracing::warn!(
                    "ignoring {DURATION_ENV_VAR}={raw:?}: not a number of seconds"
                ),
            }
        }
    }
}

/// Parse a TOML string into a `DrillConfig`.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<DrillConfig> {
    toml::from_str::<DrillConfig>(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))
}

/// Load config from an explicit path, or `numdrill.toml` in the working
/// directory, or the built-in defaults, then apply environment overrides and
/// check the result.
pub fn load_config_from(path: Option<&Path>) -> Result<DrillConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from(CONFIG_FILE_NAME)).filter(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content, &path)?
        }
        None => DrillConfig::default(),
    };

    config.apply_env_overrides(|name| std::env::var(name).ok());
    config.check().context("invalid configuration")?;
    Ok(config)
}

/// Starter config written by `numdrill init`.
pub const SAMPLE_CONFIG: &str = r#"# numdrill configuration

[session]
duration_secs = 60
points_per_correct = 10
warning_secs = 10

[validation]
tolerance = 0.0001
precision = 2

# Relative weights decide how often each operation is asked.
[[operations]]
kind = "add"
weight = 20
min = 1
max = 50

[[operations]]
kind = "subtract"
weight = 20
min = 1
max = 100

[[operations]]
kind = "multiply"
weight = 25
min = 1
max = 12

[[operations]]
kind = "divide"
weight = 15
max_divisor = 10
max_quotient = 10

[[operations]]
kind = "power"
weight = 10
min_base = 2
max_base = 6
min_exponent = 2
max_exponent = 4

[[operations]]
kind = "root"
weight = 5
degree = 2
min_result = 1
max_result = 10

[[operations]]
kind = "modulo"
weight = 5
min_modulus = 2
max_modulus = 11
max_multiplier = 10
"#;
