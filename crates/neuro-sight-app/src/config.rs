//! Environment-driven runtime configuration.

use std::path::PathBuf;

use neuro_sight_core::{AnalysisType, CoreError};
use thiserror::Error;

/// Optional seed for reproducible randomness.
pub const ENV_SEED: &str = "NEURO_SIGHT_SEED";
/// Analysis id picked by the demo run.
pub const ENV_ANALYSIS: &str = "NEURO_SIGHT_ANALYSIS";
/// Directory exported reports are written to.
pub const ENV_EXPORT_DIR: &str = "NEURO_SIGHT_EXPORT_DIR";
/// Session gate switch.
pub const ENV_REQUIRE_SESSION: &str = "NEURO_SIGHT_REQUIRE_SESSION";
/// Email signed in by the demo; empty means signed out.
pub const ENV_DEMO_USER: &str = "NEURO_SIGHT_DEMO_USER";

/// Demo identity used when [`ENV_DEMO_USER`] is unset.
pub const DEFAULT_DEMO_USER: &str = "analyst@neurosight.local";

/// Dashboard runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Seed for the event source; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Analysis type the demo selects.
    pub analysis_type: AnalysisType,
    /// Export target directory.
    pub export_dir: PathBuf,
    /// Whether upload-and-analyze needs a session.
    pub require_session: bool,
    /// Identity the in-memory provider starts signed in as.
    pub demo_user: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: None,
            analysis_type: AnalysisType::All,
            export_dir: PathBuf::from("."),
            require_session: true,
            demo_user: Some(DEFAULT_DEMO_USER.to_string()),
        }
    }
}

impl DashboardConfig {
    /// Reads configuration from process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value when set.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidSeed`] for a non-numeric seed,
    /// [`ConfigError::InvalidAnalysis`] for an unknown analysis id and
    /// [`ConfigError::EmptyExportDir`] for a blank export directory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSeed(raw.clone()))?;
            config.seed = Some(seed);
        }

        if let Some(raw) = lookup(ENV_ANALYSIS) {
            config.analysis_type = raw.parse().map_err(ConfigError::InvalidAnalysis)?;
        }

        if let Some(raw) = lookup(ENV_EXPORT_DIR) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::EmptyExportDir);
            }
            config.export_dir = PathBuf::from(trimmed);
        }

        if let Some(raw) = lookup(ENV_REQUIRE_SESSION) {
            config.require_session = flag_enabled(&raw);
        }

        if let Some(raw) = lookup(ENV_DEMO_USER) {
            let trimmed = raw.trim();
            config.demo_user = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }

        Ok(config)
    }
}

/// Boolean switch semantics shared by all flags.
///
/// - `0`, `false`, `off` (case-insensitive) => disabled.
/// - Any other value => enabled.
pub fn flag_enabled(raw: &str) -> bool {
    let normalized = raw.trim().to_ascii_lowercase();
    !(normalized == "0" || normalized == "false" || normalized == "off")
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Seed was not an unsigned integer.
    #[error("invalid {ENV_SEED} value: {0:?}")]
    InvalidSeed(String),
    /// Analysis id not recognized.
    #[error("invalid {ENV_ANALYSIS} value: {0}")]
    InvalidAnalysis(#[source] CoreError),
    /// Export directory was blank.
    #[error("{ENV_EXPORT_DIR} must not be empty")]
    EmptyExportDir,
}
