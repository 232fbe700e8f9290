//! Repository configuration
//!
//! Stored as JSON. A missing file means defaults; unknown keys are rejected so
//! typos surface instead of silently falling back.

use anyhow::{Context, Result, anyhow};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default timestamp layout, one-second resolution.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How commit treats a tracked file that cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadPolicy {
    /// Commit empty content and log a warning.
    #[default]
    Lenient,
    /// Abort the commit with `ReadFailure`; nothing is appended.
    Strict,
}

/// Repository settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// strftime layout of revision timestamps.
    pub timestamp_format: String,
    /// Stamp revisions in UTC instead of local time.
    pub use_utc: bool,
    /// Behavior when the tracked file is unreadable at commit time.
    pub read_policy: ReadPolicy,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            use_utc: false,
            read_policy: ReadPolicy::Lenient,
        }
    }
}

impl RepositoryConfig {
    /// Load config from a JSON file, or defaults if it does not exist.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {:?}", config_path))?;
        let config: RepositoryConfig = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config JSON in {:?}", config_path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config as pretty JSON.
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let tmp_path = config_path.with_extension("tmp");
        let data = serde_json::to_string_pretty(self)?;
        fs::write(&tmp_path, &data)?;
        fs::rename(&tmp_path, config_path)?;
        Ok(())
    }

    /// Reject timestamp layouts chrono cannot render.
    pub fn validate(&self) -> Result<()> {
        if self.timestamp_format.is_empty() {
            return Err(anyhow!("timestamp_format must not be empty"));
        }
        let mut items = StrftimeItems::new(&self.timestamp_format);
        if items.any(|item| matches!(item, Item::Error)) {
            return Err(anyhow!(
                "Invalid timestamp_format: {:?}",
                self.timestamp_format
            ));
        }
        Ok(())
    }

    pub fn with_read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }
}
