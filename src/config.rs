//! Global caldate configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalDateError, CalDateResult};
use crate::location::Location;

/// Configuration at ~/.config/caldate/config.toml
///
/// Every key can be overridden from the environment with a `CALDATE_`
/// prefix, e.g. `CALDATE_TIMEZONE=Europe/Oslo`.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaldateConfig {
    /// Default location for dates built without an explicit one.
    /// An IANA zone name or a fixed offset such as `+09:00`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl CaldateConfig {
    pub fn config_path() -> CalDateResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalDateError::Config("Could not determine config directory".into()))?
            .join("caldate");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path (if present) and the environment.
    pub fn load() -> CalDateResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> CalDateResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CALDATE"))
            .build()
            .map_err(|e| CalDateError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalDateError::Config(e.to_string()))
    }

    /// The configured location, if any.
    pub fn location(&self) -> CalDateResult<Option<Location>> {
        self.timezone.as_deref().map(str::parse).transpose()
    }

    /// Save the current config to ~/.config/caldate/config.toml
    pub fn save(&self) -> CalDateResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> CalDateResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalDateError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| CalDateError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalDateResult<()> {
        let contents = "\
# caldate configuration

# Location used for dates created without an explicit one.
# Defaults to the system timezone, then UTC.
# timezone = \"Europe/Oslo\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalDateError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalDateError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
