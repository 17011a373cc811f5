//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Sentinel value meaning the Discord webhook has not been configured yet.
pub const WEBHOOK_PLACEHOLDER: &str = "REPLACE WITH YOUR DISCORD WEBHOOK";

/// Root application configuration.
///
/// Stored as TOML at `~/.yasku`. Every field falls back to its documented
/// default when the key is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Cache folder name, relative to the user's home directory
    #[serde(rename = "defaultFolder", default = "defaults::default_folder")]
    pub default_folder: String,

    /// Maximum number of search results per topic
    #[serde(default = "defaults::max_search")]
    pub max_search: u32,

    /// Topics to poll, in notification order
    #[serde(default = "defaults::topics")]
    pub topics: Vec<String>,

    /// Discord webhook URL
    #[serde(rename = "discordWebhook", default = "defaults::webhook")]
    pub discord_webhook: String,

    /// Display name used when posting embeds
    #[serde(default = "defaults::username")]
    pub username: String,

    /// HTTP request timeout in seconds
    #[serde(default = "defaults::timeout", skip_serializing)]
    pub timeout_secs: u64,
}

impl Config {
    /// Fixed path of the configuration file under the user's home directory.
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::config("could not determine home directory"))?;
        Ok(home.join(".yasku"))
    }

    /// Cache folder, resolved against the user's home directory.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::config("could not determine home directory"))?;
        Ok(home.join(&self.default_folder))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load the configuration, creating the file with defaults if missing.
    ///
    /// A malformed file is reported and the run continues on defaults; a
    /// missing file is written out so the user can edit it.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            match Self::load(path) {
                Ok(config) => Ok(config),
                Err(error) => {
                    log::error!(
                        "Error parsing {}: {}. Using default configuration.",
                        path.display(),
                        error
                    );
                    Ok(Self::default())
                }
            }
        } else {
            log::info!(
                "No config file found at {}, creating default config.",
                path.display()
            );
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.max_search == 0 {
            return Err(AppError::config("max_search must be > 0"));
        }
        if self.topics.is_empty() {
            return Err(AppError::config("topics must not be empty"));
        }
        if self.topics.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::config("topics must not contain empty entries"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config("timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Whether a usable webhook URL has been configured.
    pub fn webhook_configured(&self) -> bool {
        !self.discord_webhook.is_empty() && self.discord_webhook != WEBHOOK_PLACEHOLDER
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_folder: defaults::default_folder(),
            max_search: defaults::max_search(),
            topics: defaults::topics(),
            discord_webhook: defaults::webhook(),
            username: defaults::username(),
            timeout_secs: defaults::timeout(),
        }
    }
}

mod defaults {
    use super::WEBHOOK_PLACEHOLDER;

    pub fn default_folder() -> String {
        ".yasku_cache".into()
    }
    pub fn max_search() -> u32 {
        10
    }
    pub fn topics() -> Vec<String> {
        vec!["RNAseq".into()]
    }
    pub fn webhook() -> String {
        WEBHOOK_PLACEHOLDER.into()
    }
    pub fn username() -> String {
        "Yasku".into()
    }
    pub fn timeout() -> u64 {
        30
    }
}
