use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

/// Where the member directory is fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_members_url")]
    pub members_url: String,
}

/// The cosmetic entry gate. Not an auth system — a shared phrase shown to
/// community members, compared client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default = "default_gate_enabled")]
    pub enabled: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            members_url: default_members_url(),
        }
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: default_gate_enabled(),
        }
    }
}

fn default_members_url() -> String {
    "https://cop-wes-member-directory-backend.onrender.com/members".to_string()
}

fn default_gate_enabled() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: DirectoryConfig::default(),
            gate: GateConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.directory.members_url.starts_with("https://"));
        assert!(config.directory.members_url.ends_with("/members"));
        assert!(config.gate.enabled);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[gate]\nenabled = false\n").unwrap();
        assert!(!config.gate.enabled);
        assert_eq!(
            config.directory.members_url,
            Config::default().directory.members_url
        );
    }
}
