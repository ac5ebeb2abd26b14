// ABOUTME: Configuration file loading, environment overrides, and hierarchical merging for Easy8 CLI
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{Context, Result};
use easy8_sdk::constants::urls;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::{config as files, env};

/// Issue fields filled in when `issue create` does not pass them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub project_id: Option<u32>,
    #[serde(default)]
    pub tracker_id: Option<u32>,
    #[serde(default)]
    pub status_id: Option<u32>,
    #[serde(default)]
    pub priority_id: Option<u32>,
    #[serde(default)]
    pub author_id: Option<u32>,
    #[serde(default)]
    pub assigned_to_id: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub defaults: Defaults,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn non_zero(value: Option<u32>) -> Option<u32> {
    value.filter(|value| *value > 0)
}

impl Config {
    /// Load configuration from standard locations, then apply environment overrides
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        let config = Self::load_from_paths(&paths)?;
        Ok(config.apply_env(|key| std::env::var(key).ok()))
    }

    /// Load configuration from file paths, lowest precedence first.
    /// Missing files are skipped; unreadable or malformed files are errors.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            if !path.as_ref().exists() {
                continue;
            }
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })
    }

    /// Get standard config file paths in order of precedence (lowest first)
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(files::DIR_NAME)
                    .join(files::FILE_NAME),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            paths.push(
                PathBuf::from(config_home)
                    .join(files::DIR_NAME)
                    .join(files::FILE_NAME),
            );
        }

        // 3. Project-specific config
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(files::PROJECT_FILE_NAME));
        }

        paths.dedup();
        paths
    }

    /// Merge this config with another, giving precedence to the other config.
    /// Empty strings and zero IDs in `other` count as unset.
    pub fn merge(self, other: Config) -> Config {
        Config {
            base_url: non_empty(other.base_url).or(self.base_url),
            api_key: non_empty(other.api_key).or(self.api_key),
            defaults: self.defaults.merge(other.defaults),
        }
    }

    /// Override fields from environment variables looked up through `var`.
    /// Empty values and unparsable IDs are ignored.
    pub fn apply_env<F>(self, var: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let id = |key: &str| var(key).and_then(|value| value.trim().parse::<u32>().ok());

        let overrides = Config {
            base_url: var(env::BASE_URL),
            api_key: var(env::API_KEY),
            defaults: Defaults {
                project_id: id(env::DEFAULT_PROJECT_ID),
                tracker_id: id(env::DEFAULT_TRACKER_ID),
                status_id: id(env::DEFAULT_STATUS_ID),
                priority_id: id(env::DEFAULT_PRIORITY_ID),
                author_id: id(env::DEFAULT_AUTHOR_ID),
                assigned_to_id: id(env::DEFAULT_ASSIGNED_TO_ID),
            },
        };

        self.merge(overrides)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(urls::DEFAULT_BASE_URL)
    }

    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

impl Defaults {
    fn merge(self, other: Defaults) -> Defaults {
        Defaults {
            project_id: non_zero(other.project_id).or(self.project_id),
            tracker_id: non_zero(other.tracker_id).or(self.tracker_id),
            status_id: non_zero(other.status_id).or(self.status_id),
            priority_id: non_zero(other.priority_id).or(self.priority_id),
            author_id: non_zero(other.author_id).or(self.author_id),
            assigned_to_id: non_zero(other.assigned_to_id).or(self.assigned_to_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url(), "https://demo.easysoftware.com");
        assert_eq!(config.api_key(), "");
    }

    #[test]
    fn test_merge_configs() {
        let base = Config {
            base_url: Some("https://base.example.com".to_string()),
            api_key: Some("base-key".to_string()),
            defaults: Defaults {
                project_id: Some(1),
                tracker_id: Some(2),
                ..Default::default()
            },
        };

        let override_config = Config {
            base_url: Some("https://override.example.com".to_string()),
            api_key: Some(String::new()),
            defaults: Defaults {
                project_id: Some(9),
                tracker_id: Some(0),
                ..Default::default()
            },
        };

        let merged = base.merge(override_config);
        assert_eq!(merged.base_url(), "https://override.example.com");
        assert_eq!(merged.api_key(), "base-key");
        assert_eq!(merged.defaults.project_id, Some(9));
        assert_eq!(merged.defaults.tracker_id, Some(2));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("EASY8_API_KEY", "env-key"),
            ("EASY8_BASE_URL", ""),
            ("EASY8_DEFAULT_STATUS_ID", "4"),
            ("EASY8_DEFAULT_AUTHOR_ID", "not-a-number"),
        ]);
        let file = Config {
            base_url: Some("https://file.example.com".to_string()),
            defaults: Defaults {
                author_id: Some(7),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = file.apply_env(|key| vars.get(key).map(|value| value.to_string()));

        assert_eq!(config.api_key(), "env-key");
        assert_eq!(config.base_url(), "https://file.example.com");
        assert_eq!(config.defaults.status_id, Some(4));
        assert_eq!(config.defaults.author_id, Some(7));
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
base_url = "https://redmine.example.com"
api_key = "abc"

[defaults]
project_id = 3
assigned_to_id = 12
"#,
        )
        .unwrap();

        assert_eq!(config.base_url(), "https://redmine.example.com");
        assert_eq!(config.defaults.project_id, Some(3));
        assert_eq!(config.defaults.assigned_to_id, Some(12));
        assert!(config.defaults.tracker_id.is_none());
    }
}
