// Copyright (c) 2025 Nikolay Denev <ndenev@gmail.com>
// SPDX-License-Identifier: BSD-3-Clause

//! Configuration persistence for annofilter
//!
//! Stores defaults so common invocations stay short.
//! All annofilter data is stored under ~/.annofilter/:
//! - ~/.annofilter/config.json - user configuration
//! - ~/.annofilter/log/ - rolling log files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Get the base annofilter directory (~/.annofilter/)
pub fn base_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|p| p.join(".annofilter"))
        .context("Could not determine home directory")
}

/// annofilter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Context used when --context is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_context: Option<String>,

    /// Resources listed when none are given on the command line
    #[serde(default)]
    pub default_resources: Vec<String>,

    /// Namespace used when --namespace is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl Config {
    /// Load config from ~/.annofilter/config.json, or defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to ~/.annofilter/config.json
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path` atomically (temp file + rename)
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        let temp_file = NamedTempFile::new_in(parent).context("Failed to create temp file")?;
        fs::write(temp_file.path(), content)
            .with_context(|| format!("Failed to write temp file {:?}", temp_file.path()))?;
        temp_file
            .persist(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Get the config file path (~/.annofilter/config.json)
    pub fn config_path() -> Result<PathBuf> {
        Ok(base_dir()?.join("config.json"))
    }

    /// Apply updates from the `config` subcommand. Returns true if anything changed.
    pub fn update(
        &mut self,
        context: Option<String>,
        resources: Option<Vec<String>>,
        namespace: Option<String>,
    ) -> bool {
        let before = self.clone();
        if let Some(context) = context {
            self.default_context = Some(context).filter(|c| !c.is_empty());
        }
        if let Some(resources) = resources {
            self.default_resources = resources
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect();
        }
        if let Some(namespace) = namespace {
            self.namespace = Some(namespace).filter(|n| !n.is_empty());
        }
        *self != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.default_context.is_none());
        assert!(config.default_resources.is_empty());
        assert!(config.namespace.is_none());
    }

    #[test]
    fn test_config_deserialize() {
        let json = r#"{"default_context": "prod", "default_resources": ["nodes", "deploy"]}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_context.as_deref(), Some("prod"));
        assert_eq!(config.default_resources, vec!["nodes", "deploy"]);
        assert!(config.namespace.is_none());
    }

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_serialize_skips_unset_options() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert_eq!(json, r#"{"default_resources":[]}"#);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let config = Config {
            default_context: Some("test-cluster".to_string()),
            default_resources: vec!["nodes".to_string()],
            namespace: Some("kube-system".to_string()),
        };
        config.save_to(&config_path).unwrap();

        let loaded = Config::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_update() {
        let mut config = Config::default();
        assert!(config.update(
            Some("prod".to_string()),
            Some(vec![" nodes".to_string(), "".to_string(), "deploy".to_string()]),
            None,
        ));
        assert_eq!(config.default_context.as_deref(), Some("prod"));
        assert_eq!(config.default_resources, vec!["nodes", "deploy"]);

        // Same values again: no change
        assert!(!config.update(Some("prod".to_string()), None, None));

        // Empty string unsets
        assert!(config.update(Some(String::new()), None, None));
        assert!(config.default_context.is_none());
    }
}
