//! Context file I/O

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::context as context_config;
use crate::error::{IbmError, Result};

use super::models::ContextConfig;

/// Reads and writes `~/.ibmctl/config.json`
pub struct ContextStore {
    config_path: PathBuf,
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextStore {
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(context_config::DIR_NAME)
            .join(context_config::FILE_NAME)
    }

    /// Load the file; a missing file is an empty configuration
    pub fn load(&self) -> Result<ContextConfig> {
        if !self.config_path.exists() {
            debug!("No context file at {}", self.config_path.display());
            return Ok(ContextConfig::default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            IbmError::Config(format!(
                "Failed to read context file {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            IbmError::Config(format!(
                "Failed to parse context file {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    /// Write the file atomically with owner-only permissions
    pub fn save(&self, config: &ContextConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                IbmError::Config(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| IbmError::Config(format!("Failed to serialize contexts: {}", e)))?;

        let tmp_path = self.config_path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| {
            IbmError::Config(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;

        // The file may hold API keys
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                IbmError::Config(format!("Failed to restrict permissions: {}", e))
            })?;
        }

        fs::rename(&tmp_path, &self.config_path).map_err(|e| {
            IbmError::Config(format!(
                "Failed to replace {}: {}",
                self.config_path.display(),
                e
            ))
        })?;
        debug!("Saved {} contexts", config.contexts.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::models::Context;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> ContextStore {
        ContextStore::with_path(dir.path().join("config.json"))
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = TempDir::new().unwrap();
        let config = test_store(&dir).load().unwrap();
        assert_eq!(config, ContextConfig::default());
    }

    #[test]
    fn test_load_corrupt_json_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        fs::write(store.path(), "{not json").unwrap();
        let err = store.load().unwrap_err().to_string();
        assert!(err.contains("Failed to parse context file"));
    }

    #[test]
    fn test_save_creates_parent_dir_and_roundtrips() {
        let dir = TempDir::new().unwrap();
        let store = ContextStore::with_path(dir.path().join("nested").join("config.json"));

        let mut config = ContextConfig {
            current_context: Some("dev".to_string()),
            ..Default::default()
        };
        config.contexts.insert(
            "dev".to_string(),
            Context {
                region: Some("us-east".to_string()),
                guid: Some("abc".to_string()),
                ..Default::default()
            },
        );
        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.save(&ContextConfig::default()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_default_config_path() {
        let path = ContextStore::new().path().to_string_lossy().to_string();
        assert!(path.contains(context_config::DIR_NAME));
        assert!(path.ends_with(context_config::FILE_NAME));
    }
}
