use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error_handling::types::ConfigError;
use crate::namespaces;

/// Default storage budget, matching the host facility's usual allotment.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Runtime parameters for the persistence tier.
///
/// Loaded from a TOML file or constructed with [`Default`]. Validation
/// happens once at load time; everything past this point assumes a sane
/// configuration.
///
/// # Fields Overview
///
/// - `quota_bytes`: byte budget of the storage sink
/// - `storage_path`: where the file-backed sink keeps namespace files; when
///   absent the in-memory sink is used
/// - `eviction_priority`: disposable namespaces, most disposable first
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub quota_bytes: usize,
    pub storage_path: Option<PathBuf>,
    pub eviction_priority: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            quota_bytes: DEFAULT_QUOTA_BYTES,
            storage_path: None,
            eviction_priority: namespaces::default_eviction_priority(),
        }
    }
}

impl StoreConfig {
    /// Reads and validates a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: StoreConfig =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.quota_bytes == 0 {
            return Err(ConfigError::ZeroQuota);
        }
        if self.eviction_priority.is_empty() {
            return Err(ConfigError::EmptyPriorityList);
        }
        let mut seen = HashSet::new();
        for key in &self.eviction_priority {
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::DuplicateNamespace(key.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_are_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quota_bytes, DEFAULT_QUOTA_BYTES);
        assert_eq!(config.eviction_priority[0], namespaces::SESSION_RECORDINGS);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "quota_bytes = 1024\neviction_priority = [\"analytics_events\"]"
        )
        .unwrap();
        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.quota_bytes, 1024);
        assert_eq!(config.eviction_priority, vec!["analytics_events"]);
        assert!(config.storage_path.is_none());
    }

    #[test]
    fn zero_quota_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "quota_bytes = 0").unwrap();
        assert!(matches!(
            StoreConfig::from_file(file.path()),
            Err(ConfigError::ZeroQuota)
        ));
    }

    #[test]
    fn duplicate_priority_key_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "eviction_priority = [\"system_logs\", \"system_logs\"]"
        )
        .unwrap();
        assert!(matches!(
            StoreConfig::from_file(file.path()),
            Err(ConfigError::DuplicateNamespace(_))
        ));
    }

    #[test]
    fn empty_priority_list_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "eviction_priority = []").unwrap();
        assert!(matches!(
            StoreConfig::from_file(file.path()),
            Err(ConfigError::EmptyPriorityList)
        ));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "quota_bytes = ").unwrap();
        assert!(matches!(
            StoreConfig::from_file(file.path()),
            Err(ConfigError::TomlError(_))
        ));
    }
}
