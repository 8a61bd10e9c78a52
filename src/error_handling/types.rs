use std::fmt;

/// Failures reported by a storage sink or by the typed store layer.
///
/// These never cross the public `PersistentStore` surface: `write` swallows
/// them into log entries and `read` degrades to the caller's default. They
/// exist so the store and the eviction coordinator can tell a capacity
/// failure apart from everything else.
#[derive(Debug)]
pub enum StorageError {
    /// The host sink refused the write because the storage budget is spent.
    QuotaExceeded,
    WriteFailed(String),
    ReadFailed(String),
    Serialization(String),
}

impl StorageError {
    /// Normalizes a raw host-reported condition into our taxonomy.
    ///
    /// The host signals capacity exhaustion either by the condition name
    /// `QuotaExceededError` or by the legacy numeric code 22. Anything else
    /// is an unrelated write failure and is never retried.
    pub fn from_host_condition(name: &str, code: u32) -> Self {
        if name == "QuotaExceededError" || code == 22 {
            StorageError::QuotaExceeded
        } else {
            StorageError::WriteFailed(format!("{} (code {})", name, code))
        }
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QuotaExceeded => write!(f, "Storage quota exceeded"),
            StorageError::WriteFailed(e) => write!(f, "Storage write failed: {}", e),
            StorageError::ReadFailed(e) => write!(f, "Storage read failed: {}", e),
            StorageError::Serialization(e) => write!(f, "Serialization failed: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Errors raised while loading and validating the store configuration.
///
/// Configuration loading happens before the tier is wired up, so this is the
/// one place where errors are returned to the caller instead of logged.
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    TomlError(String),
    ZeroQuota,
    EmptyPriorityList,
    DuplicateNamespace(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parsing error: {}", e),
            ConfigError::ZeroQuota => write!(f, "Storage quota must be greater than zero"),
            ConfigError::EmptyPriorityList => {
                write!(f, "Eviction priority list must not be empty")
            }
            ConfigError::DuplicateNamespace(k) => {
                write!(f, "Duplicate namespace in eviction priority list: {}", k)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_condition_recognized_by_name() {
        let err = StorageError::from_host_condition("QuotaExceededError", 0);
        assert!(err.is_quota_exceeded());
    }

    #[test]
    fn quota_condition_recognized_by_code() {
        let err = StorageError::from_host_condition("NS_ERROR_DOM_QUOTA_REACHED", 22);
        assert!(err.is_quota_exceeded());
    }

    #[test]
    fn unrelated_condition_is_not_quota() {
        let err = StorageError::from_host_condition("SecurityError", 18);
        assert!(!err.is_quota_exceeded());
    }
}
