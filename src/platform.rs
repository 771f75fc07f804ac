//! Storage capability of the platform the app runs on.
//!
//! Repositories consult a `StorageCapability` instead of branching on the
//! target themselves, so the "no embedded SQL" behaviour is one
//! implementation of the trait.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub trait StorageCapability: Send + Sync {
    /// Reads may hit the database
    fn can_read(&self) -> bool;

    /// Writes may hit the database
    fn can_write(&self) -> bool;
}

/// Native targets with a bundled SQLite
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedSql;

impl StorageCapability for EmbeddedSql {
    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        true
    }
}

/// Contexts without embedded SQL (e.g. a browser preview).
///
/// Reads degrade to empty lists, writes fail with `AppError::Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEmbeddedSql;

impl StorageCapability for NoEmbeddedSql {
    fn can_read(&self) -> bool {
        false
    }

    fn can_write(&self) -> bool {
        false
    }
}

/// `BANDMATE_STORAGE` setting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Auto,
    Embedded,
    None,
}

impl StorageMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(StorageMode::Auto),
            "embedded" | "sqlite" => Some(StorageMode::Embedded),
            "none" | "web" | "disabled" => Some(StorageMode::None),
            _ => None,
        }
    }
}

/// Pick the capability for this build and setting.
///
/// SQLite is bundled into every native build, so `Auto` only falls back to
/// `NoEmbeddedSql` on wasm targets.
pub fn detect(mode: StorageMode) -> Arc<dyn StorageCapability> {
    match mode {
        StorageMode::Embedded => Arc::new(EmbeddedSql),
        StorageMode::None => Arc::new(NoEmbeddedSql),
        StorageMode::Auto => {
            if cfg!(target_family = "wasm") {
                Arc::new(NoEmbeddedSql)
            } else {
                Arc::new(EmbeddedSql)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_mode() {
        assert_eq!(StorageMode::parse("auto"), Some(StorageMode::Auto));
        assert_eq!(StorageMode::parse(" Embedded "), Some(StorageMode::Embedded));
        assert_eq!(StorageMode::parse("web"), Some(StorageMode::None));
        assert_eq!(StorageMode::parse("floppy"), None);
    }

    #[test]
    fn test_detect() {
        assert!(detect(StorageMode::Embedded).can_write());
        assert!(!detect(StorageMode::None).can_read());
        assert!(detect(StorageMode::Auto).can_read());
    }
}
