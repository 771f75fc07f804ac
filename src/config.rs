use std::path::{Path, PathBuf};

use tracing::error;

use crate::platform::StorageMode;

pub const DEFAULT_DB_FILE: &str = "bandmate.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Firebase project settings. Only `api_key` is needed for email/password
/// auth; the rest is kept for diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
}

impl FirebaseConfig {
    pub fn is_complete(&self) -> bool {
        self.api_key.is_some() && self.auth_domain.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub firebase: FirebaseConfig,
    pub db_file_name: String,
    pub storage: StorageMode,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            firebase: FirebaseConfig::default(),
            db_file_name: DEFAULT_DB_FILE.to_string(),
            storage: StorageMode::Auto,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment, reading `.env` first.
    /// A missing `.env` is not an error.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let storage = match get("BANDMATE_STORAGE") {
            Some(value) => StorageMode::parse(&value).unwrap_or_else(|| {
                error!("Unknown BANDMATE_STORAGE value {:?}, using auto", value);
                StorageMode::Auto
            }),
            None => defaults.storage,
        };

        Self {
            firebase: FirebaseConfig {
                api_key: get("BANDMATE_FIREBASE_API_KEY"),
                auth_domain: get("BANDMATE_FIREBASE_AUTH_DOMAIN"),
                project_id: get("BANDMATE_FIREBASE_PROJECT_ID"),
            },
            db_file_name: get("BANDMATE_DB_FILE").unwrap_or(defaults.db_file_name),
            storage,
            log_level: get("BANDMATE_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Log missing Firebase settings. Not fatal: auth calls fail later
    /// with a configuration error instead.
    pub fn report_missing(&self) {
        if !self.firebase.is_complete() {
            error!("Firebase configuration is missing. Please check your .env file.");
        }
    }

    /// Database file inside the app data directory
    pub fn db_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.db_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.db_file_name, "bandmate.db");
        assert!(!config.firebase.is_complete());
    }

    #[test]
    fn test_values_from_lookup() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BANDMATE_FIREBASE_API_KEY", "key"),
            ("BANDMATE_FIREBASE_AUTH_DOMAIN", "band.firebaseapp.com"),
            ("BANDMATE_DB_FILE", "test.db"),
            ("BANDMATE_STORAGE", "none"),
            ("BANDMATE_LOG", "debug"),
        ]));
        assert_eq!(config.firebase.api_key.as_deref(), Some("key"));
        assert!(config.firebase.is_complete());
        assert_eq!(config.db_file_name, "test.db");
        assert_eq!(config.storage, StorageMode::None);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_blank_and_unknown_values() {
        let config = AppConfig::from_lookup(lookup(&[
            ("BANDMATE_FIREBASE_API_KEY", "   "),
            ("BANDMATE_STORAGE", "tape"),
        ]));
        assert!(config.firebase.api_key.is_none());
        assert_eq!(config.storage, StorageMode::Auto);
    }

    #[test]
    fn test_db_path() {
        let config = AppConfig::default();
        assert_eq!(
            config.db_path(Path::new("/data/app")),
            PathBuf::from("/data/app/bandmate.db")
        );
    }
}
