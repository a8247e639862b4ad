//! # Settings
//!
//! Session-wide configuration. Values come from, in increasing priority:
//!
//! 1. built-in defaults
//! 2. a JSON file (`micromech.json` in the working directory, or the path in
//!    `MICROMECH_CONFIG`)
//! 3. the `MICROMECH_OUTPUT_DIR` environment variable
//!
//! ```json
//! { "output_dir": "results", "log_filter": "micromech_core=debug" }
//! ```
//!
//! Missing keys fall back to their defaults. A missing file is not an error
//! unless it was named explicitly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{MechError, MechResult};

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "micromech.json";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "MICROMECH_CONFIG";

/// Environment variable overriding the export folder
pub const OUTPUT_DIR_ENV: &str = "MICROMECH_OUTPUT_DIR";

/// Default tracing filter
pub const DEFAULT_LOG_FILTER: &str = "micromech_core=info,micromech_cli=info";

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder receiving CSV and plot-data exports (created when missing)
    pub output_dir: PathBuf,
    /// `tracing_subscriber::EnvFilter` directives used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: PathBuf::from("output"),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the config file and the process environment.
    pub fn load() -> MechResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// [`Settings::load`] with an explicit environment lookup.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> MechResult<Self> {
        let mut settings = match env(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Settings::default()
                }
            }
        };
        if let Some(dir) = env(OUTPUT_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            settings.output_dir = PathBuf::from(dir.trim());
        }
        Ok(settings)
    }

    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> MechResult<Self> {
        if !path.exists() {
            return Err(MechError::file_not_found(path.display().to_string()));
        }
        let json = fs::read_to_string(path)
            .map_err(|e| MechError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings = serde_json::from_str(&json)?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "output_dir": "results" }"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("results"));
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "output_dir": "results", "log_filter": "debug" }"#).unwrap();

        let env = env_from(&[
            (CONFIG_ENV, path.display().to_string()),
            (OUTPUT_DIR_ENV, " exports ".to_string()),
        ]);
        let settings = Settings::load_with(env).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("exports"));
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn test_explicit_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let env = env_from(&[(CONFIG_ENV, missing.display().to_string())]);
        assert_eq!(Settings::load_with(env).unwrap_err().kind(), ErrorKind::NotFound);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        let env = env_from(&[(CONFIG_ENV, broken.display().to_string())]);
        assert_eq!(Settings::load_with(env).unwrap_err().kind(), ErrorKind::Io);
    }
}
