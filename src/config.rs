// Configuration loading.
// Reads config.json from the platform config directory, falling back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConsoleError, Result};
use crate::files;
use crate::state::ViewId;

/// User settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// View shown at startup.
    pub start_view: ViewId,
    /// Directory CSV exports are written to. Defaults to the download folder.
    pub export_dir: Option<PathBuf>,
    /// Log filter used when RUST_LOG is not set.
    pub log_level: String,
    /// How many notices are kept before the oldest are dropped.
    pub max_notices: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_view: ViewId::Dashboard,
            export_dir: None,
            log_level: "info".to_string(),
            max_notices: 200,
        }
    }
}

impl Config {
    /// Load from the platform config path, or defaults when there is none.
    pub fn load() -> Result<Self> {
        match files::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults, which are
    /// written back so there is a file to edit.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = match files::read_json::<Config>(path) {
            Ok(Some(config)) => config,
            Ok(None) => {
                let config = Self::default();
                if let Err(e) = files::write_json(path, &config) {
                    warn!(path = %path.display(), error = %e, "could not write default config");
                }
                config
            }
            Err(ConsoleError::Json(e)) => {
                return Err(ConsoleError::Config(format!("{}: {}", path.display(), e)));
            }
            Err(e) => return Err(e),
        };
        config.validate()?;
        debug!(?config, "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_notices == 0 {
            return Err(ConsoleError::Config(
                "max_notices must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(files::default_export_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        files::write_text(
            &path,
            r#"{ "start_view": "manage-participants", "export_dir": "/tmp/exports" }"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.start_view, ViewId::ManageParticipants);
        assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.max_notices, 200);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        files::write_text(&path, r#"{ "start_view": "nowhere" }"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn test_zero_notices_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        files::write_text(&path, r#"{ "max_notices": 0 }"#).unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
