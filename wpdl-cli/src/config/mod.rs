//! Optional settings file.
//!
//! ```toml
//! output = "images"
//!
//! [fetch]
//! user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
//! per_page = 100
//! page_delay_ms = 500
//!
//! [download]
//! download_delay_ms = 300
//! timeout_secs = 30
//! ```
//!
//! The file is read from `$WPDL_CONFIG_DIR/config.toml` when the variable is set, otherwise
//! from the platform config directory. Every key is optional.
use std::{
    env,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::debug;
use serde::Deserialize;
use wpdl_core::queue::QueueOpts;
use wpdl_extractors::extractor_config::ServerConfig;

use crate::error::CliError;

pub const CONFIG_DIR_ENV: &str = "WPDL_CONFIG_DIR";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "images";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output: PathBuf,
    pub fetch: ServerConfig,
    pub download: QueueOpts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            fetch: ServerConfig::default(),
            download: QueueOpts::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `explicit` if given, otherwise from the default location.
    ///
    /// A missing default file means built-in defaults. A missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = default_settings_path()?;
                if !path.exists() {
                    debug!("No settings file at {}, using defaults", path.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        let contents = read_to_string(&path)?;
        let settings = Self::from_toml_str(&contents, &path)?;
        debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, CliError> {
        toml::from_str(contents).map_err(|e| CliError::SettingsParseFail {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Location of the settings file when `--config` isn't given.
pub fn default_settings_path() -> Result<PathBuf, CliError> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        return Ok(Path::new(&dir).join(CONFIG_FILE_NAME));
    }

    let dirs = ProjectDirs::from("org", "wpdl", "wp-image-downloader").ok_or(CliError::NoConfigDir)?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_file_is_all_defaults() {
        let settings = Settings::from_toml_str("", Path::new("config.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_tables_override_only_their_keys() {
        let raw = r#"
            output = "/tmp/pictures"

            [fetch]
            per_page = 20

            [download]
            timeout_secs = 5
        "#;

        let settings = Settings::from_toml_str(raw, Path::new("config.toml")).unwrap();

        assert_eq!(settings.output, PathBuf::from("/tmp/pictures"));
        assert_eq!(settings.fetch.per_page, 20);
        assert_eq!(settings.fetch.page_delay_ms, 500);
        assert_eq!(settings.download.timeout_secs, 5);
        assert_eq!(settings.download.download_delay_ms, 300);
    }

    #[test]
    fn malformed_file_is_reported() {
        let result = Settings::from_toml_str("[fetch\nper_page = ", Path::new("bad.toml"));
        assert!(matches!(result, Err(CliError::SettingsParseFail { .. })));
    }

    #[test]
    fn explicit_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wpdl.toml");
        fs::write(&path, "[download]\ndownload_delay_ms = 0\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.download.download_delay_ms, 0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Settings::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::IOError { .. })));
    }
}
