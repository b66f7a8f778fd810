use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A config file that exists but could not be used.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub book: BookConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
    /// Start with the chapter sidebar collapsed.
    pub sidebar_collapsed: bool,
}

/// Data and dataset location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (logs live here).
    pub data_dir: Option<PathBuf>,
    /// Chapter dataset to load instead of the bundled sample.
    pub dataset_path: Option<PathBuf>,
}

/// Header metadata for the book being read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    pub title: String,
    pub author: Option<String>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_enabled: false,
            sidebar_collapsed: false,
        }
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: "Memoir Reader".to_string(),
            author: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/memoir-reader/config.toml`.
    ///
    /// Falls back to `Default` when the file is missing or unusable; the
    /// error is handed back so it can be reported once logging is up.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::try_load_from(&Self::config_path()) {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load configuration from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        match Self::try_load_from(config_path) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Read and parse `config_path`. `Ok(None)` means there is no file.
    pub fn try_load_from(config_path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match std::fs::read_to_string(config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: config_path.to_path_buf(),
                    source,
                })
            }
        };
        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("memoir-reader"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Dataset to open: explicit CLI path first, then config, else `None`
    /// for the bundled sample.
    pub fn dataset_path(&self, cli_path: Option<PathBuf>) -> Option<PathBuf> {
        cli_path.or_else(|| self.data.dataset_path.clone())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("memoir-reader").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tui.tick_rate_ms, 250);
        assert!(!config.tui.mouse_enabled);
        assert!(!config.tui.sidebar_collapsed);
        assert!(config.data.data_dir.is_none());
        assert!(config.data.dataset_path.is_none());
        assert_eq!(config.book.title, "Memoir Reader");
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_config_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tui = [not toml").unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.book.title, "Memoir Reader");
    }

    #[test]
    fn test_malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tui = [not toml").unwrap();
        let err = AppConfig::try_load_from(&path).unwrap_err();
        assert!(matches!(&err, ConfigError::Parse { path: p, .. } if p == &path));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let result = AppConfig::try_load_from(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_directory_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::try_load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[book]\ntitle = \"Will's Boy\"\nauthor = \"Wright Morris\"\n",
        )
        .unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.book.title, "Will's Boy");
        assert_eq!(config.book.author.as_deref(), Some("Wright Morris"));
        assert_eq!(config.tui.tick_rate_ms, 250);
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn test_dataset_path_precedence() {
        let mut config = AppConfig::default();
        assert_eq!(config.dataset_path(None), None);
        config.data.dataset_path = Some(PathBuf::from("/cfg.json"));
        assert_eq!(config.dataset_path(None), Some(PathBuf::from("/cfg.json")));
        assert_eq!(
            config.dataset_path(Some(PathBuf::from("/cli.json"))),
            Some(PathBuf::from("/cli.json"))
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.tui.tick_rate_ms, config.tui.tick_rate_ms);
        assert_eq!(deserialized.book.title, config.book.title);
    }
}
