use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use config::{Config as RConfig, Environment, File, FileFormat};
use wobserver_common::constants::{
    APP_DIR_NAME, DEFAULT_AJAX_SERVER, DEFAULT_WSS_SERVER, ENV_PREFIX, EXPERIMENTAL_WEBSOCKET,
    STORAGE_FILE_NAME,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Endpoint used until the stored `process-server` value (if any) is loaded.
    pub ajax_server: String,
    pub wss_server: String,
    pub experimental_websocket: bool,

    pub storage_path: PathBuf,
    pub log_dir: PathBuf,

    pub request_timeout_ms: Option<u64>,
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.ajax_server)
            .with_context(|| format!("invalid ajax_server url: {}", self.ajax_server))?;
        Url::parse(&self.wss_server)
            .with_context(|| format!("invalid wss_server url: {}", self.wss_server))?;
        Ok(())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    fn default_storage_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME)
            .join(STORAGE_FILE_NAME)
    }

    fn default_log_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME)
    }

    pub fn load_default_config() -> Result<Config> {
        Self::load_config(None)
    }

    /// Defaults, then the optional TOML file, then `WOBSERVER_*` environment variables.
    pub fn load_config(config_file: Option<&Path>) -> Result<Config> {
        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("ajax_server", DEFAULT_AJAX_SERVER)?
            .set_default("wss_server", DEFAULT_WSS_SERVER)?
            .set_default("experimental_websocket", EXPERIMENTAL_WEBSOCKET)?
            .set_default(
                "storage_path",
                Self::default_storage_path().to_string_lossy().to_string(),
            )?
            .set_default(
                "log_dir",
                Self::default_log_dir().to_string_lossy().to_string(),
            )?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        let config: Config = builder
            .build()?
            .try_deserialize()
            .context("failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_default_config() {
        let config = ConfigLoader::load_default_config().unwrap();
        assert_eq!(config.ajax_server, DEFAULT_AJAX_SERVER);
        assert_eq!(config.wss_server, DEFAULT_WSS_SERVER);
        assert!(!config.experimental_websocket);
        assert!(config.storage_path.ends_with("wobserver/storage.json"));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    #[serial]
    fn test_toml_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "ajax_server = \"http://localhost:8888/webapi/\"\nrequest_timeout_ms = 2500"
        )
        .unwrap();

        let config = ConfigLoader::load_config(Some(file.path())).unwrap();
        assert_eq!(config.ajax_server, "http://localhost:8888/webapi/");
        assert_eq!(config.wss_server, DEFAULT_WSS_SERVER);
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(2500)));
    }

    #[test]
    #[serial]
    fn test_env_overrides_defaults() {
        std::env::set_var("WOBSERVER_AJAX_SERVER", "http://127.0.0.1:9000/webapi/");
        std::env::set_var("WOBSERVER_EXPERIMENTAL_WEBSOCKET", "true");
        let config = ConfigLoader::load_default_config();
        std::env::remove_var("WOBSERVER_AJAX_SERVER");
        std::env::remove_var("WOBSERVER_EXPERIMENTAL_WEBSOCKET");

        let config = config.unwrap();
        assert_eq!(config.ajax_server, "http://127.0.0.1:9000/webapi/");
        assert!(config.experimental_websocket);
    }

    #[test]
    #[serial]
    fn test_invalid_server_url_is_rejected() {
        std::env::set_var("WOBSERVER_AJAX_SERVER", "not a url");
        let config = ConfigLoader::load_default_config();
        std::env::remove_var("WOBSERVER_AJAX_SERVER");

        assert!(config.is_err());
    }

    #[test]
    #[serial]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(ConfigLoader::load_config(Some(&missing)).is_err());
    }
}
