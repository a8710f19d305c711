//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the data service.
    pub api_url: String,
    /// Fixture directory. When set, it is used instead of the data service.
    pub data_dir: Option<PathBuf>,
    /// Fan used when a command is not given `--fan`.
    pub fan_id: Option<u32>,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: fz_api::DEFAULT_BASE_URL.to_string(),
            data_dir: None,
            fan_id: None,
            timeout_secs: fz_api::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // FZ_API_URL, FZ_DATA_DIR, FZ_FAN_ID, FZ_TIMEOUT_SECS
        figment = figment.merge(Env::prefixed("FZ_"));

        figment.extract()
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Returns the platform-specific config directory for fz.
///
/// On Linux: `~/.config/fz`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_service() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.data_dir, None);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("fz.toml");
        std::fs::write(
            &path,
            "api_url = \"http://example.test/api\"\nfan_id = 4\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.api_url, "http://example.test/api");
        assert_eq!(config.fan_id, Some(4));
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn dirs_config_path_ends_with_fz() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "fz");
    }
}
