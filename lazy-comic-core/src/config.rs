use lazy_comic_common::{FailurePolicy, SentinelOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Public demo listing of comic books
pub const DEFAULT_ENDPOINT: &str = "https://64a29e1bb45881cc0ae56e2d.mockapi.io/api/v1/books";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const ENV_CONFIG_PATH: &str = "LAZY_COMIC_CONFIG";
const ENV_DEV_MODE: &str = "LAZY_COMIC_DEV_MODE";
const ENV_ENDPOINT: &str = "LAZY_COMIC_ENDPOINT";
const ENV_PAGE_SIZE: &str = "LAZY_COMIC_PAGE_SIZE";
const ENV_ON_FETCH_ERROR: &str = "LAZY_COMIC_ON_FETCH_ERROR";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// YAML config file structure. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigYaml {
    pub endpoint: Option<String>,
    pub page_size: Option<u32>,
    pub on_fetch_error: Option<FailurePolicy>,
    /// Pixels ahead of the viewport edge that trigger the next page
    pub root_margin: Option<f64>,
    /// Visible share of the sentinel required to trigger
    pub threshold: Option<f64>,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub page_size: u32,
    pub failure_policy: FailurePolicy,
    pub sentinel: SentinelOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            failure_policy: FailurePolicy::default(),
            sentinel: SentinelOptions::default(),
        }
    }
}

impl Config {
    /// Defaults, then the YAML file, then environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        if Self::is_dev_mode() && dotenvy::dotenv().is_ok() {
            info!("Dev mode activated - loaded .env");
        }

        let mut config = match Self::config_path() {
            Some(path) => Self::load_from_path(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_dev_mode() -> bool {
        std::env::var(ENV_DEV_MODE).is_ok() || Path::new(".env").exists()
    }

    /// `$LAZY_COMIC_CONFIG`, or `~/.lazy-comic/config.yaml`
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var(ENV_CONFIG_PATH)
            .ok()
            .filter(|s| !s.is_empty())
        {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|home| home.join(".lazy-comic").join("config.yaml"))
    }

    /// Read a YAML config file. A missing file yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let yaml: ConfigYaml = if content.trim().is_empty() {
            ConfigYaml::default()
        } else {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        };

        info!("Loaded config from {}", path.display());
        let mut config = Self::default();
        config.apply_yaml(yaml);
        Ok(config)
    }

    fn apply_yaml(&mut self, yaml: ConfigYaml) {
        if let Some(endpoint) = yaml.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(page_size) = yaml.page_size {
            self.page_size = page_size;
        }
        if let Some(policy) = yaml.on_fetch_error {
            self.failure_policy = policy;
        }
        if let Some(margin) = yaml.root_margin {
            self.sentinel.root_margin = margin;
        }
        if let Some(threshold) = yaml.threshold {
            self.sentinel.threshold = threshold;
        }
    }

    /// Override fields from environment-style lookups. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(page_size) = get(ENV_PAGE_SIZE) {
            self.page_size = page_size.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("{ENV_PAGE_SIZE} must be a number, got '{page_size}'"))
            })?;
        }
        if let Some(policy) = get(ENV_ON_FETCH_ERROR) {
            self.failure_policy = policy.parse().map_err(ConfigError::Invalid)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.sentinel.threshold) {
            return Err(ConfigError::Invalid(format!(
                "threshold must be within [0, 1], got {}",
                self.sentinel.threshold
            )));
        }
        if self.sentinel.root_margin < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "root_margin must not be negative, got {}",
                self.sentinel.root_margin
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_demo_listing() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.failure_policy, FailurePolicy::Resume);
        assert_eq!(config.sentinel.root_margin, 200.0);
        assert_eq!(config.sentinel.threshold, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load_from_path(&tmp.path().join("config.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "\n").unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap(), Config::default());
    }

    #[test]
    fn yaml_overrides_selected_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(
            &path,
            "endpoint: http://localhost:3000/books\npage_size: 25\non_fetch_error: end-feed\nroot_margin: 50\n",
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:3000/books");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.failure_policy, FailurePolicy::EndFeed);
        assert_eq!(config.sentinel.root_margin, 50.0);
        assert_eq!(config.sentinel.threshold, 0.1);
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "page_size: [not, a, number]\n").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn env_overrides_yaml_values() {
        let mut config = Config {
            page_size: 25,
            ..Config::default()
        };
        config
            .apply_env(env(&[
                (ENV_ENDPOINT, "http://example.test/items"),
                (ENV_PAGE_SIZE, "5"),
                (ENV_ON_FETCH_ERROR, "end-feed"),
            ]))
            .unwrap();

        assert_eq!(config.endpoint, "http://example.test/items");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.failure_policy, FailurePolicy::EndFeed);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = Config::default();
        config
            .apply_env(env(&[(ENV_ENDPOINT, ""), (ENV_PAGE_SIZE, "  ")]))
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_env_page_size_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(env(&[(ENV_PAGE_SIZE, "ten")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn bad_env_policy_is_rejected() {
        let mut config = Config::default();
        assert!(config
            .apply_env(env(&[(ENV_ON_FETCH_ERROR, "retry-forever")]))
            .is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let zero_page = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(zero_page.validate().is_err());

        let mut bad_threshold = Config::default();
        bad_threshold.sentinel.threshold = 1.5;
        assert!(bad_threshold.validate().is_err());

        let mut bad_margin = Config::default();
        bad_margin.sentinel.root_margin = -1.0;
        assert!(bad_margin.validate().is_err());

        let blank_endpoint = Config {
            endpoint: " ".into(),
            ..Config::default()
        };
        assert!(blank_endpoint.validate().is_err());
    }
}
