use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PicError, PicResult};
use crate::providers::linkedin::Credentials;
use crate::providers::{gravatar, ProviderKind};

pub const APP_NAME: &str = "contact-pictures";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite contact store. Defaults to the platform data directory.
    pub database: Option<PathBuf>,
    /// Providers in priority order.
    pub providers: Vec<ProviderKind>,
    pub gravatar: GravatarConfig,
    pub linkedin: LinkedInConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            providers: ProviderKind::ALL.to_vec(),
            gravatar: GravatarConfig::default(),
            linkedin: LinkedInConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GravatarConfig {
    pub base_url: String,
}

impl Default for GravatarConfig {
    fn default() -> Self {
        Self {
            base_url: gravatar::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedInConfig {
    pub webdriver_url: String,
    pub login_timeout_secs: u64,
    pub element_timeout_secs: u64,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for LinkedInConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            login_timeout_secs: 120,
            element_timeout_secs: 10,
            email: None,
            password: None,
        }
    }
}

impl LinkedInConfig {
    pub fn credentials(&self) -> Option<Credentials> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Some(Credentials {
                    email: email.trim().to_string(),
                    password: password.to_string(),
                })
            }
            _ => None,
        }
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs.max(1))
    }
}

impl Config {
    /// Load config from disk. Returns the default config if the file doesn't exist.
    pub fn load(path: &Path) -> PicResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
            .map_err(|e| PicError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(raw: &str) -> PicResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Configured providers minus `disabled`, first occurrence wins.
    pub fn enabled_providers(&self, disabled: &[ProviderKind]) -> Vec<ProviderKind> {
        let mut enabled = Vec::new();
        for kind in &self.providers {
            if !disabled.contains(kind) && !enabled.contains(kind) {
                enabled.push(*kind);
            }
        }
        enabled
    }
}

/// Per-application directories under the platform config, cache and data roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn from_platform() -> PicResult<Self> {
        let missing = |what: &str| PicError::Config(format!("Cannot determine {} directory", what));
        Ok(Self {
            config_dir: dirs::config_dir().ok_or_else(|| missing("config"))?.join(APP_NAME),
            cache_dir: dirs::cache_dir().ok_or_else(|| missing("cache"))?.join(APP_NAME),
            data_dir: dirs::data_dir().ok_or_else(|| missing("data"))?.join(APP_NAME),
        })
    }

    /// All three directories under one root.
    pub fn rooted(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            cache_dir: root.join("cache"),
            data_dir: root.join("data"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn default_database(&self) -> PathBuf {
        self.data_dir.join("contacts.db")
    }

    pub fn picture_dir(&self) -> PathBuf {
        self.cache_dir.join("profile-pictures")
    }

    /// Session state kept by one provider between runs.
    pub fn provider_cache_dir(&self, kind: ProviderKind) -> PathBuf {
        self.cache_dir.join(kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.providers, vec![ProviderKind::Gravatar, ProviderKind::LinkedIn]);
        assert_eq!(config.gravatar.base_url, "https://www.gravatar.com/avatar");
        assert_eq!(config.linkedin.webdriver_url, "http://localhost:9515");
        assert!(config.database.is_none());
        assert!(config.linkedin.credentials().is_none());
    }

    #[test]
    fn parses_provider_order_and_credentials() {
        let config = Config::parse(
            r#"
            providers = ["linkedin", "gravatar"]

            [linkedin]
            email = " me@example.com "
            password = "hunter2"
            login_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.providers, vec![ProviderKind::LinkedIn, ProviderKind::Gravatar]);
        let credentials = config.linkedin.credentials().unwrap();
        assert_eq!(credentials.email, "me@example.com");
        assert_eq!(config.linkedin.login_timeout(), Duration::from_secs(30));
        assert_eq!(config.linkedin.element_timeout_secs, 10);
    }

    #[test]
    fn unknown_provider_is_an_error() {
        assert!(Config::parse(r#"providers = ["myspace"]"#).is_err());
    }

    #[test]
    fn enabled_providers_drops_disabled_and_duplicates() {
        let config = Config {
            providers: vec![ProviderKind::LinkedIn, ProviderKind::Gravatar, ProviderKind::LinkedIn],
            ..Config::default()
        };
        assert_eq!(
            config.enabled_providers(&[]),
            vec![ProviderKind::LinkedIn, ProviderKind::Gravatar]
        );
        assert_eq!(
            config.enabled_providers(&[ProviderKind::LinkedIn]),
            vec![ProviderKind::Gravatar]
        );
    }

    #[test]
    fn rooted_paths_layout() {
        let paths = AppPaths::rooted(Path::new("/tmp/pics"));
        assert_eq!(paths.picture_dir(), PathBuf::from("/tmp/pics/cache/profile-pictures"));
        assert_eq!(
            paths.provider_cache_dir(ProviderKind::LinkedIn),
            PathBuf::from("/tmp/pics/cache/linkedin")
        );
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/pics/config/config.toml"));
    }
}
