//! # Client configuration: `lms.toml`
//!
//! Defines the TOML configuration the native front-ends read at startup from
//! `<data_dir>/classavo/lms.toml` (filename: [`LmsConfig::filename`]) via
//! [`LmsConfig::load_or_default`].
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000/api"
//!
//! [routes]
//! login = "/auth/login"   # where an expired or missing session is sent
//! home = "/"              # where a role mismatch is sent
//! ```
//!
//! All structs derive `Default` so that a missing or empty config file is
//! equivalent to the default configuration. The web build has no filesystem,
//! so [`LmsConfig::from_build_env`] bakes the API URL in at compile time from
//! `LMS_API_URL`.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `lms.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LmsConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

/// Client-side entry points used for forced navigation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    #[serde(default = "default_login_route")]
    pub login: String,
    #[serde(default = "default_home_route")]
    pub home: String,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_login_route() -> String {
    "/auth/login".to_string()
}

fn default_home_route() -> String {
    "/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login_route(),
            home: default_home_route(),
        }
    }
}

impl LmsConfig {
    /// Builder method to set the API base URL. A trailing slash is dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.api.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Default config, with the API URL taken from `LMS_API_URL` at build time if set.
    pub fn from_build_env() -> Self {
        match option_env!("LMS_API_URL") {
            Some(url) if !url.is_empty() => Self::default().with_api_url(url),
            _ => Self::default(),
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "lms.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(s)?;
        let url = config.api.base_url.clone();
        Ok(config.with_api_url(url))
    }

    /// Read `lms.toml` from `dir`. A missing file yields the build-env
    /// default; an unreadable or malformed one is logged and does the same.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(Self::filename());
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::from_build_env(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot read config: {e}");
                return Self::from_build_env();
            }
        };
        match Self::from_toml(&text) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "invalid config, using defaults: {e}");
                Self::from_build_env()
            }
        }
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = LmsConfig::from_toml("").unwrap();
        assert_eq!(config, LmsConfig::default());
        assert_eq!(config.routes.login, "/auth/login");
        assert_eq!(config.routes.home, "/");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = LmsConfig::from_toml(
            r#"
            [api]
            base_url = "https://lms.example.com/api/"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://lms.example.com/api");
        assert_eq!(config.routes, RoutesConfig::default());
    }

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "classavo_config_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = temp_dir("load");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(LmsConfig::filename()),
            "[api]\nbase_url = \"https://lms.example.com/api/\"\n\n[routes]\nlogin = \"/signin\"\n",
        )
        .unwrap();

        let config = LmsConfig::load_or_default(&dir);

        assert_eq!(config.api.base_url, "https://lms.example.com/api");
        assert_eq!(config.routes.login, "/signin");
        assert_eq!(config.routes.home, "/");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_or_invalid_file_falls_back() {
        let dir = temp_dir("fallback");
        assert_eq!(LmsConfig::load_or_default(&dir), LmsConfig::from_build_env());

        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(LmsConfig::filename()), "[api\nbase_url =").unwrap();
        assert_eq!(LmsConfig::load_or_default(&dir), LmsConfig::from_build_env());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LmsConfig::default().with_api_url("https://api.test");
        let text = config.to_toml().unwrap();
        assert_eq!(LmsConfig::from_toml(&text).unwrap(), config);
    }
}
