//! Configuration file support for remote-git.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `REMOTE_GIT_`, sections separated
//!    by `__`, e.g. `REMOTE_GIT_CLIENT__TOKEN`)
//! 3. Config file (./remote-git.toml, then ~/.config/remote-git/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [client]
//! url = "https://gitlab.example.org"
//! type = "gitlab-v4"   # optional, detected from the URL
//! token = "glpat-..."  # or use REMOTE_GIT_CLIENT__TOKEN
//! unsafe_ssl = false
//!
//! [find]
//! organizations = ["acme", "acme/tools"]
//! users = []
//! ignore = "^acme/archive-"
//! require_file = ["README.md"]
//! composer_type = "project,library"
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;

const APP_NAME: &str = "remote-git";
const LOCAL_CONFIG: &str = "remote-git.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Connection settings.
    pub client: ClientConfig,
    /// Default selection and filters for `find`.
    pub find: FindConfig,
}

/// Connection settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the hosting service, or a local folder.
    pub url: Option<String>,
    /// Backend type (`gitlab-v4`, `github`, `gogs-v1`, `local`).
    #[serde(rename = "type")]
    pub client_type: Option<String>,
    /// Access token.
    pub token: Option<String>,
    /// Skip TLS certificate verification.
    pub unsafe_ssl: bool,
}

/// Default selection and filters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FindConfig {
    pub users: Vec<String>,
    pub organizations: Vec<String>,
    pub search: Option<String>,
    /// Keep projects whose name matches this pattern.
    pub include: Option<String>,
    /// Drop projects whose name matches this pattern.
    pub ignore: Option<String>,
    /// Files that must exist on the default branch.
    pub require_file: Vec<String>,
    /// Require a composer.json.
    pub composer: bool,
    /// Accepted composer package types, comma-separated.
    pub composer_type: Option<String>,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/remote-git/config.toml)
    /// 3. Local config file (./remote-git.toml)
    /// 4. Environment variables with REMOTE_GIT_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            tracing::debug!("Loading config from ./{}", LOCAL_CONFIG);
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(Self::environment());

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// `REMOTE_GIT_` variables; list keys accept comma-separated values.
    fn environment() -> Environment {
        Environment::with_prefix("REMOTE_GIT")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("find.users")
            .with_list_parse_key("find.organizations")
            .with_list_parse_key("find.require_file")
            .try_parsing(true)
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.client.url.is_none());
        assert!(config.client.client_type.is_none());
        assert!(config.client.token.is_none());
        assert!(!config.client.unsafe_ssl);
        assert!(config.find.users.is_empty());
        assert!(config.find.organizations.is_empty());
        assert!(config.find.require_file.is_empty());
        assert!(!config.find.composer);
    }

    #[test]
    fn test_config_builder_with_toml_string() {
        let toml_content = r#"
            [client]
            url = "https://gitlab.example.org"
            type = "gitlab-v4"
            token = "glpat-test"
            unsafe_ssl = true

            [find]
            organizations = ["acme", "acme/tools"]
            ignore = "^acme/archive-"
            require_file = ["README.md"]
            composer_type = "project,library"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .expect("config should build");
        let config: Config = settings.try_deserialize().expect("config should deserialize");

        assert_eq!(config.client.url.as_deref(), Some("https://gitlab.example.org"));
        assert_eq!(config.client.client_type.as_deref(), Some("gitlab-v4"));
        assert_eq!(config.client.token.as_deref(), Some("glpat-test"));
        assert!(config.client.unsafe_ssl);
        assert_eq!(config.find.organizations, vec!["acme", "acme/tools"]);
        assert_eq!(config.find.ignore.as_deref(), Some("^acme/archive-"));
        assert_eq!(config.find.require_file, vec!["README.md"]);
        assert_eq!(config.find.composer_type.as_deref(), Some("project,library"));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<String, String> = [
            ("REMOTE_GIT_CLIENT__URL", "https://github.com"),
            ("REMOTE_GIT_CLIENT__UNSAFE_SSL", "true"),
            ("REMOTE_GIT_FIND__USERS", "mborne,_me_"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let settings = ConfigBuilder::builder()
            .add_source(Config::environment().source(Some(env)))
            .build()
            .expect("config should build");
        let config: Config = settings.try_deserialize().expect("config should deserialize");

        assert_eq!(config.client.url.as_deref(), Some("https://github.com"));
        assert!(config.client.unsafe_ssl);
        assert_eq!(config.find.users, vec!["mborne", "_me_"]);
    }

    #[test]
    fn test_default_config_path_is_named_after_the_app() {
        if let Some(path) = Config::default_config_path() {
            assert!(path.ends_with("config.toml"));
            assert!(path.to_string_lossy().contains("remote-git"));
        }
    }
}
