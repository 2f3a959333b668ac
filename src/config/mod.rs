//! Project configuration, read from `folio.toml`.
//!
//! Every section is optional; an absent file yields a fully default config
//! that serves fixture content only. `FOLIO_REPOSITORY` and
//! `FOLIO_ACCESS_TOKEN` override the file so CI never needs secrets on disk.

use crate::debug;
use crate::log;
use crate::normalize::RouteTable;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

pub const CONFIG_FILE: &str = "folio.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    pub repository: RepositoryConfig,
    pub routes: RoutesConfig,
    pub fallback: FallbackConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository name; expands to `https://{name}.cdn.prismic.io/api/v2`.
    pub name: Option<String>,
    pub access_token: Option<String>,
    /// File holding the access token, tilde-expanded. `access_token` wins.
    pub token_path: Option<String>,
    /// Full endpoint override, for proxies and local API mirrors.
    pub endpoint: Option<String>,
}

impl RepositoryConfig {
    /// The access token to send, if any: inline value first, token file
    /// second. An unreadable token file is treated as no token.
    pub fn resolved_token(&self) -> Option<String> {
        if let Some(token) = &self.access_token {
            return Some(token.clone());
        }
        let path = self.token_path.as_deref()?;
        let expanded = shellexpand::tilde(path);
        match fs::read_to_string(expanded.as_ref()) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(err) => {
                debug!("config"; "token file `{path}` unreadable: {err}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub project: String,
    pub case_study: String,
    pub post: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        let table = RouteTable::default();
        Self {
            project: table.project,
            case_study: table.case_study,
            post: table.post,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Serve fixture content when the repository fails. On by default.
    pub enable: bool,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

impl FolioConfig {
    /// Loads the config at `path`, searching parent directories when the
    /// path is the bare default filename. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let found = if path.exists() {
            Some(path.to_path_buf())
        } else if path == Path::new(CONFIG_FILE) {
            find_config_file()?
        } else {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )));
        };

        let mut config = match &found {
            Some(file) => Self::parse(&fs::read_to_string(file)?)?,
            None => Self::default(),
        };
        config.config_path = found;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses config TOML, warning about keys no section defines.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let de = toml::de::Deserializer::new(raw);
        let mut unknown = Vec::new();
        let config: FolioConfig = serde_ignored::deserialize(de, |path| {
            unknown.push(path.to_string());
        })?;
        for key in unknown {
            log!("config"; "ignoring unknown key `{key}`");
        }
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            env::var("FOLIO_REPOSITORY").ok(),
            env::var("FOLIO_ACCESS_TOKEN").ok(),
        );
    }

    fn apply_overrides(&mut self, repository: Option<String>, access_token: Option<String>) {
        if let Some(name) = repository.filter(|v| !v.is_empty()) {
            self.repository.name = Some(name);
        }
        if let Some(token) = access_token.filter(|v| !v.is_empty()) {
            self.repository.access_token = Some(token);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, template) in [
            ("routes.project", &self.routes.project),
            ("routes.case_study", &self.routes.case_study),
            ("routes.post", &self.routes.post),
        ] {
            let placeholders = template.matches(":uid").count();
            if placeholders != 1 {
                return Err(ConfigError::Validation(format!(
                    "{key} must contain `:uid` exactly once, found {placeholders}"
                )));
            }
            if !template.starts_with('/') {
                return Err(ConfigError::Validation(format!(
                    "{key} must start with `/`"
                )));
            }
        }

        if let Some(endpoint) = &self.repository.endpoint {
            let url = Url::parse(endpoint).map_err(|err| {
                ConfigError::Validation(format!("repository.endpoint: {err}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "repository.endpoint must be http or https, found `{}`",
                    url.scheme()
                )));
            }
            if url.host_str().is_none() {
                return Err(ConfigError::Validation(
                    "repository.endpoint has no host".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn route_table(&self) -> RouteTable {
        RouteTable {
            project: self.routes.project.clone(),
            case_study: self.routes.case_study.clone(),
            post: self.routes.post.clone(),
        }
    }
}

/// Searches upward from the working directory for the default config file.
fn find_config_file() -> Result<Option<PathBuf>, ConfigError> {
    let mut dir = env::current_dir()?;
    loop {
        let candidate = dir.join(CONFIG_FILE);
        if candidate.is_file() {
            return Ok(Some(candidate));
        }
        if !dir.pop() {
            return Ok(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_serve_fixtures_only() {
        let config = FolioConfig::default();
        assert!(config.repository.name.is_none());
        assert!(config.fallback.enable);
        assert_eq!(config.routes.project, "/work/:uid");
    }

    #[test]
    fn test_parse_full_config() {
        let config = FolioConfig::parse(
            r#"
            [repository]
            name = "alex-folio"
            endpoint = "http://localhost:8091/api/v2"

            [routes]
            project = "/projects/:uid"

            [fallback]
            enable = false
            "#,
        )
        .expect("valid config");

        assert_eq!(config.repository.name.as_deref(), Some("alex-folio"));
        assert_eq!(config.routes.project, "/projects/:uid");
        // untouched sections keep their defaults
        assert_eq!(config.routes.post, "/blog/:uid");
        assert!(!config.fallback.enable);
    }

    #[test]
    fn test_unknown_keys_are_tolerated() {
        let config = FolioConfig::parse(
            r#"
            [repository]
            name = "alex-folio"
            nmae = "typo"
            "#,
        )
        .expect("unknown keys only warn");
        assert_eq!(config.repository.name.as_deref(), Some("alex-folio"));
    }

    #[test]
    fn test_route_must_carry_one_uid_placeholder() {
        let mut config = FolioConfig::default();
        config.routes.project = "/work".to_string();
        let err = config.validate().expect_err("missing placeholder");
        assert!(format!("{err}").contains("routes.project"), "{err}");

        config.routes.project = "/work/:uid/:uid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let mut config = FolioConfig::default();
        config.repository.endpoint = Some("ftp://example.com/api".to_string());
        assert!(config.validate().is_err());

        config.repository.endpoint = Some("https://example.cdn.prismic.io/api/v2".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_beat_file_values() {
        let mut config = FolioConfig::parse(
            r#"
            [repository]
            name = "from-file"
            access_token = "file-token"
            "#,
        )
        .expect("valid config");
        config.apply_overrides(Some("from-env".to_string()), None);
        assert_eq!(config.repository.name.as_deref(), Some("from-env"));
        assert_eq!(
            config.repository.access_token.as_deref(),
            Some("file-token")
        );
    }

    #[test]
    fn test_token_path_is_read_and_trimmed() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "secret-token  ").expect("write token");

        let repository = RepositoryConfig {
            token_path: Some(file.path().display().to_string()),
            ..Default::default()
        };
        assert_eq!(repository.resolved_token().as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_missing_token_file_is_no_token() {
        let repository = RepositoryConfig {
            token_path: Some("/nonexistent/folio-token".to_string()),
            ..Default::default()
        };
        assert_eq!(repository.resolved_token(), None);
    }
}
