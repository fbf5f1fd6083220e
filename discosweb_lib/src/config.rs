//! Runtime configuration, loaded once at startup and immutable afterwards.
//!
//! Sources in increasing precedence: built-in defaults, an optional TOML
//! file, `DISCOSWEB_*` environment variables, explicit CLI overrides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use discosweb_api::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use serde::Deserialize;
use thiserror::Error;

use crate::governor::DEFAULT_FALLBACK_WAIT;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "discosweb.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("No API token found. Set DISCOSWEB_TOKEN or store the token in {0}")]
    MissingToken(PathBuf),
}

/// On-disk shape of `discosweb.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub api_version: Option<String>,
    pub token_file: Option<PathBuf>,
    pub fallback_wait_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub api_version: String,
    /// Wait applied when a throttling response has no reset header.
    pub fallback_wait: Duration,
    token: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("fallback_wait", &self.fallback_wait)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Config with defaults and an explicit token.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            fallback_wait: DEFAULT_FALLBACK_WAIT,
            token: token.to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Loads the config file (if any) and resolves it against the process
    /// environment.
    pub fn load(
        config_path: Option<&Path>,
        token_file: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => Some(read_config(path)?),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Some(read_config(default)?)
                } else {
                    None
                }
            }
        };
        Self::resolve(
            file.unwrap_or_default(),
            |key| std::env::var(key).ok(),
            token_file,
        )
    }

    /// Merges file settings, environment lookups and the CLI token-file
    /// override into a final config. The token is read here and nowhere else.
    pub fn resolve<E>(
        file: FileConfig,
        env: E,
        token_file: Option<&Path>,
    ) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let base_url = env("DISCOSWEB_BASE_URL")
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_version = env("DISCOSWEB_API_VERSION")
            .or(file.api_version)
            .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
        let fallback_wait = file
            .fallback_wait_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FALLBACK_WAIT);

        let token = match env("DISCOSWEB_TOKEN").filter(|t| !t.trim().is_empty()) {
            Some(token) => token.trim().to_string(),
            None => {
                let path = token_file
                    .map(Path::to_path_buf)
                    .or_else(|| env("DISCOSWEB_TOKEN_FILE").map(PathBuf::from))
                    .or(file.token_file)
                    .unwrap_or_else(|| default_token_file(&env));
                read_token(&path)?
            }
        };

        Ok(Self {
            base_url,
            api_version,
            fallback_wait,
            token,
        })
    }
}

fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    FileConfig::parse(path, &contents)
}

fn default_token_file<E: Fn(&str) -> Option<String>>(env: &E) -> PathBuf {
    let home = env("HOME").unwrap_or_else(|| ".".to_string());
    Path::new(&home).join(".discosweb").join("token")
}

fn read_token(path: &Path) -> Result<String, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) if !contents.trim().is_empty() => Ok(contents.trim().to_string()),
        Ok(_) => Err(ConfigError::MissingToken(path.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigError::MissingToken(path.to_path_buf()))
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
