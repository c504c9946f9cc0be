use crate::error::{LikeError, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const BASE_URL_ENV: &str = "WARBLER_BASE_URL";

/// On-disk shape. Every field is optional so a partial file still loads.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Settings handed to the API client at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: Url,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self { base_url: parse_base_url(base_url)?, ..Self::default() })
    }

    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        Some(base.config_dir().join("warbler-likes.toml"))
    }

    /// Reads the user's config file, then applies `WARBLER_BASE_URL` on top.
    /// A missing file is not an error; a malformed one is.
    pub fn load() -> Result<Self> {
        let text = match Self::toml_path() {
            Some(path) => match fs::read_to_string(&path) {
                Ok(text) => {
                    log::debug!("loaded config from {}", path.display());
                    Some(text)
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(LikeError::Config(format!("{}: {}", path.display(), e))),
            },
            None => None,
        };
        let env_base = std::env::var(BASE_URL_ENV).ok();
        Self::from_sources(text.as_deref(), env_base.as_deref())
    }

    pub fn from_sources(file_text: Option<&str>, env_base_url: Option<&str>) -> Result<Self> {
        let file: ConfigFile = match file_text {
            Some(text) => toml::from_str(text).map_err(|e| LikeError::Config(e.to_string()))?,
            None => ConfigFile::default(),
        };

        let raw_base = env_base_url
            .filter(|v| !v.trim().is_empty())
            .or(file.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL);

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(LikeError::Config("timeout_secs must be positive".into()));
        }

        Ok(Self {
            base_url: parse_base_url(raw_base)?,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(&crate::utils::normalize_url(raw))?;
    if url.cannot_be_a_base() {
        return Err(LikeError::Config(format!("{} cannot be used as a base url", raw)));
    }
    Ok(url)
}
