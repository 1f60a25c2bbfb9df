use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::{Error, Result};

/// API credentials for a wallabag instance.
///
/// The JSON field names follow the credentials files used by the wallabago
/// client library, so an existing file keeps working unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "WallabagURL")]
    pub wallabag_url: String,
    #[serde(rename = "ClientID")]
    pub client_id: String,
    #[serde(rename = "ClientSecret")]
    pub client_secret: String,
    #[serde(rename = "UserName")]
    pub username: String,
    #[serde(rename = "UserPassword")]
    pub password: String,
}

impl Credentials {
    /// Load credentials from `path`, or from the default location when no
    /// explicit path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path(),
        };

        let content = std::fs::read_to_string(&path)?;
        let credentials: Credentials = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("bad credentials file {}: {}", path.display(), e)))?;
        credentials.validate()?;

        Ok(credentials)
    }

    /// Get the default credentials file path
    /// Always uses ~/.config/cleanABag/credentials.json on all platforms
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("cleanABag")
            .join("credentials.json")
    }

    /// Base URL of the instance without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.wallabag_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.wallabag_url)?;
        Ok(())
    }
}
