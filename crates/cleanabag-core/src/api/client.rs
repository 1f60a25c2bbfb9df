use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};

use super::models::{EntriesPage, Entry};
use crate::config::Credentials;
use crate::{Error, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Listing detail level; metadata keeps payloads small even on large instances.
const ENTRY_DETAIL: &str = "metadata";

/// Authenticated client for the wallabag REST API.
///
/// The OAuth2 access token is fetched once at [`WallabagClient::connect`] and
/// kept for the lifetime of the run.
pub struct WallabagClient {
    http: Client,
    base_url: String,
    token: String,
}

impl WallabagClient {
    /// Authenticate against the instance and return a ready-to-use client.
    pub async fn connect(credentials: &Credentials) -> Result<Self> {
        let http = Self::build_client()?;
        let base_url = credentials.base_url().to_string();
        let token = Self::request_token(&http, &base_url, credentials).await?;

        tracing::debug!("Authenticated against {}", base_url);

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    fn build_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(Error::Http)
    }

    /// OAuth2 password grant against /oauth/v2/token.
    async fn request_token(
        http: &Client,
        base_url: &str,
        credentials: &Credentials,
    ) -> Result<String> {
        let url = format!("{}/oauth/v2/token", base_url);
        let request = TokenRequest {
            grant_type: "password",
            client_id: &credentials.client_id,
            client_secret: &credentials.client_secret,
            username: &credentials.username,
            password: &credentials.password,
        };

        let response = http.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Auth(format!(
                "HTTP {} from token endpoint {}",
                status, url
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Raw bearer-authenticated API call, returning the response body.
    async fn api_call(&self, url: &str, method: Method) -> Result<Bytes> {
        tracing::debug!("{} {}", method, url);

        let response = self
            .http
            .request(method, url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api(format!("HTTP {} for URL: {}", status, url)));
        }

        Ok(response.bytes().await?)
    }

    /// Total number of entries saved on the instance.
    pub async fn total_entries(&self) -> Result<u64> {
        self.entry_count(&[]).await
    }

    /// Number of archived (read) entries.
    pub async fn archived_entries(&self) -> Result<u64> {
        self.entry_count(&[("archive", "1")]).await
    }

    /// Number of starred entries.
    pub async fn starred_entries(&self) -> Result<u64> {
        self.entry_count(&[("starred", "1")]).await
    }

    async fn entry_count(&self, filters: &[(&str, &str)]) -> Result<u64> {
        let url = count_url(&self.base_url, filters);
        let body = self.api_call(&url, Method::GET).await?;
        let page: EntriesPage = serde_json::from_slice(&body)?;
        Ok(page.total)
    }

    /// Fetch all entries in one page, newest update first, metadata detail.
    pub async fn all_entries(&self, per_page: u64) -> Result<Vec<Entry>> {
        let url = entries_url(&self.base_url, per_page);
        let body = self.api_call(&url, Method::GET).await?;
        let page: EntriesPage = serde_json::from_slice(&body)?;
        Ok(page.embedded.items)
    }

    /// Delete a single entry, returning its last known representation.
    pub async fn delete_entry(&self, id: u64) -> Result<Entry> {
        let url = entry_url(&self.base_url, id);
        let body = self.api_call(&url, Method::DELETE).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn entries_url(base_url: &str, per_page: u64) -> String {
    format!(
        "{}/api/entries.json?perPage={}&detail={}&sort=updated&order=desc",
        base_url, per_page, ENTRY_DETAIL
    )
}

fn count_url(base_url: &str, filters: &[(&str, &str)]) -> String {
    let mut url = format!("{}/api/entries.json?perPage=1&detail={}", base_url, ENTRY_DETAIL);
    for (key, value) in filters {
        url.push_str(&format!("&{}={}", key, value));
    }
    url
}

fn entry_url(base_url: &str, id: u64) -> String {
    format!("{}/api/entries/{}", base_url, id)
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://wallabag.example.org";

    #[test]
    fn test_entries_url() {
        assert_eq!(
            entries_url(BASE, 250),
            "https://wallabag.example.org/api/entries.json?perPage=250&detail=metadata&sort=updated&order=desc"
        );
    }

    #[test]
    fn test_count_url_without_filters() {
        assert_eq!(
            count_url(BASE, &[]),
            "https://wallabag.example.org/api/entries.json?perPage=1&detail=metadata"
        );
    }

    #[test]
    fn test_count_url_with_filter() {
        assert_eq!(
            count_url(BASE, &[("starred", "1")]),
            "https://wallabag.example.org/api/entries.json?perPage=1&detail=metadata&starred=1"
        );
    }

    #[test]
    fn test_entry_url() {
        assert_eq!(entry_url(BASE, 1801), "https://wallabag.example.org/api/entries/1801");
    }
}
