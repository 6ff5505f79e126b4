//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with a browser identity and language headers
//! - GET requests for one catalog page with pagination and filter parameters
//! - Error classification into [`FetchErrorKind`]
//!
//! There is no retry here. Whether a failed page ends the crawl is the
//! coordinator's decision.

use crate::config::SiteConfig;
use crate::url::catalog_url;
use crate::{ConfigError, FetchError, FetchErrorKind, ScoutError};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with the configured browser identity
///
/// # Example
///
/// ```no_run
/// use krisha_scout::config::SiteConfig;
/// use krisha_scout::crawler::build_http_client;
///
/// let client = build_http_client(&SiteConfig::default()).unwrap();
/// ```
pub fn build_http_client(site: &SiteConfig) -> Result<Client, ScoutError> {
    let mut headers = HeaderMap::new();
    let language = HeaderValue::from_str(&site.accept_language).map_err(|e| {
        ConfigError::Validation(format!(
            "accept-language '{}' is not a valid header value: {}",
            site.accept_language, e
        ))
    })?;
    headers.insert(ACCEPT_LANGUAGE, language);

    let client = Client::builder()
        .user_agent(site.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(site.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches catalog pages for one city
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    catalog: Url,
    rooms_param: String,
}

impl PageFetcher {
    /// Creates a fetcher for the configured city catalog
    pub fn new(site: &SiteConfig) -> Result<Self, ScoutError> {
        let catalog = catalog_url(&site.base_url, &site.city_slug).map_err(|e| {
            ConfigError::InvalidUrl(format!(
                "Cannot build catalog URL from '{}' and '{}': {}",
                site.base_url, site.city_slug, e
            ))
        })?;

        Ok(Self {
            client: build_http_client(site)?,
            catalog,
            rooms_param: site.rooms_param.clone(),
        })
    }

    /// The catalog URL without query parameters
    pub fn catalog(&self) -> &Url {
        &self.catalog
    }

    /// Fetches one catalog page
    ///
    /// The room-count parameter is only sent when `rooms` is set.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The page HTML
    /// * `Err(FetchError)` - Transport failure, timeout or non-success status
    pub async fn fetch(&self, page: u32, rooms: Option<u32>) -> Result<String, FetchError> {
        let mut query: Vec<(&str, String)> = vec![("page", page.to_string())];
        if let Some(rooms) = rooms {
            query.push((self.rooms_param.as_str(), rooms.to_string()));
        }

        tracing::debug!("GET {} {:?}", self.catalog, query);

        let response = self
            .client
            .get(self.catalog.clone())
            .query(&query)
            .send()
            .await
            .map_err(|e| FetchError {
                page,
                kind: classify_error(&e),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError {
                page,
                kind: FetchErrorKind::Status(status.as_u16()),
            });
        }

        let body = response.text().await.map_err(|e| FetchError {
            page,
            kind: if e.is_timeout() {
                FetchErrorKind::Timeout
            } else {
                FetchErrorKind::Body(e.to_string())
            },
        })?;

        tracing::debug!("Downloaded {} bytes for page {}", body.len(), page);

        Ok(body)
    }
}

/// Maps a reqwest send error onto a fetch error kind
fn classify_error(error: &reqwest::Error) -> FetchErrorKind {
    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_connect() {
        FetchErrorKind::Connect(error.to_string())
    } else {
        FetchErrorKind::Transport(error.to_string())
    }
}
