//! HTTP client for the Open Food Facts search API.
//!
//! Wraps `reqwest` with typed error handling, retry on transient failures,
//! and envelope deserialization. Both operations go through the legacy
//! `search.pl` CGI endpoint, which serves free-text search and category
//! filtering depending on the query parameters.

use std::time::Duration;

use reqwest::{Client, Url};

use ecolens_core::AppConfig;

use crate::error::OffError;
use crate::retry::retry_with_backoff;
use crate::types::{RawProduct, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.net";
const SEARCH_ENDPOINT: &str = "cgi/search.pl";

/// Fields requested on the category path; keeps payloads small while
/// covering every fallback chain the candidate mapping consults.
const CATEGORY_FIELDS: &str = "code,_id,product_name,product_name_en,generic_name,\
generic_name_en,ecoscore_score,ecoscore_grade,ecoscore_data";

/// Client for the Open Food Facts search API.
///
/// Use [`OffClient::from_app_config`] in binaries or
/// [`OffClient::with_base_url`] to point at a mock server in tests.
pub struct OffClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl OffClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`OffError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, OffError> {
        Self::with_base_url(
            DEFAULT_BASE_URL,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OffError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`OffError::InvalidBaseUrl`] for an unparseable
    /// base URL.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, OffError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Ensure the base URL ends with exactly one slash so that join()
        // appends the endpoint instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| OffError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`OffClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, OffError> {
        Self::with_base_url(
            &config.off_base_url,
            config.off_timeout_secs,
            &config.off_user_agent,
            config.off_max_retries,
            config.off_retry_backoff_base_ms,
        )
    }

    /// Free-text product search; returns the raw records of the envelope.
    ///
    /// # Errors
    ///
    /// - [`OffError::Http`] on network failure or non-2xx status after
    ///   retries are exhausted.
    /// - [`OffError::Deserialize`] if the body does not match the envelope.
    pub async fn search_products(&self, query: &str) -> Result<Vec<RawProduct>, OffError> {
        let url = self.endpoint_url(&[
            ("search_terms", query),
            ("search_simple", "1"),
            ("json", "1"),
        ])?;
        tracing::debug!(%query, "searching products");
        self.fetch_products(url, format!("search({query})")).await
    }

    /// Fetches up to `page_size` records tagged with a category.
    ///
    /// `tag` must already be normalized/alias-resolved by the caller.
    ///
    /// # Errors
    ///
    /// Same as [`OffClient::search_products`].
    pub async fn category_products(
        &self,
        tag: &str,
        page_size: u32,
    ) -> Result<Vec<RawProduct>, OffError> {
        let page_size = page_size.to_string();
        let url = self.endpoint_url(&[
            ("action", "process"),
            ("json", "1"),
            ("tagtype_0", "categories"),
            ("tag_contains_0", "contains"),
            ("tag_0", tag),
            ("page_size", &page_size),
            ("fields", CATEGORY_FIELDS),
        ])?;
        tracing::debug!(%tag, %page_size, "fetching category products");
        self.fetch_products(url, format!("category({tag})")).await
    }

    /// Builds the endpoint URL with percent-encoded query parameters.
    fn endpoint_url(&self, params: &[(&str, &str)]) -> Result<Url, OffError> {
        let mut url = self
            .base_url
            .join(SEARCH_ENDPOINT)
            .map_err(|e| OffError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends the GET with retry, asserts a 2xx status, and parses the
    /// search envelope.
    async fn fetch_products(
        &self,
        url: Url,
        context: String,
    ) -> Result<Vec<RawProduct>, OffError> {
        let body = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url).send().await?;
                let response = response.error_for_status()?;
                Ok(response.text().await?)
            }
        })
        .await?;

        let envelope: SearchResponse =
            serde_json::from_str(&body).map_err(|e| OffError::Deserialize {
                context,
                source: e,
            })?;

        tracing::debug!(count = envelope.products.len(), "parsed product envelope");
        Ok(envelope.products)
    }
}
