//! `OmdbClient` - OMDb API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::Client;
use tracing::instrument;
use url::Url;

use super::api::OmdbApi;
use super::params::{SearchParams, lookup_query};
use super::types::{DetailResponse, SearchResponse};

/// Default OMDb endpoint. Both search and lookup use the root path.
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client.
///
/// One outbound GET per call. No retries, no caching and no timeout beyond
/// the `reqwest` default.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Endpoint URL.
    base_url: Url,
    /// Static API key sent as `apikey`.
    api_key: String,
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the endpoint URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        if api_key.trim().is_empty() {
            bail!("api_key must not be empty");
        }
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Sends a GET request with the API key and the given query params.
    ///
    /// OMDb reports failures in-band (`Response: "False"`), sometimes with a
    /// non-2xx status. A body that decodes as `T` is returned regardless of
    /// the status; only undecodable bodies become errors.
    #[instrument(skip_all)]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self
            .http_client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str())])
            .query(query)
            .build()
            .context("failed to build OMDb request")?;

        tracing::debug!(?query, "OMDb API request");

        let result = self.http_client.execute(request).await;
        let response = result.context("OMDb request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read OMDb response body")?;

        let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
        match raw_result {
            Ok(parsed) => {
                if !status.is_success() {
                    tracing::debug!(%status, "OMDb API answered with an in-band error body");
                }
                Ok(parsed)
            }
            Err(err) if status.is_success() => {
                Err(err).context("failed to decode OMDb JSON response")
            }
            Err(_) => bail!("OMDb API error (HTTP {status}): {body}"),
        }
    }
}

impl OmdbApi for OmdbClient {
    #[instrument(skip_all, fields(query = %params.query))]
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        self.get_json(&params.to_query()).await
    }

    #[instrument(skip_all, fields(id = %id))]
    async fn lookup(&self, id: &str) -> Result<DetailResponse> {
        self.get_json(&lookup_query(id)).await
    }
}
