//! Autocomplete lookup HTTP client.
//!
//! Drives the remote postcode completion endpoint
//! (`GET <endpoint>/<QUERY>/autocomplete`). Behind a trait so the worker and
//! the engine can be exercised with canned results instead of a live service.

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;

use crate::error::PcSearchError;

/// Default lookup service.
pub const DEFAULT_ENDPOINT: &str = "https://api.postcodes.io/postcodes";

/// Errors from a single lookup round trip.
///
/// `Network` means the request never completed (DNS, connect, timeout) and is
/// the caller's cue to treat the environment as offline. `Status` and
/// `Decode` mean the service answered; both degrade to "zero candidates".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("lookup request failed: {0}")]
    Network(String),

    #[error("lookup service returned status {0}")]
    Status(u16),

    #[error("malformed lookup response: {0}")]
    Decode(String),
}

impl FetchError {
    /// True when the failure happened below HTTP (no response at all).
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network(_))
    }
}

/// A source of postcode completions for a partial query.
pub trait PostcodeFetcher: Send + 'static {
    fn lookup(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, FetchError>> + Send;
}

/// Response body of the autocomplete endpoint. `result` is null when the
/// query has no completions.
#[derive(Debug, Deserialize)]
struct AutocompleteBody {
    result: Option<Vec<String>>,
}

/// Real HTTP fetcher against the configured lookup endpoint.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    endpoint: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the given base endpoint, e.g.
    /// `https://api.postcodes.io/postcodes`.
    pub fn new(endpoint: &str) -> Result<Self, PcSearchError> {
        let url = Url::parse(endpoint.trim_end_matches('/'))
            .map_err(|_| PcSearchError::InvalidEndpoint(endpoint.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(PcSearchError::InvalidEndpoint(endpoint.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            endpoint: url,
        })
    }

    /// Build `<endpoint>/<QUERY>/autocomplete`, percent-encoding the query
    /// (typed postcodes may contain a space).
    fn lookup_url(&self, query: &str) -> Result<Url, FetchError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Decode("endpoint cannot take path segments".to_string()))?
            .push(query)
            .push("autocomplete");
        Ok(url)
    }
}

impl PostcodeFetcher for HttpFetcher {
    async fn lookup(&self, query: &str) -> Result<Vec<String>, FetchError> {
        let url = self.lookup_url(query)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: AutocompleteBody = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Ok(body.result.unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "fetcher_tests.rs"]
mod fetcher_tests;
