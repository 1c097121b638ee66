mod client;
mod fetcher;
pub mod worker;

// Re-export public types
pub use client::LookupClient;
pub use fetcher::{DEFAULT_ENDPOINT, FetchError, HttpFetcher, PostcodeFetcher};
pub use worker::{LookupOutcome, LookupRequest, LookupResponse};
