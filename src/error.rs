use thiserror::Error;

#[derive(Debug, Error)]
pub enum PcSearchError {
    #[error("Invalid lookup endpoint '{0}': expected an absolute http(s) URL")]
    InvalidEndpoint(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
