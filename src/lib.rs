//! pcsearch library - Interactive UK postcode search
//!
//! This library exposes the core functionality of pcsearch for testing purposes.

pub mod app;
pub mod config;
pub mod error;
pub mod haptic;
pub mod highlight;
pub mod lookup;
pub mod region;
pub mod search;
pub mod store;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::Config;
pub use error::PcSearchError;
pub use region::{RegionResult, RegionTable, classify};
pub use search::SearchState;
