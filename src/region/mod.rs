mod classifier;
pub mod table;

// Re-export public types
pub use classifier::{RegionResult, RegionTable, classify};
