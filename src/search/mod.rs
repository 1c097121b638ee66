mod search_state;

// Re-export public types
pub use search_state::{PollSummary, ResolvedCallback, SEARCH_KEY, SearchState, Suggestion};
