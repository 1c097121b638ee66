mod events;
mod input_state;
mod render;
mod state;

// Re-export public types
pub use state::App;
