//! Terminal UI for cinesearch.
//!
//! Owns the two state containers (search results and title details), the
//! debounced search input and the ratatui views rendered from them.

/// Application state, key handling and the terminal event loop.
pub mod app;
/// Cancellable delayed dispatch.
pub mod debounce;
/// Details state controller.
pub mod details;
/// Search input state (query text and filters).
pub mod input;
/// Search state controller.
pub mod search;
/// Rendering.
pub mod ui;

pub use app::{App, AppEvent, Focus, run_app};
