//! Client-side routing.
//!
//! Path patterns, the first-match-wins router, the fragment-based history
//! driver and internal link rewriting. The navigation state machine on top of
//! these lives in [`crate::navigator`].

mod core;
mod history;
mod links;
mod pattern;

pub use self::core::{RouteMatch, Router, RouterError};
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use history::BrowserHistory;
pub use history::{HistoryDriver, MemoryHistory, fragment_url, parse_fragment};
pub use links::{INTERNAL_MARKER, internal_target};
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use links::rewrite_internal_links;
pub use pattern::{PathPattern, Segment};
