//! Kursejo Pages - client-side navigation engine
//!
//! The browser single-page-application engine for the Kursejo
//! course-management product: a path-pattern router plus a page-lifecycle
//! state machine that keeps the displayed view, the browser history entry and
//! the document title synchronized with a fragment URL, and a memoized entity
//! fetch layer whose unauthenticated responses force a session reset.
//!
//! ## Architecture
//!
//! - [`router`]: path patterns, first-match-wins resolution, fragment-based
//!   history and internal link rewriting
//! - [`navigator`]: the navigation state machine on top of the router
//! - [`page`]: the page lifecycle capability set ([`Page`])
//! - [`api`]: backend transport, the request de-duplicating entity cache and
//!   typed entity access
//! - [`session`]: the session gate (cookie probe, login, forced logout)
//! - [`app`]: browser boot sequence wiring the pieces together
//!
//! ## Example
//!
//! ```ignore
//! use kursejo_pages::app::App;
//!
//! let app = App::boot("/ensaluti", |builder| {
//!     builder
//!         .base_title("Kursejo")
//!         .route("/", home.handle())
//!         .route("/ensaluti", login.handle())
//!         .route("/kursoj/+nova", new_course.handle())
//!         .route("/kursoj/{id}", course.handle())
//! })
//! .await;
//! ```

#![warn(missing_docs)]

pub mod api;
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub mod app;
pub mod logging;
pub mod navigator;
pub mod page;
pub mod router;
pub mod session;

pub use api::{Backend, Entity, EntityCache, Envelope, FetchError, Store};
pub use navigator::{Navigator, NavigatorBuilder};
pub use page::{Page, PageError, PageHandle};
pub use router::{
	HistoryDriver, MemoryHistory, PathPattern, RouteMatch, Router, RouterError, parse_fragment,
};
pub use session::{SESSION_COOKIE, SessionGate};

// Logging macros are exported via #[macro_export]; users access them as
// kursejo_pages::info_log!, kursejo_pages::warn_log!, etc.
