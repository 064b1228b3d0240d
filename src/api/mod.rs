//! Backend API access.
//!
//! The transport seam, the request de-duplicating entity cache and the typed
//! store on top of it.

mod cache;
mod client;
mod models;
mod store;

pub use cache::{EntityCache, EntityFuture};
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub use client::HttpBackend;
pub use client::{Backend, Entity, Envelope, FetchError, decode};
pub use models::{Course, Lesson, NewCourse, User};
pub use store::Store;
