//! Core Router implementation.
//!
//! The router holds compiled rules in registration order and resolves a URL
//! to the first matching rule. Registration order is the only tie-break for
//! overlapping patterns; there is no specificity scoring.

use std::collections::HashMap;

use thiserror::Error;

use super::pattern::PathPattern;

/// Error type for navigation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// Writing the history entry failed.
	#[error("navigation failed: {0}")]
	NavigationFailed(String),
}

/// A matched rule with extracted parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch<P> {
	/// The page handle bound to the matched rule.
	pub page: P,
	/// Extracted path parameters.
	pub params: HashMap<String, String>,
}

/// The router: an ordered list of compiled rules, each bound to a page handle.
///
/// # Example
///
/// ```ignore
/// use kursejo_pages::router::Router;
///
/// let router = Router::new()
///     .route("/", home)
///     .route("/kursoj/+nova", new_course)
///     .route("/kursoj/{id}", course);
///
/// let matched = router.resolve("/kursoj/k-123").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Router<P> {
	/// Registered rules in registration order.
	routes: Vec<(PathPattern, P)>,
}

impl<P> Default for Router<P> {
	fn default() -> Self {
		Self::new()
	}
}

impl<P> Router<P> {
	/// Creates an empty router.
	pub fn new() -> Self {
		Self { routes: Vec::new() }
	}

	/// Registers a rule. Rules are tried in registration order.
	pub fn route(mut self, pattern: &str, page: P) -> Self {
		self.routes.push((PathPattern::new(pattern), page));
		self
	}

	/// Returns the number of registered rules.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}
}

impl<P: Clone> Router<P> {
	/// Resolves a URL to the first matching rule.
	///
	/// `None` is a normal outcome signaling "not found", not an error.
	pub fn resolve(&self, path: &str) -> Option<RouteMatch<P>> {
		for (pattern, page) in &self.routes {
			if let Some(params) = pattern.matches(path) {
				return Some(RouteMatch {
					page: page.clone(),
					params,
				});
			}
		}
		None
	}
}
