//! Path pattern compilation and matching.
//!
//! A pattern string such as `/kursoj/{id}` is compiled once at registration
//! time into a sequence of segment specifiers, then tested against candidate
//! URLs. Parameters are always whole path segments; there are no wildcards,
//! catch-alls or regex segments.

use std::collections::HashMap;

/// One compiled segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// The empty leading segment of an absolute path.
	Root,
	/// A literal segment that must match exactly.
	Literal(String),
	/// A named parameter binding any non-empty segment.
	Param(String),
}

/// A compiled path pattern.
///
/// Built once from a pattern string; immutable thereafter.
///
/// # Example
///
/// ```ignore
/// use kursejo_pages::router::PathPattern;
///
/// let pattern = PathPattern::new("/kursoj/{id}");
/// let params = pattern.matches("/kursoj/k-123").unwrap();
/// assert_eq!(params.get("id"), Some(&"k-123".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The normalized pattern string.
	raw: String,
	/// Compiled segment specifiers.
	segments: Vec<Segment>,
}

/// Strips a single trailing slash (other than on `/` itself) and maps the
/// empty string to `/`, so `/a/` and `/a` are equivalent.
fn normalize(path: &str) -> &str {
	if path.is_empty() {
		return "/";
	}
	if path.len() > 1 {
		if let Some(stripped) = path.strip_suffix('/') {
			return stripped;
		}
	}
	path
}

impl PathPattern {
	/// Compiles a pattern string.
	pub fn new(pattern: &str) -> Self {
		let raw = normalize(pattern).to_string();
		let segments = raw
			.split('/')
			.map(|part| {
				if part.is_empty() {
					Segment::Root
				} else if let Some(name) =
					part.strip_prefix('{').and_then(|p| p.strip_suffix('}'))
				{
					Segment::Param(name.to_string())
				} else {
					Segment::Literal(part.to_string())
				}
			})
			.collect();

		Self { raw, segments }
	}

	/// Returns the normalized pattern string.
	pub fn as_str(&self) -> &str {
		&self.raw
	}

	/// Returns the compiled segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Tests a candidate URL against this pattern.
	///
	/// Returns the extracted parameter values keyed by name, or `None` when
	/// the URL does not match. No-match is a value, never an error.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let path = normalize(path);
		let parts: Vec<&str> = path.split('/').collect();

		if parts.len() != self.segments.len() {
			return None;
		}

		let mut params = HashMap::new();

		for (spec, part) in self.segments.iter().zip(&parts) {
			match spec {
				Segment::Root => {
					if !part.is_empty() {
						return None;
					}
				}
				Segment::Literal(literal) => {
					if literal != part {
						return None;
					}
				}
				Segment::Param(name) => {
					if part.is_empty() {
						return None;
					}
					// Duplicate names are not expected but not rejected;
					// the last occurrence wins.
					params.insert(name.clone(), (*part).to_string());
				}
			}
		}

		Some(params)
	}
}
