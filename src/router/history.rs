//! Fragment-based history driver.
//!
//! Application paths live in the URL fragment (`#/kursoj/k-1`), so normal
//! server-side routing is bypassed entirely: history entries are fragment
//! URLs, and a back/forward event re-derives the path from the fragment. The
//! [`HistoryDriver`] trait is the seam between the navigation state machine
//! and the browser; tests and native builds use [`MemoryHistory`].

use std::cell::RefCell;

use super::core::RouterError;

/// Derives the logical application path from a location fragment.
///
/// A fragment starting with `#/` yields the remainder as the path; any other
/// shape (including absent) resolves to the root path `/`.
pub fn parse_fragment(fragment: &str) -> String {
	match fragment.strip_prefix('#') {
		Some(rest) if rest.starts_with('/') => rest.to_string(),
		_ => "/".to_string(),
	}
}

/// Converts an application path into its fragment URL form.
pub fn fragment_url(path: &str) -> String {
	format!("#{path}")
}

/// Writes history entries and the document title.
pub trait HistoryDriver {
	/// Returns the logical path derived from the current location fragment.
	fn current_path(&self) -> String;

	/// Pushes a new fragment history entry.
	fn push(&self, path: &str) -> Result<(), RouterError>;

	/// Replaces the current fragment history entry.
	fn replace(&self, path: &str) -> Result<(), RouterError>;

	/// Updates the document title.
	fn set_title(&self, title: &str);
}

/// History driver backed by the browser History API.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHistory;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
impl BrowserHistory {
	fn history() -> Result<web_sys::History, RouterError> {
		web_sys::window()
			.ok_or_else(|| RouterError::NavigationFailed("no window".to_string()))?
			.history()
			.map_err(|_| RouterError::NavigationFailed("no history".to_string()))
	}
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
impl HistoryDriver for BrowserHistory {
	fn current_path(&self) -> String {
		web_sys::window()
			.and_then(|window| window.location().hash().ok())
			.map(|hash| parse_fragment(&hash))
			.unwrap_or_else(|| "/".to_string())
	}

	fn push(&self, path: &str) -> Result<(), RouterError> {
		Self::history()?
			.push_state_with_url(
				&wasm_bindgen::JsValue::NULL,
				"",
				Some(&fragment_url(path)),
			)
			.map_err(|_| RouterError::NavigationFailed(format!("push {path}")))
	}

	fn replace(&self, path: &str) -> Result<(), RouterError> {
		Self::history()?
			.replace_state_with_url(
				&wasm_bindgen::JsValue::NULL,
				"",
				Some(&fragment_url(path)),
			)
			.map_err(|_| RouterError::NavigationFailed(format!("replace {path}")))
	}

	fn set_title(&self, title: &str) {
		if let Some(document) = web_sys::window().and_then(|window| window.document()) {
			document.set_title(title);
		}
	}
}

/// In-memory history driver for tests and non-browser builds.
///
/// Keeps the entry stack so tests can assert push/replace behavior.
#[derive(Debug)]
pub struct MemoryHistory {
	entries: RefCell<Vec<String>>,
	title: RefCell<String>,
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryHistory {
	/// Creates a history with a single root entry.
	pub fn new() -> Self {
		Self {
			entries: RefCell::new(vec!["/".to_string()]),
			title: RefCell::new(String::new()),
		}
	}

	/// Returns a copy of the entry stack.
	pub fn entries(&self) -> Vec<String> {
		self.entries.borrow().clone()
	}

	/// Returns the recorded document title.
	pub fn title(&self) -> String {
		self.title.borrow().clone()
	}
}

impl HistoryDriver for MemoryHistory {
	fn current_path(&self) -> String {
		self.entries
			.borrow()
			.last()
			.cloned()
			.unwrap_or_else(|| "/".to_string())
	}

	fn push(&self, path: &str) -> Result<(), RouterError> {
		self.entries.borrow_mut().push(path.to_string());
		Ok(())
	}

	fn replace(&self, path: &str) -> Result<(), RouterError> {
		let mut entries = self.entries.borrow_mut();
		if let Some(last) = entries.last_mut() {
			*last = path.to_string();
		} else {
			entries.push(path.to_string());
		}
		Ok(())
	}

	fn set_title(&self, title: &str) {
		*self.title.borrow_mut() = title.to_string();
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case("#/kursoj/k-1", "/kursoj/k-1")]
	#[case("#/", "/")]
	#[case("", "/")]
	#[case("#", "/")]
	#[case("#sekcio", "/")]
	fn test_parse_fragment(#[case] fragment: &str, #[case] expected: &str) {
		assert_eq!(parse_fragment(fragment), expected);
	}

	#[test]
	fn test_fragment_url() {
		assert_eq!(fragment_url("/kursoj"), "#/kursoj");
	}

	#[test]
	fn test_memory_history_push() {
		let history = MemoryHistory::new();
		history.push("/kursoj").unwrap();

		assert_eq!(history.current_path(), "/kursoj");
		assert_eq!(history.entries(), vec!["/", "/kursoj"]);
	}

	#[test]
	fn test_memory_history_replace() {
		let history = MemoryHistory::new();
		history.push("/kursoj").unwrap();
		history.replace("/uzantoj").unwrap();

		assert_eq!(history.current_path(), "/uzantoj");
		assert_eq!(history.entries(), vec!["/", "/uzantoj"]);
	}

	#[test]
	fn test_memory_history_title() {
		let history = MemoryHistory::new();
		history.set_title("Kursejo");

		assert_eq!(history.title(), "Kursejo");
	}
}
