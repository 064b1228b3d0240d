//! Internal link rewriting and click interception.
//!
//! Internal anchors carry the `/$/` marker (`href="/$/kursoj/k-1"`). When a
//! page's subtree is activated, marked anchors are rewritten into fragment
//! URLs and given a click interceptor that routes through the navigation
//! state machine instead of the browser's default full navigation. This runs
//! on every newly activated subtree because content is swapped in
//! dynamically; rewriting once at boot would miss it.

/// Marker prefix identifying internal anchors.
pub const INTERNAL_MARKER: &str = "/$/";

/// Extracts the application path from a marked href.
///
/// `"/$/kursoj/k-1"` yields `"/kursoj/k-1"`; unmarked hrefs yield `None`.
pub fn internal_target(href: &str) -> Option<&str> {
	href.strip_prefix("/$").filter(|rest| rest.starts_with('/'))
}

/// Rewrites marked anchors under `root` into fragment links with intercepted
/// clicks.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn rewrite_internal_links<F>(root: &web_sys::Element, on_navigate: F)
where
	F: Fn(String) + Clone + 'static,
{
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	let anchors = match root.query_selector_all("a[href^=\"/$/\"]") {
		Ok(list) => list,
		Err(_) => return,
	};

	for index in 0..anchors.length() {
		let Some(node) = anchors.item(index) else {
			continue;
		};
		let Ok(anchor) = node.dyn_into::<web_sys::Element>() else {
			continue;
		};
		let Some(href) = anchor.get_attribute("href") else {
			continue;
		};
		let Some(target) = internal_target(&href) else {
			continue;
		};

		let target = target.to_string();
		let _ = anchor.set_attribute("href", &super::history::fragment_url(&target));

		let on_navigate = on_navigate.clone();
		let handler = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(
			move |event: web_sys::MouseEvent| {
				event.prevent_default();
				on_navigate(target.clone());
			},
		);
		let _ = anchor
			.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
		// The interceptor lives as long as the anchor element.
		handler.forget();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_internal_target_marked() {
		assert_eq!(internal_target("/$/kursoj/k-1"), Some("/kursoj/k-1"));
		assert_eq!(internal_target("/$/"), Some("/"));
	}

	#[test]
	fn test_internal_target_unmarked() {
		assert_eq!(internal_target("/kursoj"), None);
		assert_eq!(internal_target("https://ekzemplo.eo/"), None);
		assert_eq!(internal_target("#/kursoj"), None);
		assert_eq!(internal_target("/$x"), None);
	}

	#[test]
	fn test_marker_constant() {
		assert!(format!("{INTERNAL_MARKER}kursoj").starts_with("/$/"));
	}
}
