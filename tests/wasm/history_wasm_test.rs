//! Browser history and link rewriting tests
//!
//! These run in a real browser and exercise the pieces the native suites
//! replace with in-memory drivers:
//! - Fragment history entries through the History API
//! - Document title updates
//! - Internal link rewriting and click interception
//! - Element-backed pages
//!
//! **Run with**: `wasm-pack test --headless --chrome`

#![cfg(all(target_family = "wasm", target_os = "unknown"))]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use kursejo_pages::page::{DomPage, Page};
use kursejo_pages::router::{BrowserHistory, HistoryDriver, rewrite_internal_links};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn test_push_updates_fragment_and_path() {
	let history = BrowserHistory;

	history.push("/kursoj").unwrap();

	let hash = web_sys::window().unwrap().location().hash().unwrap();
	assert_eq!(hash, "#/kursoj");
	assert_eq!(history.current_path(), "/kursoj");
}

#[wasm_bindgen_test]
fn test_replace_overwrites_current_entry() {
	let history = BrowserHistory;

	history.push("/kursoj").unwrap();
	history.replace("/kursoj/k-1").unwrap();

	assert_eq!(history.current_path(), "/kursoj/k-1");
}

#[wasm_bindgen_test]
fn test_set_title_reaches_the_document() {
	let history = BrowserHistory;

	history.set_title("Kursejo — Kurso");

	assert_eq!(document().title(), "Kursejo — Kurso");
}

#[wasm_bindgen_test]
fn test_rewrite_turns_marked_anchors_into_fragment_links() {
	let root = document().create_element("div").unwrap();
	root.set_inner_html(
		"<a href=\"/$/kursoj/k-1\">kurso</a><a href=\"https://ekzemplo.eo/\">ekstera</a>",
	);
	document().body().unwrap().append_child(&root).unwrap();

	rewrite_internal_links(&root, |_target| {});

	let anchors = root.query_selector_all("a").unwrap();
	let first = anchors.item(0).unwrap().dyn_into::<web_sys::Element>().unwrap();
	let second = anchors.item(1).unwrap().dyn_into::<web_sys::Element>().unwrap();

	assert_eq!(first.get_attribute("href").unwrap(), "#/kursoj/k-1");
	// Unmarked anchors are untouched.
	assert_eq!(
		second.get_attribute("href").unwrap(),
		"https://ekzemplo.eo/"
	);

	root.remove();
}

#[wasm_bindgen_test]
fn test_intercepted_click_reports_the_target_path() {
	let root = document().create_element("div").unwrap();
	root.set_inner_html("<a href=\"/$/kursoj/+nova\">nova kurso</a>");
	document().body().unwrap().append_child(&root).unwrap();

	let clicked = Rc::new(RefCell::new(Vec::new()));
	{
		let clicked = clicked.clone();
		rewrite_internal_links(&root, move |target| {
			clicked.borrow_mut().push(target);
		});
	}

	let anchor = root
		.query_selector("a")
		.unwrap()
		.unwrap()
		.dyn_into::<web_sys::HtmlElement>()
		.unwrap();
	anchor.click();

	assert_eq!(*clicked.borrow(), vec!["/kursoj/+nova".to_string()]);

	root.remove();
}

#[wasm_bindgen_test]
fn test_dom_page_attach_and_visibility() {
	let element = document().create_element("section").unwrap();
	element.set_id("kurso-page");
	element.set_attribute("data-title", "Kurso").unwrap();
	document().body().unwrap().append_child(&element).unwrap();

	let page = DomPage::attach("#kurso-page").unwrap();

	assert_eq!(page.title(), Some("Kurso".to_string()));

	page.set_visible(false);
	assert!(element.has_attribute("hidden"));

	page.set_visible(true);
	assert!(!element.has_attribute("hidden"));

	page.set_param("kurso", "k-7");
	assert_eq!(element.get_attribute("kurso").unwrap(), "k-7");

	element.remove();
}

#[wasm_bindgen_test]
fn test_dom_page_attach_missing_element_is_none() {
	assert!(DomPage::attach("#ne-ekzistas").is_none());
}
