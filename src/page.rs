//! Page handles and lifecycle hooks.
//!
//! A page is an opaque displayable unit of UI. Instead of ambient lookups in
//! a global element registry, the navigation state machine receives each
//! page's lifecycle hooks as an explicit capability set: the [`Page`] trait.
//! The browser-backed implementation is [`DomPage`]; tests implement the
//! trait directly.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use thiserror::Error;

use crate::api::FetchError;

/// Error surfaced by a page's show hook.
///
/// The navigation state machine only logs these; displaying the failure is
/// the page's own concern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PageError(pub String);

impl From<FetchError> for PageError {
	fn from(err: FetchError) -> Self {
		Self(err.to_string())
	}
}

/// Future returned by [`Page::on_show`].
pub type ShowFuture<'a> = LocalBoxFuture<'a, Result<(), PageError>>;

/// Lifecycle capability set implemented by each page variant.
pub trait Page {
	/// Stable tag identifier; the last-resort display title.
	fn tag(&self) -> &str;

	/// Page-supplied title, when the page declares one.
	fn title(&self) -> Option<String> {
		None
	}

	/// Receives one extracted route parameter.
	fn set_param(&self, name: &str, value: &str) {
		let _ = (name, value);
	}

	/// Invoked after the page becomes the current page.
	fn on_show(&self) -> ShowFuture<'_> {
		Box::pin(async { Ok(()) })
	}

	/// Invoked before the page is deactivated.
	fn on_hide(&self) {}

	/// Toggles the page's visibility in the UI.
	fn set_visible(&self, visible: bool);

	/// Subtree whose internal links are rewritten when the page activates.
	#[cfg(all(target_family = "wasm", target_os = "unknown"))]
	fn content_root(&self) -> Option<web_sys::Element> {
		None
	}
}

/// Shared handle to a page.
pub type PageHandle = Rc<dyn Page>;

/// Show hook callback stored by [`DomPage`].
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub type ShowHook = Rc<dyn Fn() -> ShowFuture<'static>>;

/// A page backed by an element already present in the document.
///
/// Visibility is toggled through the `hidden` attribute, the display title is
/// read from the `data-title` attribute, and route parameters land as
/// attributes on the element (one attribute per parameter name).
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub struct DomPage {
	tag: String,
	element: web_sys::Element,
	show_hook: Option<ShowHook>,
	hide_hook: Option<Rc<dyn Fn()>>,
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
impl DomPage {
	/// Looks the page's element up by selector.
	///
	/// A page declared as a navigation target but absent from the document
	/// yields `None`; callers degrade that to the not-found display instead
	/// of crashing the navigation engine.
	pub fn attach(tag: &str) -> Option<Self> {
		let element = web_sys::window()?
			.document()?
			.query_selector(tag)
			.ok()
			.flatten()?;

		Some(Self {
			tag: tag.to_string(),
			element,
			show_hook: None,
			hide_hook: None,
		})
	}

	/// Declares the show hook.
	pub fn with_show_hook(mut self, hook: impl Fn() -> ShowFuture<'static> + 'static) -> Self {
		self.show_hook = Some(Rc::new(hook));
		self
	}

	/// Declares the hide hook.
	pub fn with_hide_hook(mut self, hook: impl Fn() + 'static) -> Self {
		self.hide_hook = Some(Rc::new(hook));
		self
	}

	/// Wraps the page into a shared handle.
	pub fn handle(self) -> PageHandle {
		Rc::new(self)
	}
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
impl Page for DomPage {
	fn tag(&self) -> &str {
		&self.tag
	}

	fn title(&self) -> Option<String> {
		self.element.get_attribute("data-title")
	}

	fn set_param(&self, name: &str, value: &str) {
		let _ = self.element.set_attribute(name, value);
	}

	fn on_show(&self) -> ShowFuture<'_> {
		match &self.show_hook {
			Some(hook) => hook(),
			None => Box::pin(async { Ok(()) }),
		}
	}

	fn on_hide(&self) {
		if let Some(hook) = &self.hide_hook {
			hook();
		}
	}

	fn set_visible(&self, visible: bool) {
		if visible {
			let _ = self.element.remove_attribute("hidden");
		} else {
			let _ = self.element.set_attribute("hidden", "");
		}
	}

	fn content_root(&self) -> Option<web_sys::Element> {
		Some(self.element.clone())
	}
}
