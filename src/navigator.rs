//! Navigation state machine.
//!
//! The top-level orchestrator: owns the current page, drives fragment
//! history (push/replace), applies route parameters to the activated page,
//! fires lifecycle hooks on the outgoing and incoming page, rewrites internal
//! links on the activated subtree, and falls back to a reserved not-found
//! page when resolution fails. At most one page is marked visible at any
//! instant; only the swap step mutates the current-page field.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::page::{Page, PageHandle};
use crate::router::{HistoryDriver, RouteMatch, Router, RouterError};
use crate::{info_log, warn_log};

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
use crate::error_log;

/// Reserved page displayed when resolution finds no route.
struct NotFoundPage;

impl Page for NotFoundPage {
	fn tag(&self) -> &str {
		"404"
	}

	fn set_visible(&self, _visible: bool) {}
}

/// Builder for [`Navigator`].
pub struct NavigatorBuilder {
	router: Router<PageHandle>,
	history: Rc<dyn HistoryDriver>,
	not_found: Option<PageHandle>,
	base_title: String,
	home_path: String,
}

impl NavigatorBuilder {
	/// Registers a route. Rules are tried in registration order, so literal
	/// rules like `/kursoj/+nova` must be registered before `/kursoj/{id}`.
	pub fn route(mut self, pattern: &str, page: PageHandle) -> Self {
		self.router = self.router.route(pattern, page);
		self
	}

	/// Overrides the reserved not-found page.
	pub fn not_found(mut self, page: PageHandle) -> Self {
		self.not_found = Some(page);
		self
	}

	/// Sets the base document title.
	pub fn base_title(mut self, title: impl Into<String>) -> Self {
		self.base_title = title.into();
		self
	}

	/// Designates the home route, whose title is the base title alone.
	pub fn home_path(mut self, path: impl Into<String>) -> Self {
		self.home_path = path.into();
		self
	}

	/// Builds the navigator.
	pub fn build(self) -> Rc<Navigator> {
		let not_found = self.not_found.unwrap_or_else(|| Rc::new(NotFoundPage));

		Rc::new_cyclic(|me| Navigator {
			router: self.router,
			history: self.history,
			not_found,
			base_title: self.base_title,
			home_path: self.home_path,
			current: RefCell::new(None),
			me: me.clone(),
		})
	}
}

/// The navigation state machine.
///
/// # Example
///
/// ```ignore
/// use kursejo_pages::{Navigator, router::MemoryHistory};
///
/// let navigator = Navigator::builder(Rc::new(MemoryHistory::new()))
///     .base_title("Kursejo")
///     .route("/", home)
///     .route("/kursoj/{id}", course)
///     .build();
///
/// navigator.navigate("/kursoj/k-123", false).await?;
/// ```
pub struct Navigator {
	router: Router<PageHandle>,
	history: Rc<dyn HistoryDriver>,
	not_found: PageHandle,
	base_title: String,
	home_path: String,
	/// The one open page; mutated only by the swap step.
	current: RefCell<Option<PageHandle>>,
	/// Self-reference handed to click interceptors. Only driven on wasm.
	#[cfg_attr(not(all(target_family = "wasm", target_os = "unknown")), allow(dead_code))]
	me: Weak<Navigator>,
}

impl Navigator {
	/// Starts building a navigator over the given history driver.
	pub fn builder(history: Rc<dyn HistoryDriver>) -> NavigatorBuilder {
		NavigatorBuilder {
			router: Router::new(),
			history,
			not_found: None,
			base_title: "Kursejo".to_string(),
			home_path: "/".to_string(),
		}
	}

	/// Returns the currently open page, if any.
	pub fn current(&self) -> Option<PageHandle> {
		self.current.borrow().clone()
	}

	/// Returns the logical path derived from the current location fragment.
	pub fn fragment_path(&self) -> String {
		self.history.current_path()
	}

	/// Resolves `path` and swaps to the matched page.
	///
	/// `replace` is used for corrective navigations (initial load, login
	/// redirect, back/forward) so they do not grow the history stack; user
	/// navigation pushes a new entry. An unresolved path degrades to the
	/// reserved not-found page; it is never an error.
	pub async fn navigate(&self, path: &str, replace: bool) -> Result<(), RouterError> {
		info_log!("navigate {} (replace: {})", path, replace);

		let (page, params) = match self.router.resolve(path) {
			Some(RouteMatch { page, params }) => (page, params),
			None => (self.not_found.clone(), HashMap::new()),
		};

		for (name, value) in &params {
			page.set_param(name, value);
		}

		if replace {
			self.history.replace(path)?;
		} else {
			self.history.push(path)?;
		}

		self.swap(path, page).await;
		Ok(())
	}

	/// Hides the outgoing page and activates the incoming one.
	///
	/// The current page, URL and title are committed synchronously before the
	/// show hook is awaited, so concurrent navigations always leave the
	/// displayed page and the URL in agreement: the latest call wins.
	async fn swap(&self, path: &str, page: PageHandle) {
		let outgoing = self.current.borrow_mut().replace(page.clone());

		if let Some(outgoing) = outgoing {
			outgoing.on_hide();
			outgoing.set_visible(false);
		}

		self.apply_title(path, &page);
		self.rewrite_links(&page);
		page.set_visible(true);

		// A failing show hook is the page's concern to display; the
		// bookkeeping above already holds.
		if let Err(err) = page.on_show().await {
			warn_log!("show hook failed on {}: {}", page.tag(), err);
		}
	}

	/// Updates the document title for the activated page.
	///
	/// The home route shows the base title alone; every other route shows
	/// "base title — page title", where the page title resolves in order:
	/// title function, declared title attribute, tag identifier.
	fn apply_title(&self, path: &str, page: &PageHandle) {
		let title = if path == self.home_path {
			self.base_title.clone()
		} else {
			let page_title = page.title().unwrap_or_else(|| page.tag().to_string());
			format!("{} — {}", self.base_title, page_title)
		};

		self.history.set_title(&title);
	}

	#[cfg(all(target_family = "wasm", target_os = "unknown"))]
	fn rewrite_links(&self, page: &PageHandle) {
		let Some(root) = page.content_root() else {
			return;
		};

		let me = self.me.clone();
		crate::router::rewrite_internal_links(&root, move |target| {
			let Some(navigator) = me.upgrade() else {
				return;
			};
			wasm_bindgen_futures::spawn_local(async move {
				if let Err(err) = navigator.navigate(&target, false).await {
					error_log!("link navigation failed: {}", err);
				}
			});
		});
	}

	#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
	fn rewrite_links(&self, _page: &PageHandle) {}

	/// Installs the back/forward listener.
	///
	/// A popstate event re-derives the path from the fragment and re-resolves
	/// with replace semantics, since the browser already moved the history
	/// pointer.
	#[cfg(all(target_family = "wasm", target_os = "unknown"))]
	pub fn listen(self: Rc<Self>) {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let me = Rc::downgrade(&self);
		let handler =
			Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(move |_: web_sys::PopStateEvent| {
				let Some(navigator) = me.upgrade() else {
					return;
				};
				let path = navigator.history.current_path();
				wasm_bindgen_futures::spawn_local(async move {
					if let Err(err) = navigator.navigate(&path, true).await {
						error_log!("popstate navigation failed: {}", err);
					}
				});
			});

		if let Some(window) = web_sys::window() {
			let _ = window
				.add_event_listener_with_callback("popstate", handler.as_ref().unchecked_ref());
		}
		// The listener lives for the application's lifetime.
		handler.forget();
	}

	/// Installs the back/forward listener (no-op outside the browser).
	#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
	pub fn listen(self: Rc<Self>) {}
}
