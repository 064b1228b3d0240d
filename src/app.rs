//! Application boot sequence.
//!
//! Wires the transport, entity cache, session gate and navigator together,
//! installs the unauthenticated hook and the back/forward listener, then
//! performs the initial corrective navigation: with a live session the
//! current fragment path is resolved, otherwise the login page is shown.
//! Browser-only; the pieces it wires are all individually testable natively.

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;

use crate::api::{EntityCache, HttpBackend, Store};
use crate::error_log;
use crate::navigator::{Navigator, NavigatorBuilder};
use crate::router::BrowserHistory;
use crate::session::SessionGate;

/// A booted application.
pub struct App {
	/// The navigation state machine.
	pub navigator: Rc<Navigator>,
	/// The session gate.
	pub session: Rc<SessionGate>,
	/// Typed entity access.
	pub store: Store,
	/// The entity cache shared by the store and the session gate.
	pub cache: Rc<EntityCache>,
}

impl App {
	/// Boots the application.
	///
	/// `routes` receives the navigator builder so the caller registers its
	/// pages; `login_path` is where unauthenticated users land. Both the
	/// initial navigation and the login redirect use replace semantics so
	/// they do not pollute the history stack.
	pub async fn boot<F>(login_path: &str, routes: F) -> Rc<Self>
	where
		F: FnOnce(NavigatorBuilder) -> NavigatorBuilder,
	{
		let backend = Rc::new(HttpBackend);
		let cache = Rc::new(EntityCache::new(backend.clone()));
		let session = Rc::new(SessionGate::new(backend, cache.clone()));
		let store = Store::new(cache.clone());

		let navigator = routes(Navigator::builder(Rc::new(BrowserHistory))).build();

		{
			let session = session.clone();
			let navigator = navigator.clone();
			let login = login_path.to_string();
			cache.on_unauthenticated(move || {
				session.force_logout();
				let navigator = navigator.clone();
				let login = login.clone();
				spawn_local(async move {
					if let Err(err) = navigator.navigate(&login, true).await {
						error_log!("login redirect failed: {}", err);
					}
				});
			});
		}

		navigator.clone().listen();

		let initial = if session.probe().await {
			navigator.fragment_path()
		} else {
			login_path.to_string()
		};
		if let Err(err) = navigator.navigate(&initial, true).await {
			error_log!("initial navigation failed: {}", err);
		}

		Rc::new(Self {
			navigator,
			session,
			store,
			cache,
		})
	}

	/// Logs out and returns to the login page.
	pub fn logout(&self, login_path: &str) {
		self.session.logout();

		let navigator = self.navigator.clone();
		let login = login_path.to_string();
		spawn_local(async move {
			if let Err(err) = navigator.navigate(&login, true).await {
				error_log!("logout navigation failed: {}", err);
			}
		});
	}
}
