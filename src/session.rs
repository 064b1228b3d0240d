//! Session gate.
//!
//! Tracks logged-in/out state from the session cookie and the `/mi` probe.
//! Any unauthenticated response observed by the entity cache routes back in
//! here as a forced logout; the caller then re-routes to the login page.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use crate::api::{Backend, EntityCache, FetchError, User, decode};
use crate::info_log;

/// Name of the session-identifying cookie.
///
/// Its presence is the sole signal used to decide whether to attempt the
/// session probe at boot.
pub const SESSION_COOKIE: &str = "Seanco";

#[derive(Debug, Clone, Default)]
struct State {
	logged_in: bool,
	user: Option<User>,
}

/// Logged-in/out state and the transitions between them.
pub struct SessionGate {
	backend: Rc<dyn Backend>,
	cache: Rc<EntityCache>,
	state: RefCell<State>,
}

impl SessionGate {
	/// Creates a logged-out gate.
	pub fn new(backend: Rc<dyn Backend>, cache: Rc<EntityCache>) -> Self {
		Self {
			backend,
			cache,
			state: RefCell::new(State::default()),
		}
	}

	/// Whether a user is currently logged in.
	pub fn is_logged_in(&self) -> bool {
		self.state.borrow().logged_in
	}

	/// The current user record, when logged in.
	pub fn current_user(&self) -> Option<User> {
		self.state.borrow().user.clone()
	}

	/// Probes `/mi` when the session cookie is present.
	///
	/// Returns whether a session was established. A failed probe clears the
	/// cookie so the next boot skips the round-trip.
	pub async fn probe(&self) -> bool {
		if session_cookie().is_none() {
			return false;
		}

		match self.backend.get("/mi").await.and_then(decode::<User>) {
			Ok(user) => {
				self.set_user(user);
				true
			}
			Err(err) => {
				info_log!("session probe failed: {}", err);
				clear_session_cookie();
				false
			}
		}
	}

	/// Logs in with the given credentials.
	///
	/// Bad credentials surface as [`FetchError::Unauthenticated`]; the
	/// session cookie itself is set by the backend response.
	pub async fn login(&self, email: &str, password: &str) -> Result<User, FetchError> {
		let body = json!({"retpoŝto": email, "pasvorto": password});
		let user: User = decode(self.backend.post("/mi/ensaluti", body).await?)?;

		info_log!("logged in as {}", user.name);
		self.set_user(user.clone());
		Ok(user)
	}

	/// Logs out.
	///
	/// The backend call is fire-and-forget; the local reset does not wait
	/// for its response.
	pub fn logout(&self) {
		self.post_logout();
		self.force_logout();
	}

	/// Resets local session state without contacting the backend.
	///
	/// This is the unauthenticated-response path: cookie cleared, entity
	/// cache emptied, user dropped.
	pub fn force_logout(&self) {
		clear_session_cookie();
		self.cache.clear();
		*self.state.borrow_mut() = State::default();
	}

	fn set_user(&self, user: User) {
		*self.state.borrow_mut() = State {
			logged_in: true,
			user: Some(user),
		};
	}

	#[cfg(all(target_family = "wasm", target_os = "unknown"))]
	fn post_logout(&self) {
		let backend = self.backend.clone();
		wasm_bindgen_futures::spawn_local(async move {
			let _ = backend.post("/mi/elsaluti", json!({})).await;
		});
	}

	#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
	fn post_logout(&self) {}
}

/// Finds `name` in a cookie header string.
#[cfg(any(test, all(target_family = "wasm", target_os = "unknown")))]
fn read_cookie(cookies: &str, name: &str) -> Option<String> {
	let prefix = format!("{name}=");
	cookies
		.split(';')
		.map(str::trim)
		.find_map(|part| part.strip_prefix(prefix.as_str()))
		.filter(|value| !value.is_empty())
		.map(str::to_string)
}

/// Reads the session cookie from the document.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn session_cookie() -> Option<String> {
	use wasm_bindgen::JsCast;

	let document = web_sys::window()?.document()?;
	let document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
	let cookies = document.cookie().ok()?;
	read_cookie(&cookies, SESSION_COOKIE)
}

/// Clears the session cookie by setting an already-expired one.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
pub fn clear_session_cookie() {
	use wasm_bindgen::JsCast;

	let Some(document) = web_sys::window().and_then(|window| window.document()) else {
		return;
	};
	let Ok(document) = document.dyn_into::<web_sys::HtmlDocument>() else {
		return;
	};
	let _ = document.set_cookie(&format!(
		"{SESSION_COOKIE}=;expires=Thu, 01 Jan 1970 00:00:00 GMT;path=/"
	));
}

#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
thread_local! {
	static COOKIE_JAR: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Reads the session cookie (per-thread jar outside the browser).
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn session_cookie() -> Option<String> {
	COOKIE_JAR.with(|jar| jar.borrow().clone())
}

/// Sets the session cookie (test seam; the backend sets it in the browser).
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn set_session_cookie(value: &str) {
	COOKIE_JAR.with(|jar| *jar.borrow_mut() = Some(value.to_string()));
}

/// Clears the session cookie (per-thread jar outside the browser).
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub fn clear_session_cookie() {
	COOKIE_JAR.with(|jar| *jar.borrow_mut() = None);
}
