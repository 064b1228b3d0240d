//! Memoized entity fetching.
//!
//! The cache records one shared future per normalized resource path. The
//! entry is recorded before the request settles, so concurrent callers within
//! the same tick observe and share a single network round-trip. Resolved
//! values stay cached until explicit invalidation; there is no automatic
//! expiry. The scheduling model is single-threaded and cooperative, so
//! recording the in-flight future before yielding control is the mutual
//! exclusion.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use super::client::{Backend, Entity, FetchError};
use crate::debug_log;

/// A recorded pending-or-settled fetch, shared by every caller of its path.
pub type EntityFuture = Shared<LocalBoxFuture<'static, Result<Entity, FetchError>>>;

/// Hook fired when a request observes an unauthenticated response.
type UnauthenticatedHook = Rc<dyn Fn()>;

/// Request de-duplicating cache over the backend transport.
///
/// The cache is the only mutator of its entries; callers never write them
/// directly.
pub struct EntityCache {
	backend: Rc<dyn Backend>,
	entries: RefCell<HashMap<String, EntityFuture>>,
	on_unauthenticated: Rc<RefCell<Option<UnauthenticatedHook>>>,
}

impl EntityCache {
	/// Creates an empty cache over the given transport.
	pub fn new(backend: Rc<dyn Backend>) -> Self {
		Self {
			backend,
			entries: RefCell::new(HashMap::new()),
			on_unauthenticated: Rc::new(RefCell::new(None)),
		}
	}

	/// Installs the hook fired on any unauthenticated response.
	///
	/// Wired to the session gate's forced logout at boot.
	pub fn on_unauthenticated(&self, hook: impl Fn() + 'static) {
		*self.on_unauthenticated.borrow_mut() = Some(Rc::new(hook));
	}

	/// Returns the recorded future for `path`, or records exactly one new
	/// request.
	///
	/// Two calls for the same path while unresolved always observe the
	/// identical outcome, never two separate network round-trips. A `401`
	/// rejects the future and fires the unauthenticated hook; it is not
	/// retried.
	pub fn get(&self, path: &str) -> EntityFuture {
		if let Some(entry) = self.entries.borrow().get(path) {
			debug_log!("cache hit {}", path);
			return entry.clone();
		}

		debug_log!("cache miss {}", path);
		let backend = self.backend.clone();
		let hook_cell = self.on_unauthenticated.clone();
		let target = path.to_string();

		let future = async move {
			let result = backend.get(&target).await;
			if matches!(result, Err(FetchError::Unauthenticated)) {
				// The hook is read at rejection time, not at recording time,
				// so installation order relative to the entry is irrelevant.
				let hook = hook_cell.borrow().clone();
				if let Some(hook) = hook {
					hook();
				}
			}
			result
		}
		.boxed_local()
		.shared();

		// Recorded before the first poll, so interleaved callers share it.
		self.entries
			.borrow_mut()
			.insert(path.to_string(), future.clone());
		future
	}

	/// Drops one path's entry so the next `get` re-fetches.
	pub fn invalidate(&self, path: &str) {
		self.entries.borrow_mut().remove(path);
	}

	/// Drops every entry. Called on logout so no stale per-user data
	/// survives into a subsequent session.
	pub fn clear(&self) {
		self.entries.borrow_mut().clear();
	}

	/// Returns the number of recorded entries.
	pub fn entry_count(&self) -> usize {
		self.entries.borrow().len()
	}

	/// Posts a new resource to `collection` and invalidates the collection
	/// on success, since the cached list is now stale.
	pub async fn create(&self, collection: &str, body: Entity) -> Result<Entity, FetchError> {
		let result = self.backend.post(collection, body).await;

		match &result {
			Ok(_) => self.invalidate(collection),
			Err(FetchError::Unauthenticated) => {
				let hook = self.on_unauthenticated.borrow().clone();
				if let Some(hook) = hook {
					hook();
				}
			}
			Err(_) => {}
		}

		result
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;

	use futures::executor::block_on;
	use futures::future::join;
	use serde_json::json;

	use super::*;

	/// Transport that counts requests and serves canned values.
	struct CountingBackend {
		gets: Cell<u32>,
		posts: Cell<u32>,
		response: Result<Entity, FetchError>,
	}

	impl CountingBackend {
		fn serving(entity: Entity) -> Rc<Self> {
			Rc::new(Self {
				gets: Cell::new(0),
				posts: Cell::new(0),
				response: Ok(entity),
			})
		}

		fn failing(err: FetchError) -> Rc<Self> {
			Rc::new(Self {
				gets: Cell::new(0),
				posts: Cell::new(0),
				response: Err(err),
			})
		}
	}

	impl Backend for CountingBackend {
		fn get(&self, _path: &str) -> LocalBoxFuture<'static, Result<Entity, FetchError>> {
			self.gets.set(self.gets.get() + 1);
			let response = self.response.clone();
			Box::pin(async move { response })
		}

		fn post(
			&self,
			_path: &str,
			_body: Entity,
		) -> LocalBoxFuture<'static, Result<Entity, FetchError>> {
			self.posts.set(self.posts.get() + 1);
			let response = self.response.clone();
			Box::pin(async move { response })
		}
	}

	#[test]
	fn test_concurrent_gets_share_one_request() {
		let backend = CountingBackend::serving(json!([{"id": "k-1"}]));
		let cache = EntityCache::new(backend.clone());

		// Both futures are obtained before either settles.
		let first = cache.get("/kursoj");
		let second = cache.get("/kursoj");

		let (a, b) = block_on(join(first, second));
		assert_eq!(a.unwrap(), b.unwrap());
		assert_eq!(backend.gets.get(), 1);
	}

	#[test]
	fn test_resolved_value_stays_cached() {
		let backend = CountingBackend::serving(json!({"id": "k-1"}));
		let cache = EntityCache::new(backend.clone());

		block_on(cache.get("/kursoj/k-1")).unwrap();
		block_on(cache.get("/kursoj/k-1")).unwrap();

		assert_eq!(backend.gets.get(), 1);
	}

	#[test]
	fn test_invalidate_forces_refetch() {
		let backend = CountingBackend::serving(json!([]));
		let cache = EntityCache::new(backend.clone());

		block_on(cache.get("/kursoj")).unwrap();
		cache.invalidate("/kursoj");
		block_on(cache.get("/kursoj")).unwrap();

		assert_eq!(backend.gets.get(), 2);
	}

	#[test]
	fn test_clear_empties_everything() {
		let backend = CountingBackend::serving(json!([]));
		let cache = EntityCache::new(backend.clone());

		block_on(cache.get("/kursoj")).unwrap();
		block_on(cache.get("/uzantoj/u-1/kursoj")).unwrap();
		assert_eq!(cache.entry_count(), 2);

		cache.clear();
		assert_eq!(cache.entry_count(), 0);

		block_on(cache.get("/kursoj")).unwrap();
		assert_eq!(backend.gets.get(), 3);
	}

	#[test]
	fn test_distinct_paths_fetch_separately() {
		let backend = CountingBackend::serving(json!([]));
		let cache = EntityCache::new(backend.clone());

		block_on(cache.get("/kursoj")).unwrap();
		block_on(cache.get("/uzantoj")).unwrap();

		assert_eq!(backend.gets.get(), 2);
	}

	#[test]
	fn test_unauthenticated_fires_hook() {
		let backend = CountingBackend::failing(FetchError::Unauthenticated);
		let cache = EntityCache::new(backend);
		let fired = Rc::new(Cell::new(false));

		let flag = fired.clone();
		cache.on_unauthenticated(move || flag.set(true));

		let result = block_on(cache.get("/kursoj"));
		assert_eq!(result, Err(FetchError::Unauthenticated));
		assert!(fired.get());
	}

	#[test]
	fn test_hook_installed_after_entry_still_fires() {
		let backend = CountingBackend::failing(FetchError::Unauthenticated);
		let cache = EntityCache::new(backend);
		let fired = Rc::new(Cell::new(false));

		// The entry is recorded before any hook exists.
		let pending = cache.get("/kursoj");

		let flag = fired.clone();
		cache.on_unauthenticated(move || flag.set(true));

		let result = block_on(pending);
		assert_eq!(result, Err(FetchError::Unauthenticated));
		assert!(fired.get());
	}

	#[test]
	fn test_other_failures_carry_status() {
		let backend = CountingBackend::failing(FetchError::Status(500));
		let cache = EntityCache::new(backend);
		let fired = Rc::new(Cell::new(false));

		let flag = fired.clone();
		cache.on_unauthenticated(move || flag.set(true));

		let result = block_on(cache.get("/kursoj"));
		assert_eq!(result, Err(FetchError::Status(500)));
		assert!(!fired.get());
	}

	#[test]
	fn test_concurrent_failures_share_outcome() {
		let backend = CountingBackend::failing(FetchError::Status(502));
		let cache = EntityCache::new(backend.clone());

		let first = cache.get("/kursoj");
		let second = cache.get("/kursoj");

		let (a, b) = block_on(join(first, second));
		assert_eq!(a, b);
		assert_eq!(backend.gets.get(), 1);
	}

	#[test]
	fn test_create_invalidates_collection() {
		let backend = CountingBackend::serving(json!({"id": "k-2"}));
		let cache = EntityCache::new(backend.clone());

		block_on(cache.get("/kursoj")).unwrap();
		block_on(cache.create("/kursoj", json!({"nomo": "nova kurso"}))).unwrap();
		block_on(cache.get("/kursoj")).unwrap();

		assert_eq!(backend.posts.get(), 1);
		assert_eq!(backend.gets.get(), 2);
	}
}
