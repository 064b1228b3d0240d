//! Typed entity access over the cache.
//!
//! Pages do not talk to the transport directly; they go through these typed
//! getters so every read is memoized per path and every mutation invalidates
//! the right collection.

use std::rc::Rc;

use serde_json::to_value;

use super::cache::EntityCache;
use super::client::{FetchError, decode};
use super::models::{Course, Lesson, NewCourse};

/// Typed reads and mutations for courses and lessons.
#[derive(Clone)]
pub struct Store {
	cache: Rc<EntityCache>,
}

impl Store {
	/// Creates a store over the given cache.
	pub fn new(cache: Rc<EntityCache>) -> Self {
		Self { cache }
	}

	/// All courses visible to the session.
	pub async fn courses(&self) -> Result<Vec<Course>, FetchError> {
		decode(self.cache.get("/kursoj").await?)
	}

	/// Courses belonging to one user.
	pub async fn courses_for(&self, user_id: &str) -> Result<Vec<Course>, FetchError> {
		decode(self.cache.get(&format!("/uzantoj/{user_id}/kursoj")).await?)
	}

	/// One course out of a user's cached course list.
	pub async fn course_for(
		&self,
		user_id: &str,
		course_id: &str,
	) -> Result<Option<Course>, FetchError> {
		let courses = self.courses_for(user_id).await?;
		Ok(courses.into_iter().find(|course| course.id == course_id))
	}

	/// Lessons of one course.
	pub async fn lessons(&self, course_id: &str) -> Result<Vec<Lesson>, FetchError> {
		decode(self.cache.get(&format!("/kursoj/{course_id}/eroj")).await?)
	}

	/// Creates a course; the cached course collection is invalidated on
	/// success.
	pub async fn create_course(&self, draft: &NewCourse) -> Result<Course, FetchError> {
		let body = to_value(draft).map_err(|err| FetchError::Decode(err.to_string()))?;
		decode(self.cache.create("/kursoj", body).await?)
	}
}
