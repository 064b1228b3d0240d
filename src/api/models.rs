//! Backend entity records.
//!
//! Field names follow the crate's conventions; serde renames map them onto
//! the backend's wire names.

use serde::{Deserialize, Serialize};

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// Backend identifier, e.g. `u-123`.
	pub id: String,
	/// Display name.
	#[serde(rename = "nomo", default)]
	pub name: String,
	/// Login email address.
	#[serde(rename = "retpoŝto", default)]
	pub email: String,
	/// Whether the account has admin rights.
	#[serde(rename = "admina", default)]
	pub admin: bool,
}

/// A course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
	/// Backend identifier, e.g. `k-123`.
	pub id: String,
	/// Course name.
	#[serde(rename = "nomo", default)]
	pub name: String,
	/// Creation time (RFC 3339).
	#[serde(rename = "kiamo", default)]
	pub time: Option<String>,
	/// Owning user, when the backend includes it.
	#[serde(rename = "posedanto", default)]
	pub owner: Option<User>,
}

/// A lesson within a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
	/// Backend identifier, e.g. `e-123`.
	pub id: String,
	/// Lesson name.
	#[serde(rename = "nomo", default)]
	pub name: String,
	/// Creation time (RFC 3339).
	#[serde(rename = "kiamo", default)]
	pub time: Option<String>,
}

/// Fields for creating a course.
#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
	/// Course name.
	#[serde(rename = "nomo")]
	pub name: String,
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_user_wire_names() {
		let user: User = serde_json::from_value(json!({
			"id": "u-1",
			"nomo": "Zamenhof",
			"retpoŝto": "z@ekzemplo.eo",
			"admina": true,
		}))
		.unwrap();

		assert_eq!(user.name, "Zamenhof");
		assert_eq!(user.email, "z@ekzemplo.eo");
		assert!(user.admin);
	}

	#[test]
	fn test_course_optional_fields() {
		let course: Course =
			serde_json::from_value(json!({"id": "k-1", "nomo": "kurso unu"})).unwrap();

		assert_eq!(course.id, "k-1");
		assert!(course.time.is_none());
		assert!(course.owner.is_none());
	}

	#[test]
	fn test_new_course_serializes_wire_name() {
		let draft = NewCourse {
			name: "nova kurso".to_string(),
		};

		let value = serde_json::to_value(&draft).unwrap();
		assert_eq!(value, json!({"nomo": "nova kurso"}));
	}
}
