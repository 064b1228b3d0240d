//! Backend transport and response envelope.
//!
//! Every backend endpoint wraps its payload in the same envelope; the
//! transport unwraps it and converts transport/status failures into
//! [`FetchError`] values. `401` is recognized specifically because it forces
//! a global session reset further up.

use futures::future::LocalBoxFuture;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by backend requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	/// The backend rejected the session (HTTP 401).
	#[error("not logged in")]
	Unauthenticated,
	/// Any other non-success HTTP status. No automatic retry; callers decide
	/// how to surface it.
	#[error("http status {0}")]
	Status(u16),
	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(String),
	/// The response body could not be decoded.
	#[error("invalid response: {0}")]
	Decode(String),
}

/// Response envelope used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
	/// The wrapped entity.
	#[serde(rename = "ento")]
	pub entity: T,
	/// Optional human-readable message.
	#[serde(rename = "mesaĝo", default)]
	pub message: Option<String>,
}

/// Raw entity value as returned by the backend.
pub type Entity = serde_json::Value;

/// Decodes a raw entity into a typed record.
pub fn decode<T: DeserializeOwned>(entity: Entity) -> Result<T, FetchError> {
	serde_json::from_value(entity).map_err(|err| FetchError::Decode(err.to_string()))
}

/// Transport seam for `GET /api{path}` and `POST /api{path}`.
///
/// The browser implementation is [`HttpBackend`]; tests inject their own so
/// the full control flow runs natively.
pub trait Backend {
	/// Fetches one resource, unwrapping the envelope.
	fn get(&self, path: &str) -> LocalBoxFuture<'static, Result<Entity, FetchError>>;

	/// Posts a JSON body, unwrapping the envelope of the response.
	fn post(&self, path: &str, body: Entity)
	-> LocalBoxFuture<'static, Result<Entity, FetchError>>;
}

/// Backend transport over the browser fetch API.
#[cfg(all(target_family = "wasm", target_os = "unknown"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBackend;

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
async fn read_envelope(response: gloo_net::http::Response) -> Result<Entity, FetchError> {
	match response.status() {
		200 => {
			let envelope: Envelope<Entity> = response
				.json()
				.await
				.map_err(|err| FetchError::Decode(err.to_string()))?;
			Ok(envelope.entity)
		}
		401 => Err(FetchError::Unauthenticated),
		status => Err(FetchError::Status(status)),
	}
}

#[cfg(all(target_family = "wasm", target_os = "unknown"))]
impl Backend for HttpBackend {
	fn get(&self, path: &str) -> LocalBoxFuture<'static, Result<Entity, FetchError>> {
		let url = format!("/api{path}");
		Box::pin(async move {
			let response = gloo_net::http::Request::get(&url)
				.send()
				.await
				.map_err(|err| FetchError::Network(err.to_string()))?;
			read_envelope(response).await
		})
	}

	fn post(
		&self,
		path: &str,
		body: Entity,
	) -> LocalBoxFuture<'static, Result<Entity, FetchError>> {
		let url = format!("/api{path}");
		Box::pin(async move {
			let response = gloo_net::http::Request::post(&url)
				.json(&body)
				.map_err(|err| FetchError::Network(err.to_string()))?
				.send()
				.await
				.map_err(|err| FetchError::Network(err.to_string()))?;
			read_envelope(response).await
		})
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_envelope_deserialization() {
		let envelope: Envelope<Entity> =
			serde_json::from_value(json!({"ento": {"id": "k-1"}, "mesaĝo": "bone"})).unwrap();

		assert_eq!(envelope.entity, json!({"id": "k-1"}));
		assert_eq!(envelope.message.as_deref(), Some("bone"));
	}

	#[test]
	fn test_envelope_message_is_optional() {
		let envelope: Envelope<Entity> =
			serde_json::from_value(json!({"ento": [1, 2, 3]})).unwrap();

		assert!(envelope.message.is_none());
	}

	#[test]
	fn test_decode_typed() {
		#[derive(Debug, PartialEq, Deserialize)]
		struct Tiny {
			id: String,
		}

		let tiny: Tiny = decode(json!({"id": "k-9"})).unwrap();
		assert_eq!(tiny.id, "k-9");

		let bad: Result<Tiny, _> = decode(json!("ne objekto"));
		assert!(matches!(bad, Err(FetchError::Decode(_))));
	}

	#[test]
	fn test_fetch_error_display() {
		assert_eq!(FetchError::Unauthenticated.to_string(), "not logged in");
		assert_eq!(FetchError::Status(503).to_string(), "http status 503");
	}
}
