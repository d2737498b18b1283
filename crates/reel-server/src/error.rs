//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! One variant per error kind the surface exposes: validation failures
//! carry a message list and map to 400, missing records to 404, missing
//! or invalid sessions to 401, and external/configuration failures to a
//! 500 with a generic body — upstream detail is logged where it occurs
//! and never echoed to the client.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or empty required fields; one message per failed field.
  #[error("validation failed: {0:?}")]
  Validation(Vec<String>),

  #[error("not found: {0}")]
  NotFound(String),

  /// Missing, invalid, expired, or revoked session — or a session that
  /// lacks the privilege for the operation.
  #[error("authentication required")]
  AuthRequired,

  /// An external API call failed.
  #[error("upstream service failure")]
  Upstream,

  /// A required credential or setting is absent.
  #[error("server configuration error: {0}")]
  Config(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::Validation(messages) => {
        (StatusCode::BAD_REQUEST, json!({ "errors": messages }))
      }
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, json!({ "error": m })),
      ApiError::AuthRequired => (
        StatusCode::UNAUTHORIZED,
        json!({ "error": "authentication required" }),
      ),
      ApiError::Upstream => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "upstream service failure" }),
      ),
      ApiError::Config(_) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "server configuration error" }),
      ),
      ApiError::Internal(m) => {
        (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": m }))
      }
    };
    (status, Json(body)).into_response()
  }
}

impl From<reel_core::Error> for ApiError {
  fn from(e: reel_core::Error) -> Self {
    use reel_core::Error as E;
    match e {
      E::EntryNotFound(_) | E::MessageNotFound(_) => {
        ApiError::NotFound(e.to_string())
      }
      E::EmailTaken(_) => ApiError::Validation(vec![e.to_string()]),
      E::Backend(m) => ApiError::Internal(m),
    }
  }
}

impl From<reel_search::Error> for ApiError {
  fn from(e: reel_search::Error) -> Self {
    use reel_search::Error as E;
    match e {
      E::EmptyQuery => ApiError::Validation(vec![e.to_string()]),
      E::MissingCredentials => ApiError::Config(e.to_string()),
      E::NoResults => ApiError::NotFound(e.to_string()),
      E::Upstream(_) => ApiError::Upstream,
    }
  }
}

/// Map a backend's error through the domain error into an API error.
pub(crate) fn store_err<E: Into<reel_core::Error>>(e: E) -> ApiError {
  ApiError::from(e.into())
}
