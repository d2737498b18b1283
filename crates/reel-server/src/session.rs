//! Handlers for `/session` endpoints — the HTTP face of the idle guard.
//!
//! The presentation layer reports qualifying input events and media
//! playback state here, confirms the warning, and reads the guard's
//! status; the polling task in [`crate::guard`] does the rest.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use reel_core::{idle::IdleState, store::MediaStore};

use crate::{AppState, auth::Session, error::ApiError};

/// `POST /session/activity` — a qualifying input event (pointer move,
/// key press, scroll, click) occurred.
pub async fn activity<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> StatusCode
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  state.sessions.record_activity(session.session_id, Utc::now());
  StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
pub struct PlaybackBody {
  pub playing: bool,
}

/// `POST /session/playback` — monitored media started or stopped playing.
pub async fn playback<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Json(body): Json<PlaybackBody>,
) -> StatusCode
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  state
    .sessions
    .set_media_playing(session.session_id, body.playing);
  StatusCode::NO_CONTENT
}

/// `POST /session/confirm` — the user chose to stay signed in.
pub async fn confirm<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> StatusCode
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  state.sessions.confirm(session.session_id, Utc::now());
  StatusCode::NO_CONTENT
}

/// `POST /session/logout` — manual sign-out; the token is revoked.
pub async fn logout<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> StatusCode
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  state.sessions.logout(session.session_id);
  StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
  pub state:             IdleState,
  pub remaining_seconds: i64,
}

/// `GET /session/status`
pub async fn status<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> Result<Json<StatusResponse>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let (guard_state, remaining_seconds) = state
    .sessions
    .status(session.session_id, Utc::now())
    .ok_or(ApiError::AuthRequired)?;

  Ok(Json(StatusResponse {
    state: guard_state,
    remaining_seconds,
  }))
}
