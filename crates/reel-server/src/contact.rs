//! Handlers for `/contact` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/contact` | Public submission |
//! | `GET`   | `/contact` | Admin only; newest first |
//! | `PATCH` | `/contact/{id}` | Admin only; set the done flag |

use axum::{
  Json,
  extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use reel_core::{
  message::{ContactMessage, NewMessage},
  store::MediaStore,
};

use crate::{
  AppState,
  auth::{Session, require_admin},
  error::{ApiError, store_err},
};

// ─── Submit ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  pub fullname: String,
  pub email:    String,
  /// The message text is not a required field; empty submissions are
  /// persisted as-is.
  #[serde(default)]
  pub message:  String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
  pub messages: Vec<String>,
  pub success:  bool,
}

/// `POST /contact` — public submission.
///
/// The message is persisted first, then one notification mail is
/// attempted. The success flag reflects persistence only: a failed send
/// is logged and the stored message kept.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<SubmitBody>,
) -> Result<Json<SubmitResponse>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let mut errors = Vec::new();
  if body.fullname.trim().is_empty() {
    errors.push("fullname is required".to_owned());
  }
  if body.email.trim().is_empty() {
    errors.push("email is required".to_owned());
  }
  if !errors.is_empty() {
    return Err(ApiError::Validation(errors));
  }

  let message = match state
    .store
    .add_message(NewMessage {
      fullname: body.fullname,
      email:    body.email,
      body:     body.message,
    })
    .await
  {
    Ok(message) => message,
    Err(e) => {
      error!(error = %e, "contact message could not be persisted");
      return Ok(Json(SubmitResponse {
        messages: vec!["Unable to send message.".to_owned()],
        success:  false,
      }));
    }
  };

  if let Err(e) = state.mailer.notify_contact(&message).await {
    warn!(error = %e, "contact notification mail failed; message kept");
  }

  Ok(Json(SubmitResponse {
    messages: vec!["Message sent successfully.".to_owned()],
    success:  true,
  }))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /contact` — all messages, most recent first. Admin only.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> Result<Json<Vec<ContactMessage>>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  require_admin(&session, &state.config)?;
  let messages = state.store.list_messages().await.map_err(store_err)?;
  Ok(Json(messages))
}

// ─── Mark done ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MarkDoneBody {
  pub done: bool,
}

/// `PATCH /contact/{id}` — body: `{"done":...}`. Admin only; 404 on an
/// unknown identifier.
pub async fn mark_done<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Path(id): Path<Uuid>,
  Json(body): Json<MarkDoneBody>,
) -> Result<Json<ContactMessage>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  require_admin(&session, &state.config)?;
  let updated = state
    .store
    .set_message_done(id, body.done)
    .await
    .map_err(store_err)?;
  Ok(Json(updated))
}
