//! Handlers for `/library` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/library` | Session account's entries, newest first |
//! | `POST`   | `/library` | Body: `{"url":..., "title":...}` — 201 |
//! | `DELETE` | `/library` | Body: `{"id":...}` — 404 if absent |
//!
//! The session context is authoritative for ownership on every operation;
//! there is no caller-supplied account identifier.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use reel_core::{
  classify::{ContentKind, classify},
  entry::{LibraryEntry, NewEntry},
  store::MediaStore,
};

use crate::{
  AppState,
  auth::Session,
  error::{ApiError, store_err},
};

/// A library entry annotated with the rendering category the presentation
/// layer should use for it.
#[derive(Debug, Serialize)]
pub struct EntryView {
  #[serde(flatten)]
  pub entry: LibraryEntry,
  pub kind:  ContentKind,
}

impl From<LibraryEntry> for EntryView {
  fn from(entry: LibraryEntry) -> Self {
    let kind = classify(&entry.url);
    Self { entry, kind }
  }
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /library`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  session: Session,
) -> Result<Json<Vec<EntryView>>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let entries = state
    .store
    .list_entries(session.account_id)
    .await
    .map_err(store_err)?;
  Ok(Json(entries.into_iter().map(EntryView::from).collect()))
}

// ─── Add ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddBody {
  pub url:   String,
  pub title: String,
}

/// `POST /library` — body: `{"url":..., "title":...}`
pub async fn add<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Json(body): Json<AddBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let mut errors = Vec::new();
  if body.url.trim().is_empty() {
    errors.push("url is required".to_owned());
  }
  if body.title.trim().is_empty() {
    errors.push("title is required".to_owned());
  }
  if !errors.is_empty() {
    return Err(ApiError::Validation(errors));
  }

  let entry = state
    .store
    .add_entry(NewEntry {
      account_id: session.account_id,
      url:        body.url,
      title:      body.title,
    })
    .await
    .map_err(store_err)?;

  Ok((StatusCode::CREATED, Json(EntryView::from(entry))))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
  pub id: Uuid,
}

/// `DELETE /library` — body: `{"id":...}`
///
/// 404 when the entry does not exist or belongs to another account —
/// including a repeat delete of an already-deleted identifier.
pub async fn remove<S>(
  State(state): State<AppState<S>>,
  session: Session,
  Json(body): Json<DeleteBody>,
) -> Result<Json<LibraryEntry>, ApiError>
where
  S: MediaStore + Clone + Send + Sync + 'static,
{
  let entry = state
    .store
    .delete_entry(session.account_id, body.id)
    .await
    .map_err(store_err)?;
  Ok(Json(entry))
}
