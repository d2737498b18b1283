//! Contact message — a public submission reviewed by the admin.
//!
//! Messages are never deleted; the `done` flag is the only mutable field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
  pub message_id: Uuid,
  pub fullname:   String,
  pub email:      String,
  /// Message text. May be empty; only the sender name and email are
  /// required at submission time.
  pub body:       String,
  pub done:       bool,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::MediaStore::add_message`].
/// `message_id`, `done` (false) and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewMessage {
  pub fullname: String,
  pub email:    String,
  pub body:     String,
}
