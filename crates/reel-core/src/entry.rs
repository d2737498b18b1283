//! Library entry — a saved media reference owned by one account.
//!
//! Entries are immutable after creation; the only mutation is deletion by
//! the owning account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved reference: either a full URL or a bare 11-character video
/// identifier, plus a display title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
  pub entry_id:   Uuid,
  pub account_id: Uuid,
  pub url:        String,
  pub title:      String,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::MediaStore::add_entry`].
/// `entry_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewEntry {
  pub account_id: Uuid,
  pub url:        String,
  pub title:      String,
}
