//! Account — the identity that owns a media library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the account authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
  /// Email + password, verified against `password_hash`.
  Credentials,
  /// Signed in through an external identity provider; no local password.
  Federated,
}

/// A registered account. Emails are unique across accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
  pub account_id:    Uuid,
  pub name:          String,
  pub email:         String,
  /// Argon2 PHC string. Present only when `provider` is `Credentials`.
  /// Never serialised into API responses.
  #[serde(skip_serializing, default)]
  pub password_hash: Option<String>,
  pub provider:      AuthProvider,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::MediaStore::create_account`].
/// `account_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub name:          String,
  pub email:         String,
  pub password_hash: Option<String>,
  pub provider:      AuthProvider,
}
