//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. UUIDs are stored as
//! hyphenated lowercase strings. Every row is decoded into its typed
//! domain struct here, at the adapter boundary, before being handed to
//! callers.

use chrono::{DateTime, Utc};
use reel_core::{
  account::{Account, AuthProvider},
  entry::LibraryEntry,
  message::ContactMessage,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── AuthProvider ────────────────────────────────────────────────────────────

pub fn encode_provider(p: AuthProvider) -> &'static str {
  match p {
    AuthProvider::Credentials => "credentials",
    AuthProvider::Federated => "federated",
  }
}

pub fn decode_provider(s: &str) -> Result<AuthProvider> {
  match s {
    "credentials" => Ok(AuthProvider::Credentials),
    "federated" => Ok(AuthProvider::Federated),
    other => Err(Error::UnknownProvider(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `accounts` row.
pub struct RawAccount {
  pub account_id:    String,
  pub name:          String,
  pub email:         String,
  pub password_hash: Option<String>,
  pub provider:      String,
  pub created_at:    String,
}

impl RawAccount {
  pub fn into_account(self) -> Result<Account> {
    Ok(Account {
      account_id:    decode_uuid(&self.account_id)?,
      name:          self.name,
      email:         self.email,
      password_hash: self.password_hash,
      provider:      decode_provider(&self.provider)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `entries` row.
pub struct RawEntry {
  pub entry_id:   String,
  pub account_id: String,
  pub url:        String,
  pub title:      String,
  pub created_at: String,
}

impl RawEntry {
  pub fn into_entry(self) -> Result<LibraryEntry> {
    Ok(LibraryEntry {
      entry_id:   decode_uuid(&self.entry_id)?,
      account_id: decode_uuid(&self.account_id)?,
      url:        self.url,
      title:      self.title,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from a `messages` row.
pub struct RawMessage {
  pub message_id: String,
  pub fullname:   String,
  pub email:      String,
  pub body:       String,
  pub done:       bool,
  pub created_at: String,
}

impl RawMessage {
  pub fn into_message(self) -> Result<ContactMessage> {
    Ok(ContactMessage {
      message_id: decode_uuid(&self.message_id)?,
      fullname:   self.fullname,
      email:      self.email,
      body:       self.body,
      done:       self.done,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
