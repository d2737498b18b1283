//! Error type for `reel-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("unknown auth provider: {0:?}")]
  UnknownProvider(String),

  #[error("email already registered: {0}")]
  EmailTaken(String),

  #[error("library entry not found: {0}")]
  EntryNotFound(Uuid),

  #[error("contact message not found: {0}")]
  MessageNotFound(Uuid),
}

/// Translation into the domain error the server layer works with.
/// Rows that fail to decode and database failures carry no domain meaning
/// and collapse into `Backend`.
impl From<Error> for reel_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::EmailTaken(email) => reel_core::Error::EmailTaken(email),
      Error::EntryNotFound(id) => reel_core::Error::EntryNotFound(id),
      Error::MessageNotFound(id) => reel_core::Error::MessageNotFound(id),
      other => reel_core::Error::Backend(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
