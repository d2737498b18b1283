//! Error types for `reel-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("email already registered: {0}")]
  EmailTaken(String),

  #[error("library entry not found: {0}")]
  EntryNotFound(Uuid),

  #[error("contact message not found: {0}")]
  MessageNotFound(Uuid),

  /// A storage backend failed for a reason that has no domain meaning.
  /// The backend logs the underlying error before stringifying it here.
  #[error("storage error: {0}")]
  Backend(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
