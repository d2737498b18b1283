//! The `MediaStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `reel-store-sqlite`).
//! The HTTP layer (`reel-server`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  account::{Account, NewAccount},
  entry::{LibraryEntry, NewEntry},
  message::{ContactMessage, NewMessage},
};

/// Abstraction over a Reel persistence backend.
///
/// Each method is an independent, stateless call; there are no transactions
/// spanning multiple records and no ordering guarantee between concurrent
/// calls beyond what the backend provides natively.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`). The associated
/// `Error` converts into [`crate::Error`], which is how callers that are
/// generic over the backend recover the domain meaning of a failure.
pub trait MediaStore: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  // ── Accounts ──────────────────────────────────────────────────────────

  /// Create and persist a new account. The store assigns the identifier
  /// and creation timestamp. Fails with an email-taken error if the email
  /// is already registered.
  fn create_account(
    &self,
    input: NewAccount,
  ) -> impl Future<Output = Result<Account, Self::Error>> + Send + '_;

  /// Look up an account by email. Returns `None` if not found.
  fn find_account_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + 'a;

  /// Retrieve an account by identifier. Returns `None` if not found.
  fn get_account(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  // ── Library entries ───────────────────────────────────────────────────

  /// Persist a new library entry and return it, including the generated
  /// identifier.
  fn add_entry(
    &self,
    input: NewEntry,
  ) -> impl Future<Output = Result<LibraryEntry, Self::Error>> + Send + '_;

  /// All entries owned by `account_id`, most-recently-added first.
  /// An account with no entries yields an empty vec, not an error.
  fn list_entries(
    &self,
    account_id: Uuid,
  ) -> impl Future<Output = Result<Vec<LibraryEntry>, Self::Error>> + Send + '_;

  /// Delete an entry if it exists and is owned by `account_id`; returns
  /// the deleted entry. Fails with a not-found error otherwise — including
  /// on a repeat delete of the same identifier.
  fn delete_entry(
    &self,
    account_id: Uuid,
    entry_id: Uuid,
  ) -> impl Future<Output = Result<LibraryEntry, Self::Error>> + Send + '_;

  // ── Contact messages ──────────────────────────────────────────────────

  /// Persist a new contact message with `done` defaulted to false.
  fn add_message(
    &self,
    input: NewMessage,
  ) -> impl Future<Output = Result<ContactMessage, Self::Error>> + Send + '_;

  /// All contact messages, most recent first.
  fn list_messages(
    &self,
  ) -> impl Future<Output = Result<Vec<ContactMessage>, Self::Error>> + Send + '_;

  /// Set the done flag on a message and return the updated record.
  /// Fails with a not-found error if the identifier does not exist.
  fn set_message_done(
    &self,
    message_id: Uuid,
    done: bool,
  ) -> impl Future<Output = Result<ContactMessage, Self::Error>> + Send + '_;
}
