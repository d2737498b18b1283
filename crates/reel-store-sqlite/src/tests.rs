//! Integration tests for `SqliteStore` against an in-memory database.

use reel_core::{
  account::{AuthProvider, NewAccount},
  entry::NewEntry,
  message::NewMessage,
  store::MediaStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn credentials_account(email: &str) -> NewAccount {
  NewAccount {
    name:          "Alice Liddell".into(),
    email:         email.into(),
    password_hash: Some("$argon2id$v=19$placeholder".into()),
    provider:      AuthProvider::Credentials,
  }
}

fn entry(account_id: Uuid, url: &str, title: &str) -> NewEntry {
  NewEntry {
    account_id,
    url: url.into(),
    title: title.into(),
  }
}

// ─── Accounts ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_account() {
  let s = store().await;

  let account = s
    .create_account(credentials_account("alice@example.com"))
    .await
    .unwrap();
  assert_eq!(account.provider, AuthProvider::Credentials);

  let found = s
    .find_account_by_email("alice@example.com")
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.account_id, account.account_id);
  assert_eq!(found.password_hash, account.password_hash);

  let by_id = s.get_account(account.account_id).await.unwrap().unwrap();
  assert_eq!(by_id.email, "alice@example.com");
}

#[tokio::test]
async fn find_account_missing_returns_none() {
  let s = store().await;
  assert!(
    s.find_account_by_email("nobody@example.com")
      .await
      .unwrap()
      .is_none()
  );
  assert!(s.get_account(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_rejected() {
  let s = store().await;
  s.create_account(credentials_account("alice@example.com"))
    .await
    .unwrap();

  let err = s
    .create_account(credentials_account("alice@example.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::EmailTaken(_)));
}

#[tokio::test]
async fn federated_account_has_no_password_hash() {
  let s = store().await;
  let account = s
    .create_account(NewAccount {
      name:          "Bob".into(),
      email:         "bob@example.com".into(),
      password_hash: None,
      provider:      AuthProvider::Federated,
    })
    .await
    .unwrap();

  let found = s.get_account(account.account_id).await.unwrap().unwrap();
  assert_eq!(found.provider, AuthProvider::Federated);
  assert!(found.password_hash.is_none());
}

// ─── Library entries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn add_then_list_shows_newest_first() {
  let s = store().await;
  let account = s
    .create_account(credentials_account("alice@example.com"))
    .await
    .unwrap();

  let first = s
    .add_entry(entry(account.account_id, "https://example.com/a", "First"))
    .await
    .unwrap();
  let second = s
    .add_entry(entry(account.account_id, "dQw4w9WgXcQ", "Second"))
    .await
    .unwrap();

  let listed = s.list_entries(account.account_id).await.unwrap();
  assert_eq!(listed.len(), 2);
  assert_eq!(listed[0].entry_id, second.entry_id);
  assert_eq!(listed[1].entry_id, first.entry_id);
}

#[tokio::test]
async fn list_entries_empty_account() {
  let s = store().await;
  let account = s
    .create_account(credentials_account("alice@example.com"))
    .await
    .unwrap();
  assert!(s.list_entries(account.account_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn entries_are_scoped_to_owner() {
  let s = store().await;
  let alice = s
    .create_account(credentials_account("alice@example.com"))
    .await
    .unwrap();
  let bob = s
    .create_account(credentials_account("bob@example.com"))
    .await
    .unwrap();

  s.add_entry(entry(alice.account_id, "dQw4w9WgXcQ", "Test"))
    .await
    .unwrap();

  assert_eq!(s.list_entries(alice.account_id).await.unwrap().len(), 1);
  assert!(s.list_entries(bob.account_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_entry_then_repeat_is_not_found() {
  let s = store().await;
  let account = s
    .create_account(credentials_account("alice@example.com"))
    .await
    .unwrap();
  let saved = s
    .add_entry(entry(account.account_id, "https://example.com/a", "A"))
    .await
    .unwrap();

  let deleted = s
    .delete_entry(account.account_id, saved.entry_id)
    .await
    .unwrap();
  assert_eq!(deleted.entry_id, saved.entry_id);
  assert!(s.list_entries(account.account_id).await.unwrap().is_empty());

  // Repeat delete of the same identifier is NotFound, not a new state.
  let err = s
    .delete_entry(account.account_id, saved.entry_id)
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::EntryNotFound(_)));
}

#[tokio::test]
async fn delete_entry_owned_by_other_account_is_not_found() {
  let s = store().await;
  let alice = s
    .create_account(credentials_account("alice@example.com"))
    .await
    .unwrap();
  let bob = s
    .create_account(credentials_account("bob@example.com"))
    .await
    .unwrap();
  let saved = s
    .add_entry(entry(alice.account_id, "https://example.com/a", "A"))
    .await
    .unwrap();

  let err = s
    .delete_entry(bob.account_id, saved.entry_id)
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::EntryNotFound(_)));

  // Alice's entry is untouched.
  assert_eq!(s.list_entries(alice.account_id).await.unwrap().len(), 1);
}

// ─── Contact messages ────────────────────────────────────────────────────────

#[tokio::test]
async fn add_message_defaults_done_false() {
  let s = store().await;

  let message = s
    .add_message(NewMessage {
      fullname: "Jane Doe".into(),
      email:    "jane@example.com".into(),
      body:     "Hello".into(),
    })
    .await
    .unwrap();
  assert!(!message.done);

  let listed = s.list_messages().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].message_id, message.message_id);
  assert!(!listed[0].done);
}

#[tokio::test]
async fn empty_body_is_persisted() {
  let s = store().await;
  let message = s
    .add_message(NewMessage {
      fullname: "Jane Doe".into(),
      email:    "jane@example.com".into(),
      body:     String::new(),
    })
    .await
    .unwrap();

  let listed = s.list_messages().await.unwrap();
  assert_eq!(listed[0].message_id, message.message_id);
  assert!(listed[0].body.is_empty());
}

#[tokio::test]
async fn messages_list_newest_first() {
  let s = store().await;
  for n in 1..=3 {
    s.add_message(NewMessage {
      fullname: format!("Sender {n}"),
      email:    format!("sender{n}@example.com"),
      body:     "hi".into(),
    })
    .await
    .unwrap();
  }

  let listed = s.list_messages().await.unwrap();
  assert_eq!(listed.len(), 3);
  assert_eq!(listed[0].fullname, "Sender 3");
  assert_eq!(listed[2].fullname, "Sender 1");
}

#[tokio::test]
async fn mark_done_round_trip() {
  let s = store().await;
  let message = s
    .add_message(NewMessage {
      fullname: "Jane Doe".into(),
      email:    "jane@example.com".into(),
      body:     "Hello".into(),
    })
    .await
    .unwrap();

  let updated = s.set_message_done(message.message_id, true).await.unwrap();
  assert!(updated.done);

  let reverted = s.set_message_done(message.message_id, false).await.unwrap();
  assert!(!reverted.done);
}

#[tokio::test]
async fn mark_done_unknown_id_is_not_found() {
  let s = store().await;
  let err = s.set_message_done(Uuid::new_v4(), true).await.unwrap_err();
  assert!(matches!(err, crate::Error::MessageNotFound(_)));
}
