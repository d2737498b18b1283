//! [`SqliteStore`] — the SQLite implementation of [`MediaStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use reel_core::{
  account::{Account, NewAccount},
  entry::{LibraryEntry, NewEntry},
  message::{ContactMessage, NewMessage},
  store::MediaStore,
};

use crate::{
  encode::{encode_dt, encode_provider, encode_uuid, RawAccount, RawEntry, RawMessage},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Reel media store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── MediaStore impl ─────────────────────────────────────────────────────────

impl MediaStore for SqliteStore {
  type Error = Error;

  // ── Accounts ──────────────────────────────────────────────────────────────

  async fn create_account(&self, input: NewAccount) -> Result<Account> {
    let account = Account {
      account_id:    Uuid::new_v4(),
      name:          input.name,
      email:         input.email,
      password_hash: input.password_hash,
      provider:      input.provider,
      created_at:    Utc::now(),
    };

    let id_str       = encode_uuid(account.account_id);
    let name         = account.name.clone();
    let email        = account.email.clone();
    let hash         = account.password_hash.clone();
    let provider_str = encode_provider(account.provider).to_owned();
    let at_str       = encode_dt(account.created_at);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        // The UNIQUE constraint is the backstop; the pre-check turns the
        // common collision into a typed error instead of a constraint
        // violation.
        let taken: bool = conn
          .query_row(
            "SELECT 1 FROM accounts WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if taken {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO accounts (account_id, name, email, password_hash, provider, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, name, email, hash, provider_str, at_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::EmailTaken(account.email));
    }
    Ok(account)
  }

  async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
    let email = email.to_owned();

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT account_id, name, email, password_hash, provider, created_at
             FROM accounts WHERE email = ?1",
            rusqlite::params![email],
            |row| {
              Ok(RawAccount {
                account_id:    row.get(0)?,
                name:          row.get(1)?,
                email:         row.get(2)?,
                password_hash: row.get(3)?,
                provider:      row.get(4)?,
                created_at:    row.get(5)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAccount::into_account).transpose()
  }

  async fn get_account(&self, id: Uuid) -> Result<Option<Account>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAccount> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT account_id, name, email, password_hash, provider, created_at
             FROM accounts WHERE account_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawAccount {
                account_id:    row.get(0)?,
                name:          row.get(1)?,
                email:         row.get(2)?,
                password_hash: row.get(3)?,
                provider:      row.get(4)?,
                created_at:    row.get(5)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawAccount::into_account).transpose()
  }

  // ── Library entries ───────────────────────────────────────────────────────

  async fn add_entry(&self, input: NewEntry) -> Result<LibraryEntry> {
    let entry = LibraryEntry {
      entry_id:   Uuid::new_v4(),
      account_id: input.account_id,
      url:        input.url,
      title:      input.title,
      created_at: Utc::now(),
    };

    let id_str      = encode_uuid(entry.entry_id);
    let account_str = encode_uuid(entry.account_id);
    let url         = entry.url.clone();
    let title       = entry.title.clone();
    let at_str      = encode_dt(entry.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO entries (entry_id, account_id, url, title, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, account_str, url, title, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(entry)
  }

  async fn list_entries(&self, account_id: Uuid) -> Result<Vec<LibraryEntry>> {
    let account_str = encode_uuid(account_id);

    let raws: Vec<RawEntry> = self
      .conn
      .call(move |conn| {
        // rowid breaks ties so same-timestamp inserts still list
        // newest-first.
        let mut stmt = conn.prepare(
          "SELECT entry_id, account_id, url, title, created_at
           FROM entries WHERE account_id = ?1
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![account_str], |row| {
            Ok(RawEntry {
              entry_id:   row.get(0)?,
              account_id: row.get(1)?,
              url:        row.get(2)?,
              title:      row.get(3)?,
              created_at: row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEntry::into_entry).collect()
  }

  async fn delete_entry(
    &self,
    account_id: Uuid,
    entry_id: Uuid,
  ) -> Result<LibraryEntry> {
    let entry_str   = encode_uuid(entry_id);
    let account_str = encode_uuid(account_id);

    let raw: Option<RawEntry> = self
      .conn
      .call(move |conn| {
        // Scoped to the owning account: another account's entry is
        // indistinguishable from a missing one.
        let row = conn
          .query_row(
            "SELECT entry_id, account_id, url, title, created_at
             FROM entries WHERE entry_id = ?1 AND account_id = ?2",
            rusqlite::params![entry_str, account_str],
            |row| {
              Ok(RawEntry {
                entry_id:   row.get(0)?,
                account_id: row.get(1)?,
                url:        row.get(2)?,
                title:      row.get(3)?,
                created_at: row.get(4)?,
              })
            },
          )
          .optional()?;

        if row.is_some() {
          conn.execute(
            "DELETE FROM entries WHERE entry_id = ?1 AND account_id = ?2",
            rusqlite::params![entry_str, account_str],
          )?;
        }
        Ok(row)
      })
      .await?;

    raw
      .ok_or(Error::EntryNotFound(entry_id))
      .and_then(RawEntry::into_entry)
  }

  // ── Contact messages ──────────────────────────────────────────────────────

  async fn add_message(&self, input: NewMessage) -> Result<ContactMessage> {
    let message = ContactMessage {
      message_id: Uuid::new_v4(),
      fullname:   input.fullname,
      email:      input.email,
      body:       input.body,
      done:       false,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(message.message_id);
    let fullname = message.fullname.clone();
    let email    = message.email.clone();
    let body     = message.body.clone();
    let at_str   = encode_dt(message.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO messages (message_id, fullname, email, body, done, created_at)
           VALUES (?1, ?2, ?3, ?4, 0, ?5)",
          rusqlite::params![id_str, fullname, email, body, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(message)
  }

  async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
    let raws: Vec<RawMessage> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT message_id, fullname, email, body, done, created_at
           FROM messages
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawMessage {
              message_id: row.get(0)?,
              fullname:   row.get(1)?,
              email:      row.get(2)?,
              body:       row.get(3)?,
              done:       row.get(4)?,
              created_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }

  async fn set_message_done(
    &self,
    message_id: Uuid,
    done: bool,
  ) -> Result<ContactMessage> {
    let id_str = encode_uuid(message_id);

    let raw: Option<RawMessage> = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE messages SET done = ?1 WHERE message_id = ?2",
          rusqlite::params![done, id_str],
        )?;
        if updated == 0 {
          return Ok(None);
        }

        let row = conn.query_row(
          "SELECT message_id, fullname, email, body, done, created_at
           FROM messages WHERE message_id = ?1",
          rusqlite::params![id_str],
          |row| {
            Ok(RawMessage {
              message_id: row.get(0)?,
              fullname:   row.get(1)?,
              email:      row.get(2)?,
              body:       row.get(3)?,
              done:       row.get(4)?,
              created_at: row.get(5)?,
            })
          },
        )?;
        Ok(Some(row))
      })
      .await?;

    raw
      .ok_or(Error::MessageNotFound(message_id))
      .and_then(RawMessage::into_message)
  }
}
