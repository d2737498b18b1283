//! SQL schema for the Reel SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS accounts (
    account_id    TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT,             -- argon2 PHC string; NULL for federated accounts
    provider      TEXT NOT NULL,    -- 'credentials' | 'federated'
    created_at    TEXT NOT NULL     -- ISO 8601 UTC; server-assigned
);

-- Entries are immutable after creation; the only write after INSERT is
-- a DELETE scoped to the owning account.
CREATE TABLE IF NOT EXISTS entries (
    entry_id   TEXT PRIMARY KEY,
    account_id TEXT NOT NULL REFERENCES accounts(account_id),
    url        TEXT NOT NULL,       -- full URL or bare 11-char video id
    title      TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Contact messages are never deleted; the done flag is the only mutable
-- column.
CREATE TABLE IF NOT EXISTS messages (
    message_id TEXT PRIMARY KEY,
    fullname   TEXT NOT NULL,
    email      TEXT NOT NULL,
    body       TEXT NOT NULL DEFAULT '',
    done       INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS entries_account_idx  ON entries(account_id);
CREATE INDEX IF NOT EXISTS messages_created_idx ON messages(created_at);

PRAGMA user_version = 1;
";
