//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Every contact field is `NOT NULL` and must be non-empty, so the store
/// rejects incomplete records on its own.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,  -- insertion order
    contact_id      TEXT NOT NULL UNIQUE,                -- hyphenated UUID
    first_name      TEXT NOT NULL CHECK (first_name     <> ''),
    last_name       TEXT NOT NULL CHECK (last_name      <> ''),
    email           TEXT NOT NULL CHECK (email          <> ''),
    favorite_color  TEXT NOT NULL CHECK (favorite_color <> ''),
    birthday        TEXT NOT NULL CHECK (birthday       <> '')
);

PRAGMA user_version = 1;
";
