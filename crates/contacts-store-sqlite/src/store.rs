//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use contacts_core::{
  Contact, ContactId, NewContact, store::ContactStore,
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{CONTACT_COLUMNS, RawContact, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contact store backed by a single SQLite database.
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

  /// Open a store from a connection string.
  ///
  /// Accepts `:memory:`, `sqlite::memory:`, `sqlite://<path>`,
  /// `sqlite:<path>` or a bare filesystem path.
  pub async fn connect(url: &str) -> Result<Self> {
    let target = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);
    if target == ":memory:" {
      Self::open_in_memory().await
    } else {
      Self::open(target).await
    }
  }

  /// Close the underlying connection. Clones of this store fail every
  /// subsequent call.
  pub async fn close(&self) -> Result<()> {
    self.conn.clone().close().await?;
    Ok(())
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

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY seq"
        ))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"
              ),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn insert_contact(&self, input: NewContact) -> Result<Contact> {
    let contact = input.with_id(ContactId::new());

    let raw = RawContact::from(&contact);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, first_name, last_name, email, favorite_color, birthday
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            raw.contact_id,
            raw.first_name,
            raw.last_name,
            raw.email,
            raw.favorite_color,
            raw.birthday,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %contact.id, "inserted contact row");
    Ok(contact)
  }

  async fn update_contact(&self, contact: &Contact) -> Result<Option<Contact>> {
    let raw = RawContact::from(contact);

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts
           SET first_name = ?2, last_name = ?3, email = ?4,
               favorite_color = ?5, birthday = ?6
           WHERE contact_id = ?1",
          rusqlite::params![
            raw.contact_id,
            raw.first_name,
            raw.last_name,
            raw.email,
            raw.favorite_color,
            raw.birthday,
          ],
        )?)
      })
      .await?;

    Ok((changed > 0).then(|| contact.clone()))
  }

  async fn delete_contact(&self, id: ContactId) -> Result<bool> {
    let id_str = encode_id(id);

    let changed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }
}
