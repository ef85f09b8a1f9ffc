//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `contacts-store-sqlite`). The API layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactId, NewContact};

/// Classification hook for backend errors.
///
/// Lets the API layer tell a rejected write (the backend's own required-field
/// enforcement) from every other storage failure without knowing the backend.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` if the backend refused a write because it would violate a
  /// constraint on the stored record.
  fn is_constraint_violation(&self) -> bool { false }
}

/// Abstraction over a contact store backend.
///
/// There is no optimistic concurrency: concurrent writes to the same id are
/// applied in whatever order the backend commits them.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Every stored contact, in the backend's natural order.
  fn list_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new contact. The id is assigned by the store.
  fn insert_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Overwrite all fields of an existing contact.
  ///
  /// Returns `None` if no contact with `contact.id` exists.
  fn update_contact<'a>(
    &'a self,
    contact: &'a Contact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// Permanently remove a contact. Returns `false` if it did not exist.
  fn delete_contact(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
