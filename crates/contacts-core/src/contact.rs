//! Contact — the single resource managed by the service.
//!
//! A contact is an opaque, server-assigned [`ContactId`] plus five required
//! string fields. Requests carry a [`ContactInput`], in which every field is
//! optional; it is validated into a [`NewContact`] for creation or merged
//! onto an existing [`Contact`] for updates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator as _};
use thiserror::Error;
use uuid::Uuid;

use crate::Error;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Server-assigned contact identifier.
///
/// Rendered as a hyphenated lowercase UUID. Any string that does not parse is
/// treated by callers exactly like an id that does not exist.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
  /// Generate a fresh random id.
  pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for ContactId {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.hyphenated())
  }
}

impl FromStr for ContactId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s)
      .map(Self)
      .map_err(|_| Error::InvalidId(s.to_owned()))
  }
}

// ─── Fields ──────────────────────────────────────────────────────────────────

/// The five required contact fields, in canonical order.
///
/// The string form is the JSON field name.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
  FirstName,
  LastName,
  Email,
  FavoriteColor,
  Birthday,
}

/// One or more required fields were absent or empty.
///
/// `missing` lists every offending field in [`ContactField`] order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("contact validation failed: missing required {}", list_fields(.missing))]
pub struct ValidationError {
  pub missing: Vec<ContactField>,
}

fn list_fields(fields: &[ContactField]) -> String {
  fields
    .iter()
    .map(ContactField::as_ref)
    .collect::<Vec<_>>()
    .join(", ")
}

// ─── Stored contact ──────────────────────────────────────────────────────────

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:             ContactId,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub favorite_color: String,
  pub birthday:       String,
}

impl Contact {
  /// Borrow the value of `field`.
  pub fn get(&self, field: ContactField) -> &str {
    match field {
      ContactField::FirstName => &self.first_name,
      ContactField::LastName => &self.last_name,
      ContactField::Email => &self.email,
      ContactField::FavoriteColor => &self.favorite_color,
      ContactField::Birthday => &self.birthday,
    }
  }

  fn slot_mut(&mut self, field: ContactField) -> &mut String {
    match field {
      ContactField::FirstName => &mut self.first_name,
      ContactField::LastName => &mut self.last_name,
      ContactField::Email => &mut self.email,
      ContactField::FavoriteColor => &mut self.favorite_color,
      ContactField::Birthday => &mut self.birthday,
    }
  }

  /// Check that every required field is non-empty.
  pub fn validate(&self) -> Result<(), ValidationError> {
    let missing: Vec<_> = ContactField::iter()
      .filter(|f| self.get(*f).is_empty())
      .collect();
    if missing.is_empty() {
      Ok(())
    } else {
      Err(ValidationError { missing })
    }
  }
}

// ─── New contact ─────────────────────────────────────────────────────────────

/// A complete, validated set of fields ready to be inserted. The id is
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub favorite_color: String,
  pub birthday:       String,
}

impl NewContact {
  /// Attach a store-assigned id.
  pub fn with_id(self, id: ContactId) -> Contact {
    Contact {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      favorite_color: self.favorite_color,
      birthday: self.birthday,
    }
  }
}

// ─── Request input ───────────────────────────────────────────────────────────

/// Contact fields as supplied by a client. Every field is optional and
/// unknown keys are ignored.
///
/// An empty string counts as "not provided", both when creating (where it is
/// a validation failure) and when updating (where the stored value is kept).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInput {
  pub first_name:     Option<String>,
  pub last_name:      Option<String>,
  pub email:          Option<String>,
  pub favorite_color: Option<String>,
  pub birthday:       Option<String>,
}

impl ContactInput {
  /// The non-empty value supplied for `field`, if any.
  pub fn provided(&self, field: ContactField) -> Option<&str> {
    let value = match field {
      ContactField::FirstName => &self.first_name,
      ContactField::LastName => &self.last_name,
      ContactField::Email => &self.email,
      ContactField::FavoriteColor => &self.favorite_color,
      ContactField::Birthday => &self.birthday,
    };
    value.as_deref().filter(|v| !v.is_empty())
  }

  /// Fields that are absent or empty, in canonical order.
  pub fn missing_fields(&self) -> Vec<ContactField> {
    ContactField::iter()
      .filter(|f| self.provided(*f).is_none())
      .collect()
  }

  /// Turn the input into a [`NewContact`], reporting every missing field at
  /// once.
  pub fn validate(self) -> Result<NewContact, ValidationError> {
    let missing = self.missing_fields();
    if !missing.is_empty() {
      return Err(ValidationError { missing });
    }

    match (
      self.first_name,
      self.last_name,
      self.email,
      self.favorite_color,
      self.birthday,
    ) {
      (
        Some(first_name),
        Some(last_name),
        Some(email),
        Some(favorite_color),
        Some(birthday),
      ) => Ok(NewContact {
        first_name,
        last_name,
        email,
        favorite_color,
        birthday,
      }),
      // Unreachable after the `missing_fields` check above.
      _ => Err(ValidationError {
        missing: ContactField::iter().collect(),
      }),
    }
  }

  /// Merge onto `contact`: each provided, non-empty value replaces the stored
  /// one; everything else is left untouched.
  pub fn apply_to(&self, contact: &mut Contact) {
    for field in ContactField::iter() {
      if let Some(value) = self.provided(field) {
        *contact.slot_mut(field) = value.to_owned();
      }
    }
  }
}
