//! Conversions between domain types and the plain-text columns stored in
//! SQLite. Ids are stored as hyphenated lowercase UUID strings.

use contacts_core::{Contact, ContactId};

use crate::Result;

pub fn encode_id(id: ContactId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> { Ok(s.parse()?) }

/// Column list shared by every `SELECT`, in [`RawContact`] order.
pub const CONTACT_COLUMNS: &str =
  "contact_id, first_name, last_name, email, favorite_color, birthday";

/// A `contacts` row in its stored text form.
pub struct RawContact {
  pub contact_id:     String,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  pub favorite_color: String,
  pub birthday:       String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:     row.get(0)?,
      first_name:     row.get(1)?,
      last_name:      row.get(2)?,
      email:          row.get(3)?,
      favorite_color: row.get(4)?,
      birthday:       row.get(5)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:             decode_id(&self.contact_id)?,
      first_name:     self.first_name,
      last_name:      self.last_name,
      email:          self.email,
      favorite_color: self.favorite_color,
      birthday:       self.birthday,
    })
  }
}

impl From<&Contact> for RawContact {
  fn from(contact: &Contact) -> Self {
    Self {
      contact_id:     encode_id(contact.id),
      first_name:     contact.first_name.clone(),
      last_name:      contact.last_name.clone(),
      email:          contact.email.clone(),
      favorite_color: contact.favorite_color.clone(),
      birthday:       contact.birthday.clone(),
    }
  }
}
