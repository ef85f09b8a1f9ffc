//! Handlers for `/api/contacts` endpoints.
//!
//! | Method   | Path                 | Notes |
//! |----------|----------------------|-------|
//! | `GET`    | `/api/contacts`      | All contacts, storage order |
//! | `GET`    | `/api/contacts/{id}` | 404 if unknown or malformed |
//! | `POST`   | `/api/contacts`      | Body: all five fields; returns 201 |
//! | `PUT`    | `/api/contacts/{id}` | Body: any subset of the fields |
//! | `DELETE` | `/api/contacts/{id}` | Returns a confirmation message |

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{FromRequest, Path, Request, State},
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use contacts_core::{Contact, ContactId, ContactInput, store::ContactStore};

use crate::error::{ApiError, MessageBody};

/// Confirmation returned by `DELETE`.
pub const DELETED_MESSAGE: &str = "Contact deleted successfully";

/// Rejection text for a non-empty body sent without a JSON content type.
pub const MISSING_JSON_CONTENT_TYPE: &str =
  "Expected request with `Content-Type: application/json`";

/// JSON body extractor whose rejections render as [`ApiError`].
///
/// An empty body reads as an input with no fields, whatever the content
/// type. A non-empty body must be declared as JSON.
pub struct ContactBody(pub ContactInput);

impl<S> FromRequest<S> for ContactBody
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let declared_json = is_json(req.headers());
    let bytes = Bytes::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self(ContactInput::default()));
    }
    if !declared_json {
      return Err(ApiError::BadRequest(MISSING_JSON_CONTENT_TYPE.to_owned()));
    }
    let Json(input) = Json::<ContactInput>::from_bytes(&bytes)?;
    Ok(Self(input))
  }
}

/// `application/json` or any `+json` suffix, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(';').next())
    .map(|essence| essence.trim().to_ascii_lowercase())
    .is_some_and(|essence| {
      essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
    })
}

/// Malformed ids are indistinguishable from unknown ones.
fn parse_id(raw: &str) -> Result<ContactId, ApiError> {
  raw.parse().map_err(|_| {
    tracing::debug!(id = raw, "malformed contact id");
    ApiError::NotFound
  })
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /api/contacts`
#[utoipa::path(
  get,
  path = "/api/contacts",
  tag = "Contacts",
  summary = "Returns all contacts",
  responses(
    (status = 200, description = "The list of contacts", body = Vec<crate::openapi::ContactDoc>),
    (status = 500, description = "Storage failure", body = crate::openapi::MessageDoc),
  )
)]
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store.list_contacts().await.map_err(ApiError::from_store)?;
  tracing::debug!(count = contacts.len(), "listed contacts");
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /api/contacts/{id}`
#[utoipa::path(
  get,
  path = "/api/contacts/{id}",
  tag = "Contacts",
  summary = "Get a contact by id",
  params(("id" = String, Path, description = "The contact id")),
  responses(
    (status = 200, description = "The contact with this id", body = crate::openapi::ContactDoc),
    (status = 404, description = "The contact was not found", body = crate::openapi::MessageDoc),
    (status = 500, description = "Storage failure", body = crate::openapi::MessageDoc),
  )
)]
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&id)?;
  let contact = store
    .get_contact(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/contacts` — returns 201 + the stored contact.
///
/// Every missing field is reported before the store is touched. Any store
/// failure is answered with 400 and the backend's message.
#[utoipa::path(
  post,
  path = "/api/contacts",
  tag = "Contacts",
  summary = "Create a new contact",
  request_body = crate::openapi::ContactInputDoc,
  responses(
    (status = 201, description = "The contact was successfully created", body = crate::openapi::ContactDoc),
    (status = 400, description = "Some required fields are missing, or the store refused the write", body = crate::openapi::MessageDoc),
  )
)]
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ContactBody(input): ContactBody,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let new_contact = input.validate()?;
  let contact = store
    .insert_contact(new_contact)
    .await
    .map_err(ApiError::rejected_write)?;
  tracing::info!(id = %contact.id, "created contact");
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /api/contacts/{id}` — partial update.
///
/// Fields that are absent or empty keep their stored value; an empty body
/// leaves the contact unchanged. Store failures are answered with 400.
#[utoipa::path(
  put,
  path = "/api/contacts/{id}",
  tag = "Contacts",
  summary = "Update a contact by id",
  params(("id" = String, Path, description = "The contact id")),
  request_body = crate::openapi::ContactInputDoc,
  responses(
    (status = 200, description = "The contact was updated", body = crate::openapi::ContactDoc),
    (status = 400, description = "The updated contact is invalid, or the store refused the write", body = crate::openapi::MessageDoc),
    (status = 404, description = "The contact was not found", body = crate::openapi::MessageDoc),
  )
)]
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  ContactBody(patch): ContactBody,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&id)?;
  let mut contact = store
    .get_contact(id)
    .await
    .map_err(ApiError::rejected_write)?
    .ok_or(ApiError::NotFound)?;

  patch.apply_to(&mut contact);
  contact.validate()?;

  // The contact may have been deleted since the lookup; last write wins.
  let updated = store
    .update_contact(&contact)
    .await
    .map_err(ApiError::rejected_write)?
    .ok_or(ApiError::NotFound)?;
  tracing::info!(id = %updated.id, "updated contact");
  Ok(Json(updated))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/contacts/{id}`
#[utoipa::path(
  delete,
  path = "/api/contacts/{id}",
  tag = "Contacts",
  summary = "Delete a contact by id",
  params(("id" = String, Path, description = "The contact id")),
  responses(
    (status = 200, description = "The contact was deleted", body = crate::openapi::MessageDoc),
    (status = 404, description = "The contact was not found", body = crate::openapi::MessageDoc),
    (status = 500, description = "Storage failure", body = crate::openapi::MessageDoc),
  )
)]
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError>
where
  S: ContactStore,
{
  let id = parse_id(&id)?;
  if !store.delete_contact(id).await.map_err(ApiError::from_store)? {
    return Err(ApiError::NotFound);
  }
  tracing::info!(%id, "deleted contact");
  Ok(Json(MessageBody::new(DELETED_MESSAGE)))
}
