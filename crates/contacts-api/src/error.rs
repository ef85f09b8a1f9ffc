//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use contacts_core::{ValidationError, store::StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The `{"message": ...}` body used for errors and confirmations alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
  pub message: String,
}

impl MessageBody {
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into() }
  }
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The id is unknown or does not parse; the two are reported identically.
  #[error("Contact not found")]
  NotFound,

  /// The request body could not be read as a contact object.
  #[error("{0}")]
  BadRequest(String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The store refused a write, on its own constraints or otherwise.
  #[error("{0}")]
  Rejected(String),

  #[error("{0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Classify a backend error: constraint violations are client errors,
  /// everything else is a storage failure.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    if e.is_constraint_violation() {
      ApiError::Rejected(e.to_string())
    } else {
      ApiError::Store(Box::new(e))
    }
  }

  /// Classify a backend error raised while writing: every failure is
  /// reported to the client as a rejected request.
  pub fn rejected_write<E: StoreError>(e: E) -> Self {
    tracing::warn!(error = %e, "store rejected write");
    ApiError::Rejected(e.to_string())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_)
      | ApiError::Validation(_)
      | ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(MessageBody::new(self.to_string()))).into_response()
  }
}
