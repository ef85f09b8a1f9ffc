//! HTTP application assembly for the contacts service.
//!
//! Combines the contact resource router with the index route, the OpenAPI
//! document and the request middleware (tracing, CORS, panic recovery).

pub mod settings;

use std::{any::Any, sync::Arc};

use axum::{
  Json, Router,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::get,
};
use contacts_api::MessageBody;
use contacts_core::store::ContactStore;
use serde_json::{Value, json};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub use settings::{ServerConfig, expand_tilde};

/// Where the generated OpenAPI document is served.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Body of every 500 caused by a panic.
pub const UNHANDLED_MESSAGE: &str = "Something went wrong!";

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application for `store`.
pub fn app<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: ContactStore + 'static,
{
  let servers = config.servers.clone();
  let router = Router::new()
    .route("/", get(index))
    .route(
      OPENAPI_PATH,
      get(move || async move { Json(contacts_api::openapi(&servers)) }),
    )
    .merge(contacts_api::api_router(store))
    .fallback(route_not_found)
    .method_not_allowed_fallback(method_not_allowed);

  with_middleware(router, config)
}

/// Wrap `router` in the standard middleware stack.
pub fn with_middleware(router: Router, config: &ServerConfig) -> Router {
  let expose_details = !config.is_production();
  let router = router.layer(CatchPanicLayer::custom(
    move |err: Box<dyn Any + Send + 'static>| panic_response(err, expose_details),
  ));
  let router = if config.cors_permissive {
    router.layer(CorsLayer::permissive())
  } else {
    router
  };
  router.layer(TraceLayer::new_for_http())
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /` — service banner listing the contact endpoints.
async fn index() -> Json<Value> {
  Json(json!({
    "message": "Welcome to the Contacts API",
    "endpoints": {
      "getAllContacts":   "/api/contacts",
      "getSingleContact": "/api/contacts/:id",
      "createContact":    "/api/contacts (POST)",
      "updateContact":    "/api/contacts/:id (PUT)",
      "deleteContact":    "/api/contacts/:id (DELETE)",
      "openApi":          OPENAPI_PATH,
    }
  }))
}

async fn route_not_found() -> (StatusCode, Json<MessageBody>) {
  (StatusCode::NOT_FOUND, Json(MessageBody::new("Route not found")))
}

async fn method_not_allowed() -> (StatusCode, Json<MessageBody>) {
  (
    StatusCode::METHOD_NOT_ALLOWED,
    Json(MessageBody::new("Method not allowed")),
  )
}

fn panic_response(err: Box<dyn Any + Send + 'static>, expose_details: bool) -> Response {
  let details = if let Some(s) = err.downcast_ref::<String>() {
    s.clone()
  } else if let Some(s) = err.downcast_ref::<&str>() {
    (*s).to_owned()
  } else {
    "unknown panic".to_owned()
  };
  tracing::error!(panic = %details, "request handler panicked");

  let body = if expose_details {
    json!({ "message": UNHANDLED_MESSAGE, "error": details })
  } else {
    json!({ "message": UNHANDLED_MESSAGE })
  };
  (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

// ─── Integration tests ────────────────────────────────────────────────────────
