//! JSON REST API for the contact resource.
//!
//! Exposes an axum [`Router`] backed by any
//! [`contacts_core::store::ContactStore`]. Transport concerns (listener,
//! middleware, logging setup) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = Router::new().merge(contacts_api::api_router(store.clone()));
//! ```

pub mod contacts;
pub mod error;
pub mod openapi;

use std::sync::Arc;

use axum::{Router, routing::get};
use contacts_core::store::ContactStore;

pub use error::{ApiError, MessageBody};
pub use openapi::openapi;

/// Path prefix under which the contact resource is served.
pub const CONTACTS_PATH: &str = "/api/contacts";

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route(
      CONTACTS_PATH,
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      &format!("{CONTACTS_PATH}/{{id}}"),
      get(contacts::get_one::<S>)
        .put(contacts::update_one::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use contacts_core::Contact;
  use contacts_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn make_app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn ann() -> Value {
    json!({
      "firstName": "Ann",
      "lastName": "Lee",
      "email": "a@x.com",
      "favoriteColor": "blue",
      "birthday": "2000-01-01",
    })
  }

  async fn create_ann(app: &Router) -> Contact {
    let (status, body) = send(app, "POST", "/api/contacts", Some(ann())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    serde_json::from_value(body).unwrap()
  }

  async fn count(app: &Router) -> usize {
    let (status, body) = send(app, "GET", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().unwrap().len()
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_empty_returns_empty_array() {
    let app = make_app().await;
    let (status, body) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn list_returns_created_contacts() {
    let app = make_app().await;
    let a = create_ann(&app).await;
    let b = create_ann(&app).await;

    let (_, body) = send(&app, "GET", "/api/contacts", None).await;
    let listed: Vec<Contact> = serde_json::from_value(body).unwrap();
    assert_eq!(listed, vec![a, b]);
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_echoes_fields_and_assigns_id() {
    let app = make_app().await;
    let (status, body) = send(&app, "POST", "/api/contacts", Some(ann())).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());
    for key in ["firstName", "lastName", "email", "favoriteColor", "birthday"] {
      assert_eq!(body[key], ann()[key], "{key}");
    }
  }

  #[tokio::test]
  async fn create_ignores_unknown_fields() {
    let app = make_app().await;
    let mut payload = ann();
    payload["nickname"] = json!("annie");
    let (status, body) = send(&app, "POST", "/api/contacts", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.get("nickname").is_none());
  }

  #[tokio::test]
  async fn create_missing_any_field_returns_400_and_stores_nothing() {
    let app = make_app().await;
    for key in ["firstName", "lastName", "email", "favoriteColor", "birthday"] {
      let mut payload = ann();
      payload.as_object_mut().unwrap().remove(key);

      let (status, body) = send(&app, "POST", "/api/contacts", Some(payload)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{key}");
      let message = body["message"].as_str().unwrap();
      assert!(message.contains(key), "{message}");
    }
    assert_eq!(count(&app).await, 0);
  }

  #[tokio::test]
  async fn create_reports_every_missing_field() {
    let app = make_app().await;
    let (status, body) = send(
      &app,
      "POST",
      "/api/contacts",
      Some(json!({ "firstName": "Ann", "email": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      body["message"],
      "contact validation failed: missing required lastName, email, favoriteColor, birthday"
    );
  }

  #[tokio::test]
  async fn create_with_invalid_json_returns_400() {
    let app = make_app().await;
    let req = Request::builder()
      .method("POST")
      .uri("/api/contacts")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(
      &app,
      "POST",
      "/api/contacts",
      Some(json!({ "firstName": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    assert_eq!(count(&app).await, 0);
  }

  // ── Get ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_returns_created_contact() {
    let app = make_app().await;
    let created = create_ann(&app).await;

    let (status, body) =
      send(&app, "GET", &format!("/api/contacts/{}", created.id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Contact>(body).unwrap(), created);
  }

  #[tokio::test]
  async fn get_unknown_id_returns_404() {
    let app = make_app().await;
    let id = contacts_core::ContactId::new();
    let (status, body) =
      send(&app, "GET", &format!("/api/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Contact not found" }));
  }

  #[tokio::test]
  async fn get_malformed_id_returns_404_not_500() {
    let app = make_app().await;
    let (status, body) =
      send(&app, "GET", "/api/contacts/not-a-real-id", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Contact not found" }));
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_with_empty_body_changes_nothing() {
    let app = make_app().await;
    let created = create_ann(&app).await;
    let uri = format!("/api/contacts/{}", created.id);

    let (status, body) = send(&app, "PUT", &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Contact>(body).unwrap(), created);
  }

  #[tokio::test]
  async fn update_email_only_changes_email() {
    let app = make_app().await;
    let created = create_ann(&app).await;
    let uri = format!("/api/contacts/{}", created.id);

    let (status, body) =
      send(&app, "PUT", &uri, Some(json!({ "email": "new@x.com" }))).await;
    assert_eq!(status, StatusCode::OK);
    let updated: Contact = serde_json::from_value(body).unwrap();
    assert_eq!(updated, Contact { email: "new@x.com".into(), ..created.clone() });

    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(serde_json::from_value::<Contact>(body).unwrap(), updated);
  }

  #[tokio::test]
  async fn update_empty_string_keeps_stored_value() {
    let app = make_app().await;
    let created = create_ann(&app).await;
    let uri = format!("/api/contacts/{}", created.id);

    let (status, body) =
      send(&app, "PUT", &uri, Some(json!({ "lastName": "", "birthday": null })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<Contact>(body).unwrap(), created);
  }

  #[tokio::test]
  async fn update_unknown_or_malformed_id_returns_404() {
    let app = make_app().await;
    let id = contacts_core::ContactId::new();
    let patch = Some(json!({ "email": "x@y.z" }));

    let (status, _) =
      send(&app, "PUT", &format!("/api/contacts/{id}"), patch.clone()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/api/contacts/garbage", patch).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(count(&app).await, 0);
  }

  #[tokio::test]
  async fn update_with_invalid_body_returns_400() {
    let app = make_app().await;
    let created = create_ann(&app).await;
    let uri = format!("/api/contacts/{}", created.id);

    let (status, _) =
      send(&app, "PUT", &uri, Some(json!({ "email": ["a", "b"] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn update_without_body_or_content_type_changes_nothing() {
    let app = make_app().await;
    let created = create_ann(&app).await;
    let uri = format!("/api/contacts/{}", created.id);

    let (status, body) = send(&app, "PUT", &uri, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(serde_json::from_value::<Contact>(body).unwrap(), created);
  }

  #[tokio::test]
  async fn body_without_json_content_type_returns_400() {
    let app = make_app().await;
    let created = create_ann(&app).await;
    let req = Request::builder()
      .method("PUT")
      .uri(format!("/api/contacts/{}", created.id))
      .header(header::CONTENT_TYPE, "text/plain")
      .body(Body::from(r#"{"email":"new@x.com"}"#))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], contacts::MISSING_JSON_CONTENT_TYPE);
  }

  #[tokio::test]
  async fn create_without_body_reports_every_field() {
    let app = make_app().await;
    let (status, body) = send(&app, "POST", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
      body["message"],
      "contact validation failed: missing required firstName, lastName, email, favoriteColor, birthday"
    );
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_twice_returns_404_second_time() {
    let app = make_app().await;
    let created = create_ann(&app).await;
    let uri = format!("/api/contacts/{}", created.id);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Contact deleted successfully" }));

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Contact not found" }));
  }

  #[tokio::test]
  async fn delete_malformed_id_returns_404() {
    let app = make_app().await;
    let (status, _) = send(&app, "DELETE", "/api/contacts/1234", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Storage failure ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn closed_store_returns_500_with_message() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = api_router(Arc::new(store.clone()));
    store.close().await.unwrap();

    let (status, body) = send(&app, "GET", "/api/contacts", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].is_string());
  }

  #[tokio::test]
  async fn closed_store_rejects_writes_with_400() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = api_router(Arc::new(store.clone()));
    let created = create_ann(&app).await;
    store.close().await.unwrap();

    let (status, body) = send(&app, "POST", "/api/contacts", Some(ann())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["message"].as_str().unwrap().is_empty());

    let uri = format!("/api/contacts/{}", created.id);
    let (status, body) =
      send(&app, "PUT", &uri, Some(json!({ "email": "new@x.com" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["message"].as_str().unwrap().is_empty());
  }

  // ── Full lifecycle ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_get_update_delete_lifecycle() {
    let app = make_app().await;

    let (status, created) =
      send(&app, "POST", "/api/contacts", Some(ann())).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_owned();
    let uri = format!("/api/contacts/{id}");

    let (status, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) =
      send(&app, "PUT", &uri, Some(json!({ "favoriteColor": "red" }))).await;
    assert_eq!(status, StatusCode::OK);
    let mut expected = created.clone();
    expected["favoriteColor"] = json!("red");
    assert_eq!(updated, expected);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact deleted successfully");

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
