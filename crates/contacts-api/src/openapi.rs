//! OpenAPI description generated from the handler annotations.
//!
//! The schema types below mirror the wire format of `contacts-core` types so
//! the core crate stays free of documentation dependencies.

use utoipa::{OpenApi, ToSchema, openapi::server::Server};

#[derive(ToSchema)]
#[schema(as = Contact)]
#[schema(rename_all = "camelCase")]
pub struct ContactDoc {
  /// The auto-generated id of the contact.
  pub id:             String,
  /// The contact's first name.
  pub first_name:     String,
  /// The contact's last name.
  pub last_name:      String,
  /// The contact's email address.
  pub email:          String,
  /// The contact's favorite color.
  pub favorite_color: String,
  /// The contact's birthday.
  #[schema(example = "2000-01-01")]
  pub birthday:       String,
}

/// All five fields are required when creating; any subset may be sent when
/// updating.
#[derive(ToSchema)]
#[schema(as = ContactInput)]
#[schema(rename_all = "camelCase")]
pub struct ContactInputDoc {
  pub first_name:     Option<String>,
  pub last_name:      Option<String>,
  pub email:          Option<String>,
  pub favorite_color: Option<String>,
  pub birthday:       Option<String>,
}

#[derive(ToSchema)]
#[schema(as = Message)]
pub struct MessageDoc {
  pub message: String,
}

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Contacts API",
    version = "1.0.0",
    description = "A RESTful API for managing contacts",
  ),
  paths(
    crate::contacts::list,
    crate::contacts::get_one,
    crate::contacts::create,
    crate::contacts::update_one,
    crate::contacts::delete_one,
  ),
  components(schemas(ContactDoc, ContactInputDoc, MessageDoc)),
  tags((name = "Contacts", description = "Contact management")),
)]
pub struct ApiDoc;

/// Build the OpenAPI document, advertising `servers` as the base URLs.
pub fn openapi(servers: &[String]) -> utoipa::openapi::OpenApi {
  let mut doc = ApiDoc::openapi();
  if !servers.is_empty() {
    doc.servers = Some(servers.iter().map(Server::new).collect());
  }
  doc
}
