//! Core types and trait definitions for the contacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backends and the API layer depend on it; it depends on nothing
//! proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod error;
pub mod store;

pub use contact::{
  Contact, ContactField, ContactId, ContactInput, NewContact, ValidationError,
};
pub use error::{Error, Result};
