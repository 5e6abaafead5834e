//! The entity catalogue.
//!
//! Every entity is a plain struct of `Option` fields named after the PostNL wire names, with a
//! [`TypedBuilder`](typed_builder::TypedBuilder) for construction. Which fields are sent to a
//! given service is decided by [`crate::wire::descriptors`], not by the struct.
#![allow(missing_docs)]

mod common;
/// Module containing the request entities.
pub mod request;
/// Module containing the response entities.
pub mod response;

pub use common::*;
pub use request::*;
pub use response::*;
