#![warn(missing_docs)]
#![crate_name = "postnl_rs"]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # PostNL Client
//!
//! `postnl_rs` is a client for PostNL's shipment APIs: barcodes, labels, confirmation,
//! delivery dates, pickup locations, timeframes and shipping status. Every service except
//! shipping status speaks both REST (JSON) and SOAP (XML); the same entities are used for both.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use postnl_rs::entity::{Address, Customer, Shipment};
//! use postnl_rs::PostNL;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = PostNL::builder()
//!         .customer(
//!             Customer::builder()
//!                 .collection_location("123456")
//!                 .customer_code("DEVC")
//!                 .customer_number("11223344")
//!                 .address(
//!                     Address::builder()
//!                         .address_type("02")
//!                         .city("Hoofddorp")
//!                         .zipcode("2132WT")
//!                         .build(),
//!                 )
//!                 .build(),
//!         )
//!         .api_key("my-api-key")
//!         .sandbox(true)
//!         .build();
//!     let status = client.current_status_by_barcode("3SDEVC201611210").await;
//!     println!("{:#?}", status);
//! }
//! ```

extern crate self as postnl_rs;

/// Module containing the protocol adapters.
pub mod adapter;
/// Module containing the response cache.
pub mod cache;
/// Module containing the client.
pub mod client;
/// Module containing the API key.
pub mod credentials;
/// Module containing the entities.
pub mod entity;
/// Module containing the error type.
pub mod error;
/// Module containing the HTTP messages.
pub mod http;
/// Module containing the macros.
pub mod macros;
/// Module containing the query parameter builder.
pub mod params;
/// Module containing the service facades.
pub mod service;
/// Module containing the HTTP transport.
pub mod transport;
/// Module containing the wire format serialization.
pub mod wire;

pub use adapter::ApiMode;
pub use async_trait::async_trait;
pub use cache::{CacheStore, MemoryCache};
pub use client::PostNL;
pub use credentials::ApiKey;
pub use error::{CifError, PostNLError};
pub use http::{HttpRequest, HttpResponse, ToHttpString};
pub use params::Parameters;
pub use reqwest::Method;
pub use serde_json::Value;
pub use service::{
    BarcodeService, ConfirmingService, DeliveryDateService, LabellingService, LocationService,
    ServiceConfig, ShippingStatusService, TimeframeService,
};
pub use transport::{HttpClient, MockClient, PendingRequests, ReqwestClient};

/// Result type for the postnl-rs crate.
pub type PostNLResult<T> = std::result::Result<T, error::PostNLError>;
