//! # Catalog Traits
//!
//! Contracts between the reconciliation engine and its collaborators.
//!
//! ## Overview
//!
//! This crate defines what the engine needs from the outside world without
//! naming any concrete feed format, store vendor, or HTTP library. Each
//! trait is implemented by a separate workspace crate (or by a test double).
//!
//! ## Traits
//!
//! - [`ProductDecoder`](decoder::ProductDecoder) - Turns a raw feed (CSV,
//!   JSON, ...) into normalized [`ProductInput`](product::ProductInput)
//!   payloads
//! - [`CatalogStore`](store::CatalogStore) - Lists, creates, and updates
//!   products in the remote catalog
//! - [`HttpClient`](http::HttpClient) - Transport used by store connectors;
//!   one attempt per call, retry loops belong to the connector
//!
//! ## Implementations
//!
//! | Contract | Crate |
//! |----------|-------|
//! | `ProductDecoder` | `feed-decoders` (`CsvDecoder`, `JsonDecoder`) |
//! | `CatalogStore`   | `provider-shopify` |
//! | `HttpClient`     | `transport-reqwest` |
//!
//! ## Error Handling
//!
//! All contracts use [`CatalogError`](error::CatalogError):
//!
//! - `Decode` - malformed feed input (whole-feed failure)
//! - `Transport` - connection, TLS, timeout, or protocol failures
//! - `Validation` - the store rejected a payload; carries the store's
//!   user-facing messages
//! - `Io` - local file access
//!
//! Implementations convert their internal errors into `CatalogError` at the
//! boundary and keep the messages actionable.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`; the engine holds implementations behind
//! `Arc<dyn _>` and may call them from spawned tasks.

pub mod decoder;
pub mod error;
pub mod http;
pub mod product;
pub mod store;

pub use error::{CatalogError, Result};

// Re-export commonly used types
pub use decoder::ProductDecoder;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use product::{
    ExistingMetafield, ExistingProduct, ExistingVariant, ImageInput, MetafieldId, MetafieldInput,
    MetafieldValueType, ProductId, ProductInput, ProductUpdate, SeoInput, VariantInput,
};
pub use store::CatalogStore;
