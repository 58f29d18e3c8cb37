//! # Catalog Import
//!
//! Workspace facade crate.
//!
//! Re-exports the member crates behind feature flags and provides the
//! host-facing [`logging`] module. Hosts can depend on `catalog-import` and
//! wire a full import pipeline without naming each member crate:
//!
//! ```ignore
//! use catalog_import::logging::{init_logging, LoggingConfig};
//! use catalog_import::{
//!     CsvDecoder, ImportConfig, Importer, ReqwestHttpClient, ShopifyConnector,
//! };
//! use std::sync::Arc;
//!
//! init_logging(LoggingConfig::default())?;
//!
//! let http = Arc::new(ReqwestHttpClient::new());
//! let store = Arc::new(ShopifyConnector::new(http, shop_domain, access_token));
//! let importer = Importer::new(ImportConfig::default(), store);
//!
//! let report = importer.run(&CsvDecoder::new(), &feed_bytes).await?;
//! println!("created {}, updated {}", report.created, report.updated);
//! ```
//!
//! ## Features
//!
//! - `shopify` (default) - the Shopify Admin API store connector
//! - `reqwest-transport` (default) - the reqwest-backed HTTP client

pub mod logging;

pub use catalog_traits as traits;
pub use core_reconcile as reconcile;
pub use feed_decoders as decoders;

#[cfg(feature = "shopify")]
pub use provider_shopify as shopify;

#[cfg(feature = "reqwest-transport")]
pub use transport_reqwest as transport;

// Common entry points
pub use catalog_traits::{CatalogError, CatalogStore, ProductDecoder, ProductInput};
pub use core_reconcile::{
    DedupStrategy, ImportConfig, ImportError, ImportReport, Importer, ProgressReporter,
    ProgressUpdate,
};
pub use feed_decoders::{CsvDecoder, JsonDecoder};

#[cfg(feature = "shopify")]
pub use provider_shopify::ShopifyConnector;

#[cfg(feature = "reqwest-transport")]
pub use transport_reqwest::ReqwestHttpClient;
