//! # Shopify Provider
//!
//! Implements the `CatalogStore` trait against the Shopify Admin GraphQL API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Cursor-paginated product listing with variants and metafields
//! - `productCreate` / `productUpdate` mutations with userError surfacing
//! - Access-token authentication via the `X-Shopify-Access-Token` header
//! - Rate limiting and exponential backoff

pub mod connector;
pub mod error;
pub mod types;

pub use connector::ShopifyConnector;
pub use error::{Result, ShopifyError};
