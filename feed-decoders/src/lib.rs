//! # Feed Decoders
//!
//! Concrete [`ProductDecoder`](catalog_traits::ProductDecoder)
//! implementations for the supported feed formats.
//!
//! ## Formats
//!
//! - [`JsonDecoder`] - the feed is a JSON array of product payloads
//! - [`CsvDecoder`] - header-driven CSV where consecutive rows sharing a
//!   `handle` collapse into one product with multiple variants
//!
//! ## Error Handling
//!
//! Decoding is all-or-nothing: any malformed portion of the feed fails the
//! whole call with `CatalogError::Decode` (carrying row context for CSV), so
//! a broken feed can never be half-imported.

pub mod csv;
pub mod json;

pub use crate::csv::CsvDecoder;
pub use crate::json::JsonDecoder;
