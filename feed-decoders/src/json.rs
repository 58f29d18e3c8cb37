//! JSON feed decoder
//!
//! The feed is a JSON array of product payloads in the same shape as
//! [`ProductInput`]'s serde representation.

use catalog_traits::error::{CatalogError, Result};
use catalog_traits::product::ProductInput;
use catalog_traits::ProductDecoder;
use tracing::debug;

/// Decodes a JSON array feed into product payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ProductDecoder for JsonDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<ProductInput>> {
        let products: Vec<ProductInput> = serde_json::from_slice(input)
            .map_err(|e| CatalogError::Decode(format!("Malformed JSON feed: {}", e)))?;

        debug!("Decoded {} products from JSON feed", products.len());
        Ok(products)
    }
}
