//! Feed Decoder Contract

use crate::error::Result;
use crate::product::ProductInput;

/// Decodes a raw input feed into normalized product payloads
///
/// Invoked once, before reconciliation begins. Decoding is all-or-nothing: a
/// malformed feed fails the whole call with `CatalogError::Decode` rather
/// than yielding a partial batch, so a broken feed can never be half-imported.
pub trait ProductDecoder: Send + Sync {
    fn decode(&self, input: &[u8]) -> Result<Vec<ProductInput>>;
}
