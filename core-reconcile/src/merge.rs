//! Merger
//!
//! Builds the update payload for a matched pair. Carrying the existing ids
//! forward is what makes the store update records in place instead of
//! creating duplicates or orphaning metafield references.

use catalog_traits::product::{ExistingProduct, ProductInput, ProductUpdate};

/// Merge a matched incoming payload with its existing store record
///
/// Sets the payload's `id` to the existing record's id, and for each incoming
/// metafield whose `(namespace, key)` pair matches an existing metafield,
/// copies that metafield's id in place. The incoming `value` always stands.
/// No other field is merged: everything else is taken verbatim from the
/// incoming payload and will fully overwrite the store's copy.
pub fn merge_for_update(mut incoming: ProductInput, existing: &ExistingProduct) -> ProductUpdate {
    incoming.id = Some(existing.id.clone());

    for metafield in &mut incoming.metafields {
        for old in &existing.metafields {
            if old.namespace == metafield.namespace && old.key == metafield.key {
                metafield.id = Some(old.id.clone());
            }
        }
    }

    ProductUpdate { product: incoming }
}
