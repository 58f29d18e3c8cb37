//! Existing-State Index
//!
//! Lookup structures over the store's current listing, shaped by the active
//! dedup strategy. Built once per run, read-only afterwards.

use catalog_traits::product::ExistingProduct;
use std::collections::{HashMap, HashSet};

use crate::matcher::DedupStrategy;

/// Strategy-shaped lookup over the current store listing
///
/// Construction is O(n) in the listing size (variant count for the SKU
/// shape). Borrows the listing, which must stay alive for the whole plan.
#[derive(Debug)]
pub enum StoreIndex<'a> {
    /// handle → product; last write wins on duplicate handles
    Handle(HashMap<&'a str, &'a ExistingProduct>),
    /// sku → owning product, plus a flat SKU set for membership tests
    Sku {
        owners: HashMap<&'a str, &'a ExistingProduct>,
        known: HashSet<&'a str>,
    },
}

impl<'a> StoreIndex<'a> {
    pub fn build(strategy: DedupStrategy, existing: &'a [ExistingProduct]) -> Self {
        match strategy {
            DedupStrategy::Handle => {
                let mut lookup = HashMap::with_capacity(existing.len());
                for product in existing {
                    lookup.insert(product.handle.as_str(), product);
                }
                StoreIndex::Handle(lookup)
            }
            DedupStrategy::Sku => {
                let mut owners = HashMap::new();
                let mut known = HashSet::new();
                for product in existing {
                    for variant in &product.variants {
                        owners.insert(variant.sku.as_str(), product);
                        known.insert(variant.sku.as_str());
                    }
                }
                StoreIndex::Sku { owners, known }
            }
        }
    }

    /// Strategy this index was built for
    pub fn strategy(&self) -> DedupStrategy {
        match self {
            StoreIndex::Handle(_) => DedupStrategy::Handle,
            StoreIndex::Sku { .. } => DedupStrategy::Sku,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_traits::product::{ExistingVariant, ProductId};

    fn existing(id: &str, handle: &str, skus: &[&str]) -> ExistingProduct {
        ExistingProduct {
            id: ProductId::new(id),
            handle: handle.to_string(),
            variants: skus
                .iter()
                .map(|sku| ExistingVariant {
                    sku: sku.to_string(),
                })
                .collect(),
            metafields: vec![],
        }
    }

    #[test]
    fn test_handle_index_last_write_wins() {
        let listing = vec![
            existing("1", "dup", &[]),
            existing("2", "other", &[]),
            existing("3", "dup", &[]),
        ];

        let index = StoreIndex::build(DedupStrategy::Handle, &listing);
        match index {
            StoreIndex::Handle(lookup) => {
                assert_eq!(lookup.len(), 2);
                assert_eq!(lookup["dup"].id, ProductId::new("3"));
                assert_eq!(lookup["other"].id, ProductId::new("2"));
            }
            _ => panic!("expected handle index"),
        }
    }

    #[test]
    fn test_sku_index_tracks_every_variant() {
        let listing = vec![
            existing("1", "a", &["sku-1", "sku-2"]),
            existing("2", "b", &["sku-3"]),
        ];

        let index = StoreIndex::build(DedupStrategy::Sku, &listing);
        match index {
            StoreIndex::Sku { owners, known } => {
                assert_eq!(known.len(), 3);
                assert_eq!(owners["sku-2"].id, ProductId::new("1"));
                assert_eq!(owners["sku-3"].id, ProductId::new("2"));
            }
            _ => panic!("expected sku index"),
        }
    }

    #[test]
    fn test_strategy_reports_shape() {
        let listing: Vec<ExistingProduct> = vec![];
        assert_eq!(
            StoreIndex::build(DedupStrategy::Handle, &listing).strategy(),
            DedupStrategy::Handle
        );
        assert_eq!(
            StoreIndex::build(DedupStrategy::Sku, &listing).strategy(),
            DedupStrategy::Sku
        );
    }
}
