//! Batch Planner
//!
//! Pure partition of an incoming batch into create/update/skip decisions.
//! Nothing here talks to the store; the apply driver consumes the plan.

use catalog_traits::product::{ExistingProduct, ProductInput, ProductUpdate};
use tracing::info;

use crate::error::Result;
use crate::index::StoreIndex;
use crate::matcher::{find_match, DedupStrategy};
use crate::merge::merge_for_update;

/// Partition of one incoming batch
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    /// Products with no existing counterpart, in input order
    pub creates: Vec<ProductInput>,
    /// Merged payloads for matched products, in input order
    pub updates: Vec<ProductUpdate>,
    /// Matched products dropped because overwrite was off
    pub skipped: usize,
}

/// Decide create/update/skip for every incoming product
///
/// Builds the Existing-State Index once, then walks the batch in order; the
/// relative input order is preserved within `creates` and within `updates`.
/// A matched product lands in `updates` (merged) when `overwrite` is on and
/// is counted in `skipped` otherwise; skipping is deliberate data loss for
/// the run, not an error.
///
/// Fails fast on identity-key violations so a malformed feed aborts before
/// anything is applied.
pub fn plan(
    incoming: Vec<ProductInput>,
    existing: &[ExistingProduct],
    strategy: DedupStrategy,
    overwrite: bool,
) -> Result<ReconcilePlan> {
    let index = StoreIndex::build(strategy, existing);
    let mut plan = ReconcilePlan::default();

    for product in incoming {
        match find_match(&product, &index)? {
            Some(matched) => {
                if overwrite {
                    let update = merge_for_update(product, matched);
                    info!("{} exists at {}. Overwriting.", update.product.describe(), matched.id);
                    plan.updates.push(update);
                } else {
                    info!("{} exists. Skipping.", product.describe());
                    plan.skipped += 1;
                }
            }
            None => plan.creates.push(product),
        }
    }

    Ok(plan)
}
