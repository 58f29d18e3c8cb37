//! Catalog Store Contract
//!
//! The remote-store surface the reconciliation engine depends on. Connector
//! crates implement this against a concrete API; tests implement it with
//! in-memory recorders.

use async_trait::async_trait;

use crate::error::Result;
use crate::product::{ExistingProduct, ProductId, ProductInput, ProductUpdate};

/// Remote catalog store operations
///
/// `list` is called exactly once per run, before any mutation — the engine
/// cannot deduplicate without the full current listing. `create` and `update`
/// are then called one item at a time by the apply driver; implementations
/// must not assume any batching.
///
/// # Errors
///
/// `list` failures are transport-level and abort the run. `create`/`update`
/// failures (transport or remote validation) are per-item: the engine logs
/// them and moves on.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the full current product listing
    async fn list(&self) -> Result<Vec<ExistingProduct>>;

    /// Create a new product, returning the id assigned by the store
    async fn create(&self, product: &ProductInput) -> Result<ProductId>;

    /// Update an existing product in place, returning its id
    async fn update(&self, update: &ProductUpdate) -> Result<ProductId>;
}
