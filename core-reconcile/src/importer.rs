//! # Importer
//!
//! Orchestrates a reconciliation run end to end and drives the apply phase.
//!
//! ## Workflow
//!
//! 1. Decode the input feed via a [`ProductDecoder`] (or accept an already
//!    decoded batch through [`Importer::import`])
//! 2. List the store's current products via the [`CatalogStore`]
//! 3. Plan the batch: create/update/skip per product
//! 4. Apply the create list, then the update list, one item at a time
//! 5. Return aggregate counts; per-item failures are logged, never escalated
//!
//! Progress is published on a bounded channel around every applied item, so
//! an observer (status display, test harness) can track both lists without
//! sharing state with the driver.

use catalog_traits::product::{ProductInput, ProductUpdate};
use catalog_traits::{CatalogStore, ProductDecoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::{ImportError, Result};
use crate::matcher::DedupStrategy;
use crate::plan::{plan, ReconcilePlan};
use crate::progress::ProgressReporter;

/// Identifier for a single import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Importer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Identity key used to match incoming products against the store
    pub strategy: DedupStrategy,

    /// Whether matched products are updated (true) or skipped (false)
    pub overwrite: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            strategy: DedupStrategy::Handle,
            overwrite: false,
        }
    }
}

/// Aggregate result of one import run
///
/// Which specific items failed is visible only in the warn-level logs; the
/// report deliberately carries counters only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub run_id: RunId,
    /// Products successfully created
    pub created: usize,
    /// Products successfully updated
    pub updated: usize,
    /// Matched products skipped because overwrite was off
    pub skipped: usize,
    /// Create/update attempts that failed
    pub failed: usize,
    /// Unix timestamp when the run started
    pub started_at: i64,
    /// Unix timestamp when the run completed
    pub completed_at: i64,
}

impl ImportReport {
    /// Total items sent to the store, successful or not
    pub fn total_applied(&self) -> usize {
        self.created + self.updated + self.failed
    }
}

/// Reconciles incoming product batches against a remote catalog store
///
/// Holds the store behind `Arc<dyn CatalogStore>`; one `Importer` can serve
/// any number of sequential runs.
pub struct Importer {
    config: ImportConfig,
    store: Arc<dyn CatalogStore>,
    progress: Option<ProgressReporter>,
}

impl Importer {
    pub fn new(config: ImportConfig, store: Arc<dyn CatalogStore>) -> Self {
        Self {
            config,
            store,
            progress: None,
        }
    }

    /// Attach a progress reporter
    ///
    /// The receiving half of the channel belongs to the observer; see
    /// [`ProgressReporter::channel`](crate::progress::ProgressReporter::channel).
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Decode `input` with `decoder`, then reconcile the resulting batch
    ///
    /// # Errors
    ///
    /// Fails up-front on a malformed feed (`ImportError::Decode`) plus
    /// everything [`Importer::import`] can fail with.
    #[instrument(skip_all, fields(strategy = %self.config.strategy))]
    pub async fn run(&self, decoder: &dyn ProductDecoder, input: &[u8]) -> Result<ImportReport> {
        let products = decoder.decode(input).map_err(ImportError::Decode)?;
        info!("Data feed parsed ({} products)", products.len());

        self.import(products).await
    }

    /// Reconcile an already-decoded batch against the store
    ///
    /// # Errors
    ///
    /// Fails if the up-front listing fails (`ImportError::Listing`) or the
    /// batch violates an identity-key invariant (empty handle, missing or
    /// empty SKUs, index inconsistency). Per-item create/update failures do
    /// NOT fail the run; they are logged and counted in the report.
    #[instrument(skip_all, fields(strategy = %self.config.strategy, overwrite = self.config.overwrite))]
    pub async fn import(&self, products: Vec<ProductInput>) -> Result<ImportReport> {
        let run_id = RunId::new();
        let started_at = current_timestamp();
        info!("Starting import run {} ({} products)", run_id, products.len());

        let existing = self.store.list().await.map_err(ImportError::Listing)?;
        info!("Existing products retrieved ({} products)", existing.len());

        let ReconcilePlan {
            creates,
            updates,
            skipped,
        } = plan(products, &existing, self.config.strategy, self.config.overwrite)?;

        info!(
            "Importing products: {} to be created and {} to be updated",
            creates.len(),
            updates.len()
        );
        if skipped > 0 {
            info!("{} matched products skipped (overwrite disabled)", skipped);
        }

        let create_failures = self.apply_creates(&creates).await;
        let update_failures = self.apply_updates(&updates).await;

        let report = ImportReport {
            run_id,
            created: creates.len() - create_failures,
            updated: updates.len() - update_failures,
            skipped,
            failed: create_failures + update_failures,
            started_at,
            completed_at: current_timestamp(),
        };

        info!(
            "Import run {} finished: {} created, {} updated, {} skipped, {} failed",
            run_id, report.created, report.updated, report.skipped, report.failed
        );

        Ok(report)
    }

    /// Apply the create list one product at a time, returning the failure count
    async fn apply_creates(&self, creates: &[ProductInput]) -> usize {
        self.begin_list(creates.len()).await;

        let mut failures = 0;
        for (applied, product) in creates.iter().enumerate() {
            match self.store.create(product).await {
                Ok(id) => debug!("Created {} as {}", product.describe(), id),
                Err(e) => {
                    warn!("Couldn't create product {}: {}", product.describe(), e);
                    failures += 1;
                }
            }
            self.advance(applied + 1).await;
        }

        failures
    }

    /// Apply the update list one product at a time, returning the failure count
    async fn apply_updates(&self, updates: &[ProductUpdate]) -> usize {
        self.begin_list(updates.len()).await;

        let mut failures = 0;
        for (applied, update) in updates.iter().enumerate() {
            match self.store.update(update).await {
                Ok(id) => debug!("Updated {} at {}", update.product.describe(), id),
                Err(e) => {
                    warn!("Couldn't update product {}: {}", update.product.describe(), e);
                    failures += 1;
                }
            }
            self.advance(applied + 1).await;
        }

        failures
    }

    async fn begin_list(&self, total: usize) {
        if let Some(progress) = &self.progress {
            progress.begin_list(total).await;
        }
    }

    async fn advance(&self, count: usize) {
        if let Some(progress) = &self.progress {
            progress.advance(count).await;
        }
    }
}

/// Current unix timestamp in seconds
fn current_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_traits::error::Result as CatalogResult;
    use catalog_traits::product::{ExistingProduct, ProductId, VariantInput};
    use catalog_traits::CatalogError;
    use mockall::{mock, Sequence};

    mock! {
        Store {}

        #[async_trait]
        impl CatalogStore for Store {
            async fn list(&self) -> CatalogResult<Vec<ExistingProduct>>;
            async fn create(&self, product: &ProductInput) -> CatalogResult<ProductId>;
            async fn update(&self, update: &ProductUpdate) -> CatalogResult<ProductId>;
        }
    }

    fn by_handle(handle: &str) -> ProductInput {
        ProductInput {
            handle: handle.to_string(),
            title: handle.to_string(),
            ..Default::default()
        }
    }

    fn listed(id: &str, handle: &str) -> ExistingProduct {
        ExistingProduct {
            id: ProductId::new(id),
            handle: handle.to_string(),
            variants: vec![],
            metafields: vec![],
        }
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_before_any_mutation() {
        let mut store = MockStore::new();
        store
            .expect_list()
            .times(1)
            .returning(|| Err(CatalogError::Transport("boom".to_string())));
        store.expect_create().times(0);
        store.expect_update().times(0);

        let importer = Importer::new(ImportConfig::default(), Arc::new(store));
        let err = importer.import(vec![by_handle("a")]).await.unwrap_err();

        assert!(matches!(err, ImportError::Listing(_)));
    }

    #[tokio::test]
    async fn test_creates_are_applied_before_updates() {
        let mut store = MockStore::new();
        store
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![listed("1", "old")]));

        let mut seq = Sequence::new();
        store
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ProductId::new("new-id")));
        store
            .expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(ProductId::new("1")));

        let config = ImportConfig {
            strategy: DedupStrategy::Handle,
            overwrite: true,
        };
        let importer = Importer::new(config, Arc::new(store));
        let report = importer
            .import(vec![by_handle("old"), by_handle("new")])
            .await
            .unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.updated, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.total_applied(), 2);
    }

    #[tokio::test]
    async fn test_per_item_failure_does_not_abort_the_batch() {
        let mut store = MockStore::new();
        store.expect_list().times(1).returning(|| Ok(vec![]));

        let mut calls = 0;
        store.expect_create().times(3).returning(move |_| {
            calls += 1;
            if calls == 2 {
                Err(CatalogError::Validation {
                    user_errors: vec!["Title can't be blank".to_string()],
                })
            } else {
                Ok(ProductId::new("id"))
            }
        });

        let importer = Importer::new(ImportConfig::default(), Arc::new(store));
        let report = importer
            .import(vec![by_handle("a"), by_handle("b"), by_handle("c")])
            .await
            .unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.failed, 1);
    }

    #[tokio::test]
    async fn test_invalid_input_aborts_before_any_call() {
        let mut store = MockStore::new();
        store.expect_list().times(1).returning(|| Ok(vec![]));
        store.expect_create().times(0);
        store.expect_update().times(0);

        let config = ImportConfig {
            strategy: DedupStrategy::Sku,
            overwrite: true,
        };
        let importer = Importer::new(config, Arc::new(store));

        // Second product has no variants: fatal under the SKU strategy.
        let batch = vec![
            ProductInput {
                variants: vec![VariantInput {
                    sku: "sku-1".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            ProductInput::default(),
        ];
        let err = importer.import(batch).await.unwrap_err();
        assert!(matches!(err, ImportError::NoVariants { .. }));
    }

    #[test]
    fn test_report_serde_round_trip() {
        let report = ImportReport {
            run_id: RunId::new(),
            created: 2,
            updated: 1,
            skipped: 3,
            failed: 1,
            started_at: 1_700_000_000,
            completed_at: 1_700_000_060,
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: ImportReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[tokio::test]
    async fn test_skipped_products_are_counted() {
        let mut store = MockStore::new();
        store
            .expect_list()
            .times(1)
            .returning(|| Ok(vec![listed("1", "old")]));
        store.expect_create().times(0);
        store.expect_update().times(0);

        let importer = Importer::new(ImportConfig::default(), Arc::new(store));
        let report = importer.import(vec![by_handle("old")]).await.unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(report.total_applied(), 0);
    }
}
