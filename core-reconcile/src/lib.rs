//! # Reconciliation Engine
//!
//! Matches an incoming product batch against a remote catalog store and
//! drives the resulting create/update work.
//!
//! ## Overview
//!
//! Feeds arrive as normalized [`ProductInput`](catalog_traits::ProductInput)
//! batches. The engine lists the store once, decides per product whether it
//! already exists (by handle or by SKU), merges identity fields into update
//! payloads so nothing existing is orphaned, then applies both lists
//! sequentially with per-item failure isolation.
//!
//! ## Components
//!
//! - **Existing-State Index** (`index`): strategy-shaped lookups over the
//!   store listing, built once per run
//! - **Matcher** (`matcher`): per-product match decision with identity-key
//!   validation
//! - **Merger** (`merge`): id carry-over for matched updates
//! - **Batch Planner** (`plan`): pure create/update/skip partition
//! - **Progress Reporting** (`progress`): bounded driver-to-observer handoff
//! - **Importer** (`importer`): end-to-end orchestration and the apply driver

pub mod error;
pub mod importer;
pub mod index;
pub mod matcher;
pub mod merge;
pub mod plan;
pub mod progress;

pub use error::{ImportError, Result};
pub use importer::{ImportConfig, ImportReport, Importer, RunId};
pub use index::StoreIndex;
pub use matcher::{find_match, DedupStrategy};
pub use merge::merge_for_update;
pub use plan::{plan, ReconcilePlan};
pub use progress::{
    ProgressReporter, ProgressState, ProgressUpdate, DEFAULT_PROGRESS_CAPACITY,
};
