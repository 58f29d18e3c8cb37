use catalog_traits::CatalogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Handle is empty on product '{title}'")]
    EmptyHandle { title: String },

    #[error("No variants on product '{title}'")]
    NoVariants { title: String },

    #[error("SKU is empty on a variant of product '{title}'")]
    EmptySku { title: String },

    #[error("Matching product exists but no corresponding record found in the store listing ('{title}')")]
    IndexInconsistency { title: String },

    #[error("Failed to decode input feed: {0}")]
    Decode(#[source] CatalogError),

    #[error("Failed to list existing products: {0}")]
    Listing(#[source] CatalogError),

    #[error("Invalid dedup strategy: {0}")]
    InvalidStrategy(String),
}

pub type Result<T> = std::result::Result<T, ImportError>;
