use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote validation failed: {}", .user_errors.join("; "))]
    Validation { user_errors: Vec<String> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
