//! Error types for the Shopify provider

use thiserror::Error;

/// Shopify provider errors
#[derive(Error, Debug)]
pub enum ShopifyError {
    /// API request returned a non-retryable or retry-exhausted HTTP status
    #[error("Shopify API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// GraphQL layer rejected the request (top-level `errors` array)
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The store rejected the payload with user-facing validation messages
    #[error("Product rejected by store: {}", .0.join("; "))]
    UserErrors(Vec<String>),

    /// An update payload reached the connector without a product id
    #[error("Update payload has no product id")]
    MissingId,

    /// Catalog boundary error (transport failures pass through here)
    #[error(transparent)]
    CatalogError(#[from] catalog_traits::error::CatalogError),
}

/// Result type for Shopify operations
pub type Result<T> = std::result::Result<T, ShopifyError>;

impl From<ShopifyError> for catalog_traits::error::CatalogError {
    fn from(error: ShopifyError) -> Self {
        match error {
            ShopifyError::ApiError {
                status_code,
                message,
            } => catalog_traits::error::CatalogError::Transport(format!(
                "API error (status {}): {}",
                status_code, message
            )),
            ShopifyError::GraphQl(msg) => {
                catalog_traits::error::CatalogError::Transport(format!("GraphQL error: {}", msg))
            }
            ShopifyError::ParseError(msg) => {
                catalog_traits::error::CatalogError::Transport(format!("Parse error: {}", msg))
            }
            ShopifyError::UserErrors(user_errors) => {
                catalog_traits::error::CatalogError::Validation { user_errors }
            }
            ShopifyError::MissingId => catalog_traits::error::CatalogError::Transport(
                "Update payload has no product id".to_string(),
            ),
            ShopifyError::CatalogError(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_traits::error::CatalogError;

    #[test]
    fn test_user_errors_convert_to_validation() {
        let err = ShopifyError::UserErrors(vec![
            "Title can't be blank".to_string(),
            "Handle has already been taken".to_string(),
        ]);

        match CatalogError::from(err) {
            CatalogError::Validation { user_errors } => {
                assert_eq!(user_errors.len(), 2);
                assert_eq!(user_errors[0], "Title can't be blank");
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_api_error_converts_to_transport() {
        let err = ShopifyError::ApiError {
            status_code: 503,
            message: "upstream unavailable".to_string(),
        };

        match CatalogError::from(err) {
            CatalogError::Transport(msg) => {
                assert!(msg.contains("503"));
                assert!(msg.contains("upstream unavailable"));
            }
            other => panic!("Expected Transport, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_error_passes_through() {
        let err = ShopifyError::CatalogError(CatalogError::Transport("refused".to_string()));
        match CatalogError::from(err) {
            CatalogError::Transport(msg) => assert_eq!(msg, "refused"),
            other => panic!("Expected Transport, got {:?}", other),
        }
    }
}
