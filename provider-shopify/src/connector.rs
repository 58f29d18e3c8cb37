//! Shopify Admin API connector implementation
//!
//! Implements the `CatalogStore` trait over the Admin GraphQL API.

use async_trait::async_trait;
use catalog_traits::error::Result as CatalogResult;
use catalog_traits::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
use catalog_traits::product::{ExistingProduct, ProductId, ProductInput, ProductUpdate};
use catalog_traits::store::CatalogStore;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, ShopifyError};
use crate::types::{
    GraphQlResponse, ProductCreateData, ProductMutationResult, ProductUpdateData, ProductsData,
};

/// Default Admin API version
pub const DEFAULT_API_VERSION: &str = "2024-07";

/// Products per listing page (Admin API maximum is 250)
const PAGE_SIZE: u32 = 100;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const PRODUCTS_QUERY: &str = r#"
query ListProducts($cursor: String, $pageSize: Int!) {
  products(first: $pageSize, after: $cursor) {
    edges {
      node {
        id
        handle
        variants(first: 100) {
          edges { node { sku } }
        }
        metafields(first: 100) {
          edges { node { id namespace key value } }
        }
      }
    }
    pageInfo { hasNextPage endCursor }
  }
}"#;

const PRODUCT_CREATE_MUTATION: &str = r#"
mutation CreateProduct($input: ProductInput!) {
  productCreate(input: $input) {
    product { id }
    userErrors { field message }
  }
}"#;

const PRODUCT_UPDATE_MUTATION: &str = r#"
mutation UpdateProduct($input: ProductInput!) {
  productUpdate(input: $input) {
    product { id }
    userErrors { field message }
  }
}"#;

/// Shopify Admin API connector
///
/// Implements `CatalogStore` over the Admin GraphQL API.
///
/// # Features
///
/// - Cursor-paginated product listing with variants and metafields
/// - `productCreate` / `productUpdate` mutations with userError surfacing
/// - Exponential backoff for rate limiting and server errors
/// - Access-token authentication via `HttpClient`
///
/// # Example
///
/// ```ignore
/// use provider_shopify::ShopifyConnector;
/// use catalog_traits::store::CatalogStore;
///
/// let connector = ShopifyConnector::new(http_client, shop_domain, access_token);
/// let existing = connector.list().await?;
/// ```
pub struct ShopifyConnector {
    /// HTTP client for API requests
    http_client: Arc<dyn HttpClient>,

    /// Shop domain, e.g. `my-store.myshopify.com`
    shop_domain: String,

    /// Admin API access token
    access_token: String,

    /// Admin API version segment of the endpoint path
    api_version: String,

    /// Retry policy for rate-limited and failed requests
    retry_policy: RetryPolicy,
}

impl ShopifyConnector {
    /// Create a new connector against [`DEFAULT_API_VERSION`]
    ///
    /// # Arguments
    ///
    /// * `http_client` - HTTP client implementation
    /// * `shop_domain` - shop domain, e.g. `my-store.myshopify.com`
    /// * `access_token` - Admin API access token with product read/write scopes
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        shop_domain: String,
        access_token: String,
    ) -> Self {
        Self {
            http_client,
            shop_domain,
            access_token,
            api_version: DEFAULT_API_VERSION.to_string(),
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Override the Admin API version
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// GraphQL endpoint URL
    fn endpoint(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.shop_domain, self.api_version
        )
    }

    /// POST a GraphQL document and unwrap the response envelope
    async fn post_graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let payload = serde_json::json!({"query": query, "variables": variables});
        let request = HttpRequest::new(HttpMethod::Post, self.endpoint())
            .header("X-Shopify-Access-Token", self.access_token.clone())
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&payload)?;

        let response = self.execute_with_retry(request).await?;

        let envelope: GraphQlResponse<T> = serde_json::from_slice(&response.body)
            .map_err(|e| ShopifyError::ParseError(format!("Failed to parse GraphQL response: {}", e)))?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
                return Err(ShopifyError::GraphQl(messages.join("; ")));
            }
        }

        envelope
            .data
            .ok_or_else(|| ShopifyError::ParseError("GraphQL response has no data".to_string()))
    }

    /// Execute an API request with retry logic
    ///
    /// Implements exponential backoff for rate limiting and transient errors.
    /// Client errors (4xx other than 429) and GraphQL-level failures do not
    /// retry.
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn execute_with_retry(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut attempt = 0;

        loop {
            match self.http_client.execute(request.clone()).await {
                Ok(response) => {
                    let status = response.status;

                    if response.is_success() {
                        debug!("API request succeeded: status={}", status);
                        return Ok(response);
                    } else if status == 429 || response.is_server_error() {
                        // Rate limit or server error - retry with backoff
                        attempt += 1;
                        if attempt >= self.retry_policy.max_attempts {
                            warn!(
                                "API request failed after {} attempts: status={}",
                                self.retry_policy.max_attempts, status
                            );
                            return Err(ShopifyError::ApiError {
                                status_code: status,
                                message: format!(
                                    "Request failed after {} attempts",
                                    self.retry_policy.max_attempts
                                ),
                            });
                        }

                        let delay = self.retry_policy.delay_for_attempt(attempt);
                        warn!(
                            "API request failed (attempt {}/{}): status={}, retrying in {:?}",
                            attempt, self.retry_policy.max_attempts, status, delay
                        );
                        sleep(delay).await;
                    } else {
                        // Client error - don't retry
                        warn!("API request failed: status={}", status);
                        return Err(ShopifyError::ApiError {
                            status_code: status,
                            message: String::from_utf8_lossy(&response.body).to_string(),
                        });
                    }
                }
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.retry_policy.max_attempts {
                        warn!(
                            "API request failed after {} attempts: {}",
                            self.retry_policy.max_attempts, e
                        );
                        return Err(e.into());
                    }

                    let delay = self.retry_policy.delay_for_attempt(attempt);
                    warn!(
                        "API request failed (attempt {}/{}): {}, retrying in {:?}",
                        attempt, self.retry_policy.max_attempts, e, delay
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    /// Unwrap a mutation result into the product id or a userErrors failure
    fn mutation_id(result: ProductMutationResult) -> Result<ProductId> {
        if !result.user_errors.is_empty() {
            return Err(ShopifyError::UserErrors(
                result.user_errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        result
            .product
            .map(|p| ProductId::new(p.id))
            .ok_or_else(|| {
                ShopifyError::ParseError(
                    "Mutation returned neither a product nor userErrors".to_string(),
                )
            })
    }
}

#[async_trait]
impl CatalogStore for ShopifyConnector {
    #[instrument(skip(self))]
    async fn list(&self) -> CatalogResult<Vec<ExistingProduct>> {
        info!("Listing products from Shopify");

        let mut products = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: ProductsData = self
                .post_graphql(
                    PRODUCTS_QUERY,
                    serde_json::json!({"cursor": cursor, "pageSize": PAGE_SIZE}),
                )
                .await?;

            let page = data.products;
            products.extend(
                page.edges
                    .into_iter()
                    .map(|edge| ExistingProduct::from(edge.node)),
            );

            if !page.page_info.has_next_page {
                break;
            }
            cursor = page.page_info.end_cursor;
            if cursor.is_none() {
                return Err(ShopifyError::ParseError(
                    "hasNextPage is true but endCursor is missing".to_string(),
                )
                .into());
            }
        }

        info!("Listed {} products from Shopify", products.len());
        Ok(products)
    }

    #[instrument(skip(self, product), fields(product = %product.describe()))]
    async fn create(&self, product: &ProductInput) -> CatalogResult<ProductId> {
        let data: ProductCreateData = self
            .post_graphql(
                PRODUCT_CREATE_MUTATION,
                serde_json::json!({"input": product}),
            )
            .await?;

        let id = Self::mutation_id(data.product_create)?;
        debug!("Created product {} as {}", product.describe(), id);
        Ok(id)
    }

    #[instrument(skip(self, update), fields(product = %update.product.describe()))]
    async fn update(&self, update: &ProductUpdate) -> CatalogResult<ProductId> {
        // Only the merger produces updates, and it always sets the id; a
        // missing id here is a programming error, not a create fallback.
        if update.product.id.is_none() {
            return Err(ShopifyError::MissingId.into());
        }

        let data: ProductUpdateData = self
            .post_graphql(
                PRODUCT_UPDATE_MUTATION,
                serde_json::json!({"input": update.product}),
            )
            .await?;

        let id = Self::mutation_id(data.product_update)?;
        debug!("Updated product {} at {}", update.product.describe(), id);
        Ok(id)
    }
}
