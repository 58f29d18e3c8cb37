//! Shopify Admin GraphQL API response types
//!
//! Data structures for deserializing Admin API GraphQL responses.

use catalog_traits::product::{
    ExistingMetafield, ExistingProduct, ExistingVariant, MetafieldId, ProductId,
};
use serde::Deserialize;

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Query/mutation payload (absent when the request itself failed)
    pub data: Option<T>,

    /// Top-level GraphQL errors (malformed query, throttling, auth)
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// A top-level GraphQL error entry
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// A relay-style connection of edges
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

/// A relay-style edge wrapping one node
#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Pagination info for the products listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows
    pub has_next_page: bool,

    /// Cursor for the next page
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// `products` query payload
#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductsConnection,
}

/// The paginated products connection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsConnection {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<ProductNode>>,
    pub page_info: PageInfo,
}

/// A product node from the listing
#[derive(Debug, Deserialize)]
pub struct ProductNode {
    /// GID, e.g. `gid://shopify/Product/123`
    pub id: String,

    #[serde(default)]
    pub handle: String,

    #[serde(default)]
    pub variants: Connection<VariantNode>,

    #[serde(default)]
    pub metafields: Connection<MetafieldNode>,
}

/// A variant node from the listing
#[derive(Debug, Deserialize)]
pub struct VariantNode {
    #[serde(default)]
    pub sku: Option<String>,
}

/// A metafield node from the listing
#[derive(Debug, Deserialize)]
pub struct MetafieldNode {
    pub id: String,
    pub namespace: String,
    pub key: String,
    #[serde(default)]
    pub value: String,
}

impl From<ProductNode> for ExistingProduct {
    fn from(node: ProductNode) -> Self {
        ExistingProduct {
            id: ProductId::new(node.id),
            handle: node.handle,
            variants: node
                .variants
                .edges
                .into_iter()
                .map(|edge| ExistingVariant {
                    sku: edge.node.sku.unwrap_or_default(),
                })
                .collect(),
            metafields: node
                .metafields
                .edges
                .into_iter()
                .map(|edge| ExistingMetafield {
                    id: MetafieldId::new(edge.node.id),
                    namespace: edge.node.namespace,
                    key: edge.node.key,
                    value: edge.node.value,
                })
                .collect(),
        }
    }
}

/// `productCreate` mutation payload
#[derive(Debug, Deserialize)]
pub struct ProductCreateData {
    #[serde(rename = "productCreate")]
    pub product_create: ProductMutationResult,
}

/// `productUpdate` mutation payload
#[derive(Debug, Deserialize)]
pub struct ProductUpdateData {
    #[serde(rename = "productUpdate")]
    pub product_update: ProductMutationResult,
}

/// Shared result shape of the product mutations
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMutationResult {
    /// The created or updated product (absent when userErrors is non-empty)
    pub product: Option<MutatedProduct>,

    /// User-facing validation errors from the store
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

/// Minimal product projection returned by the mutations
#[derive(Debug, Deserialize)]
pub struct MutatedProduct {
    pub id: String,
}

/// A store-side validation error
#[derive(Debug, Deserialize)]
pub struct UserError {
    /// Input path the error refers to (e.g. `["input", "title"]`)
    #[serde(default)]
    pub field: Option<Vec<String>>,

    pub message: String,
}
