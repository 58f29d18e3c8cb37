//! Product payload and listing types
//!
//! Shared by feed decoders (which produce [`ProductInput`]), the
//! reconciliation engine (which partitions and merges payloads), and store
//! connectors (which serialize them onto the wire and deserialize
//! [`ExistingProduct`] listings).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque product identifier assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Opaque metafield identifier assigned by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetafieldId(String);

impl MetafieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MetafieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MetafieldId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Metafield value types understood by the remote store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetafieldValueType {
    String,
    Integer,
    JsonString,
}

/// A key-value metadata entry attached to a product payload
///
/// `id` is empty on decoded input; the merger fills it in when the entry
/// already exists remotely so the store updates in place instead of creating
/// a duplicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetafieldInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MetafieldId>,
    pub namespace: String,
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<MetafieldValueType>,
}

/// A variant of an incoming product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub sku: String,
    /// Option values in option-position order (e.g. size, then color)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

/// Search-engine listing overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A product image reference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInput {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

/// A product payload to import
///
/// Doubles as the create payload and, once the merger has set `id`, the
/// update payload. Empty/absent fields are omitted from the wire
/// representation so the remote store treats them as "not provided" rather
/// than "cleared".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Identity key under the handle dedup strategy
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub handle: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Custom option names (maximum of 3 per product)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_suffix: Option<String>,
    /// Identity keys under the SKU dedup strategy live on the variants
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<VariantInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metafields: Vec<MetafieldInput>,
}

impl ProductInput {
    /// Best identifier for log messages: handle, else title, else first SKU
    pub fn describe(&self) -> &str {
        if !self.handle.is_empty() {
            &self.handle
        } else if !self.title.is_empty() {
            &self.title
        } else {
            self.variants
                .first()
                .map(|v| v.sku.as_str())
                .unwrap_or("<unnamed product>")
        }
    }
}

/// An update payload produced by the merger
///
/// Wraps a [`ProductInput`] whose `id` has been set to the matched existing
/// record's id. Only the merger constructs one in normal flow, so connectors
/// may rely on the id being present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductUpdate {
    pub product: ProductInput,
}

/// A product snapshot from the remote store listing
///
/// Read once at the start of a run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingProduct {
    pub id: ProductId,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub variants: Vec<ExistingVariant>,
    #[serde(default)]
    pub metafields: Vec<ExistingMetafield>,
}

/// A variant of an existing store product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingVariant {
    pub sku: String,
}

/// A metafield already present on an existing store product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingMetafield {
    pub id: MetafieldId,
    pub namespace: String,
    pub key: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("gid://shopify/Product/123");
        assert_eq!(id.to_string(), "gid://shopify/Product/123");
        assert_eq!(id.as_str(), "gid://shopify/Product/123");
    }

    #[test]
    fn test_value_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&MetafieldValueType::JsonString).unwrap(),
            "\"JSON_STRING\""
        );
        assert_eq!(
            serde_json::from_str::<MetafieldValueType>("\"INTEGER\"").unwrap(),
            MetafieldValueType::Integer
        );
    }

    #[test]
    fn test_empty_fields_are_omitted_from_json() {
        let product = ProductInput {
            handle: "blue-shirt".to_string(),
            title: "Blue Shirt".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&product).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["handle"], "blue-shirt");
        assert_eq!(obj["title"], "Blue Shirt");
    }

    #[test]
    fn test_metafield_id_survives_round_trip() {
        let metafield = MetafieldInput {
            id: Some(MetafieldId::new("gid://shopify/Metafield/9")),
            namespace: "specs".to_string(),
            key: "material".to_string(),
            value: "wool".to_string(),
            value_type: Some(MetafieldValueType::String),
        };

        let json = serde_json::to_string(&metafield).unwrap();
        let back: MetafieldInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metafield);
    }

    #[test]
    fn test_describe_falls_back_to_title_then_sku() {
        let by_handle = ProductInput {
            handle: "h-1".to_string(),
            title: "T".to_string(),
            ..Default::default()
        };
        assert_eq!(by_handle.describe(), "h-1");

        let by_title = ProductInput {
            title: "Only Title".to_string(),
            ..Default::default()
        };
        assert_eq!(by_title.describe(), "Only Title");

        let by_sku = ProductInput {
            variants: vec![VariantInput {
                sku: "sku-9".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(by_sku.describe(), "sku-9");
    }
}
