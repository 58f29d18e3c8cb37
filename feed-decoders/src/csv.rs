//! CSV feed decoder
//!
//! Header-driven: columns are located by name, unknown columns are ignored.
//! Consecutive rows sharing a `handle` collapse into one product with one
//! variant per row; product-level columns are read from the group's first row.
//!
//! Recognized columns: `handle`, `title`, `description_html`, `vendor`,
//! `product_type`, `tags` (comma-separated), `option1`..`option3`, `sku`,
//! `price`, `image_src`, `seo_title`, `seo_description`, and metafield
//! columns named `metafield.<namespace>.<key>`.

use std::collections::HashMap;

use catalog_traits::error::{CatalogError, Result};
use catalog_traits::product::{
    ImageInput, MetafieldInput, ProductInput, SeoInput, VariantInput,
};
use catalog_traits::ProductDecoder;
use tracing::debug;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Variant option value columns, in option-position order
const OPTION_COLUMNS: [&str; 3] = ["option1", "option2", "option3"];

/// Decodes a CSV feed into product payloads
#[derive(Debug, Clone, Copy)]
pub struct CsvDecoder {
    delimiter: u8,
}

impl CsvDecoder {
    /// Comma-delimited decoder
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Decoder with a custom delimiter (e.g. `b';'` or `b'\t'`)
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Header name to column index mapping, resolved once per decode
struct ColumnMap {
    columns: HashMap<String, usize>,
    /// (column index, namespace, key) per `metafield.<namespace>.<key>` column
    metafields: Vec<(usize, String, String)>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let mut columns = HashMap::new();
        let mut metafields = Vec::new();

        for (idx, name) in headers.iter().enumerate() {
            let name = name.trim();
            if let Some(rest) = name.strip_prefix("metafield.") {
                let (namespace, key) = rest.split_once('.').ok_or_else(|| {
                    CatalogError::Decode(format!(
                        "Invalid metafield column '{}': expected metafield.<namespace>.<key>",
                        name
                    ))
                })?;
                metafields.push((idx, namespace.to_string(), key.to_string()));
            } else {
                columns.insert(name.to_string(), idx);
            }
        }

        if !columns.contains_key("handle") {
            return Err(CatalogError::Decode(
                "CSV feed is missing the required 'handle' column".to_string(),
            ));
        }

        Ok(Self {
            columns,
            metafields,
        })
    }

    /// Trimmed cell value for a named column; empty for absent columns and
    /// short rows
    fn get<'a>(&self, record: &'a csv::StringRecord, name: &str) -> &'a str {
        self.columns
            .get(name)
            .and_then(|&idx| record.get(idx))
            .map(str::trim)
            .unwrap_or("")
    }

    fn get_optional(&self, record: &csv::StringRecord, name: &str) -> Option<String> {
        let value = self.get(record, name);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

impl CsvDecoder {
    /// Product-level fields, read from the first row of a handle group
    fn parse_product(&self, map: &ColumnMap, record: &csv::StringRecord) -> ProductInput {
        let tags = map
            .get(record, "tags")
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let seo_title = map.get_optional(record, "seo_title");
        let seo_description = map.get_optional(record, "seo_description");
        let seo = if seo_title.is_some() || seo_description.is_some() {
            Some(SeoInput {
                title: seo_title,
                description: seo_description,
            })
        } else {
            None
        };

        let images = map
            .get_optional(record, "image_src")
            .map(|src| vec![ImageInput { src, alt_text: None }])
            .unwrap_or_default();

        let metafields = map
            .metafields
            .iter()
            .filter_map(|(idx, namespace, key)| {
                let value = record.get(*idx).map(str::trim).unwrap_or("");
                if value.is_empty() {
                    return None;
                }
                Some(MetafieldInput {
                    id: None,
                    namespace: namespace.clone(),
                    key: key.clone(),
                    value: value.to_string(),
                    value_type: None,
                })
            })
            .collect();

        ProductInput {
            handle: map.get(record, "handle").to_string(),
            title: map.get(record, "title").to_string(),
            description_html: map.get_optional(record, "description_html"),
            vendor: map.get_optional(record, "vendor"),
            product_type: map.get_optional(record, "product_type"),
            tags,
            images,
            seo,
            metafields,
            ..Default::default()
        }
    }

    /// Variant-level fields; `Ok(None)` for rows carrying no variant data
    ///
    /// Option values are positional, so a gap (an empty option cell before a
    /// populated one) cannot be represented and fails the decode instead of
    /// silently dropping the later value.
    fn parse_variant(
        &self,
        map: &ColumnMap,
        record: &csv::StringRecord,
        line: usize,
    ) -> Result<Option<VariantInput>> {
        let sku = map.get(record, "sku").to_string();

        let raw: Vec<&str> = OPTION_COLUMNS
            .iter()
            .map(|col| map.get(record, col))
            .collect();
        let options = match raw.iter().rposition(|v| !v.is_empty()) {
            Some(last) => {
                if let Some(gap) = raw[..=last].iter().position(|v| v.is_empty()) {
                    return Err(CatalogError::Decode(format!(
                        "CSV row {}: {} is empty but {} is set",
                        line, OPTION_COLUMNS[gap], OPTION_COLUMNS[last]
                    )));
                }
                raw[..=last].iter().map(|v| v.to_string()).collect()
            }
            None => Vec::new(),
        };

        let price = map.get_optional(record, "price");

        if sku.is_empty() && options.is_empty() && price.is_none() {
            return Ok(None);
        }

        Ok(Some(VariantInput {
            sku,
            options,
            price,
        }))
    }
}

impl ProductDecoder for CsvDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<ProductInput>> {
        let input = input
            .strip_prefix(UTF8_BOM)
            .unwrap_or(input);
        if input.is_empty() {
            return Err(CatalogError::Decode("CSV feed is empty".to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(input);

        let headers = reader
            .headers()
            .map_err(|e| CatalogError::Decode(format!("Invalid CSV header row: {}", e)))?
            .clone();
        let map = ColumnMap::from_headers(&headers)?;

        let mut products: Vec<ProductInput> = Vec::new();
        for (row, record) in reader.records().enumerate() {
            // Header is line 1, first data row is line 2
            let line = row + 2;
            let record = record
                .map_err(|e| CatalogError::Decode(format!("CSV row {}: {}", line, e)))?;

            let handle = map.get(&record, "handle");
            if handle.is_empty() {
                return Err(CatalogError::Decode(format!(
                    "CSV row {}: handle is empty",
                    line
                )));
            }

            let variant = self.parse_variant(&map, &record, line)?;
            match products.last_mut() {
                // Continuation row: same handle contributes a variant only,
                // product-level columns stay as read from the first row
                Some(last) if last.handle == handle => {
                    if let Some(variant) = variant {
                        last.variants.push(variant);
                    }
                }
                _ => {
                    let mut product = self.parse_product(&map, &record);
                    if let Some(variant) = variant {
                        product.variants.push(variant);
                    }
                    products.push(product);
                }
            }
        }

        debug!("Decoded {} products from CSV feed", products.len());
        Ok(products)
    }
}
