use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::error::CatalogError;
use crate::models::domain::normalize;
use crate::models::{CatalogRecord, GenderLine, ShoeSize, Width};

/// A product row as stored in the Products table
///
/// `options` and `metadata` hold JSON objects as text. Either may be missing
/// or malformed, in which case it is treated as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductRow {
    pub product_id: String,
    pub product_name: String,
    pub vendor: Option<String>,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub options: Option<String>,
    pub metadata: Option<String>,
}

/// Normalize a batch of product rows into catalog records
///
/// Rows that cannot form a valid record are skipped and logged.
pub fn normalize_products(rows: &[ProductRow]) -> Vec<CatalogRecord> {
    let records: Vec<CatalogRecord> = rows
        .iter()
        .filter_map(|row| match normalize_product(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping product {}: {}", row.product_id, e);
                None
            }
        })
        .collect();

    tracing::debug!("Normalized {} of {} product rows", records.len(), rows.len());

    records
}

/// Build a catalog record from one product row
///
/// Structured metadata wins over option fields, which win over the plain
/// columns and whatever can be read from the product name.
pub fn normalize_product(row: &ProductRow) -> Result<CatalogRecord, CatalogError> {
    let options = parse_json_object(row.options.as_deref());
    let metadata = parse_json_object(row.metadata.as_deref());

    let model = field(&metadata, "custom.model")
        .or_else(|| field(&options, "Model"))
        .unwrap_or_default();

    let gender_line = gender_from_name(&row.product_name)
        .or_else(|| field(&options, "Department").and_then(|d| d.parse().ok()))
        .or_else(|| field(&metadata, "google.gender").and_then(|g| g.parse().ok()))
        .ok_or_else(|| CatalogError::UnknownGender { id: row.product_id.clone() })?;

    let sizes = field(&metadata, "my_fields.size")
        .or_else(|| field(&options, "Size"))
        .or_else(|| row.size.clone())
        .map(|raw| parse_sizes(&raw))
        .unwrap_or_default();

    let width = match field(&metadata, "my_fields.width").or_else(|| field(&options, "Width")) {
        Some(raw) => Some(raw.parse::<Width>().map_err(|_| CatalogError::UnknownWidth {
            id: row.product_id.clone(),
            width: raw,
        })?),
        None => None,
    };

    let colors = field(&metadata, "custom.color")
        .or_else(|| field(&options, "Color"))
        .or_else(|| row.color.clone().filter(|c| !c.trim().is_empty()))
        .map(|raw| split_colors(&raw))
        .unwrap_or_else(|| colors_from_name(&row.product_name));

    let record = CatalogRecord {
        id: row.product_id.clone(),
        brand: row.vendor.as_deref().map(normalize).unwrap_or_default(),
        model: model.trim().to_string(),
        gender_line,
        sizes,
        width,
        colors,
    };

    record.validate()?;
    Ok(record)
}

fn parse_json_object(raw: Option<&str>) -> Map<String, Value> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Map::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::debug!("Ignoring malformed product JSON: {}", e);
            Map::new()
        }
    }
}

/// Read a non-blank string or number field
fn field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn gender_regex() -> &'static Regex {
    static GENDER: OnceLock<Regex> = OnceLock::new();
    GENDER.get_or_init(|| {
        Regex::new(r"(?i)\b(?:(?:women|men)['’]s|kids['’]|unisex\b)").expect("valid regex")
    })
}

/// Find the gender line named in a product title, e.g. "Women's"
pub fn gender_from_name(name: &str) -> Option<GenderLine> {
    let found = gender_regex().find(name)?;
    found.as_str().replace('’', "'").parse().ok()
}

/// Parse a size field into the set of half sizes it covers
///
/// Accepts single sizes (`8`, `8.5`, `8.` meaning 8.5), ranges (`7-9`)
/// expanded on the half-size grid, and comma-separated lists of either.
/// Unparseable pieces are ignored.
pub fn parse_sizes(raw: &str) -> BTreeSet<ShoeSize> {
    let mut sizes = BTreeSet::new();

    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((low, high)) => {
                if let (Some(low), Some(high)) = (parse_size_token(low), parse_size_token(high)) {
                    let (low, high) = if low <= high { (low, high) } else { (high, low) };
                    sizes.extend(
                        (low.half_sizes()..=high.half_sizes()).map(ShoeSize::from_half_sizes),
                    );
                }
            }
            None => sizes.extend(parse_size_token(part)),
        }
    }

    sizes
}

fn parse_size_token(token: &str) -> Option<ShoeSize> {
    let token = token.trim();
    let value = match token.strip_suffix('.') {
        Some(whole) => whole.trim().parse::<f64>().ok()? + 0.5,
        None => token.parse::<f64>().ok()?,
    };
    ShoeSize::try_from(value).ok()
}

fn split_colors(raw: &str) -> Vec<String> {
    raw.split('/')
        .map(normalize)
        .filter(|c| !c.is_empty())
        .collect()
}

/// Colors embedded in a title like "Dunk Low, Pink/White, Women's"
pub fn colors_from_name(name: &str) -> Vec<String> {
    let parts: Vec<&str> = name.split(',').collect();
    if parts.len() >= 3 {
        split_colors(parts[1])
    } else {
        Vec::new()
    }
}
