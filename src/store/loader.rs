/// Listings file loader
///
/// Reads the tabular dataset into a Store. Header names are normalized
/// (trimmed, lowercased) so "  Price " and "price" are the same column.
/// Missing columns and empty cells fall back to 0 / empty string; a cell
/// that is present but not parseable fails the whole load. Partial
/// stores are never produced.

use crate::error::{Result, ScoutError};
use crate::store::models::{Property, Store};
use std::collections::HashMap;
use std::path::Path;

/// Load the listings CSV at `path` into a Store.
///
/// # Returns
/// * `Ok(Store)` - All rows parsed
/// * `Err(ScoutError::Load)` - Any malformed row; the caller decides what
///   to do with an empty store
pub async fn load_csv<P: AsRef<Path>>(path: P) -> Result<Store> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ScoutError::Load(format!("{}: {}", path.display(), e)))?;

    let store = parse_csv(&contents)?;
    tracing::debug!("loaded {} listings from {}", store.len(), path.display());
    Ok(store)
}

/// Parse CSV contents into a Store. Separated from the file read so tests
/// can feed it strings directly.
pub fn parse_csv(contents: &str) -> Result<Store> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());

    // Normalized header name -> column position
    let columns: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let mut properties = Vec::new();

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let text = |name: &str| -> String {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .unwrap_or("")
                .trim()
                .to_string()
        };
        // Row 1 is the header, so data rows start at line 2
        let row = idx + 2;

        properties.push(Property {
            property_type: text("type"),
            price: numeric(&text("price"), row, "price")?,
            bedrooms: numeric(&text("bedrooms"), row, "bedrooms")? as u32,
            bathrooms: numeric(&text("bathrooms"), row, "bathrooms")? as u32,
            area: numeric(&text("area"), row, "area")?,
            furnished: text("furnished"),
            level: text("level"),
            compound: text("compound"),
            payment_option: text("payment_option"),
            delivery_date: text("delivery_date"),
            delivery_term: text("delivery_term"),
            city: text("city"),
        });
    }

    Ok(Store::from_properties(properties))
}

/// Empty cells mean 0; anything else must parse.
fn numeric(raw: &str, row: usize, column: &str) -> Result<f64> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| ScoutError::Load(format!("row {}: invalid {} value '{}'", row, column, raw)))
}
