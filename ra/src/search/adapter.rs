//! Raw row to Listing mapping
//!
//! Rows arrive with scraped column names (`MLS`, `Rent`, `Size`, ...) and
//! string-typed numbers. Coercion is lenient per field - garbage degrades
//! to missing - but a row failing required-field validation is skipped with
//! a warning rather than aborting the whole result set.

use regex::Regex;
use serde_json::{Value, json};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::domain::Listing;

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-+]?\d[\d,]*\.?\d*").unwrap())
}

/// Pull a numeric value out of a raw cell: plain numbers pass through,
/// strings like `"$2,500"` or `"1200 sqft"` yield their first number
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let m = number_re().find(s)?;
            m.as_str().replace(',', "").parse::<f64>().ok()
        }
        _ => None,
    }
}

fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Map one raw row to a listing, or None when required fields are missing
fn map_row(row: &Value) -> Option<Listing> {
    let id = coerce_string(row.get("MLS"))?;
    let address = coerce_string(row.get("Address"))?;
    let bedrooms = coerce_number(row.get("Bedrooms"))? as u32;

    // Prefer the rent columns; fall back to the sale price
    let price = coerce_number(row.get("Rent"))
        .or_else(|| coerce_number(row.get("Total Rent")))
        .or_else(|| coerce_number(row.get("Price")))?;

    let url = coerce_string(row.get("Website"))
        .unwrap_or_else(|| format!("https://www.realtor.ca/listing/{}", id));

    let latitude = coerce_number(row.get("Latitude"));
    let longitude = coerce_number(row.get("Longitude"));
    let (latitude, longitude) = match (latitude, longitude) {
        (Some(lat), Some(lon)) => (Some(lat), Some(lon)),
        (None, None) => (None, None),
        _ => {
            warn!(%id, "map_row: partial coordinates, dropping both");
            (None, None)
        }
    };

    let mut value = json!({
        "id": id,
        "title": address,
        "url": url,
        "address": address,
        "price": price,
        "bedrooms": bedrooms,
    });
    let obj = value.as_object_mut().unwrap();

    let price_display = coerce_string(row.get("Rent")).or_else(|| coerce_string(row.get("Price")));
    if let Some(pd) = price_display
        && pd.contains('$')
    {
        obj.insert("price_display".to_string(), json!(pd));
    }
    if let Some(b) = coerce_number(row.get("Bathrooms")) {
        obj.insert("bathrooms".to_string(), json!(b));
    }
    if let Some(s) = coerce_number(row.get("Size")) {
        obj.insert("sqft".to_string(), json!(s));
    }
    if let (Some(lat), Some(lon)) = (latitude, longitude) {
        obj.insert("latitude".to_string(), json!(lat));
        obj.insert("longitude".to_string(), json!(lon));
    }
    for (column, field) in [
        ("Description", "description"),
        ("House Category", "house_category"),
        ("Ownership Category", "ownership_category"),
        ("Ammenities", "amenities"),
        ("Nearby Ammenities", "nearby_amenities"),
        ("Stories", "stories"),
        ("Postal Code", "postal_code"),
        ("Open House", "open_house"),
    ] {
        if let Some(s) = coerce_string(row.get(column)) {
            obj.insert(field.to_string(), json!(s));
        }
    }

    match Listing::from_value(value) {
        Ok(listing) => Some(listing),
        Err(e) => {
            warn!(error = %e, "map_row: row failed validation, skipping");
            None
        }
    }
}

/// Map raw backend rows into typed listings, skipping invalid rows
pub fn map_rows(rows: &[Value]) -> Vec<Listing> {
    debug!(row_count = rows.len(), "map_rows: called");
    let listings: Vec<Listing> = rows.iter().filter_map(map_row).collect();
    if listings.len() < rows.len() {
        warn!(skipped = rows.len() - listings.len(), "map_rows: skipped invalid rows");
    }
    listings
}
