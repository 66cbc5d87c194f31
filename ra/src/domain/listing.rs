//! Listing record and construction-time validation

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from constructing domain values out of loose input
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Field {field} must be non-negative, got {value}")]
    NegativeValue { field: String, value: f64 },

    #[error("Listing has only one of latitude/longitude; coordinates must be a pair")]
    PartialCoordinates,

    #[error("Malformed listing payload: {0}")]
    Malformed(String),
}

/// One rental candidate
///
/// Immutable once constructed. Built from a raw search row by the adapter
/// (or from a tool payload at the boundary) and validated exactly once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    /// Stable external identifier (e.g. an MLS number)
    pub id: String,
    pub title: String,
    /// Canonical absolute URL for the listing
    pub url: String,
    pub address: String,
    /// Monthly price in currency units
    pub price: f64,
    /// Pre-formatted price string; falls back to formatted `price`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_display: Option<String>,
    pub bedrooms: u32,
    /// May be fractional (e.g. 1.5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nearby_amenities: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_house: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Listing {
    /// Validate the numeric and coordinate invariants
    ///
    /// Required string fields are guaranteed by the type; this checks the
    /// constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        debug!(id = %self.id, "Listing::validate: called");
        if self.price < 0.0 {
            return Err(ValidationError::NegativeValue {
                field: "price".to_string(),
                value: self.price,
            });
        }
        if let Some(b) = self.bathrooms
            && b < 0.0
        {
            return Err(ValidationError::NegativeValue {
                field: "bathrooms".to_string(),
                value: b,
            });
        }
        if let Some(s) = self.sqft
            && s < 0.0
        {
            return Err(ValidationError::NegativeValue {
                field: "sqft".to_string(),
                value: s,
            });
        }
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(ValidationError::PartialCoordinates);
        }
        Ok(())
    }

    /// Parse a listing from a loose JSON payload at the tool boundary
    ///
    /// Fails fast on missing required fields or invariant violations; the
    /// caller decides whether to skip the row or surface the error.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ValidationError> {
        debug!("Listing::from_value: called");
        for field in ["id", "title", "url", "address", "price", "bedrooms"] {
            if value.get(field).is_none() || value[field].is_null() {
                return Err(ValidationError::MissingField(field.to_string()));
            }
        }
        let listing: Listing =
            serde_json::from_value(value).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        listing.validate()?;
        Ok(listing)
    }

    /// Coordinate pair, present only when the listing is geolocated
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Display price, preferring the pre-formatted string
    pub fn display_price(&self) -> String {
        match &self.price_display {
            Some(s) if !s.is_empty() => s.clone(),
            _ => format_price(self.price),
        }
    }
}

/// Format a price as `$2,500` with thousands separators
pub fn format_price(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 { format!("-${}", grouped) } else { format!("${}", grouped) }
}
