//! Search query shape

use serde::{Deserialize, Serialize};

use crate::domain::FilterCriteria;

/// Listing market segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingType {
    #[default]
    ForRent,
    ForSale,
    ForSaleOrRent,
}

/// A search request against the backend
///
/// `location` and `min_bedrooms` are required; everything else optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchQuery {
    pub location: String,
    pub min_bedrooms: u32,
    #[serde(default)]
    pub max_bedrooms: Option<u32>,
    #[serde(default)]
    pub min_bathrooms: Option<f64>,
    #[serde(default)]
    pub max_bathrooms: Option<f64>,
    #[serde(default)]
    pub min_sqft: Option<f64>,
    #[serde(default)]
    pub max_sqft: Option<f64>,
    #[serde(default)]
    pub rent_min: Option<f64>,
    #[serde(default)]
    pub rent_max: Option<f64>,
    #[serde(default)]
    pub listing_type: ListingType,
}

impl SearchQuery {
    /// The local filter bounds implied by this query
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            min_bedrooms: Some(self.min_bedrooms),
            max_bedrooms: self.max_bedrooms,
            min_bathrooms: self.min_bathrooms,
            max_bathrooms: self.max_bathrooms,
            min_sqft: self.min_sqft,
            max_sqft: self.max_sqft,
            rent_min: self.rent_min,
            rent_max: self.rent_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_type_default_and_serde() {
        let query: SearchQuery = serde_json::from_value(serde_json::json!({
            "location": "Vancouver, BC",
            "min_bedrooms": 2
        }))
        .unwrap();
        assert_eq!(query.listing_type, ListingType::ForRent);

        let query: SearchQuery = serde_json::from_value(serde_json::json!({
            "location": "Vancouver, BC",
            "min_bedrooms": 1,
            "listing_type": "for_sale_or_rent"
        }))
        .unwrap();
        assert_eq!(query.listing_type, ListingType::ForSaleOrRent);
    }

    #[test]
    fn test_criteria_carries_bounds() {
        let query = SearchQuery {
            location: "Vancouver".to_string(),
            min_bedrooms: 2,
            max_bedrooms: None,
            min_bathrooms: Some(1.5),
            max_bathrooms: None,
            min_sqft: None,
            max_sqft: None,
            rent_min: None,
            rent_max: Some(3000.0),
            listing_type: ListingType::ForRent,
        };
        let criteria = query.criteria();
        assert_eq!(criteria.min_bedrooms, Some(2));
        assert_eq!(criteria.min_bathrooms, Some(1.5));
        assert_eq!(criteria.rent_max, Some(3000.0));
    }
}
