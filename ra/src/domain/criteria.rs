//! Filter criteria - all-optional inclusive bounds

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Listing;

/// Search/filter bounds, every field optional
///
/// A listing matches only if every bound that is present is satisfied.
/// A bound over a field the listing lacks (e.g. `min_sqft` with no sqft)
/// excludes the listing: absence never satisfies a bound.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FilterCriteria {
    pub min_bedrooms: Option<u32>,
    pub max_bedrooms: Option<u32>,
    pub min_bathrooms: Option<f64>,
    pub max_bathrooms: Option<f64>,
    pub min_sqft: Option<f64>,
    pub max_sqft: Option<f64>,
    pub rent_min: Option<f64>,
    pub rent_max: Option<f64>,
}

impl FilterCriteria {
    /// True when no bound is set
    pub fn is_empty(&self) -> bool {
        self == &FilterCriteria::default()
    }

    /// Does this listing satisfy every present bound?
    pub fn matches(&self, listing: &Listing) -> bool {
        debug!(id = %listing.id, "FilterCriteria::matches: called");

        if let Some(min) = self.min_bedrooms
            && listing.bedrooms < min
        {
            return false;
        }
        if let Some(max) = self.max_bedrooms
            && listing.bedrooms > max
        {
            return false;
        }

        if let Some(min) = self.min_bathrooms {
            match listing.bathrooms {
                Some(b) if b >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_bathrooms {
            match listing.bathrooms {
                Some(b) if b <= max => {}
                _ => return false,
            }
        }

        if let Some(min) = self.min_sqft {
            match listing.sqft {
                Some(s) if s >= min => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_sqft {
            match listing.sqft {
                Some(s) if s <= max => {}
                _ => return false,
            }
        }

        if let Some(min) = self.rent_min
            && listing.price < min
        {
            return false;
        }
        if let Some(max) = self.rent_max
            && listing.price > max
        {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(bedrooms: u32, bathrooms: Option<f64>, sqft: Option<f64>, price: f64) -> Listing {
        let mut v = json!({
            "id": "L1",
            "title": "Test",
            "url": "https://example.com/l1",
            "address": "1 Test St",
            "price": price,
            "bedrooms": bedrooms
        });
        if let Some(b) = bathrooms {
            v["bathrooms"] = json!(b);
        }
        if let Some(s) = sqft {
            v["sqft"] = json!(s);
        }
        Listing::from_value(v).unwrap()
    }

    #[test]
    fn test_empty_criteria_matches_all() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert!(criteria.matches(&listing(2, Some(2.0), Some(1000.0), 2500.0)));
    }

    #[test]
    fn test_min_bedrooms() {
        let criteria = FilterCriteria {
            min_bedrooms: Some(2),
            ..Default::default()
        };
        assert!(criteria.matches(&listing(2, None, None, 2000.0)));
        assert!(criteria.matches(&listing(3, None, None, 2000.0)));
        assert!(!criteria.matches(&listing(1, None, None, 2000.0)));
    }

    #[test]
    fn test_max_bedrooms() {
        let criteria = FilterCriteria {
            max_bedrooms: Some(2),
            ..Default::default()
        };
        assert!(criteria.matches(&listing(2, None, None, 2000.0)));
        assert!(criteria.matches(&listing(1, None, None, 2000.0)));
        assert!(!criteria.matches(&listing(3, None, None, 2000.0)));
    }

    #[test]
    fn test_min_bathrooms_fractional() {
        let criteria = FilterCriteria {
            min_bathrooms: Some(2.0),
            ..Default::default()
        };
        assert!(criteria.matches(&listing(2, Some(2.0), None, 2000.0)));
        assert!(!criteria.matches(&listing(2, Some(1.5), None, 2000.0)));
    }

    #[test]
    fn test_rent_bounds() {
        let criteria = FilterCriteria {
            rent_min: Some(2000.0),
            rent_max: Some(3000.0),
            ..Default::default()
        };
        assert!(criteria.matches(&listing(2, None, None, 2500.0)));
        assert!(!criteria.matches(&listing(2, None, None, 1500.0)));
        assert!(!criteria.matches(&listing(2, None, None, 3500.0)));
    }

    #[test]
    fn test_missing_sqft_fails_min_sqft() {
        let criteria = FilterCriteria {
            min_sqft: Some(500.0),
            ..Default::default()
        };
        assert!(!criteria.matches(&listing(2, None, None, 2000.0)));
        assert!(criteria.matches(&listing(2, None, Some(600.0), 2000.0)));
    }

    #[test]
    fn test_missing_bathrooms_fails_max_bathrooms() {
        // Absence never satisfies a bound, even an upper one
        let criteria = FilterCriteria {
            max_bathrooms: Some(2.0),
            ..Default::default()
        };
        assert!(!criteria.matches(&listing(2, None, None, 2000.0)));
    }
}
