//! In-memory filtering and sorting over listing collections
//!
//! Sorting uses tag-tuple keys: every key is `(present, value)` where the
//! presence tag always compares ascending and only the value honors the
//! requested direction. A listing missing the sort attribute therefore sorts
//! after every listing that has it, ascending or descending. This asymmetry
//! is deliberate and load-bearing.

use std::cmp::Ordering;
use tracing::debug;

use crate::domain::{FilterCriteria, Listing};

/// Attributes eligible for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Bedrooms,
    Bathrooms,
    Sqft,
    Address,
    Id,
    Title,
}

impl SortField {
    /// Parse a sort attribute name; unknown names yield None (sort skipped)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "price" => Some(SortField::Price),
            "bedrooms" => Some(SortField::Bedrooms),
            "bathrooms" => Some(SortField::Bathrooms),
            "sqft" => Some(SortField::Sqft),
            "address" => Some(SortField::Address),
            "id" => Some(SortField::Id),
            "title" => Some(SortField::Title),
            _ => None,
        }
    }
}

/// Sort key for one listing under one field
enum SortKey {
    Number(f64),
    Text(String),
    Missing,
}

fn sort_key(listing: &Listing, field: SortField) -> SortKey {
    match field {
        SortField::Price => SortKey::Number(listing.price),
        SortField::Bedrooms => SortKey::Number(listing.bedrooms as f64),
        SortField::Bathrooms => listing.bathrooms.map(SortKey::Number).unwrap_or(SortKey::Missing),
        SortField::Sqft => listing.sqft.map(SortKey::Number).unwrap_or(SortKey::Missing),
        SortField::Address => SortKey::Text(listing.address.clone()),
        SortField::Id => SortKey::Text(listing.id.clone()),
        SortField::Title => SortKey::Text(listing.title.clone()),
    }
}

fn compare(a: &Listing, b: &Listing, field: SortField, ascending: bool) -> Ordering {
    let ka = sort_key(a, field);
    let kb = sort_key(b, field);
    match (ka, kb) {
        (SortKey::Missing, SortKey::Missing) => Ordering::Equal,
        // Presence tag compares ascending regardless of direction
        (SortKey::Missing, _) => Ordering::Greater,
        (_, SortKey::Missing) => Ordering::Less,
        (SortKey::Number(x), SortKey::Number(y)) => {
            let ord = x.total_cmp(&y);
            if ascending { ord } else { ord.reverse() }
        }
        (SortKey::Text(x), SortKey::Text(y)) => {
            let ord = x.cmp(&y);
            if ascending { ord } else { ord.reverse() }
        }
        // Fields are uniformly numeric or textual, mixed keys cannot occur
        _ => Ordering::Equal,
    }
}

/// Filter listings by criteria and optionally sort by one attribute
///
/// Unknown `sort_by` names skip the sort (the planner passes attribute names
/// speculatively); filtering still applies. Returns the surviving listings
/// and their count.
pub fn filter_and_sort(
    listings: &[Listing],
    criteria: &FilterCriteria,
    sort_by: Option<&str>,
    ascending: bool,
) -> (Vec<Listing>, usize) {
    debug!(
        input_count = listings.len(),
        ?sort_by,
        ascending,
        "filter_and_sort: called"
    );

    let mut filtered: Vec<Listing> = listings.iter().filter(|l| criteria.matches(l)).cloned().collect();

    if let Some(name) = sort_by {
        match SortField::parse(name) {
            Some(field) => {
                filtered.sort_by(|a, b| compare(a, b, field, ascending));
            }
            None => {
                debug!(%name, "filter_and_sort: unknown sort attribute, skipping sort");
            }
        }
    }

    let count = filtered.len();
    debug!(count, "filter_and_sort: done");
    (filtered, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn listing(id: &str, bedrooms: u32, price: f64, sqft: Option<f64>) -> Listing {
        let mut v = json!({
            "id": id,
            "title": format!("Listing {}", id),
            "url": format!("https://example.com/{}", id),
            "address": format!("{} Test St", id),
            "price": price,
            "bedrooms": bedrooms
        });
        if let Some(s) = sqft {
            v["sqft"] = json!(s);
        }
        Listing::from_value(v).unwrap()
    }

    #[test]
    fn test_filter_min_bedrooms() {
        let listings = vec![
            listing("1", 1, 2000.0, None),
            listing("2", 2, 2200.0, None),
            listing("3", 3, 2400.0, None),
        ];
        let criteria = FilterCriteria {
            min_bedrooms: Some(2),
            ..Default::default()
        };
        let (out, count) = filter_and_sort(&listings, &criteria, None, true);
        assert_eq!(count, 2);
        assert!(out.iter().all(|l| l.bedrooms >= 2));
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let listings = vec![
            listing("1", 2, 3000.0, None),
            listing("2", 2, 2000.0, None),
            listing("3", 2, 2500.0, None),
        ];
        let (out, _) = filter_and_sort(&listings, &FilterCriteria::default(), Some("price"), true);
        let prices: Vec<f64> = out.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![2000.0, 2500.0, 3000.0]);
    }

    #[test]
    fn test_sort_by_price_descending() {
        let listings = vec![listing("1", 2, 2000.0, None), listing("2", 2, 3000.0, None)];
        let (out, _) = filter_and_sort(&listings, &FilterCriteria::default(), Some("price"), false);
        let prices: Vec<f64> = out.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![3000.0, 2000.0]);
    }

    #[test]
    fn test_missing_sqft_sorts_last_both_directions() {
        let listings = vec![
            listing("no-sqft", 2, 2000.0, None),
            listing("big", 2, 2000.0, Some(1200.0)),
            listing("small", 2, 2000.0, Some(600.0)),
        ];

        let (asc, _) = filter_and_sort(&listings, &FilterCriteria::default(), Some("sqft"), true);
        assert_eq!(asc.last().unwrap().id, "no-sqft");
        assert_eq!(asc[0].id, "small");

        let (desc, _) = filter_and_sort(&listings, &FilterCriteria::default(), Some("sqft"), false);
        assert_eq!(desc.last().unwrap().id, "no-sqft");
        assert_eq!(desc[0].id, "big");
    }

    #[test]
    fn test_unknown_sort_attribute_ignored() {
        let listings = vec![listing("1", 2, 3000.0, None), listing("2", 2, 2000.0, None)];
        let (out, count) = filter_and_sort(&listings, &FilterCriteria::default(), Some("invalid"), true);
        assert_eq!(count, 2);
        // Original order preserved when the sort is skipped
        assert_eq!(out[0].id, "1");
    }

    #[test]
    fn test_sort_by_address() {
        let listings = vec![listing("b", 2, 2000.0, None), listing("a", 2, 2000.0, None)];
        let (out, _) = filter_and_sort(&listings, &FilterCriteria::default(), Some("address"), true);
        assert_eq!(out[0].id, "a");
    }

    #[test]
    fn test_empty_input() {
        let (out, count) = filter_and_sort(&[], &FilterCriteria::default(), Some("price"), true);
        assert!(out.is_empty());
        assert_eq!(count, 0);
    }

    #[test]
    fn test_sort_is_stable() {
        // Equal keys keep input order
        let listings = vec![
            listing("first", 2, 2000.0, None),
            listing("second", 2, 2000.0, None),
            listing("third", 2, 2000.0, None),
        ];
        let (out, _) = filter_and_sort(&listings, &FilterCriteria::default(), Some("price"), true);
        let ids: Vec<&str> = out.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    proptest! {
        #[test]
        fn prop_tightening_min_bedrooms_never_grows_results(
            bedrooms in proptest::collection::vec(0u32..6, 0..30),
            min in 0u32..6,
        ) {
            let listings: Vec<Listing> = bedrooms
                .iter()
                .enumerate()
                .map(|(i, &b)| listing(&format!("L{}", i), b, 2000.0, None))
                .collect();

            let loose = FilterCriteria { min_bedrooms: Some(min), ..Default::default() };
            let tight = FilterCriteria { min_bedrooms: Some(min + 1), ..Default::default() };

            let (_, loose_count) = filter_and_sort(&listings, &loose, None, true);
            let (_, tight_count) = filter_and_sort(&listings, &tight, None, true);
            prop_assert!(tight_count <= loose_count);
        }

        #[test]
        fn prop_tightening_rent_max_never_grows_results(
            prices in proptest::collection::vec(500.0f64..5000.0, 0..30),
            max in 500.0f64..5000.0,
            delta in 0.0f64..1000.0,
        ) {
            let listings: Vec<Listing> = prices
                .iter()
                .enumerate()
                .map(|(i, &p)| listing(&format!("L{}", i), 1, p, None))
                .collect();

            let loose = FilterCriteria { rent_max: Some(max), ..Default::default() };
            let tight = FilterCriteria { rent_max: Some(max - delta), ..Default::default() };

            let (_, loose_count) = filter_and_sort(&listings, &loose, None, true);
            let (_, tight_count) = filter_and_sort(&listings, &tight, None, true);
            prop_assert!(tight_count <= loose_count);
        }

        #[test]
        fn prop_missing_sorts_last_any_direction(
            sqfts in proptest::collection::vec(proptest::option::of(100.0f64..5000.0), 1..20),
            ascending in proptest::bool::ANY,
        ) {
            let listings: Vec<Listing> = sqfts
                .iter()
                .enumerate()
                .map(|(i, s)| listing(&format!("L{}", i), 1, 2000.0, *s))
                .collect();

            let (out, _) = filter_and_sort(&listings, &FilterCriteria::default(), Some("sqft"), ascending);
            let first_missing = out.iter().position(|l| l.sqft.is_none());
            if let Some(pos) = first_missing {
                prop_assert!(out[pos..].iter().all(|l| l.sqft.is_none()));
            }
        }
    }
}
