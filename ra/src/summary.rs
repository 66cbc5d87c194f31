//! Descriptive statistics over a listing collection

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::Listing;

/// One labeled bucket in an ordered distribution
///
/// Distributions serialize as arrays because JSON object key order is not
/// contractual.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

/// Price statistics, rounded to whole currency units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceStats {
    pub min: i64,
    pub median: i64,
    pub mean: i64,
    pub max: i64,
}

/// Bathroom statistics, rounded to one decimal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BathroomStats {
    pub distribution: Vec<Bucket>,
    pub count_with_data: usize,
    pub min: f64,
    pub median: f64,
    pub max: f64,
}

/// Size statistics in whole square feet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SizeStats {
    pub count_with_data: usize,
    pub min: i64,
    pub median: i64,
    pub max: i64,
}

/// Summary over a listing collection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingStats {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceStats>,
    pub bedrooms: Vec<Bucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<BathroomStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeStats>,
    pub house_categories: Vec<Bucket>,
}

fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Render a bathroom count: integral values drop the decimal, fractional
/// values keep it (`2` and `1.5`, never `2.0` or `15`)
fn bathroom_label(b: f64) -> String {
    if b == b.trunc() {
        format!("{}", b as i64)
    } else {
        format!("{}", b)
    }
}

/// Summarize a listing collection
///
/// Empty input returns a zeroed structure; summarization is always safe to
/// call after filtering narrows a set to nothing.
pub fn summarize(listings: &[Listing]) -> ListingStats {
    debug!(count = listings.len(), "summarize: called");

    if listings.is_empty() {
        return ListingStats::default();
    }

    let mut prices: Vec<f64> = listings.iter().map(|l| l.price).collect();
    prices.sort_by(f64::total_cmp);
    let price = Some(PriceStats {
        min: prices[0].round() as i64,
        median: median(&prices).round() as i64,
        mean: (prices.iter().sum::<f64>() / prices.len() as f64).round() as i64,
        max: prices[prices.len() - 1].round() as i64,
    });

    // Bedrooms, ordered by increasing count value
    let mut bedroom_values: Vec<u32> = Vec::new();
    let mut bedroom_counts: Vec<usize> = Vec::new();
    for l in listings {
        match bedroom_values.iter().position(|&v| v == l.bedrooms) {
            Some(i) => bedroom_counts[i] += 1,
            None => {
                bedroom_values.push(l.bedrooms);
                bedroom_counts.push(1);
            }
        }
    }
    let mut bedroom_pairs: Vec<(u32, usize)> = bedroom_values.into_iter().zip(bedroom_counts).collect();
    bedroom_pairs.sort_by_key(|&(v, _)| v);
    let bedrooms = bedroom_pairs
        .into_iter()
        .map(|(v, count)| Bucket {
            label: v.to_string(),
            count,
        })
        .collect();

    // Bathrooms, ordered by increasing value, labels keep fractional form
    let mut bath_values: Vec<f64> = listings.iter().filter_map(|l| l.bathrooms).collect();
    bath_values.sort_by(f64::total_cmp);
    let bathrooms = if bath_values.is_empty() {
        None
    } else {
        let mut dist_values: Vec<f64> = Vec::new();
        let mut dist_counts: Vec<usize> = Vec::new();
        for &b in &bath_values {
            match dist_values.iter().position(|&v| v == b) {
                Some(i) => dist_counts[i] += 1,
                None => {
                    dist_values.push(b);
                    dist_counts.push(1);
                }
            }
        }
        let distribution = dist_values
            .iter()
            .zip(&dist_counts)
            .map(|(&v, &count)| Bucket {
                label: bathroom_label(v),
                count,
            })
            .collect();
        Some(BathroomStats {
            distribution,
            count_with_data: bath_values.len(),
            min: round1(bath_values[0]),
            median: round1(median(&bath_values)),
            max: round1(bath_values[bath_values.len() - 1]),
        })
    };

    let mut sqft_values: Vec<f64> = listings.iter().filter_map(|l| l.sqft).collect();
    sqft_values.sort_by(f64::total_cmp);
    let size = if sqft_values.is_empty() {
        None
    } else {
        Some(SizeStats {
            count_with_data: sqft_values.len(),
            min: sqft_values[0].round() as i64,
            median: median(&sqft_values).round() as i64,
            max: sqft_values[sqft_values.len() - 1].round() as i64,
        })
    };

    // House categories by descending count, ties in first-seen order
    let mut cat_labels: Vec<String> = Vec::new();
    let mut cat_counts: Vec<usize> = Vec::new();
    for l in listings {
        if let Some(cat) = &l.house_category
            && !cat.is_empty()
        {
            match cat_labels.iter().position(|c| c == cat) {
                Some(i) => cat_counts[i] += 1,
                None => {
                    cat_labels.push(cat.clone());
                    cat_counts.push(1);
                }
            }
        }
    }
    let mut cat_pairs: Vec<(String, usize)> = cat_labels.into_iter().zip(cat_counts).collect();
    // Stable sort keeps first-seen order among equal counts
    cat_pairs.sort_by(|a, b| b.1.cmp(&a.1));
    let house_categories = cat_pairs
        .into_iter()
        .map(|(label, count)| Bucket { label, count })
        .collect();

    ListingStats {
        count: listings.len(),
        price,
        bedrooms,
        bathrooms,
        size,
        house_categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(id: &str, price: f64, bedrooms: u32, bathrooms: Option<f64>, category: Option<&str>) -> Listing {
        let mut v = json!({
            "id": id,
            "title": format!("Listing {}", id),
            "url": format!("https://example.com/{}", id),
            "address": format!("{} Test St", id),
            "price": price,
            "bedrooms": bedrooms
        });
        if let Some(b) = bathrooms {
            v["bathrooms"] = json!(b);
        }
        if let Some(c) = category {
            v["house_category"] = json!(c);
        }
        Listing::from_value(v).unwrap()
    }

    #[test]
    fn test_empty_input_is_zeroed() {
        let stats = summarize(&[]);
        assert_eq!(stats.count, 0);
        assert!(stats.price.is_none());
        assert!(stats.bedrooms.is_empty());
        assert!(stats.bathrooms.is_none());
        assert!(stats.size.is_none());
        assert!(stats.house_categories.is_empty());
    }

    #[test]
    fn test_price_stats_rounded() {
        let listings = vec![
            listing("1", 2000.0, 1, None, None),
            listing("2", 2500.0, 2, None, None),
            listing("3", 3000.0, 3, None, None),
        ];
        let stats = summarize(&listings);
        let price = stats.price.unwrap();
        assert_eq!(price.min, 2000);
        assert_eq!(price.median, 2500);
        assert_eq!(price.mean, 2500);
        assert_eq!(price.max, 3000);
    }

    #[test]
    fn test_price_median_even_count() {
        let listings = vec![listing("1", 2000.0, 1, None, None), listing("2", 3000.0, 2, None, None)];
        let stats = summarize(&listings);
        assert_eq!(stats.price.unwrap().median, 2500);
    }

    #[test]
    fn test_bedroom_distribution_ordered_by_value() {
        let listings = vec![
            listing("1", 2000.0, 3, None, None),
            listing("2", 2000.0, 1, None, None),
            listing("3", 2000.0, 3, None, None),
            listing("4", 2000.0, 2, None, None),
        ];
        let stats = summarize(&listings);
        let labels: Vec<&str> = stats.bedrooms.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
        assert_eq!(stats.bedrooms[2].count, 2);
    }

    #[test]
    fn test_bathroom_label_fidelity() {
        let listings = vec![
            listing("1", 2000.0, 1, Some(1.5), None),
            listing("2", 2000.0, 2, Some(2.0), None),
        ];
        let stats = summarize(&listings);
        let bath = stats.bathrooms.unwrap();
        let labels: Vec<&str> = bath.distribution.iter().map(|b| b.label.as_str()).collect();
        assert!(labels.contains(&"1.5"));
        assert!(labels.contains(&"2"));
        assert!(!labels.contains(&"15"));
        assert!(!labels.contains(&"2.0"));
    }

    #[test]
    fn test_bathroom_stats_one_decimal() {
        let listings = vec![
            listing("1", 2000.0, 1, Some(1.0), None),
            listing("2", 2000.0, 2, Some(1.5), None),
            listing("3", 2000.0, 2, Some(2.5), None),
            listing("4", 2000.0, 2, None, None),
        ];
        let stats = summarize(&listings);
        let bath = stats.bathrooms.unwrap();
        assert_eq!(bath.count_with_data, 3);
        assert_eq!(bath.min, 1.0);
        assert_eq!(bath.median, 1.5);
        assert_eq!(bath.max, 2.5);
    }

    #[test]
    fn test_house_categories_descending_with_first_seen_ties() {
        let listings = vec![
            listing("1", 2000.0, 1, None, Some("Townhouse")),
            listing("2", 2000.0, 1, None, Some("Apartment")),
            listing("3", 2000.0, 1, None, Some("Apartment")),
            listing("4", 2000.0, 1, None, Some("House")),
        ];
        let stats = summarize(&listings);
        let labels: Vec<&str> = stats.house_categories.iter().map(|b| b.label.as_str()).collect();
        // Apartment leads on count; Townhouse precedes House by first-seen order
        assert_eq!(labels, vec!["Apartment", "Townhouse", "House"]);
    }

    #[test]
    fn test_no_bathroom_data() {
        let listings = vec![listing("1", 2000.0, 1, None, None)];
        let stats = summarize(&listings);
        assert!(stats.bathrooms.is_none());
        assert_eq!(stats.count, 1);
    }
}
