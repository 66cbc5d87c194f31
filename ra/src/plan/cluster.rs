//! Greedy seed-based proximity clustering

use tracing::debug;

use super::geo::haversine_km;
use crate::domain::Listing;

/// Default clustering radius in kilometers
pub const DEFAULT_CLUSTER_THRESHOLD_KM: f64 = 2.0;

/// Cluster listings by proximity to a seed listing
///
/// Greedy single-pass grouping: walking the input in order, each listing not
/// yet assigned seeds a new cluster and absorbs every later unassigned
/// listing within `threshold_km` of the seed itself. Distance is measured to
/// the seed only - not to the centroid, not transitively - so two listings
/// just outside each other's radius can end up split even when both are near
/// a third. Downstream scheduling depends on these exact groupings.
///
/// Clusters are ordered north-to-south by mean member latitude; members
/// within a cluster by (latitude, longitude) ascending. Listings without
/// coordinates form one final cluster in original input order.
pub fn cluster(listings: &[Listing], threshold_km: f64) -> Vec<Vec<Listing>> {
    debug!(count = listings.len(), threshold_km, "cluster: called");

    let geolocated: Vec<&Listing> = listings.iter().filter(|l| l.coordinates().is_some()).collect();
    let unlocated: Vec<Listing> = listings
        .iter()
        .filter(|l| l.coordinates().is_none())
        .cloned()
        .collect();

    let mut assigned = vec![false; geolocated.len()];
    let mut clusters: Vec<Vec<Listing>> = Vec::new();

    for i in 0..geolocated.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let (seed_lat, seed_lon) = geolocated[i].coordinates().unwrap();
        let mut members = vec![geolocated[i].clone()];

        for j in (i + 1)..geolocated.len() {
            if assigned[j] {
                continue;
            }
            let (lat, lon) = geolocated[j].coordinates().unwrap();
            if haversine_km(seed_lat, seed_lon, lat, lon) <= threshold_km {
                assigned[j] = true;
                members.push(geolocated[j].clone());
            }
        }

        clusters.push(members);
    }

    // North to south by mean member latitude
    clusters.sort_by(|a, b| {
        let mean = |c: &[Listing]| c.iter().filter_map(|l| l.latitude).sum::<f64>() / c.len() as f64;
        mean(b).total_cmp(&mean(a))
    });

    for members in &mut clusters {
        members.sort_by(|a, b| {
            a.latitude
                .unwrap()
                .total_cmp(&b.latitude.unwrap())
                .then(a.longitude.unwrap().total_cmp(&b.longitude.unwrap()))
        });
    }

    if !unlocated.is_empty() {
        clusters.push(unlocated);
    }

    debug!(cluster_count = clusters.len(), "cluster: done");
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing(id: &str, coords: Option<(f64, f64)>) -> Listing {
        let mut v = json!({
            "id": id,
            "title": format!("Listing {}", id),
            "url": format!("https://example.com/{}", id),
            "address": format!("{} Test St", id),
            "price": 2000.0,
            "bedrooms": 2
        });
        if let Some((lat, lon)) = coords {
            v["latitude"] = json!(lat);
            v["longitude"] = json!(lon);
        }
        Listing::from_value(v).unwrap()
    }

    #[test]
    fn test_nearby_listings_share_a_cluster() {
        // ~0.7 km apart in downtown Vancouver
        let listings = vec![
            listing("A", Some((49.2827, -123.1207))),
            listing("B", Some((49.2780, -123.1160))),
        ];
        let clusters = cluster(&listings, DEFAULT_CLUSTER_THRESHOLD_KM);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 2);
    }

    #[test]
    fn test_distant_listing_gets_own_cluster() {
        let listings = vec![
            listing("A", Some((49.2827, -123.1207))),
            listing("B", Some((49.2780, -123.1160))),
            listing("C", Some((49.2606, -123.2460))), // UBC, ~9 km away
        ];
        let clusters = cluster(&listings, DEFAULT_CLUSTER_THRESHOLD_KM);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn test_seed_distance_not_transitive() {
        // B is within 2 km of seed A; C is within 2 km of B but ~3.3 km from
        // A, so C starts its own cluster
        let listings = vec![
            listing("A", Some((49.2800, -123.1200))),
            listing("B", Some((49.2950, -123.1200))), // ~1.7 km from A
            listing("C", Some((49.3100, -123.1200))), // ~1.7 km from B, ~3.3 from A
        ];
        let clusters = cluster(&listings, 2.0);
        assert_eq!(clusters.len(), 2);
        let with_a: Vec<&str> = clusters
            .iter()
            .find(|c| c.iter().any(|l| l.id == "A"))
            .unwrap()
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert!(with_a.contains(&"B"));
        assert!(!with_a.contains(&"C"));
    }

    #[test]
    fn test_clusters_ordered_north_to_south() {
        let listings = vec![
            listing("south", Some((49.2000, -123.1200))),
            listing("north", Some((49.3000, -123.1200))),
        ];
        let clusters = cluster(&listings, 2.0);
        assert_eq!(clusters[0][0].id, "north");
        assert_eq!(clusters[1][0].id, "south");
    }

    #[test]
    fn test_members_ordered_by_lat_lon() {
        let listings = vec![
            listing("b", Some((49.2827, -123.1100))),
            listing("a", Some((49.2780, -123.1160))),
        ];
        let clusters = cluster(&listings, 2.0);
        assert_eq!(clusters[0][0].id, "a");
        assert_eq!(clusters[0][1].id, "b");
    }

    #[test]
    fn test_unlocated_listings_form_final_cluster_in_input_order() {
        let listings = vec![
            listing("no1", None),
            listing("geo", Some((49.28, -123.12))),
            listing("no2", None),
        ];
        let clusters = cluster(&listings, 2.0);
        assert_eq!(clusters.len(), 2);
        let last = clusters.last().unwrap();
        let ids: Vec<&str> = last.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["no1", "no2"]);
    }

    #[test]
    fn test_empty_input() {
        let clusters = cluster(&[], 2.0);
        assert!(clusters.is_empty());
    }
}
