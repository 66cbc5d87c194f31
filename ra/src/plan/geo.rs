//! Great-circle distance

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (latitude, longitude) points, in km
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert!(haversine_km(49.28, -123.12, 49.28, -123.12) < 1e-9);
    }

    #[test]
    fn test_known_distance_downtown_to_ubc() {
        // Downtown Vancouver to UBC is roughly 9-10 km
        let d = haversine_km(49.2827, -123.1207, 49.2606, -123.2460);
        assert!(d > 8.0 && d < 11.0, "got {}", d);
    }

    #[test]
    fn test_symmetry() {
        let a = haversine_km(49.28, -123.12, 49.25, -123.10);
        let b = haversine_km(49.25, -123.10, 49.28, -123.12);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_latitude() {
        // One degree of latitude is about 111 km
        let d = haversine_km(49.0, -123.0, 50.0, -123.0);
        assert!((d - 111.19).abs() < 0.5, "got {}", d);
    }
}
