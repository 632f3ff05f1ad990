//! Great-circle distance for delivery-radius checks.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (latitude, longitude) points, in km.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        assert!(haversine_km(37.4979, 127.0276, 37.4979, 127.0276) < 1e-9);
    }

    #[test]
    fn test_gangnam_to_yeoksam() {
        // Gangnam station to Yeoksam station is roughly 0.7 km
        let d = haversine_km(37.4979, 127.0276, 37.5007, 127.0364);
        assert!(d > 0.5 && d < 1.0, "got {d}");
    }

    #[test]
    fn test_seoul_to_busan() {
        // ~325 km great-circle
        let d = haversine_km(37.5665, 126.9780, 35.1796, 129.0756);
        assert!(d > 300.0 && d < 350.0, "got {d}");
    }
}
