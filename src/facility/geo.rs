//! Great-circle distance, used to fill in missing stop-to-facility distances.

/// Mean Earth radius (IUGG), metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

const DEG: f64 = std::f64::consts::PI / 180.0;

/// Haversine distance between two WGS84 points, in metres.
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1 * DEG;
    let phi2 = lat2 * DEG;
    let d_phi = (lat2 - lat1) * DEG;
    let d_lambda = (lon2 - lon1) * DEG;

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().asin()
}

pub fn valid_lat(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

pub fn valid_lon(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon)
}
