use crate::travel_matrices::TravelMatrices;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters. Points are (lng, lat).
pub fn haversine_distance(from: geo_types::Point, to: geo_types::Point) -> f64 {
    let lat1_rad = from.y().to_radians();
    let lon1_rad = from.x().to_radians();
    let lat2_rad = to.y().to_radians();
    let lon2_rad = to.x().to_radians();

    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = lon2_rad - lon1_rad;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Travel time in seconds at a constant straight-line speed.
pub fn travel_seconds(distance_meters: f64, speed_kmh: f64) -> f64 {
    distance_meters * 3.6 / speed_kmh
}

/// Straight-line n x n matrices at a constant speed, ignoring the road network.
pub fn as_the_crow_flies_matrices(points: &[geo_types::Point], speed_kmh: f64) -> TravelMatrices {
    let num_points = points.len();
    let mut distances: Vec<f64> = vec![0.0; num_points * num_points];
    let mut durations: Vec<f64> = vec![0.0; num_points * num_points];

    for (i, from) in points.iter().enumerate() {
        for (j, to) in points.iter().enumerate() {
            let distance = haversine_distance(*from, *to);
            distances[i * num_points + j] = distance;
            durations[i * num_points + j] = travel_seconds(distance, speed_kmh);
        }
    }

    TravelMatrices::new(durations, distances, num_points)
}
