use sojourn_routing_providers::travel_mode::TravelMode;

use crate::itinerary::location::Location;

/// Great-circle distance in kilometers.
pub fn haversine_distance_km(from: &Location, to: &Location) -> f64 {
    from.haversine_distance(to) / 1000.0
}

/// Assumed average speed when no routing backend is consulted.
pub fn assumed_speed_kmh(mode: TravelMode) -> f64 {
    match mode {
        TravelMode::Walk => 5.0,
        TravelMode::Transit => 20.0,
        TravelMode::Drive => 30.0,
    }
}

/// Straight-line travel estimate, floored to whole minutes.
pub fn estimate_travel_minutes(distance_km: f64, mode: TravelMode) -> i64 {
    let hours = distance_km / assumed_speed_kmh(mode);
    (hours * 60.0) as i64
}
