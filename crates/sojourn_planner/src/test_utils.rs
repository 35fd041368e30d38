//! Shared fixtures for unit tests. Coordinates are in and around
//! Hyderabad so distances stay plausible.

use jiff::SignedDuration;
use jiff::civil::{Date, Time, date};
use sojourn_routing_providers::route::Route;
use sojourn_routing_providers::travel_mode::TravelMode;
use uuid::Uuid;

use crate::itinerary::day_plan::{Activity, DayPlan, Itinerary, Place};
use crate::itinerary::location::Location;
use crate::itinerary::place::{OpeningPeriod, PlaceCandidate, PlaceCandidateBuilder};

const BASE_LAT: f64 = 17.36;
const BASE_LNG: f64 = 78.47;

pub(crate) fn place_at(id: &str, name: &str, lat: f64, lng: f64, types: &[&str]) -> PlaceCandidate {
    let mut builder = PlaceCandidateBuilder::default();
    builder
        .set_place_id(id.to_string())
        .set_name(name.to_string())
        .set_location(Location::new(lat, lng))
        .set_types(types.iter().map(|t| t.to_string()).collect());
    builder.build()
}

pub(crate) fn place_of_type(id: &str, name: &str, types: &[&str]) -> PlaceCandidate {
    place_at(id, name, BASE_LAT, BASE_LNG, types)
}

pub(crate) fn place_with_hours(
    id: &str,
    name: &str,
    types: &[&str],
    periods: Vec<OpeningPeriod>,
) -> PlaceCandidate {
    let mut builder = PlaceCandidateBuilder::default();
    builder
        .set_place_id(id.to_string())
        .set_name(name.to_string())
        .set_location(Location::new(BASE_LAT, BASE_LNG))
        .set_types(types.iter().map(|t| t.to_string()).collect())
        .set_opening_hours(periods);
    builder.build()
}

/// `n` candidates with distinct ids and spread-out coordinates. Types
/// cycle so a handful of places still makes a believable day.
pub(crate) fn sample_places(n: usize) -> Vec<PlaceCandidate> {
    const TYPE_CYCLE: &[&[&str]] = &[
        &["museum"],
        &["tourist_attraction"],
        &["restaurant"],
        &["park"],
        &["art_gallery"],
        &["market"],
        &["fort"],
    ];

    (0..n)
        .map(|i| {
            place_at(
                &format!("p{}", i + 1),
                &format!("Place {}", i + 1),
                BASE_LAT + i as f64 * 0.01,
                BASE_LNG + (i % 3) as f64 * 0.01,
                TYPE_CYCLE[i % TYPE_CYCLE.len()],
            )
        })
        .collect()
}

pub(crate) fn leg_minutes(minutes: i64) -> Route {
    Route {
        distance_meters: minutes as f64 * 80.0,
        duration_seconds: minutes * 60,
        duration_text: format!("{minutes} min"),
        travel_mode: TravelMode::Walk,
        polyline: String::new(),
    }
}

/// `n` ten-minute walking legs.
pub(crate) fn constant_routes(n: usize) -> Vec<Route> {
    (0..n).map(|_| leg_minutes(10)).collect()
}

pub(crate) fn routes_with_minutes(minutes: &[i64]) -> Vec<Route> {
    minutes.iter().map(|m| leg_minutes(*m)).collect()
}

/// A finished activity for scorer tests. `route_to_next`, opening hours
/// and coordinates are left at their defaults; tests set the public
/// fields they care about.
pub(crate) fn activity(name: &str, category: &str, start: Time, duration_minutes: i64) -> Activity {
    Activity {
        id: Uuid::new_v4(),
        time_start: start,
        time_end: start + SignedDuration::from_mins(duration_minutes),
        duration_minutes,
        place: Place {
            place_id: format!("fixture-{name}"),
            name: name.to_string(),
            category: category.to_string(),
            address: String::new(),
            location: Location::new(BASE_LAT, BASE_LNG),
            rating: None,
            opening_hours: Vec::new(),
        },
        notes: None,
        route_to_next: None,
    }
}

pub(crate) fn first_day() -> Date {
    // A Saturday.
    date(2025, 11, 15)
}

pub(crate) fn day(day_number: u32, theme: &str, activities: Vec<Activity>) -> DayPlan {
    DayPlan {
        date: date(2025, 11, 14 + day_number as i8),
        day_number,
        theme: theme.to_string(),
        activities,
    }
}

pub(crate) fn itinerary(days: Vec<DayPlan>) -> Itinerary {
    Itinerary {
        destination: "Hyderabad".to_string(),
        days,
    }
}
