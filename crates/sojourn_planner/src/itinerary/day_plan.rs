use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};
use sojourn_routing_providers::route::Route;
use uuid::Uuid;

use crate::{
    schedule::builder::ScheduledActivity,
    utils::time::{self, DAY_ABBREVS},
};

use super::{location::Location, place::PlaceCandidate};

/// Category picked for a place when none of its raw types is preferred.
const FALLBACK_CATEGORY: &str = "attraction";

/// Raw types that win the category slot, most specific first.
const PRIORITY_TYPES: &[&str] = &[
    "museum",
    "art_gallery",
    "restaurant",
    "cafe",
    "park",
    "church",
    "bar",
    "shopping_mall",
    "tourist_attraction",
];

/// A place as it appears in the final itinerary.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub location: Location,
    pub rating: Option<f64>,
    pub opening_hours: Vec<String>,
}

impl Place {
    /// Finalizes a candidate: one category out of its raw types, and its
    /// opening periods rendered as display strings.
    pub fn from_candidate(candidate: &PlaceCandidate) -> Self {
        let category = PRIORITY_TYPES
            .iter()
            .find(|preferred| candidate.types().iter().any(|t| t == *preferred))
            .map(|preferred| preferred.to_string())
            .or_else(|| candidate.types().first().cloned())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

        let opening_hours = candidate
            .opening_hours()
            .iter()
            .map(|period| {
                format!(
                    "{}: {} - {}",
                    DAY_ABBREVS[period.day.rem_euclid(7) as usize],
                    time::format_hhmm(period.open),
                    time::format_hhmm(period.close)
                )
            })
            .collect();

        Self {
            place_id: candidate.place_id().to_string(),
            name: candidate.name().to_string(),
            category,
            address: candidate.address().to_string(),
            location: *candidate.location(),
            rating: candidate.rating(),
            opening_hours,
        }
    }
}

/// One scheduled visit, with the travel leg toward the next one.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Activity {
    pub id: Uuid,

    #[serde(with = "time::hhmm")]
    pub time_start: Time,

    #[serde(with = "time::hhmm")]
    pub time_end: Time,

    pub duration_minutes: i64,
    pub place: Place,
    pub notes: Option<String>,
    pub route_to_next: Option<Route>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DayPlan {
    pub date: Date,
    pub day_number: u32,
    pub theme: String,
    pub activities: Vec<Activity>,
}

impl DayPlan {
    /// Zips time slots with travel legs. Leg `i` connects activity `i` to
    /// its successor; the last activity carries no leg.
    pub fn assemble(
        day_number: u32,
        date: Date,
        theme: String,
        scheduled: Vec<ScheduledActivity>,
        routes: &[Route],
    ) -> Self {
        let last = scheduled.len().saturating_sub(1);
        let activities = scheduled
            .into_iter()
            .enumerate()
            .map(|(i, slot)| Activity {
                id: Uuid::new_v4(),
                time_start: slot.start,
                time_end: slot.end,
                duration_minutes: slot.duration_minutes,
                place: Place::from_candidate(&slot.place),
                notes: None,
                route_to_next: if i < last { routes.get(i).cloned() } else { None },
            })
            .collect();

        Self {
            date,
            day_number,
            theme,
            activities,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Itinerary {
    pub destination: String,
    pub days: Vec<DayPlan>,
}
