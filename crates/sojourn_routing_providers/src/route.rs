use serde::{Deserialize, Serialize};

use crate::travel_mode::TravelMode;

/// Per-leg substitute when a route lookup fails.
pub const FALLBACK_DISTANCE_METERS: f64 = 1000.0;
pub const FALLBACK_DURATION_SECONDS: i64 = 720;

/// A single travel leg between two consecutive stops.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Route {
    pub distance_meters: f64,
    pub duration_seconds: i64,
    pub duration_text: String,
    pub travel_mode: TravelMode,
    pub polyline: String,
}

impl Route {
    /// Placeholder leg substituted when the provider cannot answer.
    pub fn fallback(travel_mode: TravelMode) -> Self {
        Self {
            distance_meters: FALLBACK_DISTANCE_METERS,
            duration_seconds: FALLBACK_DURATION_SECONDS,
            duration_text: "~12 min".to_string(),
            travel_mode,
            polyline: String::new(),
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration_seconds / 60
    }
}
