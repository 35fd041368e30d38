use serde::{Deserialize, Serialize};

use crate::{travel_matrices::TravelMatrices, travel_mode::TravelMode};

/// Source of travel legs and matrices.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum RouteProvider {
    /// Live road-network routing through the Google Routes API.
    GoogleRoutesApi { travel_mode: TravelMode },

    /// Straight-line estimates at a constant speed, no network calls.
    AsTheCrowFlies { speed_kmh: f64 },

    /// Caller-supplied matrices, mainly for tests and replays.
    Custom { matrices: TravelMatrices },
}

impl RouteProvider {
    pub fn travel_mode(&self) -> Option<TravelMode> {
        match self {
            RouteProvider::GoogleRoutesApi { travel_mode } => Some(*travel_mode),
            RouteProvider::AsTheCrowFlies { .. } | RouteProvider::Custom { .. } => None,
        }
    }
}
