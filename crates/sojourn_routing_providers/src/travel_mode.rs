use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mode of transport between two stops of a day.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Walk,
    Drive,
    Transit,
}

impl TravelMode {
    /// Wire name expected by the Google Routes API.
    pub fn google_name(&self) -> &'static str {
        match self {
            TravelMode::Walk => "WALK",
            TravelMode::Drive => "DRIVE",
            TravelMode::Transit => "TRANSIT",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TravelMode::Walk => "walk",
            TravelMode::Drive => "drive",
            TravelMode::Transit => "transit",
        };

        write!(f, "{name}")
    }
}
