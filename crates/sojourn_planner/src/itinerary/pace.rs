use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How densely a traveler wants their day packed.
#[derive(Deserialize, Serialize, JsonSchema, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Relaxed,
    #[default]
    Moderate,
    Packed,
}

impl Pace {
    /// Scale factor applied to every visit duration.
    pub fn duration_multiplier(&self) -> f64 {
        match self {
            Pace::Relaxed => 1.3,
            Pace::Moderate => 1.0,
            Pace::Packed => 0.8,
        }
    }
}

impl Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pace::Relaxed => "relaxed",
            Pace::Moderate => "moderate",
            Pace::Packed => "packed",
        };

        write!(f, "{name}")
    }
}
