use jiff::civil::{Time, time};

/// Fallback visit length when a type has no table entry.
pub const DEFAULT_ACTIVITY_MINUTES: i64 = 45;

/// Typical visit durations in minutes by place type. The first type of a
/// place that appears here wins.
pub const DURATION_BY_TYPE: &[(&str, i64)] = &[
    ("museum", 90),
    ("art_gallery", 60),
    ("church", 30),
    ("hindu_temple", 45),
    ("mosque", 45),
    ("place_of_worship", 30),
    ("historical_landmark", 45),
    ("monument", 30),
    ("palace", 60),
    ("castle", 60),
    ("fort", 60),
    ("park", 60),
    ("garden", 45),
    ("zoo", 120),
    ("aquarium", 90),
    ("national_park", 120),
    ("beach", 90),
    ("amusement_park", 180),
    ("tourist_attraction", 45),
    ("stadium", 30),
    ("movie_theater", 150),
    ("performing_arts_theater", 120),
    ("restaurant", 75),
    ("cafe", 45),
    ("bar", 60),
    ("bakery", 20),
    ("coffee_shop", 30),
    ("shopping_mall", 90),
    ("market", 60),
    ("clothing_store", 45),
];

/// Day shape and meal windows used by the schedule builder.
#[derive(Clone, Debug)]
pub struct SchedulingConfig {
    pub day_start: Time,
    pub day_end: Time,

    pub lunch_window_start: Time,
    pub lunch_window_end: Time,
    pub lunch_target: Time,

    pub dinner_window_start: Time,
    pub dinner_window_end: Time,
    pub dinner_target: Time,

    pub transition_buffer_minutes: i64,
    pub min_activity_duration_minutes: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            day_start: time(9, 0, 0, 0),
            day_end: time(21, 0, 0, 0),

            lunch_window_start: time(12, 0, 0, 0),
            lunch_window_end: time(14, 0, 0, 0),
            lunch_target: time(12, 30, 0, 0),

            dinner_window_start: time(18, 30, 0, 0),
            dinner_window_end: time(21, 0, 0, 0),
            dinner_target: time(19, 0, 0, 0),

            transition_buffer_minutes: 15,
            min_activity_duration_minutes: 30,
        }
    }
}

/// Relative importance of each quality metric.
///
/// The weights must sum to 1.0. [`ScoringWeights::assert_normalized`]
/// enforces this once, when a scorer is constructed.
#[derive(Clone, Copy, Debug)]
pub struct ScoringWeights {
    pub meal_timing: f64,
    pub geographic_clustering: f64,
    pub travel_efficiency: f64,
    pub variety: f64,
    pub opening_hours: f64,
    pub theme_alignment: f64,
    pub duration_appropriateness: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            meal_timing: 0.20,
            geographic_clustering: 0.15,
            travel_efficiency: 0.15,
            variety: 0.15,
            opening_hours: 0.15,
            theme_alignment: 0.10,
            duration_appropriateness: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.meal_timing
            + self.geographic_clustering
            + self.travel_efficiency
            + self.variety
            + self.opening_hours
            + self.theme_alignment
            + self.duration_appropriateness
    }

    /// Panics when the weights drift away from a total of 1.0.
    pub fn assert_normalized(&self) {
        let sum = self.sum();
        if (sum - 1.0).abs() > 0.01 {
            panic!("ScoringWeights: weights must sum to 1.0, got {sum}");
        }
    }
}
