use std::fmt::Display;

use crate::config::ScoringWeights;
use crate::itinerary::day_plan::Itinerary;
use crate::quality::report::MetricResult;

use super::{
    duration::{self, DurationEvaluator},
    geographic::{self, GeographicClusteringEvaluator},
    meal_timing::{self, MealTimingEvaluator},
    opening_hours::{self, OpeningHoursEvaluator},
    theme_alignment::{self, ThemeAlignmentEvaluator},
    travel_efficiency::{self, TravelEfficiencyEvaluator},
    variety::{self, VarietyEvaluator},
};

/// The common evaluator capability: read the itinerary, report one metric.
pub trait EvaluateMetric {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult>;
}

/// The closed set of quality metrics, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Evaluator {
    MealTiming,
    GeographicClustering,
    TravelEfficiency,
    Variety,
    OpeningHours,
    ThemeAlignment,
    Duration,
}

impl Evaluator {
    pub const ALL: [Evaluator; 7] = [
        Evaluator::MealTiming,
        Evaluator::GeographicClustering,
        Evaluator::TravelEfficiency,
        Evaluator::Variety,
        Evaluator::OpeningHours,
        Evaluator::ThemeAlignment,
        Evaluator::Duration,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Evaluator::MealTiming => meal_timing::NAME,
            Evaluator::GeographicClustering => geographic::NAME,
            Evaluator::TravelEfficiency => travel_efficiency::NAME,
            Evaluator::Variety => variety::NAME,
            Evaluator::OpeningHours => opening_hours::NAME,
            Evaluator::ThemeAlignment => theme_alignment::NAME,
            Evaluator::Duration => duration::NAME,
        }
    }

    pub fn weight(&self, weights: &ScoringWeights) -> f64 {
        match self {
            Evaluator::MealTiming => weights.meal_timing,
            Evaluator::GeographicClustering => weights.geographic_clustering,
            Evaluator::TravelEfficiency => weights.travel_efficiency,
            Evaluator::Variety => weights.variety,
            Evaluator::OpeningHours => weights.opening_hours,
            Evaluator::ThemeAlignment => weights.theme_alignment,
            Evaluator::Duration => weights.duration_appropriateness,
        }
    }

    pub fn evaluate(
        &self,
        itinerary: &Itinerary,
        weights: &ScoringWeights,
    ) -> anyhow::Result<MetricResult> {
        let weight = self.weight(weights);

        match self {
            Evaluator::MealTiming => MealTimingEvaluator { weight }.evaluate(itinerary),
            Evaluator::GeographicClustering => {
                GeographicClusteringEvaluator { weight }.evaluate(itinerary)
            }
            Evaluator::TravelEfficiency => TravelEfficiencyEvaluator { weight }.evaluate(itinerary),
            Evaluator::Variety => VarietyEvaluator { weight }.evaluate(itinerary),
            Evaluator::OpeningHours => OpeningHoursEvaluator { weight }.evaluate(itinerary),
            Evaluator::ThemeAlignment => ThemeAlignmentEvaluator { weight }.evaluate(itinerary),
            Evaluator::Duration => DurationEvaluator { weight }.evaluate(itinerary),
        }
    }
}

impl Display for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
