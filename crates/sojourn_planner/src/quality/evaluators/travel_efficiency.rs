use crate::itinerary::day_plan::{DayPlan, Itinerary};
use crate::quality::report::MetricResult;

use super::evaluator::EvaluateMetric;

pub const NAME: &str = "Travel Efficiency";

const MAX_TRAVEL_MINUTES: i64 = 45;
const IDEAL_TRAVEL_MINUTES: i64 = 20;

const MAX_DAILY_TRAVEL_MINUTES: i64 = 120;
const IDEAL_DAILY_TRAVEL_MINUTES: i64 = 60;

/// Penalizes time lost in transit, using the measured legs attached to
/// each activity rather than re-deriving distances.
pub struct TravelEfficiencyEvaluator {
    pub weight: f64,
}

struct DayTravel {
    score: f64,
    total_minutes: i64,
    max_minutes: i64,
    over_threshold: u32,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl EvaluateMetric for TravelEfficiencyEvaluator {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult> {
        if itinerary.days.is_empty() {
            return Ok(MetricResult::new(NAME, self.weight, 100.0));
        }

        let mut day_scores = Vec::with_capacity(itinerary.days.len());
        let mut total_minutes = 0;
        let mut max_minutes = 0;
        let mut over_threshold = 0;
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for day in &itinerary.days {
            let travel = evaluate_day(day);
            day_scores.push(travel.score);
            total_minutes += travel.total_minutes;
            max_minutes = max_minutes.max(travel.max_minutes);
            over_threshold += travel.over_threshold;
            issues.extend(travel.issues);
            suggestions.extend(travel.suggestions);
        }

        let score = day_scores.iter().sum::<f64>() / day_scores.len() as f64;

        let mut result = MetricResult::new(NAME, self.weight, score);
        result.issues = issues;
        result.suggestions = suggestions;
        result
            .details
            .insert("days_analyzed", itinerary.days.len() as f64);
        result
            .details
            .insert("total_travel_minutes", total_minutes as f64);
        result.details.insert(
            "avg_daily_travel_minutes",
            round1(total_minutes as f64 / itinerary.days.len() as f64),
        );
        result
            .details
            .insert("max_single_travel_minutes", max_minutes as f64);
        result
            .details
            .insert("trips_over_threshold", f64::from(over_threshold));

        Ok(result)
    }
}

fn evaluate_day(day: &DayPlan) -> DayTravel {
    let mut travel = DayTravel {
        score: 100.0,
        total_minutes: 0,
        max_minutes: 0,
        over_threshold: 0,
        issues: Vec::new(),
        suggestions: Vec::new(),
    };

    if day.activities.len() < 2 {
        return travel;
    }

    let n = day.day_number;
    let mut penalty = 0.0;

    for (i, activity) in day.activities[..day.activities.len() - 1].iter().enumerate() {
        let Some(route) = &activity.route_to_next else {
            continue;
        };

        let minutes = route.duration_minutes();
        travel.total_minutes += minutes;
        travel.max_minutes = travel.max_minutes.max(minutes);

        if minutes > MAX_TRAVEL_MINUTES {
            travel.over_threshold += 1;
            penalty += 20.0;
            travel.issues.push(format!(
                "Day {n}: {minutes}min travel from '{}' to '{}'",
                activity.place.name,
                day.activities[i + 1].place.name
            ));
            travel.suggestions.push(format!(
                "Day {n}: Consider reordering activities or using faster transport"
            ));
        } else if minutes > IDEAL_TRAVEL_MINUTES {
            penalty += (minutes - IDEAL_TRAVEL_MINUTES) as f64 * 0.5;
        }
    }

    if travel.total_minutes > MAX_DAILY_TRAVEL_MINUTES {
        penalty += 25.0;
    } else if travel.total_minutes > IDEAL_DAILY_TRAVEL_MINUTES {
        penalty += (travel.total_minutes - IDEAL_DAILY_TRAVEL_MINUTES) as f64 * 0.3;
    }

    travel.score = (100.0 - penalty).max(0.0);
    travel
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use crate::test_utils::{activity, day, itinerary, leg_minutes};

    use super::*;

    #[test]
    fn days_without_measured_legs_score_perfect() {
        let evaluator = TravelEfficiencyEvaluator { weight: 0.15 };
        let plan = itinerary(vec![day(
            1,
            "Unrouted",
            vec![
                activity("Charminar", "attraction", time(10, 0, 0, 0), 60),
                activity("Laad Bazaar", "market", time(11, 30, 0, 0), 60),
            ],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.score, 100.0);
        assert_eq!(result.details["total_travel_minutes"], 0.0);
    }

    #[test]
    fn short_hops_cost_nothing() {
        let evaluator = TravelEfficiencyEvaluator { weight: 0.15 };
        let mut a = activity("Charminar", "attraction", time(10, 0, 0, 0), 60);
        a.route_to_next = Some(leg_minutes(10));
        let mut b = activity("Laad Bazaar", "market", time(11, 30, 0, 0), 60);
        b.route_to_next = Some(leg_minutes(15));
        let c = activity("Mecca Masjid", "mosque", time(13, 0, 0, 0), 45);

        let result = evaluator
            .evaluate(&itinerary(vec![day(1, "Old City", vec![a, b, c])]))
            .unwrap();

        assert_eq!(result.score, 100.0);
        assert_eq!(result.details["total_travel_minutes"], 25.0);
        assert_eq!(result.details["max_single_travel_minutes"], 15.0);
    }

    #[test]
    fn a_long_leg_is_flagged() {
        let evaluator = TravelEfficiencyEvaluator { weight: 0.15 };
        let mut a = activity("Golconda Fort", "fort", time(10, 0, 0, 0), 120);
        a.route_to_next = Some(leg_minutes(50));
        let b = activity("Hussain Sagar", "lake", time(13, 0, 0, 0), 60);

        let result = evaluator
            .evaluate(&itinerary(vec![day(1, "Forts", vec![a, b])]))
            .unwrap();

        assert_eq!(result.score, 80.0);
        assert_eq!(result.details["trips_over_threshold"], 1.0);
        assert!(result.issues.iter().any(|i| i.contains("min travel from")));
    }

    #[test]
    fn heavy_daily_totals_stack_penalties() {
        let evaluator = TravelEfficiencyEvaluator { weight: 0.15 };
        let mut activities = vec![
            activity("One", "attraction", time(9, 0, 0, 0), 45),
            activity("Two", "attraction", time(11, 0, 0, 0), 45),
            activity("Three", "attraction", time(13, 0, 0, 0), 45),
            activity("Four", "attraction", time(15, 0, 0, 0), 45),
        ];
        activities[0].route_to_next = Some(leg_minutes(40));
        activities[1].route_to_next = Some(leg_minutes(40));
        activities[2].route_to_next = Some(leg_minutes(50));

        let result = evaluator
            .evaluate(&itinerary(vec![day(1, "Sprawl", activities)]))
            .unwrap();

        // Two 40min legs cost 10 each, the 50min leg costs 20, and the
        // 130min daily total costs 25.
        assert_eq!(result.score, 35.0);
        assert_eq!(result.details["total_travel_minutes"], 130.0);
    }
}
