use crate::itinerary::day_plan::{DayPlan, Itinerary};
use crate::itinerary::location::Location;
use crate::quality::report::MetricResult;
use crate::utils::geo::haversine_distance_km;

use super::evaluator::EvaluateMetric;

pub const NAME: &str = "Geographic Clustering";

const MAX_CONSECUTIVE_DISTANCE_KM: f64 = 5.0;
const IDEAL_CONSECUTIVE_DISTANCE_KM: f64 = 2.0;

const MAX_DAILY_TRAVEL_KM: f64 = 30.0;
const IDEAL_DAILY_TRAVEL_KM: f64 = 15.0;

/// Hops shorter than this are noise, not intentional movement.
const BACKTRACK_HOP_THRESHOLD_KM: f64 = 1.5;

/// Penalizes spread-out days: long hops between consecutive stops, high
/// daily totals, and A-to-B-back-to-A routing.
pub struct GeographicClusteringEvaluator {
    pub weight: f64,
}

struct DaySpread {
    score: f64,
    total_distance: f64,
    max_gap: f64,
    backtracking: u32,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl EvaluateMetric for GeographicClusteringEvaluator {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult> {
        if itinerary.days.is_empty() {
            return Ok(MetricResult::new(NAME, self.weight, 100.0));
        }

        let mut day_scores = Vec::with_capacity(itinerary.days.len());
        let mut total_distance = 0.0_f64;
        let mut max_gap = 0.0_f64;
        let mut backtracking = 0;
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for day in &itinerary.days {
            let spread = evaluate_day(day);
            day_scores.push(spread.score);
            total_distance += spread.total_distance;
            max_gap = max_gap.max(spread.max_gap);
            backtracking += spread.backtracking;
            issues.extend(spread.issues);
            suggestions.extend(spread.suggestions);
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
            .insert("total_distance_km", round1(total_distance));
        result.details.insert(
            "avg_daily_distance_km",
            round1(total_distance / itinerary.days.len() as f64),
        );
        result
            .details
            .insert("max_consecutive_gap_km", round1(max_gap));
        result
            .details
            .insert("backtracking_instances", f64::from(backtracking));

        Ok(result)
    }
}

fn evaluate_day(day: &DayPlan) -> DaySpread {
    let mut spread = DaySpread {
        score: 100.0,
        total_distance: 0.0,
        max_gap: 0.0,
        backtracking: 0,
        issues: Vec::new(),
        suggestions: Vec::new(),
    };

    if day.activities.len() < 2 {
        return spread;
    }

    let n = day.day_number;
    let locations: Vec<Location> = day
        .activities
        .iter()
        .map(|activity| activity.place.location)
        .collect();

    let mut penalty = 0.0;

    for (i, pair) in locations.windows(2).enumerate() {
        let dist = haversine_distance_km(&pair[0], &pair[1]);
        spread.total_distance += dist;
        spread.max_gap = spread.max_gap.max(dist);

        if dist > MAX_CONSECUTIVE_DISTANCE_KM {
            penalty += 15.0;
            spread.issues.push(format!(
                "Day {n}: {dist:.1}km gap between '{}' and '{}'",
                day.activities[i].place.name,
                day.activities[i + 1].place.name
            ));
            spread.suggestions.push(format!(
                "Day {n}: Consider reordering activities or finding closer alternatives"
            ));
        } else if dist > IDEAL_CONSECUTIVE_DISTANCE_KM {
            penalty += (dist - IDEAL_CONSECUTIVE_DISTANCE_KM) * 3.0;
        }
    }

    spread.backtracking = detect_backtracking(&locations);
    if spread.backtracking > 0 {
        spread.issues.push(format!(
            "Day {n}: Detected {} potential backtracking instance(s)",
            spread.backtracking
        ));
    }

    if spread.total_distance > MAX_DAILY_TRAVEL_KM {
        penalty += 20.0;
    } else if spread.total_distance > IDEAL_DAILY_TRAVEL_KM {
        penalty += (spread.total_distance - IDEAL_DAILY_TRAVEL_KM) * 1.5;
    }

    penalty += f64::from(spread.backtracking) * 10.0;

    spread.score = (100.0 - penalty).max(0.0);
    spread
}

/// Two substantial hops that end up close to where they started count as
/// one backtracking instance.
fn detect_backtracking(locations: &[Location]) -> u32 {
    let mut count = 0;

    for triple in locations.windows(3) {
        let out = haversine_distance_km(&triple[0], &triple[1]);
        let back = haversine_distance_km(&triple[1], &triple[2]);

        if out < BACKTRACK_HOP_THRESHOLD_KM || back < BACKTRACK_HOP_THRESHOLD_KM {
            continue;
        }

        let direct = haversine_distance_km(&triple[0], &triple[2]);
        if direct / (out + back) < 0.3 {
            count += 1;
        }
    }

    count
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use crate::test_utils::{activity, day, itinerary};

    use super::*;

    fn activity_at(name: &str, lat: f64, lng: f64) -> crate::itinerary::day_plan::Activity {
        let mut a = activity(name, "attraction", time(10, 0, 0, 0), 60);
        a.place.location = Location::new(lat, lng);
        a
    }

    #[test]
    fn single_stop_days_are_perfectly_clustered() {
        let evaluator = GeographicClusteringEvaluator { weight: 0.15 };
        let plan = itinerary(vec![day(
            1,
            "Short",
            vec![activity_at("Charminar", 17.3616, 78.4747)],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();
        assert_eq!(result.score, 100.0);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn tight_clusters_go_unpenalized() {
        let evaluator = GeographicClusteringEvaluator { weight: 0.15 };
        let plan = itinerary(vec![day(
            1,
            "Old City",
            vec![
                activity_at("Charminar", 17.360, 78.470),
                activity_at("Laad Bazaar", 17.362, 78.472),
                activity_at("Mecca Masjid", 17.364, 78.474),
            ],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.score, 100.0);
        assert!(result.details["total_distance_km"] < 1.0);
    }

    #[test]
    fn long_gaps_are_flagged() {
        let evaluator = GeographicClusteringEvaluator { weight: 0.15 };
        // Roughly 8.9 km apart.
        let plan = itinerary(vec![day(
            1,
            "Across Town",
            vec![
                activity_at("Charminar", 17.36, 78.47),
                activity_at("Secunderabad", 17.44, 78.47),
            ],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.score, 85.0);
        assert!(result.issues.iter().any(|i| i.contains("km gap between")));
        assert!(result.details["max_consecutive_gap_km"] > 5.0);
    }

    #[test]
    fn out_and_back_routing_counts_as_backtracking() {
        let evaluator = GeographicClusteringEvaluator { weight: 0.15 };
        let plan = itinerary(vec![day(
            1,
            "Zigzag",
            vec![
                activity_at("Start", 17.36, 78.47),
                activity_at("Far Point", 17.38, 78.47),
                activity_at("Back Again", 17.3601, 78.47),
            ],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.details["backtracking_instances"], 1.0);
        assert!(
            result
                .issues
                .iter()
                .any(|i| i.contains("backtracking instance"))
        );
        assert!(result.score < 90.0);
    }
}
