use crate::itinerary::day_plan::{Activity, Itinerary};
use crate::quality::report::MetricResult;

use super::evaluator::EvaluateMetric;

pub const NAME: &str = "Duration Appropriateness";

/// Recommended visit length in minutes by category, in match order for
/// the name-hint fallback.
const RECOMMENDED_DURATIONS: &[(&str, (i64, i64))] = &[
    ("museum", (90, 180)),
    ("culture", (60, 150)),
    ("art_gallery", (60, 120)),
    ("temple", (30, 90)),
    ("religious", (30, 60)),
    ("attraction", (45, 120)),
    ("park", (45, 90)),
    ("garden", (30, 60)),
    ("nature", (45, 90)),
    ("zoo", (120, 240)),
    ("monument", (30, 60)),
    ("landmark", (30, 60)),
    ("tourist_attraction", (45, 90)),
    ("dining", (45, 90)),
    ("restaurant", (45, 90)),
    ("cafe", (30, 60)),
    ("fort", (90, 180)),
    ("palace", (60, 150)),
];

const DEFAULT_DURATION: (i64, i64) = (45, 90);

/// Famous places need more time than their category suggests.
const FAMOUS_PLACE_DURATIONS: &[(&str, (i64, i64))] = &[
    ("salar jung museum", (150, 240)),
    ("golconda fort", (120, 180)),
    ("chowmahalla palace", (90, 150)),
    ("science city", (120, 180)),
    ("taj mahal", (120, 180)),
    ("qutub minar", (60, 90)),
    ("red fort", (90, 150)),
    ("sabarmati ashram", (60, 90)),
    ("calico museum", (90, 150)),
    ("ajanta caves", (180, 300)),
    ("ellora caves", (180, 300)),
];

/// Checks each visit's length against what its place deserves.
pub struct DurationEvaluator {
    pub weight: f64,
}

enum DurationCheck {
    Appropriate,
    TooShort { issue: String, suggestion: String },
    TooLong { issue: String, suggestion: String },
}

impl EvaluateMetric for DurationEvaluator {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult> {
        if itinerary.days.is_empty() {
            return Ok(MetricResult::new(NAME, self.weight, 100.0));
        }

        let mut checked = 0;
        let mut appropriate = 0;
        let mut too_short = 0;
        let mut too_long = 0;
        let mut total_minutes = 0;
        let mut ranges: Vec<(i64, i64, i64)> = Vec::new();
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for day in &itinerary.days {
            for activity in &day.activities {
                checked += 1;
                total_minutes += activity.duration_minutes;

                let (min, max) = recommended_duration(activity);
                ranges.push((activity.duration_minutes, min, max));

                match check_duration(activity, day.day_number, min, max) {
                    DurationCheck::Appropriate => appropriate += 1,
                    DurationCheck::TooShort { issue, suggestion } => {
                        too_short += 1;
                        issues.push(issue);
                        suggestions.push(suggestion);
                    }
                    DurationCheck::TooLong { issue, suggestion } => {
                        too_long += 1;
                        issues.push(issue);
                        suggestions.push(suggestion);
                    }
                }
            }
        }

        let score = if checked == 0 {
            100.0
        } else {
            let mut score = f64::from(appropriate) / f64::from(checked) * 100.0;

            // Partial credit for near misses on either side of the range.
            for (duration, min, max) in &ranges {
                let duration = *duration as f64;
                if duration < *min as f64 {
                    if duration >= *min as f64 * 0.8 {
                        score += 5.0;
                    }
                } else if duration > *max as f64 && duration <= *max as f64 * 1.2 {
                    score += 5.0;
                }
            }

            score
        };

        let mut result = MetricResult::new(NAME, self.weight, score);
        result.issues = issues;
        result.suggestions = suggestions;
        result.details.insert("activities_checked", f64::from(checked));
        result.details.insert("too_short", f64::from(too_short));
        result.details.insert("too_long", f64::from(too_long));
        result.details.insert("appropriate", f64::from(appropriate));
        if checked > 0 {
            result.details.insert(
                "avg_duration_minutes",
                round1(total_minutes as f64 / f64::from(checked)),
            );
        } else {
            result.details.insert("avg_duration_minutes", 0.0);
        }

        Ok(result)
    }
}

fn check_duration(activity: &Activity, day_number: u32, min: i64, max: i64) -> DurationCheck {
    let duration = activity.duration_minutes;
    let name = &activity.place.name;
    let n = day_number;

    if duration > 480 {
        return DurationCheck::TooLong {
            issue: format!("Day {n}: '{name}' has unrealistic {duration}min duration"),
            suggestion: format!("Day {n}: Limit '{name}' to reasonable duration"),
        };
    }

    if duration < 15 {
        return DurationCheck::TooShort {
            issue: format!("Day {n}: '{name}' has only {duration}min (too short)"),
            suggestion: format!("Day {n}: Allow at least {min}min for '{name}'"),
        };
    }

    if duration < min {
        return DurationCheck::TooShort {
            issue: format!("Day {n}: '{name}' has {duration}min (recommended: {min}-{max}min)"),
            suggestion: format!("Day {n}: Increase time at '{name}' to at least {min}min"),
        };
    }

    // Half again over the maximum is where it stops being generous.
    if duration as f64 > max as f64 * 1.5 {
        return DurationCheck::TooLong {
            issue: format!("Day {n}: '{name}' has {duration}min (recommended: {min}-{max}min)"),
            suggestion: format!("Day {n}: Consider reducing time at '{name}'"),
        };
    }

    DurationCheck::Appropriate
}

fn recommended_duration(activity: &Activity) -> (i64, i64) {
    let name_lower = activity.place.name.to_lowercase();
    let category = activity.place.category.to_lowercase();

    for (famous, range) in FAMOUS_PLACE_DURATIONS {
        if name_lower.contains(famous) {
            return *range;
        }
    }

    for (cat, range) in RECOMMENDED_DURATIONS {
        if category == *cat {
            return *range;
        }
    }

    for (cat, range) in RECOMMENDED_DURATIONS {
        if name_lower.contains(cat) {
            return *range;
        }
    }

    DEFAULT_DURATION
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use crate::test_utils::{activity, day, itinerary};

    use super::*;

    #[test]
    fn table_ranges_accept_reasonable_durations() {
        let evaluator = DurationEvaluator { weight: 0.1 };
        let plan = itinerary(vec![day(
            1,
            "Balanced",
            vec![
                activity("City Museum", "museum", time(10, 0, 0, 0), 120),
                activity("Shadab", "restaurant", time(12, 30, 0, 0), 60),
                activity("Lumbini Park", "park", time(15, 0, 0, 0), 60),
            ],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.score, 100.0);
        assert_eq!(result.details["appropriate"], 3.0);
        assert_eq!(result.details["avg_duration_minutes"], 80.0);
    }

    #[test]
    fn famous_places_override_the_category_range() {
        let evaluator = DurationEvaluator { weight: 0.1 };
        let plan = itinerary(vec![day(
            1,
            "Rushed",
            vec![activity(
                "Salar Jung Museum",
                "museum",
                time(10, 0, 0, 0),
                90,
            )],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        // 90 minutes fits a generic museum but not this one.
        assert_eq!(result.score, 0.0);
        assert_eq!(
            result.issues,
            vec!["Day 1: 'Salar Jung Museum' has 90min (recommended: 150-240min)".to_string()]
        );
    }

    #[test]
    fn tiny_slots_are_too_short() {
        let evaluator = DurationEvaluator { weight: 0.1 };
        let plan = itinerary(vec![day(
            1,
            "Drive By",
            vec![activity("Quick Stop", "attraction", time(10, 0, 0, 0), 10)],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.details["too_short"], 1.0);
        assert!(
            result
                .issues
                .contains(&"Day 1: 'Quick Stop' has only 10min (too short)".to_string())
        );
    }

    #[test]
    fn marathon_slots_are_unrealistic() {
        let evaluator = DurationEvaluator { weight: 0.1 };
        let plan = itinerary(vec![day(
            1,
            "All Day",
            vec![activity("City Museum", "museum", time(9, 0, 0, 0), 500)],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.details["too_long"], 1.0);
        assert!(
            result
                .issues
                .contains(&"Day 1: 'City Museum' has unrealistic 500min duration".to_string())
        );
    }

    #[test]
    fn near_misses_earn_partial_credit() {
        let evaluator = DurationEvaluator { weight: 0.1 };
        let plan = itinerary(vec![day(
            1,
            "Almost",
            vec![
                // 80 is under the museum minimum of 90 but within 20%.
                activity("Museum One", "museum", time(9, 0, 0, 0), 80),
                activity("Museum Two", "museum", time(11, 0, 0, 0), 120),
            ],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();

        assert_eq!(result.score, 55.0);
        assert_eq!(result.details["too_short"], 1.0);
        assert_eq!(result.details["appropriate"], 1.0);
    }

    #[test]
    fn name_hints_fill_in_missing_categories() {
        let evaluator = DurationEvaluator { weight: 0.1 };
        let plan = itinerary(vec![day(
            1,
            "Unlabeled",
            // Category unknown, but the name says fort: 90-180 applies.
            vec![activity("Naldurg Fort", "poi", time(10, 0, 0, 0), 120)],
        )]);

        let result = evaluator.evaluate(&plan).unwrap();
        assert_eq!(result.score, 100.0);
    }
}
