use jiff::civil::{Time, time};

use crate::itinerary::day_plan::{Activity, DayPlan, Itinerary};
use crate::quality::report::MetricResult;
use crate::utils::time::in_window;

use super::evaluator::EvaluateMetric;

pub const NAME: &str = "Meal Timing";

/// Ideal meal windows, inclusive.
const LUNCH_WINDOW: (Time, Time) = (time(12, 0, 0, 0), time(14, 30, 0, 0));
const DINNER_WINDOW: (Time, Time) = (time(18, 30, 0, 0), time(21, 0, 0, 0));

/// Acceptable but not ideal.
const LUNCH_ACCEPTABLE: (Time, Time) = (time(11, 0, 0, 0), time(15, 30, 0, 0));
const DINNER_ACCEPTABLE: (Time, Time) = (time(17, 30, 0, 0), time(22, 0, 0, 0));

const DINING_CATEGORIES: &[&str] = &["dining", "restaurant", "cafe", "food"];

/// Names that betray a misclassified dining slot.
const NON_RESTAURANT_KEYWORDS: &[&str] = &[
    "temple",
    "mandir",
    "masjid",
    "mosque",
    "church",
    "iskcon",
    "museum",
    "palace",
    "fort",
    "memorial",
    "gurudwara",
    "shrine",
];

/// Checks that each day eats: lunch and dinner exist, sit in sane
/// windows and sane positions, and are actual restaurants.
pub struct MealTimingEvaluator {
    pub weight: f64,
}

#[derive(Default)]
struct DayMeals {
    total_checks: u32,
    passed_checks: u32,
    lunch_found: bool,
    dinner_found: bool,
    ideal_times: u32,
    acceptable_times: u32,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl EvaluateMetric for MealTimingEvaluator {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult> {
        if itinerary.days.is_empty() {
            let mut result = MetricResult::new(NAME, self.weight, 0.0);
            result.issues.push("No days in itinerary".to_string());
            result
                .suggestions
                .push("Generate an itinerary with at least one day".to_string());
            return Ok(result);
        }

        let mut total_checks = 0;
        let mut passed_checks = 0;
        let mut lunches_found = 0;
        let mut dinners_found = 0;
        let mut ideal_times = 0;
        let mut acceptable_times = 0;
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for day in &itinerary.days {
            let meals = evaluate_day(day);

            total_checks += meals.total_checks;
            passed_checks += meals.passed_checks;
            lunches_found += u32::from(meals.lunch_found);
            dinners_found += u32::from(meals.dinner_found);
            ideal_times += meals.ideal_times;
            acceptable_times += meals.acceptable_times;
            issues.extend(meals.issues);
            suggestions.extend(meals.suggestions);
        }

        let score = if total_checks == 0 {
            0.0
        } else {
            f64::from(passed_checks) / f64::from(total_checks) * 100.0
        };

        let mut result = MetricResult::new(NAME, self.weight, score);
        result.issues = issues;
        result.suggestions = suggestions;
        result
            .details
            .insert("days_analyzed", itinerary.days.len() as f64);
        result.details.insert("lunches_found", f64::from(lunches_found));
        result.details.insert("dinners_found", f64::from(dinners_found));
        result
            .details
            .insert("meals_at_ideal_time", f64::from(ideal_times));
        result
            .details
            .insert("meals_at_acceptable_time", f64::from(acceptable_times));

        Ok(result)
    }
}

fn evaluate_day(day: &DayPlan) -> DayMeals {
    let mut meals = DayMeals::default();
    let n = day.day_number;

    let dining: Vec<&Activity> = day
        .activities
        .iter()
        .filter(|activity| {
            DINING_CATEGORIES.contains(&activity.place.category.to_lowercase().as_str())
        })
        .collect();

    // Lunch exists?
    meals.total_checks += 1;
    let lunch = find_meal_in_window(&dining, LUNCH_ACCEPTABLE);
    if let Some(lunch) = lunch {
        meals.lunch_found = true;
        meals.passed_checks += 1;

        if in_window(lunch.time_start, LUNCH_WINDOW.0, LUNCH_WINDOW.1) {
            meals.ideal_times += 1;
        } else {
            meals.acceptable_times += 1;
        }
    } else {
        meals
            .issues
            .push(format!("Day {n}: No lunch found between 11:00-15:30"));
        meals
            .suggestions
            .push(format!("Day {n}: Add a lunch restaurant around 12:00-14:00"));
    }

    // Dinner exists?
    meals.total_checks += 1;
    let dinner = find_meal_in_window(&dining, DINNER_ACCEPTABLE);
    if let Some(dinner) = dinner {
        meals.dinner_found = true;
        meals.passed_checks += 1;

        if in_window(dinner.time_start, DINNER_WINDOW.0, DINNER_WINDOW.1) {
            meals.ideal_times += 1;
        } else {
            meals.acceptable_times += 1;
        }
    } else {
        meals
            .issues
            .push(format!("Day {n}: No dinner found between 17:30-22:00"));
        meals
            .suggestions
            .push(format!("Day {n}: Add a dinner restaurant around 19:00-20:30"));
    }

    // Lunch sits mid-day, dinner near the end. Only meaningful once the
    // day has at least three activities.
    if day.activities.len() >= 3 {
        if let Some(lunch) = lunch {
            if let Some(i) = day.activities.iter().position(|a| a.id == lunch.id) {
                meals.total_checks += 1;
                if i >= 1 && i <= day.activities.len() - 2 {
                    meals.passed_checks += 1;
                } else {
                    meals.issues.push(format!(
                        "Day {n}: Lunch at position {} (should be mid-day)",
                        i + 1
                    ));
                }
            }
        }

        if let Some(dinner) = dinner {
            if let Some(i) = day.activities.iter().position(|a| a.id == dinner.id) {
                meals.total_checks += 1;
                if i >= day.activities.len() - 2 {
                    meals.passed_checks += 1;
                } else {
                    meals.issues.push(format!(
                        "Day {n}: Dinner at position {} (should be near end)",
                        i + 1
                    ));
                }
            }
        }
    }

    // Temples and museums sometimes arrive tagged as dining.
    for activity in &dining {
        meals.total_checks += 1;
        let name_lower = activity.place.name.to_lowercase();

        if NON_RESTAURANT_KEYWORDS.iter().any(|kw| name_lower.contains(kw)) {
            meals.issues.push(format!(
                "Day {n}: '{}' appears to be a non-restaurant classified as dining",
                activity.place.name
            ));
            meals
                .suggestions
                .push(format!("Day {n}: Replace with an actual restaurant"));
        } else {
            meals.passed_checks += 1;
        }
    }

    meals
}

fn find_meal_in_window<'a>(dining: &[&'a Activity], window: (Time, Time)) -> Option<&'a Activity> {
    dining
        .iter()
        .find(|activity| in_window(activity.time_start, window.0, window.1))
        .copied()
}
