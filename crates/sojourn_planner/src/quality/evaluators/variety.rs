use fxhash::FxHashSet;

use crate::itinerary::day_plan::{DayPlan, Itinerary};
use crate::quality::report::MetricResult;

use super::evaluator::EvaluateMetric;

pub const NAME: &str = "Variety & Diversity";

/// Category groups, in match order. A category belongs to the first
/// group that lists it.
const CATEGORY_GROUPS: &[(&str, &[&str])] = &[
    (
        "cultural",
        &["museum", "culture", "art_gallery", "heritage", "historical_landmark"],
    ),
    (
        "religious",
        &["temple", "church", "mosque", "place_of_worship", "shrine"],
    ),
    (
        "nature",
        &["park", "garden", "nature", "lake", "beach", "viewpoint"],
    ),
    (
        "entertainment",
        &["entertainment", "amusement_park", "zoo", "aquarium", "theme_park"],
    ),
    ("shopping", &["shopping", "market", "mall", "bazaar"]),
    ("dining", &["dining", "restaurant", "cafe", "food", "bar"]),
    (
        "landmark",
        &["tourist_attraction", "attraction", "landmark", "monument", "fort", "palace"],
    ),
];

const DINING_GROUP: &[&str] = &["dining", "restaurant", "cafe", "food", "bar"];

/// A trip without these is not a trip.
const ESSENTIAL_GROUPS: &[&str] = &["dining", "landmark"];

/// Rewards a healthy mix of activity types and flags days stuck in a
/// single rut.
pub struct VarietyEvaluator {
    pub weight: f64,
}

struct DayVariety {
    score: f64,
    categories: Vec<String>,
    groups_found: FxHashSet<&'static str>,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl EvaluateMetric for VarietyEvaluator {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult> {
        if itinerary.days.is_empty() {
            return Ok(MetricResult::new(NAME, self.weight, 100.0));
        }

        let mut day_scores = Vec::with_capacity(itinerary.days.len());
        let mut all_categories: Vec<String> = Vec::new();
        let mut groups_found: FxHashSet<&'static str> = FxHashSet::default();
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for day in &itinerary.days {
            let variety = evaluate_day(day);
            day_scores.push(variety.score);
            all_categories.extend(variety.categories);
            groups_found.extend(variety.groups_found);
            issues.extend(variety.issues);
            suggestions.extend(variety.suggestions);
        }

        let counts = count_in_order(&all_categories);
        let total_activities = all_categories.len();

        if total_activities > 0 {
            for (category, count) in &counts {
                let percentage = *count as f64 / total_activities as f64 * 100.0;
                if percentage > 40.0 && *count > 3 {
                    issues.push(format!(
                        "Over-concentration: {category} makes up {percentage:.0}% of activities"
                    ));
                    suggestions.push(format!("Consider adding more variety beyond {category}"));
                }
            }
        }

        let mut missing_essentials = 0;
        for essential in ESSENTIAL_GROUPS {
            if !groups_found.contains(essential) {
                missing_essentials += 1;
                issues.push(format!("Missing essential category group: {essential}"));
                suggestions.push(format!("Add some {essential} activities to the itinerary"));
            }
        }

        let base_score = day_scores.iter().sum::<f64>() / day_scores.len() as f64;
        let variety_bonus = (groups_found.len() as f64 * 2.0).min(10.0);
        let essential_penalty = f64::from(missing_essentials) * 10.0;
        let score = (base_score + variety_bonus - essential_penalty).clamp(0.0, 100.0);

        let mut result = MetricResult::new(NAME, self.weight, score);
        result.issues = issues;
        result.suggestions = suggestions;
        result
            .details
            .insert("total_activities", total_activities as f64);
        result
            .details
            .insert("unique_categories", counts.len() as f64);
        result
            .details
            .insert("groups_count", groups_found.len() as f64);

        Ok(result)
    }
}

fn evaluate_day(day: &DayPlan) -> DayVariety {
    let mut variety = DayVariety {
        score: 100.0,
        categories: Vec::new(),
        groups_found: FxHashSet::default(),
        issues: Vec::new(),
        suggestions: Vec::new(),
    };

    if day.activities.is_empty() {
        return variety;
    }

    let n = day.day_number;

    for activity in &day.activities {
        let category = if activity.place.category.is_empty() {
            "other".to_string()
        } else {
            activity.place.category.to_lowercase()
        };

        if let Some(group) = category_group(&category) {
            variety.groups_found.insert(group);
        }
        variety.categories.push(category);
    }

    let counts = count_in_order(&variety.categories);
    let non_dining = variety
        .categories
        .iter()
        .filter(|c| !DINING_GROUP.contains(&c.as_str()))
        .count();

    if non_dining >= 3 {
        for (category, count) in &counts {
            if *count >= 3 && !DINING_GROUP.contains(&category.as_str()) {
                variety.score -= 15.0;
                variety.issues.push(format!(
                    "Day {n}: {count} activities of type '{category}' (repetitive)"
                ));
                variety
                    .suggestions
                    .push(format!("Day {n}: Mix in different activity types"));
            }
        }
    }

    if variety.groups_found.len() >= 3 {
        variety.score = (variety.score + 5.0).min(100.0);
    } else if variety.groups_found.len() == 1 && day.activities.len() > 2 {
        variety.score -= 10.0;
        variety
            .issues
            .push(format!("Day {n}: All activities are in one category group"));
    }

    variety
}

fn category_group(category: &str) -> Option<&'static str> {
    CATEGORY_GROUPS
        .iter()
        .find(|(_, members)| members.contains(&category))
        .map(|(group, _)| *group)
}

/// Occurrence counts keyed in first-seen order, so repeated evaluations
/// emit issues in a stable order.
fn count_in_order(categories: &[String]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();

    for category in categories {
        if let Some(entry) = counts.iter_mut().find(|(c, _)| c == category) {
            entry.1 += 1;
        } else {
            counts.push((category.clone(), 1));
        }
    }

    counts
}
