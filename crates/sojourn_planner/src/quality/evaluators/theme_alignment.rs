use fxhash::FxHashSet;

use crate::itinerary::day_plan::{DayPlan, Itinerary};
use crate::quality::report::MetricResult;

use super::evaluator::EvaluateMetric;

pub const NAME: &str = "Theme Alignment";

/// Theme keywords and the activity categories they imply.
const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "heritage",
        &["museum", "palace", "fort", "historical", "heritage", "monument", "landmark", "attraction"],
    ),
    (
        "old city",
        &["heritage", "bazaar", "market", "historical", "landmark", "gate", "mosque", "temple", "attraction"],
    ),
    (
        "riverfront",
        &["river", "lake", "park", "garden", "waterfront", "bridge", "nature"],
    ),
    ("ashram", &["ashram", "memorial", "museum", "culture"]),
    (
        "science",
        &["museum", "science", "planetarium", "exhibition", "culture"],
    ),
    (
        "temple",
        &["temple", "mandir", "religious", "shrine", "worship", "attraction"],
    ),
    (
        "spiritual",
        &["temple", "mosque", "church", "religious", "spiritual", "shrine"],
    ),
    ("museum", &["museum", "gallery", "exhibition", "culture"]),
    ("nature", &["park", "garden", "lake", "nature", "zoo", "forest"]),
    ("food", &["restaurant", "dining", "cafe", "food", "market"]),
    (
        "culture",
        &["museum", "culture", "heritage", "art", "gallery", "theater"],
    ),
    (
        "architecture",
        &["palace", "fort", "monument", "museum", "landmark", "historical", "attraction"],
    ),
    ("park", &["park", "garden", "nature", "zoo"]),
    (
        "family",
        &["park", "zoo", "amusement", "museum", "entertainment"],
    ),
    ("market", &["market", "bazaar", "shopping"]),
    (
        "fort",
        &["fort", "palace", "historical", "attraction", "landmark"],
    ),
    ("gate", &["gate", "historical", "landmark", "attraction"]),
];

/// Dining never counts against a theme.
const THEME_DINING: &[&str] = &["dining", "restaurant", "cafe", "food"];

/// Checks that a day's activities actually belong to its stated theme,
/// and that themes are specific enough to mean anything.
pub struct ThemeAlignmentEvaluator {
    pub weight: f64,
}

struct DayAlignment {
    score: f64,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl EvaluateMetric for ThemeAlignmentEvaluator {
    fn evaluate(&self, itinerary: &Itinerary) -> anyhow::Result<MetricResult> {
        if itinerary.days.is_empty() {
            return Ok(MetricResult::new(NAME, self.weight, 100.0));
        }

        let mut day_scores = Vec::with_capacity(itinerary.days.len());
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        for day in &itinerary.days {
            let alignment = evaluate_day(day);
            day_scores.push(alignment.score);
            issues.extend(alignment.issues);
            suggestions.extend(alignment.suggestions);
        }

        let score = day_scores.iter().sum::<f64>() / day_scores.len() as f64;

        let mut result = MetricResult::new(NAME, self.weight, score);
        result.issues = issues;
        result.suggestions = suggestions;
        result
            .details
            .insert("days_analyzed", itinerary.days.len() as f64);

        Ok(result)
    }
}

fn evaluate_day(day: &DayPlan) -> DayAlignment {
    let mut alignment = DayAlignment {
        score: 100.0,
        issues: Vec::new(),
        suggestions: Vec::new(),
    };

    if day.theme.is_empty() || day.activities.is_empty() {
        return alignment;
    }

    let n = day.day_number;
    let theme_lower = day.theme.to_lowercase();
    let expected = expected_categories(&theme_lower);

    if expected.is_empty() {
        alignment.score = 70.0;
        alignment
            .issues
            .push(format!("Day {n}: Theme '{}' is too generic", day.theme));
        alignment.suggestions.push(format!(
            "Day {n}: Use more specific themes like 'Heritage Walk' or 'Temple Trail'"
        ));
        return alignment;
    }

    let non_dining: Vec<_> = day
        .activities
        .iter()
        .filter(|activity| {
            !THEME_DINING.contains(&activity.place.category.to_lowercase().as_str())
        })
        .collect();

    if non_dining.is_empty() {
        return alignment;
    }

    let matching = non_dining
        .iter()
        .filter(|activity| {
            let category = activity.place.category.to_lowercase();
            let name_lower = activity.place.name.to_lowercase();

            expected.contains(category.as_str())
                || expected.iter().any(|keyword| name_lower.contains(keyword))
        })
        .count();

    alignment.score = matching as f64 / non_dining.len() as f64 * 100.0;

    if alignment.score < 50.0 {
        alignment.issues.push(format!(
            "Day {n}: Only {matching}/{} activities match theme '{}'",
            non_dining.len(),
            day.theme
        ));
        alignment.suggestions.push(format!(
            "Day {n}: Add more activities related to the theme or adjust the theme"
        ));
    }

    alignment
}

fn expected_categories(theme_lower: &str) -> FxHashSet<&'static str> {
    let mut expected = FxHashSet::default();

    for (keyword, categories) in THEME_KEYWORDS {
        if theme_lower.contains(keyword) {
            expected.extend(categories.iter().copied());
        }
    }

    expected
}
