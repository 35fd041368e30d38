use fxhash::FxHashSet;
use tracing::{debug, info, warn};

use crate::config::ScoringWeights;
use crate::itinerary::day_plan::Itinerary;

use super::evaluators::evaluator::Evaluator;
use super::grade::QualityGrade;
use super::report::{MetricResult, QualityReport};

/// Substituted when an evaluator fails outright.
pub const NEUTRAL_SCORE: f64 = 50.0;

const MAX_CRITICAL_ISSUES: usize = 5;
const MAX_RECOMMENDATIONS: usize = 5;

/// Runs every evaluator over a finished itinerary and folds the results
/// into one weighted report. Holds no state between calls.
pub struct ItineraryScorer {
    weights: ScoringWeights,
}

impl ItineraryScorer {
    pub fn new() -> Self {
        Self::with_weights(ScoringWeights::default())
    }

    /// Panics when the weights do not sum to 1, so a bad configuration
    /// dies at startup instead of skewing every report.
    pub fn with_weights(weights: ScoringWeights) -> Self {
        weights.assert_normalized();
        Self { weights }
    }

    pub fn evaluate(&self, itinerary: &Itinerary) -> QualityReport {
        info!(
            "Scoring the {} itinerary: {} day(s)",
            itinerary.destination,
            itinerary.days.len()
        );

        let mut metrics = Vec::with_capacity(Evaluator::ALL.len());
        for evaluator in Evaluator::ALL {
            match evaluator.evaluate(itinerary, &self.weights) {
                Ok(result) => {
                    debug!("{evaluator}: {:.1}", result.score);
                    metrics.push(result);
                }
                Err(e) => {
                    warn!("{evaluator} failed: {e}");
                    let mut result = MetricResult::new(
                        evaluator.name(),
                        evaluator.weight(&self.weights),
                        NEUTRAL_SCORE,
                    );
                    result.issues.push(format!("Evaluation error: {e}"));
                    metrics.push(result);
                }
            }
        }

        let overall_score = overall_score(&metrics);
        let total_issues = metrics.iter().map(|m| m.issues.len()).sum();
        let critical_issues = critical_issues(&metrics);
        let recommendations = recommendations(&metrics);
        let total_activities = itinerary.days.iter().map(|d| d.activities.len()).sum();

        let report = QualityReport {
            overall_score,
            overall_grade: QualityGrade::from_score(overall_score),
            metrics,
            total_issues,
            critical_issues,
            recommendations,
            destination: itinerary.destination.clone(),
            num_days: itinerary.days.len(),
            total_activities,
        };

        info!(
            "Scored {} ({:.1}/100), {} issue(s)",
            report.overall_grade, report.overall_score, report.total_issues
        );

        report
    }

    /// Score and grade only, for fast comparisons.
    pub fn quick_score(&self, itinerary: &Itinerary) -> (f64, String) {
        let report = self.evaluate(itinerary);
        (report.overall_score, report.overall_grade.to_string())
    }
}

impl Default for ItineraryScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Weighted mean over the weights actually present.
fn overall_score(metrics: &[MetricResult]) -> f64 {
    let total_weight: f64 = metrics.iter().map(|m| m.weight).sum();
    if total_weight == 0.0 {
        return 0.0;
    }

    let weighted_sum: f64 = metrics.iter().map(|m| m.score * m.weight).sum();
    weighted_sum / total_weight
}

/// The first two issues of every metric scoring below 50, report order.
fn critical_issues(metrics: &[MetricResult]) -> Vec<String> {
    let mut critical = Vec::new();

    for metric in metrics {
        if metric.score < 50.0 {
            critical.extend(metric.issues.iter().take(2).cloned());
        }
    }

    critical.truncate(MAX_CRITICAL_ISSUES);
    critical
}

/// All suggestions, deduplicated, worst metrics first.
fn recommendations(metrics: &[MetricResult]) -> Vec<String> {
    let mut by_score: Vec<&MetricResult> = metrics.iter().collect();
    by_score.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out = Vec::new();

    for metric in by_score {
        for suggestion in &metric.suggestions {
            if out.len() == MAX_RECOMMENDATIONS {
                return out;
            }
            if seen.insert(suggestion.as_str()) {
                out.push(suggestion.clone());
            }
        }
    }

    out
}
