use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::Serialize;

use super::grade::QualityGrade;

/// Outcome of one evaluator. Built fresh on every evaluation call.
#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct MetricResult {
    pub name: &'static str,
    pub score: f64,
    pub weight: f64,
    pub grade: QualityGrade,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
    pub details: FxHashMap<&'static str, f64>,
}

impl MetricResult {
    /// Clamps the score into 0-100 and grades it. Issues, suggestions and
    /// details start empty; evaluators fill them in afterwards.
    pub fn new(name: &'static str, weight: f64, score: f64) -> Self {
        let score = score.clamp(0.0, 100.0);

        Self {
            name,
            score,
            weight,
            grade: QualityGrade::from_score(score),
            issues: Vec::new(),
            suggestions: Vec::new(),
            details: FxHashMap::default(),
        }
    }
}

/// Aggregated evaluation of a whole itinerary. Read-only output, never
/// fed back into scheduling.
#[derive(Serialize, JsonSchema, Debug, Clone)]
pub struct QualityReport {
    pub overall_score: f64,
    pub overall_grade: QualityGrade,
    pub metrics: Vec<MetricResult>,
    pub total_issues: usize,
    pub critical_issues: Vec<String>,
    pub recommendations: Vec<String>,
    pub destination: String,
    pub num_days: usize,
    pub total_activities: usize,
}

impl QualityReport {
    pub fn summary(&self) -> String {
        format!(
            "Quality Report: {} ({:.1}/100)\n\
             Destination: {} ({} days, {} activities)\n\
             Issues Found: {}\n\
             Critical: {}",
            self.overall_grade,
            self.overall_score,
            self.destination,
            self.num_days,
            self.total_activities,
            self.total_issues,
            self.critical_issues.len()
        )
    }
}
