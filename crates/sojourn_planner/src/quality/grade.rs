use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Letter grade derived from a 0-100 score.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Copy, Clone, PartialEq, Eq)]
pub enum QualityGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    D,
    F,
}

impl QualityGrade {
    pub fn from_score(score: f64) -> QualityGrade {
        if score >= 95.0 {
            QualityGrade::APlus
        } else if score >= 90.0 {
            QualityGrade::A
        } else if score >= 85.0 {
            QualityGrade::AMinus
        } else if score >= 80.0 {
            QualityGrade::BPlus
        } else if score >= 75.0 {
            QualityGrade::B
        } else if score >= 70.0 {
            QualityGrade::BMinus
        } else if score >= 65.0 {
            QualityGrade::CPlus
        } else if score >= 60.0 {
            QualityGrade::C
        } else if score >= 55.0 {
            QualityGrade::CMinus
        } else if score >= 50.0 {
            QualityGrade::D
        } else {
            QualityGrade::F
        }
    }
}

impl Display for QualityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let grade = match self {
            QualityGrade::APlus => "A+",
            QualityGrade::A => "A",
            QualityGrade::AMinus => "A-",
            QualityGrade::BPlus => "B+",
            QualityGrade::B => "B",
            QualityGrade::BMinus => "B-",
            QualityGrade::CPlus => "C+",
            QualityGrade::C => "C",
            QualityGrade::CMinus => "C-",
            QualityGrade::D => "D",
            QualityGrade::F => "F",
        };

        write!(f, "{grade}")
    }
}
