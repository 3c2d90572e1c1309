//! Assessment engine boundary.
//!
//! The engine maps a symptom selection to an [`AssessmentResult`]. The
//! built-in engine ignores its input and always answers with the same
//! result; a real engine plugs in behind the same trait without touching
//! the wizard or the event loop.

use super::model::{AssessmentResult, PossibleCondition, SelectedSymptoms, Severity};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("assessment engine unavailable: {0}")]
    Unavailable(String),
}

pub trait AssessmentEngine: Send + Sync {
    fn assess(&self, symptoms: &SelectedSymptoms) -> Result<AssessmentResult, AssessmentError>;
}

/// Returns [`fixed_result`] for every selection.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedAssessmentEngine;

impl AssessmentEngine for FixedAssessmentEngine {
    fn assess(&self, symptoms: &SelectedSymptoms) -> Result<AssessmentResult, AssessmentError> {
        tracing::debug!(symptoms = ?symptoms.iter().collect::<Vec<_>>(), "fixed engine assessing symptoms");
        Ok(fixed_result())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn fixed_result() -> AssessmentResult {
    AssessmentResult {
        possible_conditions: vec![
            PossibleCondition {
                name: "Common Cold".into(),
                probability: 0.85,
                severity: Severity::Low,
                description: "A viral infection of the nose and throat. Usually harmless \
                              and clears up within 7 to 10 days."
                    .into(),
                recommendations: strings(&[
                    "Rest and stay hydrated",
                    "Use over-the-counter cold remedies for symptom relief",
                    "Gargle with warm salt water for a sore throat",
                ]),
            },
            PossibleCondition {
                name: "Seasonal Allergies".into(),
                probability: 0.65,
                severity: Severity::Low,
                description: "An immune response to pollen or other outdoor allergens."
                    .into(),
                recommendations: strings(&[
                    "Try an over-the-counter antihistamine",
                    "Limit time outdoors when pollen counts are high",
                ]),
            },
            PossibleCondition {
                name: "Influenza".into(),
                probability: 0.35,
                severity: Severity::Medium,
                description: "A contagious respiratory illness that can cause fever, \
                              body aches and fatigue."
                    .into(),
                recommendations: strings(&[
                    "Rest and drink plenty of fluids",
                    "Consider antiviral medication if started within 48 hours",
                    "Seek care if breathing becomes difficult",
                ]),
            },
        ],
        urgency: Severity::Low,
        recommendations: strings(&[
            "Monitor your symptoms over the next 48 hours",
            "Book a consultation if symptoms worsen or persist beyond a week",
            "Call emergency services for chest pain or difficulty breathing",
        ]),
    }
}
