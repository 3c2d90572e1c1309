//! Symptom checker: selection model, engine, wizard and latency task.

pub mod engine;
pub mod model;
pub mod task;
pub mod wizard;

pub use engine::{AssessmentEngine, AssessmentError, FixedAssessmentEngine};
pub use model::{AssessmentResult, SelectedSymptoms, Severity};
pub use task::{spawn_assessment, AssessmentHandle};
pub use wizard::{RequestId, Wizard, WizardEffect, WizardEvent, WizardStep};
