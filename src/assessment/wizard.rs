//! Symptom checker wizard state machine.
//!
//! `Select -> Details -> Submitting -> Result -> Select ...`
//!
//! [`Wizard::handle`] validates an event against the current step and either
//! rejects it (state untouched) or applies it, returning the effects the
//! event loop must carry out. The wizard itself never spawns or sleeps.

use super::engine::AssessmentError;
use super::model::{AssessmentDetails, AssessmentResult, SelectedSymptoms};
use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum WizardStep {
    Select,
    Details,
    /// Waiting for the engine to answer `request_id`.
    Submitting { request_id: RequestId },
    Result(AssessmentResult),
}

impl WizardStep {
    pub fn name(&self) -> &'static str {
        match self {
            WizardStep::Select => "selecting symptoms",
            WizardStep::Details => "entering details",
            WizardStep::Submitting { .. } => "assessing",
            WizardStep::Result(_) => "showing results",
        }
    }
}

#[derive(Debug)]
pub enum WizardEvent {
    ToggleSymptom(String),
    Continue,
    Back,
    Submit,
    Completed {
        request_id: RequestId,
        outcome: Result<AssessmentResult, AssessmentError>,
    },
    Restart,
}

impl WizardEvent {
    fn name(&self) -> &'static str {
        match self {
            WizardEvent::ToggleSymptom(_) => "toggle a symptom",
            WizardEvent::Continue => "continue",
            WizardEvent::Back => "go back",
            WizardEvent::Submit => "submit",
            WizardEvent::Completed { .. } => "complete",
            WizardEvent::Restart => "start a new assessment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    StartAssessment {
        request_id: RequestId,
        symptoms: SelectedSymptoms,
    },
    /// The engine failed; the wizard is back on the details step.
    ReportFailure(AssessmentError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("select at least one symptom to continue")]
    NothingSelected,
    #[error("cannot {event} while {step}")]
    InvalidTransition {
        event: &'static str,
        step: &'static str,
    },
}

#[derive(Debug)]
pub struct Wizard {
    step: WizardStep,
    selected: SelectedSymptoms,
    details: AssessmentDetails,
    next_request_id: RequestId,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Select,
            selected: SelectedSymptoms::new(),
            details: AssessmentDetails::default(),
            next_request_id: 1,
        }
    }

    pub fn step(&self) -> &WizardStep {
        &self.step
    }

    pub fn selected(&self) -> &SelectedSymptoms {
        &self.selected
    }

    pub fn details(&self) -> &AssessmentDetails {
        &self.details
    }

    /// Details are only editable on the details step.
    pub fn details_mut(&mut self) -> Option<&mut AssessmentDetails> {
        match self.step {
            WizardStep::Details => Some(&mut self.details),
            _ => None,
        }
    }

    pub fn can_continue(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.step, WizardStep::Submitting { .. })
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        match &self.step {
            WizardStep::Result(result) => Some(result),
            _ => None,
        }
    }

    pub fn toggle_symptom(&mut self, id: &str) -> Result<bool, WizardError> {
        self.handle(WizardEvent::ToggleSymptom(id.to_string()))?;
        Ok(self.selected.contains(id))
    }

    pub fn submit(&mut self) -> Result<Vec<WizardEffect>, WizardError> {
        self.handle(WizardEvent::Submit)
    }

    pub fn handle(&mut self, event: WizardEvent) -> Result<Vec<WizardEffect>, WizardError> {
        match (&self.step, event) {
            (WizardStep::Select, WizardEvent::ToggleSymptom(id)) => {
                self.selected.toggle(&id);
                Ok(vec![])
            }
            (WizardStep::Select, WizardEvent::Continue) => {
                if !self.can_continue() {
                    return Err(WizardError::NothingSelected);
                }
                self.step = WizardStep::Details;
                Ok(vec![])
            }
            (WizardStep::Details, WizardEvent::Back) => {
                self.step = WizardStep::Select;
                Ok(vec![])
            }
            (WizardStep::Details, WizardEvent::Submit) => {
                let request_id = self.next_request_id;
                self.next_request_id += 1;
                self.step = WizardStep::Submitting { request_id };
                tracing::info!(request_id, symptoms = self.selected.len(), "assessment submitted");
                Ok(vec![WizardEffect::StartAssessment {
                    request_id,
                    symptoms: self.selected.clone(),
                }])
            }
            (
                WizardStep::Submitting { request_id: pending },
                WizardEvent::Completed {
                    request_id,
                    outcome,
                },
            ) if *pending == request_id => match outcome {
                Ok(result) => {
                    tracing::info!(request_id, urgency = result.urgency.label(), "assessment ready");
                    self.step = WizardStep::Result(result);
                    Ok(vec![])
                }
                Err(err) => {
                    tracing::warn!(request_id, error = %err, "assessment failed");
                    self.step = WizardStep::Details;
                    Ok(vec![WizardEffect::ReportFailure(err)])
                }
            },
            (_, WizardEvent::Completed { request_id, .. }) => {
                tracing::debug!(request_id, "ignoring stale assessment completion");
                Ok(vec![])
            }
            (WizardStep::Result(_), WizardEvent::Restart) => {
                self.selected.clear();
                self.details.reset();
                self.step = WizardStep::Select;
                Ok(vec![])
            }
            (step, event) => Err(WizardError::InvalidTransition {
                event: event.name(),
                step: step.name(),
            }),
        }
    }
}
