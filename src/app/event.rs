use crate::assessment::{AssessmentError, AssessmentResult, RequestId};
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// The assessment task finished waiting and the engine answered
    AssessmentFinished {
        request_id: RequestId,
        outcome: Result<AssessmentResult, AssessmentError>,
    },

    /// Tick for UI refresh
    Tick,
}
