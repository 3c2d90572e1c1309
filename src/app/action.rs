use crate::assessment::{RequestId, SelectedSymptoms};

/// Side effects requested by the handler and carried out by the event loop.
#[derive(Debug, PartialEq)]
pub enum Action {
    StartAssessment {
        request_id: RequestId,
        symptoms: SelectedSymptoms,
    },
    SaveConfig,
    Quit,
}
