//! Background task that simulates assessment latency.
//!
//! The task sleeps for the configured delay, asks the engine for a result
//! and posts it back to the event loop. Cancelling the handle before the
//! delay elapses ends the task without posting anything.

use super::engine::{AssessmentEngine, AssessmentError};
use super::model::SelectedSymptoms;
use super::wizard::RequestId;
use crate::app::event::AppEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct AssessmentHandle {
    request_id: RequestId,
    cancel_token: CancellationToken,
    join: JoinHandle<()>,
}

impl AssessmentHandle {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the task to end, either by completing or by cancellation.
    pub async fn join(self) {
        if let Err(e) = self.join.await {
            tracing::error!(request_id = self.request_id, error = %e, "assessment task panicked");
        }
    }
}

pub fn spawn_assessment(
    request_id: RequestId,
    symptoms: SelectedSymptoms,
    engine: Arc<dyn AssessmentEngine>,
    delay: Duration,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) -> AssessmentHandle {
    let cancel_token = CancellationToken::new();
    let token = cancel_token.clone();

    let join = tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {
                tracing::info!(request_id, "assessment cancelled");
            }
            _ = tokio::time::sleep(delay) => {
                // Engines may block, so keep them off the event loop's workers.
                let outcome = tokio::task::spawn_blocking(move || engine.assess(&symptoms))
                    .await
                    .unwrap_or_else(|e| {
                        tracing::error!(request_id, error = %e, "assessment engine crashed");
                        Err(AssessmentError::Unavailable("the engine stopped unexpectedly".into()))
                    });
                if event_tx
                    .send(AppEvent::AssessmentFinished { request_id, outcome })
                    .is_err()
                {
                    tracing::debug!(request_id, "event loop gone, dropping assessment result");
                }
            }
        }
    });

    AssessmentHandle {
        request_id,
        cancel_token,
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::engine::{fixed_result, FixedAssessmentEngine};
    use crate::assessment::model::AssessmentResult;
    use crate::assessment::wizard::{Wizard, WizardEffect, WizardEvent, WizardStep};

    struct FailingEngine;

    impl AssessmentEngine for FailingEngine {
        fn assess(&self, _: &SelectedSymptoms) -> Result<AssessmentResult, AssessmentError> {
            Err(AssessmentError::Unavailable("maintenance".into()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_arrives_after_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_assessment(
            3,
            ["headache"].into_iter().collect(),
            Arc::new(FixedAssessmentEngine),
            Duration::from_millis(2000),
            tx,
        );
        assert_eq!(handle.request_id(), 3);

        tokio::time::advance(Duration::from_millis(1999)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        match rx.recv().await {
            Some(AppEvent::AssessmentFinished { request_id, outcome }) => {
                assert_eq!(request_id, 3);
                assert_eq!(outcome, Ok(fixed_result()));
            }
            other => panic!("unexpected event {:?}", other),
        }
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_assessment(
            1,
            SelectedSymptoms::new(),
            Arc::new(FixedAssessmentEngine),
            Duration::from_secs(2),
            tx,
        );
        handle.cancel();
        handle.join().await;
        tokio::time::advance(Duration::from_secs(5)).await;
        // Sender was dropped with the task, so the channel is closed and empty.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_error_is_delivered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_assessment(
            9,
            ["fever"].into_iter().collect(),
            Arc::new(FailingEngine),
            Duration::from_millis(10),
            tx,
        );
        match rx.recv().await {
            Some(AppEvent::AssessmentFinished { outcome, .. }) => {
                assert_eq!(outcome, Err(AssessmentError::Unavailable("maintenance".into())));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    struct CrashingEngine;

    impl AssessmentEngine for CrashingEngine {
        fn assess(&self, _: &SelectedSymptoms) -> Result<AssessmentResult, AssessmentError> {
            panic!("engine bug");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_crash_reported_as_unavailable() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = spawn_assessment(
            4,
            ["cough"].into_iter().collect(),
            Arc::new(CrashingEngine),
            Duration::from_millis(10),
            tx,
        );
        match rx.recv().await {
            Some(AppEvent::AssessmentFinished { request_id, outcome }) => {
                assert_eq!(request_id, 4);
                assert!(matches!(outcome, Err(AssessmentError::Unavailable(_))));
            }
            other => panic!("unexpected event {:?}", other),
        }
        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_wizard_round_trip_through_task() {
        let mut wizard = Wizard::new();
        wizard.toggle_symptom("headache").unwrap();
        wizard.toggle_symptom("fever").unwrap();
        assert!(wizard.can_continue());
        wizard.handle(WizardEvent::Continue).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let effects = wizard.submit().unwrap();
        let Some(WizardEffect::StartAssessment { request_id, symptoms }) =
            effects.into_iter().next()
        else {
            panic!("submit should start an assessment");
        };
        spawn_assessment(
            request_id,
            symptoms,
            Arc::new(FixedAssessmentEngine),
            Duration::from_millis(2000),
            tx,
        );
        assert!(wizard.is_submitting());

        let Some(AppEvent::AssessmentFinished { request_id, outcome }) = rx.recv().await else {
            panic!("expected a completion event");
        };
        wizard
            .handle(WizardEvent::Completed { request_id, outcome })
            .unwrap();

        let WizardStep::Result(result) = wizard.step() else {
            panic!("wizard should show the result");
        };
        assert_eq!(result.possible_conditions.len(), 3);
        assert_eq!(result.possible_conditions[0].name, "Common Cold");
        assert_eq!(result.possible_conditions[2].name, "Influenza");
        assert_eq!(result.urgency, crate::assessment::model::Severity::Low);
    }
}
