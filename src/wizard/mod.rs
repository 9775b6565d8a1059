// ABOUTME: Wizard controller orchestrating validate -> merge -> complete -> advance
// Owns sequencing policy; the store owns durability and the validator owns input

use serde_json::Value;
use tracing::debug;

use crate::error::{OnboardingError, OnboardingResult};
use crate::models::{OnboardingRecord, OnboardingStep, StepConfig};
use crate::store::OnboardingStore;
use crate::validation::{validate_step, FieldErrors};

/// Outcome of submitting one step's raw form data
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Input accepted; the wizard is now on this step
    Accepted(OnboardingStep),
    /// Input rejected; the wizard stayed put and nothing was persisted
    Rejected(FieldErrors),
}

/// Drives the onboarding flow over an [`OnboardingStore`].
pub struct WizardController {
    store: OnboardingStore,
}

impl WizardController {
    pub fn new(store: OnboardingStore) -> Self {
        Self { store }
    }

    /// The current accumulated record, for rendering
    pub fn record(&self) -> &OnboardingRecord {
        self.store.record()
    }

    /// The ordered step catalog, for progress display
    pub fn steps() -> &'static [StepConfig; 7] {
        StepConfig::all()
    }

    /// Validate and submit raw form data for a step.
    ///
    /// On acceptance the payload is merged, the step is marked completed, and
    /// the wizard advances to the catalog successor. On rejection the field
    /// errors are returned and no state changes at all. Welcome and Completion
    /// take no payload and complete on submission alone.
    pub fn submit_step(&mut self, step: OnboardingStep, raw: &Value) -> OnboardingResult<SubmitOutcome> {
        let payload = match validate_step(step, raw) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!("Step {step} rejected with {} field error(s)", errors.len());
                return Ok(SubmitOutcome::Rejected(errors));
            }
        };

        if let Some(payload) = payload {
            self.store.merge_payload(payload)?;
        }
        self.store.mark_completed(step)?;

        // Goals is the terminal data-collection step: it lands directly on
        // Completion even if the catalog ever grows intermediate steps.
        let next = if step == OnboardingStep::Goals {
            Ok(OnboardingStep::Completion)
        } else {
            Self::successor(step)
        };

        match next {
            Ok(next) => {
                self.store.set_current_step(next)?;
                debug!("Step {step} accepted, advanced to {next}");
                Ok(SubmitOutcome::Accepted(next))
            }
            Err(OnboardingError::SequenceExhausted(_)) => {
                // Submitting the terminal step is a caller slip, not a fault
                debug!("Submit on terminal step {step} ignored");
                Ok(SubmitOutcome::Accepted(step))
            }
            Err(err) => Err(err),
        }
    }

    /// Step back to the catalog predecessor, keeping all collected data.
    ///
    /// Returns whether the wizard moved; a no-op on the first step.
    pub fn go_back(&mut self) -> OnboardingResult<bool> {
        let current = self.store.record().current_step;
        match current.previous() {
            Some(prev) => {
                self.store.set_current_step(prev)?;
                debug!("Stepped back from {current} to {prev}");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Discard all progress and clear persisted state
    pub fn reset(&mut self) -> OnboardingResult<()> {
        self.store.reset()?;
        Ok(())
    }

    fn successor(step: OnboardingStep) -> OnboardingResult<OnboardingStep> {
        step.next().ok_or(OnboardingError::SequenceExhausted(step))
    }
}
