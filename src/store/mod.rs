// ABOUTME: Onboarding state store with write-through persistence
// Every mutation serializes the full record back to storage before returning

pub mod backend;

use tracing::{debug, info, warn};

use crate::error::StorageError;
use crate::models::{OnboardingRecord, OnboardingStep, StepPayload};

pub use backend::{FileStorage, MemoryStorage, StorageBackend};

/// Holds the accumulated onboarding record and keeps it durable.
///
/// Sequencing policy lives in the wizard controller; the store applies any
/// mutation it is handed and persists immediately, so a reload mid-flow never
/// loses an already-submitted step.
pub struct OnboardingStore {
    record: OnboardingRecord,
    backend: Box<dyn StorageBackend>,
}

impl OnboardingStore {
    /// Restore the record from storage, or start fresh.
    ///
    /// Unreadable or unparseable stored state degrades to the fresh default
    /// record with a warning; it is never a fatal error.
    pub fn load(backend: Box<dyn StorageBackend>) -> Self {
        let record = match backend.read() {
            Ok(Some(contents)) => match serde_json::from_str(&contents) {
                Ok(record) => {
                    debug!("Restored onboarding record from storage");
                    record
                }
                Err(err) => {
                    warn!("Failed to parse stored onboarding data, starting fresh: {err}");
                    OnboardingRecord::new()
                }
            },
            Ok(None) => OnboardingRecord::new(),
            Err(err) => {
                warn!("Failed to read stored onboarding data, starting fresh: {err}");
                OnboardingRecord::new()
            }
        };
        Self { record, backend }
    }

    /// Store backed by the default per-user file location
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::load(Box::new(FileStorage::at_default_path()?)))
    }

    /// The current accumulated record
    pub fn record(&self) -> &OnboardingRecord {
        &self.record
    }

    fn save(&self) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&self.record)?;
        self.backend.write(&contents)
    }

    /// Replace the current step and persist.
    ///
    /// Does not check reachability; the controller owns sequencing.
    pub fn set_current_step(&mut self, step: OnboardingStep) -> Result<(), StorageError> {
        self.record.current_step = step;
        self.save()
    }

    /// Merge one validated payload into its slot and persist
    pub fn merge_payload(&mut self, payload: StepPayload) -> Result<(), StorageError> {
        self.record.merge_payload(payload);
        self.save()
    }

    /// Record a step as completed (idempotent) and persist
    pub fn mark_completed(&mut self, step: OnboardingStep) -> Result<(), StorageError> {
        self.record.mark_completed(step);
        self.save()
    }

    /// Discard all progress and clear storage
    pub fn reset(&mut self) -> Result<(), StorageError> {
        info!("Resetting onboarding state");
        self.record = OnboardingRecord::new();
        self.backend.clear()
    }
}
