// ABOUTME: Onboarding core for BridgeVest cross-border investing
// Step catalog, validation, durable state store, and wizard controller

#![allow(missing_docs)]

pub mod error;
pub mod models;
pub mod store;
pub mod validation;
pub mod wizard;

pub use error::{OnboardingError, OnboardingResult, StorageError};
pub use models::{OnboardingRecord, OnboardingStep, StepConfig, StepPayload};
pub use store::{FileStorage, MemoryStorage, OnboardingStore, StorageBackend};
pub use validation::FieldErrors;
pub use wizard::{SubmitOutcome, WizardController};
