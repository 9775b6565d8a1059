// ABOUTME: Error taxonomy for the onboarding core
// Separates recoverable storage faults from defensive sequencing faults

use thiserror::Error;

use crate::models::OnboardingStep;

/// Errors raised by the persistence backend.
///
/// Parse failures on load are deliberately absent here: the store degrades
/// to a fresh record instead of surfacing them (see `OnboardingStore::load`).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Stored document could not be read
    #[error("Failed to read onboarding state from {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// Document could not be written back
    #[error("Failed to write onboarding state to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    /// Record could not be serialized for writing
    #[error("Failed to serialize onboarding record: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Home directory could not be resolved for the default storage path
    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Errors raised by the wizard controller and step catalog.
#[derive(Debug, Error)]
pub enum OnboardingError {
    /// A raw string named a step outside the catalog
    #[error("Unknown onboarding step: {0}")]
    UnknownStep(String),

    /// Advance was requested past the terminal step
    #[error("No step follows {0:?} in the onboarding sequence")]
    SequenceExhausted(OnboardingStep),

    /// Persistence failure during a mutation
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for wizard operations
pub type OnboardingResult<T> = Result<T, OnboardingError>;
