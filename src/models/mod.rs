// ABOUTME: Data models for the onboarding wizard
// Step identifiers, the step catalog, and the accumulated onboarding record

pub mod record;
pub mod step;

pub use record::{
    AccountType, AllocationData, BankingData, GoalData, IdentityData, IndiaBankAccount,
    OnboardingRecord, PrimaryGoal, RiskTolerance, StepPayload, TaxData, TaxResidency,
    UsBankAccount, VisaStatus,
};
pub use step::{OnboardingStep, StepConfig};
