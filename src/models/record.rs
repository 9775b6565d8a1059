// ABOUTME: Onboarding record and per-step payload models
// Field names and tag values match the persisted JSON layout exactly

use serde::{Deserialize, Serialize};

use super::step::OnboardingStep;

/// Tax residency declared on the tax step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxResidency {
    Us,
    India,
    Both,
}

/// Indian bank account classification (NRE/NRO)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Nre,
    Nro,
}

/// Primary investment goal chosen on the goals step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryGoal {
    UsRetirement,
    IndiaRetirement,
    WealthBuilding,
}

/// Risk tolerance chosen on the goals step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

/// US immigration status chosen on the goals step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisaStatus {
    H1b,
    GreenCard,
    Citizen,
    Other,
}

/// Identity verification data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityData {
    pub ssn: String,
    pub aadhaar: String,
    pub full_name: String,
    pub date_of_birth: String,
}

/// Tax declaration data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxData {
    pub tax_residency: TaxResidency,
    pub account_type: AccountType,
    pub investment_goal: String,
}

/// US-side bank account details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsBankAccount {
    pub name: String,
    pub account_number: String,
    pub routing_number: String,
}

/// India-side bank account details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndiaBankAccount {
    pub name: String,
    pub account_type: AccountType,
    pub account_number: String,
    pub ifsc_code: String,
}

/// Banking setup data, one account per country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingData {
    pub us_bank: UsBankAccount,
    pub india_bank: IndiaBankAccount,
}

/// Capital allocation data
///
/// The two percentages always sum to 100 once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationData {
    pub us_market_percentage: f64,
    pub india_market_percentage: f64,
    pub initial_investment_amount: f64,
}

/// Goal setting data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalData {
    pub primary_goal: PrimaryGoal,
    pub time_horizon: String,
    pub risk_tolerance: RiskTolerance,
    pub visa_status: VisaStatus,
}

/// A validated payload for one data-collecting step
#[derive(Debug, Clone, PartialEq)]
pub enum StepPayload {
    Identity(IdentityData),
    Tax(TaxData),
    Banking(BankingData),
    Allocation(AllocationData),
    Goals(GoalData),
}

impl StepPayload {
    /// The step this payload belongs to
    pub fn step(&self) -> OnboardingStep {
        match self {
            Self::Identity(_) => OnboardingStep::Identity,
            Self::Tax(_) => OnboardingStep::Tax,
            Self::Banking(_) => OnboardingStep::Banking,
            Self::Allocation(_) => OnboardingStep::Allocation,
            Self::Goals(_) => OnboardingStep::Goals,
        }
    }
}

/// Complete accumulated onboarding state
///
/// Payloads are absent until their step passes validation, then replaced
/// wholesale on every resubmission. `completed_steps` holds each step at most
/// once, in completion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub current_step: OnboardingStep,
    pub completed_steps: Vec<OnboardingStep>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<TaxData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banking: Option<BankingData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<AllocationData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<GoalData>,
}

impl Default for OnboardingRecord {
    fn default() -> Self {
        Self {
            current_step: OnboardingStep::Welcome,
            completed_steps: Vec::new(),
            identity: None,
            tax: None,
            banking: None,
            allocation: None,
            goals: None,
        }
    }
}

impl OnboardingRecord {
    /// Fresh record at the start of the wizard
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a step's payload has been accepted at least once
    pub fn is_completed(&self, step: OnboardingStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Add a step to the completed set; repeated calls are no-ops
    pub fn mark_completed(&mut self, step: OnboardingStep) {
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
    }

    /// Replace the payload slot for one step, leaving the rest untouched
    pub fn merge_payload(&mut self, payload: StepPayload) {
        match payload {
            StepPayload::Identity(data) => self.identity = Some(data),
            StepPayload::Tax(data) => self.tax = Some(data),
            StepPayload::Banking(data) => self.banking = Some(data),
            StepPayload::Allocation(data) => self.allocation = Some(data),
            StepPayload::Goals(data) => self.goals = Some(data),
        }
    }

    /// Count of completed steps out of the total, for progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.completed_steps.len(), OnboardingStep::total())
    }
}
