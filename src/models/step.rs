// ABOUTME: Step identifiers and the ordered step catalog for the onboarding wizard
// The catalog order is the single source of truth for next/previous transitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OnboardingError;

/// Steps in the onboarding wizard, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStep {
    Welcome,
    Identity,
    Tax,
    Banking,
    Allocation,
    Goals,
    Completion,
}

/// Static configuration for one catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepConfig {
    pub id: OnboardingStep,
    pub title: &'static str,
    pub description: &'static str,
    /// Zero-based catalog position, matching sequence order
    pub order: usize,
}

const ONBOARDING_STEPS: [StepConfig; 7] = [
    StepConfig {
        id: OnboardingStep::Welcome,
        title: "Welcome",
        description: "Get started with your cross-border investment journey",
        order: 0,
    },
    StepConfig {
        id: OnboardingStep::Identity,
        title: "Identity Verification",
        description: "Verify your identity across both countries",
        order: 1,
    },
    StepConfig {
        id: OnboardingStep::Tax,
        title: "Tax Declaration",
        description: "Declare your tax residency and investment preferences",
        order: 2,
    },
    StepConfig {
        id: OnboardingStep::Banking,
        title: "Banking Setup",
        description: "Link your US and India bank accounts",
        order: 3,
    },
    StepConfig {
        id: OnboardingStep::Allocation,
        title: "Capital Allocation",
        description: "Decide how to allocate your investments",
        order: 4,
    },
    StepConfig {
        id: OnboardingStep::Goals,
        title: "Investment Goals",
        description: "Set your long-term investment objectives",
        order: 5,
    },
    StepConfig {
        id: OnboardingStep::Completion,
        title: "All Set!",
        description: "Your account is ready",
        order: 6,
    },
];

impl StepConfig {
    /// Get the full ordered catalog
    pub fn all() -> &'static [StepConfig; 7] {
        &ONBOARDING_STEPS
    }

    /// Look up the catalog entry for a step
    pub fn for_step(step: OnboardingStep) -> &'static StepConfig {
        &ONBOARDING_STEPS[step.index()]
    }
}

impl OnboardingStep {
    /// Get all steps in catalog order
    pub fn all() -> &'static [OnboardingStep] {
        &[
            Self::Welcome,
            Self::Identity,
            Self::Tax,
            Self::Banking,
            Self::Allocation,
            Self::Goals,
            Self::Completion,
        ]
    }

    /// Zero-based position in the catalog
    pub fn index(&self) -> usize {
        match self {
            Self::Welcome => 0,
            Self::Identity => 1,
            Self::Tax => 2,
            Self::Banking => 3,
            Self::Allocation => 4,
            Self::Goals => 5,
            Self::Completion => 6,
        }
    }

    /// Get the total number of steps
    pub fn total() -> usize {
        ONBOARDING_STEPS.len()
    }

    /// Get display title for this step
    pub fn title(&self) -> &'static str {
        StepConfig::for_step(*self).title
    }

    /// Get description for this step
    pub fn description(&self) -> &'static str {
        StepConfig::for_step(*self).description
    }

    /// Get the next step, if any
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Welcome => Some(Self::Identity),
            Self::Identity => Some(Self::Tax),
            Self::Tax => Some(Self::Banking),
            Self::Banking => Some(Self::Allocation),
            Self::Allocation => Some(Self::Goals),
            Self::Goals => Some(Self::Completion),
            Self::Completion => None,
        }
    }

    /// Get the previous step, if any
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Welcome => None,
            Self::Identity => Some(Self::Welcome),
            Self::Tax => Some(Self::Identity),
            Self::Banking => Some(Self::Tax),
            Self::Allocation => Some(Self::Banking),
            Self::Goals => Some(Self::Allocation),
            Self::Completion => Some(Self::Goals),
        }
    }

    /// Whether this step collects a data payload
    ///
    /// Welcome and Completion are navigational only and complete on advance.
    pub fn has_payload(&self) -> bool {
        !matches!(self, Self::Welcome | Self::Completion)
    }

    /// The lowercase tag used in persisted state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Identity => "identity",
            Self::Tax => "tax",
            Self::Banking => "banking",
            Self::Allocation => "allocation",
            Self::Goals => "goals",
            Self::Completion => "completion",
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingStep {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "welcome" => Ok(Self::Welcome),
            "identity" => Ok(Self::Identity),
            "tax" => Ok(Self::Tax),
            "banking" => Ok(Self::Banking),
            "allocation" => Ok(Self::Allocation),
            "goals" => Ok(Self::Goals),
            "completion" => Ok(Self::Completion),
            other => Err(OnboardingError::UnknownStep(other.to_string())),
        }
    }
}
