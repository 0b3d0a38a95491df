//! Chain state machine — tracks how far the record has been enriched.

use serde::{Deserialize, Serialize};

/// The phases of an onboarding run.
///
/// Progresses linearly: Unvalidated → WelcomeGenerated → TrainingGenerated →
/// Complete. There is no transition out of Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingPhase {
    Unvalidated,
    WelcomeGenerated,
    TrainingGenerated,
    Complete,
}

impl OnboardingPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: OnboardingPhase) -> bool {
        use OnboardingPhase::*;
        matches!(
            (self, target),
            (Unvalidated, WelcomeGenerated)
                | (WelcomeGenerated, TrainingGenerated)
                | (TrainingGenerated, Complete)
        )
    }
}

impl Default for OnboardingPhase {
    fn default() -> Self {
        Self::Unvalidated
    }
}

impl std::fmt::Display for OnboardingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unvalidated => "unvalidated",
            Self::WelcomeGenerated => "welcome_generated",
            Self::TrainingGenerated => "training_generated",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

/// One read → prompt → generate → fragment unit of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainStep {
    Welcome,
    Training,
    Final,
}

impl ChainStep {
    /// Steps in execution order.
    pub const ALL: [ChainStep; 3] = [Self::Welcome, Self::Training, Self::Final];

    /// 1-based position in the chain.
    pub fn number(&self) -> usize {
        match self {
            Self::Welcome => 1,
            Self::Training => 2,
            Self::Final => 3,
        }
    }

    /// Record field written by this step.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome_package",
            Self::Training => "training_materials",
            Self::Final => "final_package",
        }
    }

    /// Phase reached once this step's output is applied.
    pub fn completes(&self) -> OnboardingPhase {
        match self {
            Self::Welcome => OnboardingPhase::WelcomeGenerated,
            Self::Training => OnboardingPhase::TrainingGenerated,
            Self::Final => OnboardingPhase::Complete,
        }
    }

    /// Human-readable progress label.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Welcome => "Generating welcome package",
            Self::Training => "Creating training materials",
            Self::Final => "Assembling final package",
        }
    }
}

impl std::fmt::Display for ChainStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::Training => "training",
            Self::Final => "final",
        };
        write!(f, "{s}")
    }
}
