//! Employee record and the pieces each chain step adds to it.

use serde::{Deserialize, Serialize};

use crate::error::StateError;

use super::state::{ChainStep, OnboardingPhase};

/// Fields that must be non-empty before any generation step runs.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "role", "department", "start_date"];

/// The record threaded through every chain step.
///
/// The six input fields are set by the caller. The three generated fields
/// start empty and are each written once, by the step that produces them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeState {
    pub name: String,
    pub role: String,
    pub department: String,
    /// Free-form date, e.g. "2024-03-15".
    pub start_date: String,
    /// Systems the employee needs access to, in order.
    pub access_levels: Vec<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_materials: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_package: Option<String>,
}

impl EmployeeState {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
        start_date: impl Into<String>,
        access_levels: Vec<String>,
        skills: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            department: department.into(),
            start_date: start_date.into(),
            access_levels,
            skills,
            ..Default::default()
        }
    }

    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> Validation {
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .into_iter()
            .zip([&self.name, &self.role, &self.department, &self.start_date])
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| field)
            .collect();

        if missing.is_empty() {
            Validation::Pass
        } else {
            Validation::Fail { missing }
        }
    }

    /// Phase implied by which generated fields are populated.
    pub fn phase(&self) -> OnboardingPhase {
        if self.final_package.is_some() {
            OnboardingPhase::Complete
        } else if self.training_materials.is_some() {
            OnboardingPhase::TrainingGenerated
        } else if self.welcome_package.is_some() {
            OnboardingPhase::WelcomeGenerated
        } else {
            OnboardingPhase::Unvalidated
        }
    }

    /// Check that `step` is the next one to run on this record.
    ///
    /// Fails without side effects if the step's field is already set or an
    /// earlier step has not produced its output yet.
    pub fn ready_for(&self, step: ChainStep) -> Result<(), StateError> {
        let phase = self.phase();
        if phase.can_transition_to(step.completes()) {
            return Ok(());
        }

        let already_set = match step {
            ChainStep::Welcome => self.welcome_package.is_some(),
            ChainStep::Training => self.training_materials.is_some(),
            ChainStep::Final => self.final_package.is_some(),
        };
        if already_set {
            Err(StateError::FieldAlreadySet { field: step.field() })
        } else {
            Err(StateError::OutOfOrder { step, phase })
        }
    }

    /// Merge a step's output. A generated field is never overwritten.
    pub fn apply(&mut self, fragment: StepFragment) -> Result<(), StateError> {
        let field = fragment.field();
        let slot = match &fragment {
            StepFragment::WelcomePackage(_) => &mut self.welcome_package,
            StepFragment::TrainingMaterials(_) => &mut self.training_materials,
            StepFragment::FinalPackage(_) => &mut self.final_package,
        };
        if slot.is_some() {
            return Err(StateError::FieldAlreadySet { field });
        }
        *slot = Some(fragment.into_content());
        Ok(())
    }

    /// Owned variant of [`apply`](Self::apply): returns the extended record.
    pub fn with_fragment(mut self, fragment: StepFragment) -> Result<Self, StateError> {
        self.apply(fragment)?;
        Ok(self)
    }
}

/// Outcome of the precondition check.
///
/// A failed check is a normal result for the caller to inspect, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Pass,
    Fail { missing: Vec<&'static str> },
}

impl Validation {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "Pass"),
            Self::Fail { .. } => write!(f, "Fail"),
        }
    }
}

/// Partial update produced by one chain step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepFragment {
    WelcomePackage(String),
    TrainingMaterials(String),
    FinalPackage(String),
}

impl StepFragment {
    /// Name of the record field this fragment fills.
    pub fn field(&self) -> &'static str {
        match self {
            Self::WelcomePackage(_) => "welcome_package",
            Self::TrainingMaterials(_) => "training_materials",
            Self::FinalPackage(_) => "final_package",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::WelcomePackage(c) | Self::TrainingMaterials(c) | Self::FinalPackage(c) => c,
        }
    }

    pub fn into_content(self) -> String {
        match self {
            Self::WelcomePackage(c) | Self::TrainingMaterials(c) | Self::FinalPackage(c) => c,
        }
    }
}
