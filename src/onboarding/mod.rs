//! Onboarding chain — three prompt-chained generation steps.
//!
//! An `EmployeeState` is validated, then enriched by a welcome package,
//! training materials and finally a combined onboarding plan. Each step's
//! prompt is built from the record as left by the previous step.

pub mod chain;
pub mod model;
pub mod prompts;
pub mod state;

pub use chain::{OnboardingChain, RunStatus};
pub use model::{EmployeeState, REQUIRED_FIELDS, StepFragment, Validation};
pub use state::{ChainStep, OnboardingPhase};
