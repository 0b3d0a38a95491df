//! OnboardingChain — runs the fixed welcome → training → final sequence
//! against a generation backend.

use std::sync::Arc;

use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::error::{ChainError, GenerationError};
use crate::llm::LlmProvider;

use super::model::{EmployeeState, StepFragment, Validation};
use super::prompts::{final_package_prompt, training_materials_prompt, welcome_package_prompt};
use super::state::ChainStep;

/// How a full run ended when no step failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// All three steps ran and `final_package` is populated.
    Completed,
    /// Validation failed; no generation call was made.
    MissingInformation { missing: Vec<&'static str> },
}

/// Drives the three generation steps over an employee record.
///
/// Each step method reads the record and returns a fragment without
/// touching the record. Ordering and validation are the caller's job when
/// using the step methods directly; [`run`](Self::run) does both.
pub struct OnboardingChain {
    llm: Arc<dyn LlmProvider>,
}

impl OnboardingChain {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Precondition check gating the whole sequence.
    pub fn validate_requirements(&self, state: &EmployeeState) -> Validation {
        state.validate()
    }

    /// Step 1: personalized welcome package.
    pub async fn generate_welcome_package(
        &self,
        state: &EmployeeState,
    ) -> Result<StepFragment, GenerationError> {
        let prompt = welcome_package_prompt(state);
        let generation = self.llm.generate(&prompt).await?;
        Ok(StepFragment::WelcomePackage(generation.content))
    }

    /// Step 2: role-specific training materials.
    pub async fn generate_training_materials(
        &self,
        state: &EmployeeState,
    ) -> Result<StepFragment, GenerationError> {
        let prompt = training_materials_prompt(state);
        let generation = self.llm.generate(&prompt).await?;
        Ok(StepFragment::TrainingMaterials(generation.content))
    }

    /// Step 3: final onboarding plan built from the two earlier outputs.
    pub async fn generate_final_package(
        &self,
        state: &EmployeeState,
    ) -> Result<StepFragment, GenerationError> {
        let prompt = final_package_prompt(state);
        let generation = self.llm.generate(&prompt).await?;
        Ok(StepFragment::FinalPackage(generation.content))
    }

    /// Run a single step by name.
    pub async fn run_step(
        &self,
        step: ChainStep,
        state: &EmployeeState,
    ) -> Result<StepFragment, GenerationError> {
        match step {
            ChainStep::Welcome => self.generate_welcome_package(state).await,
            ChainStep::Training => self.generate_training_materials(state).await,
            ChainStep::Final => self.generate_final_package(state).await,
        }
    }

    /// Validate, then run every step in order, applying each fragment before
    /// the next step starts.
    ///
    /// On failure the record keeps the fragments applied so far and the
    /// error names the step that aborted the chain.
    pub async fn run(&self, state: &mut EmployeeState) -> Result<RunStatus, ChainError> {
        self.run_with_progress(state, |_| {}).await
    }

    /// Same as [`run`](Self::run), calling `on_step` right before each
    /// step's backend call.
    pub async fn run_with_progress(
        &self,
        state: &mut EmployeeState,
        on_step: impl FnMut(ChainStep),
    ) -> Result<RunStatus, ChainError> {
        let span = info_span!(
            "onboarding",
            run_id = %Uuid::new_v4(),
            employee = %state.name,
            model = %self.llm.model_name(),
        );
        self.run_steps(state, on_step).instrument(span).await
    }

    async fn run_steps(
        &self,
        state: &mut EmployeeState,
        mut on_step: impl FnMut(ChainStep),
    ) -> Result<RunStatus, ChainError> {
        if let Validation::Fail { missing } = self.validate_requirements(state) {
            warn!(?missing, "Missing required employee information");
            return Ok(RunStatus::MissingInformation { missing });
        }

        for step in ChainStep::ALL {
            state.ready_for(step).map_err(|e| ChainError {
                step,
                source: e.into(),
            })?;

            info!(step = %step, number = step.number(), "{}", step.description());
            on_step(step);

            let fragment = self
                .run_step(step, state)
                .await
                .map_err(|e| ChainError {
                    step,
                    source: e.into(),
                })?;
            let chars = fragment.content().len();

            state.apply(fragment).map_err(|e| ChainError {
                step,
                source: e.into(),
            })?;

            info!(
                step = %step,
                field = step.field(),
                chars,
                phase = %state.phase(),
                "Step complete"
            );
        }

        Ok(RunStatus::Completed)
    }
}
