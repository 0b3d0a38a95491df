//! Error types for the onboarding chain.

use std::time::Duration;

use crate::onboarding::{ChainStep, OnboardingPhase};

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Failures of a single call to the generation backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from backend: {reason}")]
    InvalidResponse { reason: String },

    #[error("Malformed generated content: {reason}")]
    MalformedContent { reason: String },
}

impl GenerationError {
    /// HTTP status carried by the error, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Violations of the employee record's write-once fields.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("Field {field} is already set and cannot be written again")]
    FieldAlreadySet { field: &'static str },

    #[error("Step {step} cannot run while the record is {phase}")]
    OutOfOrder {
        step: ChainStep,
        phase: OnboardingPhase,
    },
}

/// A chain step failed; the chain halted at `step`.
#[derive(Debug, thiserror::Error)]
#[error("Step {step} failed: {source}")]
pub struct ChainError {
    pub step: ChainStep,
    #[source]
    pub source: StepFailure,
}

/// What went wrong inside a chain step.
#[derive(Debug, thiserror::Error)]
pub enum StepFailure {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    State(#[from] StateError),
}
