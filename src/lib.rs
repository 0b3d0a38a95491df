//! Onboarding Chain — prompt-chained generation of employee onboarding documents.

pub mod config;
pub mod error;
pub mod llm;
pub mod onboarding;
