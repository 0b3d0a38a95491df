//! Integration tests for the onboarding chain.
//!
//! Stub providers stand in for the backend where only chain behavior
//! matters; the end-to-end test goes through the real Ollama client against
//! a wiremock server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use onboard_chain::config::OllamaConfig;
use onboard_chain::error::{GenerationError, StepFailure};
use onboard_chain::llm::{Generation, LlmProvider, OllamaProvider};
use onboard_chain::onboarding::{
    ChainStep, EmployeeState, OnboardingChain, OnboardingPhase, RunStatus, Validation,
};

/// Returns `OK-<n>` for the n-th call and fails from call `fail_on` onward.
struct ScriptedLlm {
    calls: AtomicUsize,
    fail_on: Option<usize>,
}

impl ScriptedLlm {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    fn failing_on(call: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on: Some(call),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _prompt: &str) -> Result<Generation, GenerationError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.is_some_and(|fail_on| n >= fail_on) {
            return Err(GenerationError::Transport {
                url: "http://stub/api/generate".to_string(),
                reason: "connection reset by peer".to_string(),
            });
        }
        Ok(Generation::new(format!("OK-{n}")))
    }
}

fn alice() -> EmployeeState {
    EmployeeState::new(
        "Alice",
        "Dev",
        "Eng",
        "2024-01-01",
        vec!["github".to_string()],
        vec!["python".to_string()],
    )
}

#[tokio::test]
async fn caller_driven_chain_merges_each_step() {
    let chain = OnboardingChain::new(Arc::new(ScriptedLlm::new()));
    let mut state = alice();

    assert_eq!(chain.validate_requirements(&state), Validation::Pass);

    let welcome = chain.generate_welcome_package(&state).await.unwrap();
    state.apply(welcome).unwrap();
    assert_eq!(state.phase(), OnboardingPhase::WelcomeGenerated);

    let training = chain.generate_training_materials(&state).await.unwrap();
    state.apply(training).unwrap();

    let final_package = chain.generate_final_package(&state).await.unwrap();
    state.apply(final_package).unwrap();

    assert_eq!(state.welcome_package.as_deref(), Some("OK-1"));
    assert_eq!(state.training_materials.as_deref(), Some("OK-2"));
    assert_eq!(state.final_package.as_deref(), Some("OK-3"));
    assert_eq!(state.phase(), OnboardingPhase::Complete);
}

#[tokio::test]
async fn failure_on_second_call_halts_after_first_step() {
    let llm = Arc::new(ScriptedLlm::failing_on(2));
    let chain = OnboardingChain::new(llm.clone());
    let mut state = alice();

    let err = chain.run(&mut state).await.unwrap_err();

    assert_eq!(err.step, ChainStep::Training);
    assert!(matches!(
        err.source,
        StepFailure::Generation(GenerationError::Transport { .. })
    ));
    assert!(err.to_string().contains("connection reset"));
    assert_eq!(llm.calls(), 2, "no call after the failing step");

    assert_eq!(state.welcome_package.as_deref(), Some("OK-1"));
    assert!(state.training_materials.is_none());
    assert!(state.final_package.is_none());
    assert_eq!(state.phase(), OnboardingPhase::WelcomeGenerated);
}

#[tokio::test]
async fn missing_information_makes_no_backend_calls() {
    let llm = Arc::new(ScriptedLlm::new());
    let chain = OnboardingChain::new(llm.clone());
    let mut state = alice();
    state.name.clear();
    state.start_date.clear();

    let status = chain.run(&mut state).await.unwrap();

    assert_eq!(
        status,
        RunStatus::MissingInformation {
            missing: vec!["name", "start_date"]
        }
    );
    assert_eq!(llm.calls(), 0);
    assert_eq!(state.phase(), OnboardingPhase::Unvalidated);
}

#[tokio::test]
async fn end_to_end_through_ollama_client() {
    let server = MockServer::start().await;
    let steps = [
        ("Create a personalized welcome package", "OK-1"),
        ("Create training materials", "OK-2"),
        ("Create a final onboarding package", "OK-3"),
    ];
    for (marker, output) in steps {
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_string_contains(marker))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "deepseek-r1:7b",
                "response": format!("<think>x</think>{output}"),
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let config = OllamaConfig::default().with_base_url(&server.uri()).unwrap();
    let provider = OllamaProvider::new(config).unwrap();
    let chain = OnboardingChain::new(Arc::new(provider));
    let mut state = alice();

    let status = chain.run(&mut state).await.unwrap();

    assert_eq!(status, RunStatus::Completed);
    assert_eq!(state.welcome_package.as_deref(), Some("OK-1"));
    assert_eq!(state.training_materials.as_deref(), Some("OK-2"));
    assert_eq!(state.final_package.as_deref(), Some("OK-3"));
}

#[tokio::test]
async fn backend_error_status_surfaces_from_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("CUDA out of memory"))
        .mount(&server)
        .await;

    let config = OllamaConfig::default().with_base_url(&server.uri()).unwrap();
    let chain = OnboardingChain::new(Arc::new(OllamaProvider::new(config).unwrap()));
    let mut state = alice();

    let err = chain.run(&mut state).await.unwrap_err();

    assert_eq!(err.step, ChainStep::Welcome);
    match &err.source {
        StepFailure::Generation(GenerationError::Status { status, body }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "CUDA out of memory");
        }
        other => panic!("expected Status failure, got {other:?}"),
    }
    assert!(state.welcome_package.is_none());
}
