use std::path::Path;

use anyhow::Context;

use onboard_chain::config::{self, OllamaConfig};
use onboard_chain::llm::create_provider;
use onboard_chain::onboarding::{EmployeeState, OnboardingChain, RunStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so DEFAULT_MODEL / OLLAMA_BASE_URL / RUST_LOG can come from it
    let env_file = config::load_env_file();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match env_file {
        Ok(true) => tracing::info!("Loaded environment variables from .env file"),
        Ok(false) => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    let ollama_config = OllamaConfig::from_env()?;

    eprintln!("Onboarding Chain v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", ollama_config.model);
    eprintln!("   Backend: {}", ollama_config.base_url);

    let mut employee = match std::env::args().nth(1) {
        Some(path) => load_employee(Path::new(&path))?,
        None => sample_employee(),
    };

    let llm = create_provider(&ollama_config)?;
    let chain = OnboardingChain::new(llm);

    println!("Starting onboarding process...");

    let outcome = chain
        .run_with_progress(&mut employee, |step| {
            println!("\n{}. {}...", step.number(), step.description());
        })
        .await;

    match outcome {
        Ok(RunStatus::Completed) => {
            println!("\nFinal Onboarding Package:");
            println!("{}", "=".repeat(50));
            println!("{}", employee.final_package.as_deref().unwrap_or_default());
        }
        Ok(RunStatus::MissingInformation { .. }) => {
            println!("Error: Missing required employee information");
        }
        Err(e) => {
            eprintln!("Error during onboarding process: {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Read an employee record from a JSON file.
fn load_employee(path: &Path) -> anyhow::Result<EmployeeState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading employee record {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing employee record {}", path.display()))
}

fn sample_employee() -> EmployeeState {
    EmployeeState::new(
        "Alice Smith",
        "Full Stack Developer",
        "Engineering",
        "2024-03-15",
        ["github", "jira", "aws", "slack"]
            .map(String::from)
            .to_vec(),
        ["python", "javascript", "react", "docker"]
            .map(String::from)
            .to_vec(),
    )
}
