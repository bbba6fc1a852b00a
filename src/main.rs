//! Cardioscope: Deterministic cardiovascular risk scoring
//!
//! Command-line entry point: reads one patient snapshot as JSON (from a
//! file argument or stdin), runs a full assessment, and prints the
//! resulting record as JSON on stdout.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardioscope::adapters::sqlite::SqliteStorage;
use cardioscope::application::AssessmentService;
use cardioscope::domain::RiskInput;

fn main() -> Result<()> {
    // Logs go to stderr so the JSON result on stdout stays parseable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting cardioscope...");

    let input = read_input().context("Failed to read patient input")?;

    // CARDIOSCOPE_DB selects the history database; without it the
    // assessment is computed but not kept.
    let storage = match std::env::var("CARDIOSCOPE_DB") {
        Ok(path) => SqliteStorage::new(&path)
            .with_context(|| format!("Failed to open database at {path}"))?,
        Err(_) => SqliteStorage::in_memory().context("Failed to create in-memory database")?,
    };

    let service = AssessmentService::new(Arc::new(storage));
    let assessment = service.assess(input)?;

    println!("{}", serde_json::to_string_pretty(&assessment)?);

    tracing::info!("Cardioscope done.");
    Ok(())
}

/// Read the patient snapshot JSON from the first argument (a file path)
/// or, when absent, from stdin.
fn read_input() -> Result<RiskInput> {
    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file {path}"))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("Input is not a valid RiskInput JSON object")
}
