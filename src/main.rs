use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use truth_serum::model::Config;
use truth_serum::service::{FactCheckService, InMemoryResultStore, ReplayBundle};

/// Replay a recorded verification round and print its canonical record
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON replay bundle with url, text, html and payload
    bundle: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr, stdout carries only the record
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let bundle = match ReplayBundle::load(&cli.bundle) {
        Ok(bundle) => bundle,
        Err(e) => {
            tracing::error!(path = %cli.bundle.display(), error = %e, "Cannot load replay bundle");
            return ExitCode::FAILURE;
        }
    };

    let (fetcher, judge) = bundle.collaborators();
    let service = FactCheckService::new(
        Arc::new(fetcher),
        Arc::new(judge),
        Arc::new(InMemoryResultStore::new()),
        config.guardrail,
    );

    match service.verify(&bundle.url).await {
        Ok(record) => {
            println!("{record}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(url = %bundle.url.trim(), error = %e, "Verification failed");
            ExitCode::FAILURE
        }
    }
}
