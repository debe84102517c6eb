//! Seedcall CLI — the demo entry point.
//!
//! Runs the tool-calling round trip once: the user asks for the current
//! time, the model requests the `get_current_local_time` tool, the result is
//! fed back, and the final answer is printed.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(
    name = "seedcall",
    about = "Seedcall — tool-calling round-trip demo for Seed-OSS-style completion models",
    version,
    author
)]
struct Cli {
    /// Optional JSON config file (overrides environment and defaults)
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let code = match seedcall::run(cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, cause = ?e, "Tool calling demo failed");
            ExitCode::FAILURE
        }
    };

    println!();
    println!("Demo completed. To customize, create a config.json file or set environment variables.");
    println!(
        "Available env vars: LLM_API_KEY, LLM_BASE_URL, LLM_MODEL_NAME, TEMPLATE_PATH, MAX_TOKENS, SHOW_THINKING_TOKENS"
    );

    code
}
