//! dockup - Reports Dockerfile base images with stale tags
//!
//! Walks a source tree for Dockerfiles, looks their base image tags up on
//! Docker Hub and prints the images that have a fresher comparable tag.

use clap::Parser;
use dockup::cli::CliArgs;
use dockup::orchestrator::Orchestrator;
use dockup::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flags
fn init_tracing(args: &CliArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    if args.verbose {
        eprintln!("dockup v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path.display());
        eprintln!("Registry: {}", args.registry_url);
    }

    let orchestrator = Orchestrator::new(&args)?;
    let result = orchestrator.run(args.show_progress()).await?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Partial success - some projects could not be checked
        Ok(ExitCode::from(2))
    }
}
