use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use uploader_rs::adapters::http::HttpTransport;
use uploader_rs::adapters::simulated::SimulatedDevice;
use uploader_rs::adapters::terminal::TerminalPrompt;
use uploader_rs::models::shutdown::listen_for_shutdown;
use uploader_rs::{run_service, AppError, ServiceOptions, UploadMode, DEFAULT_CONFIG};

#[derive(Parser)]
#[command(name = "telemetry-client")]
#[command(about = "Streams phone telemetry to a collection server")]
struct Cli {
    /// Post every source to its own endpoint instead of one combined reading
    #[arg(long)]
    per_category: bool,
    /// Stop gracefully after this many milliseconds
    #[arg(long)]
    run_for_millis: Option<u64>,
    /// Stop gracefully after this many polling cycles
    #[arg(long)]
    max_cycles: Option<u64>,
    /// Config file to read instead of the default one
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed of the simulated device
    #[arg(long)]
    seed: Option<u64>,
    /// Simulate denied location services
    #[arg(long)]
    unauthorized: bool,
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let device = SimulatedDevice::new(!cli.unauthorized, cli.seed)?;
    let transport = HttpTransport::new()?;
    let prompt = Arc::new(TerminalPrompt::stdio());

    let options = ServiceOptions {
        mode: if cli.per_category {
            UploadMode::PerCategory
        } else {
            UploadMode::Combined
        },
        max_cycles: cli.max_cycles,
        config_path: cli.config,
    };

    let stop = CancellationToken::new();
    let shutdown = listen_for_shutdown(stop.clone(), cli.run_for_millis);

    let result = run_service(
        prompt,
        &device,
        &device,
        transport,
        &DEFAULT_CONFIG,
        &options,
        stop,
    )
    .await;
    shutdown.abort();

    let summary = result?;
    println!(
        "Uploaded {} readings in {} cycles ({} failed, {} skipped)",
        summary.accepted, summary.cycles, summary.failed, summary.skipped
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
