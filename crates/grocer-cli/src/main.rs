mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::run::RunOutcome;

#[derive(Debug, Parser)]
#[command(name = "grocer")]
#[command(about = "Export grocery catalog categories to spreadsheets")]
struct Cli {
    /// Fetch a prompted page range of a single category instead of every page
    #[arg(long)]
    batch: bool,

    /// File with one category URL per line (overrides GROCER_INPUT_PATH)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Root directory for `xlsx/` and `images/` (overrides GROCER_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Where unprocessed URLs are written on failure (overrides GROCER_PENDING_PATH)
    #[arg(long)]
    pending: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = grocer_core::load_app_config()?;
    if let Some(input) = cli.input {
        config.input_path = input;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(pending) = cli.pending {
        config.pending_path = pending;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let start = Local::now();
    tracing::info!(
        started_at = %start.format("%d-%m-%Y %H:%M:%S %p"),
        batch = cli.batch,
        "run starting"
    );

    let stdin = std::io::stdin();
    let mut prompt_in = stdin.lock();
    let mut prompt_out = std::io::stdout();
    let outcome = run::run(&config, cli.batch, &mut prompt_in, &mut prompt_out).await?;

    let end = Local::now();
    #[allow(clippy::cast_precision_loss)]
    let elapsed_minutes = (end - start).num_milliseconds() as f64 / 60_000.0;
    tracing::info!(
        ended_at = %end.format("%d-%m-%Y %H:%M:%S %p"),
        elapsed_minutes = %format!("{elapsed_minutes:.4}"),
        "run finished"
    );

    Ok(match outcome {
        RunOutcome::Completed { .. } => ExitCode::SUCCESS,
        RunOutcome::Aborted { .. } => ExitCode::FAILURE,
    })
}
