use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pestbot_gateway::api::{ApiServer, ApiState};
use pestbot_gateway::{Config, KnowledgeBase};

/// Pest Bot - retrieval-augmented gateway for agricultural pest queries
#[derive(Parser)]
#[command(name = "pestbot", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Directory of CSV/TXT reference files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,pestbot_gateway=info",
        1 => "info,pestbot_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // A missing credential is the one startup error that stops the process
    let config = Config::load_with_options(cli.data_dir, cli.port)?;

    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        model = %config.llm_model,
        "starting pest bot gateway"
    );

    // Loaded exactly once; a missing directory degrades to an empty base
    let knowledge = KnowledgeBase::load(&config.data_dir);

    let state = Arc::new(ApiState::from_config(&config, knowledge));
    ApiServer::new(state, config.port).run().await?;

    Ok(())
}
