use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use floodlens::configuration::{BackendKind, FloodLensConfig};
use floodlens::llm_handlers::traits::Llm;
use floodlens::server::{self, AppState};
use floodlens::warmup::spawn_warmup;

/// Flood risk explanations backed by a text-generation model.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// YAML configuration file. Defaults to ~/.config/floodlens.yaml when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8000.
    #[arg(short, long)]
    listen: Option<String>,

    /// Backend to forward prompts to.
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,

    /// Skip priming the local model at startup.
    #[arg(long)]
    no_warmup: bool,
}

fn load_config(args: &Args) -> anyhow::Result<FloodLensConfig> {
    let mut config = FloodLensConfig::load(args.config.as_deref())?;
    if let Some(listen) = &args.listen {
        config.server.listen = listen.clone();
    }
    if let Some(kind) = args.backend {
        config.backend.switch_to(kind);
    }
    if args.no_warmup {
        config.backend.warmup = false;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    floodlens::logging::init(&config.logging)?;

    let llm = Arc::new(Llm::from_config(&config.backend)?);
    log::info!(
        "using {} backend, model {} at {}",
        llm.name(),
        config.backend.model(),
        config.backend.base_url()
    );
    if let Some(var) = llm.missing_credential() {
        log::warn!("{var} is not set; every explanation request will report an error");
    }

    if config.backend.warmup && llm.benefits_from_warmup() {
        // Detached, never awaited.
        spawn_warmup(llm.clone());
    }

    let listener = TcpListener::bind(&config.server.listen)
        .await
        .with_context(|| format!("cannot listen on {}", config.server.listen))?;
    log::info!("listening on http://{}", listener.local_addr()?);

    server::serve(listener, Arc::new(AppState::new(llm))).await
}
