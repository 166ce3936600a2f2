use anyhow::Context;
use clap::{Parser, Subcommand};
use configuration::{Config, load_config};
use engine::Supervisor;
use events::{EngineEvent, EventBus};
use gateway::SimulatedGateway;
use risk::AccountRiskGate;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// The main entry point for the Kestrel trading application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from '{}'", cli.config))?;

    match cli.command {
        Commands::Validate => {
            let enabled = config.instruments.iter().filter(|i| i.enabled).count();
            info!(
                instruments = config.instruments.len(),
                enabled, "configuration is valid"
            );
            Ok(())
        }
        Commands::Run(args) => run(config, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A supervised, multi-instrument automated trading engine.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every enabled instrument against the paper gateway.
    Run(RunArgs),
    /// Load and validate the configuration, then exit.
    Validate,
}

#[derive(Parser)]
struct RunArgs {
    /// Seed for the paper gateway's synthetic price path.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

// ==============================================================================
// Run Command Logic
// ==============================================================================

async fn run(config: Config, args: RunArgs) -> anyhow::Result<()> {
    let gateway = SimulatedGateway::new(args.seed);
    for inst in config.instruments.iter().filter(|i| i.enabled) {
        // The paper gateway quotes every symbol as a 5-digit FX pair.
        gateway.add_symbol(&inst.symbol, 1.1000, dec!(0.0001), 5).await;
    }
    let gateway = Arc::new(gateway);
    let risk = Arc::new(AccountRiskGate::new(&config.risk)?);
    let (bus, mut rx) = EventBus::channel();

    // Drain engine notifications into the structured log.
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            log_event(&event);
        }
    });

    let mut supervisor = Supervisor::new(config, gateway, risk, bus);
    let started = supervisor.start_enabled().await?;
    info!(engines = started, "kestrel running, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    info!("shutdown requested, stopping engines");
    supervisor.stop_all().await;
    info!("all engines stopped");
    Ok(())
}

fn log_event(event: &EngineEvent) {
    let symbol = event.symbol();
    match event {
        EngineEvent::EngineStarted { .. } => info!(%symbol, "engine started"),
        EngineEvent::EngineStopped { .. } => info!(%symbol, "engine stopped"),
        EngineEvent::AnalysisStarted { .. } => debug!(%symbol, "analysis started"),
        EngineEvent::TrendDetected { direction, .. } => {
            debug!(%symbol, ?direction, "trend detected")
        }
        EngineEvent::SignalConfirmed {
            direction,
            conditions_met,
            ..
        } => info!(%symbol, ?direction, conditions_met, "signal confirmed"),
        EngineEvent::RiskVetoed { reason, .. } => warn!(%symbol, %reason, "entry vetoed"),
        EngineEvent::OrderPlaced {
            direction,
            ticket,
            price,
            stop_loss,
            take_profit,
            ..
        } => info!(
            %symbol, ?direction, ticket, %price, %stop_loss, %take_profit,
            "order placed"
        ),
        EngineEvent::OrderRejected { reason, .. } => warn!(%symbol, %reason, "order rejected"),
        EngineEvent::CycleFailed { error, .. } => error!(%symbol, %error, "cycle failed"),
    }
}
