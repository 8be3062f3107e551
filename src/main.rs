//! Genesis command-line entry point.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

use genesis::events::{Event, EventType};
use genesis::orchestrator::CampaignRequest;
use genesis::policy::{Platform, PlatformPolicy};
use genesis::workflow::Persona;
use genesis::{Genesis, GenesisConfig};

const DEFAULT_LOG_FILTER: &str = "genesis=info";

/// Persona-driven campaign automation
#[derive(Parser)]
#[command(name = "genesis")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Persona-driven campaign automation with budget health tracking")]
struct Cli {
    /// Configuration file (defaults to ./genesis.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard, command and tool API over HTTP
    Serve {
        /// Address to bind (overrides server.bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Serve the tool server over stdio
    Mcp,

    /// Run a single campaign and print its event log
    Run {
        /// Campaign goal
        #[arg(short, long, default_value = "BookedCalls")]
        goal: String,

        /// Target platform (TikTok, Instagram, X, Facebook)
        #[arg(short, long, default_value = "Instagram")]
        platform: Platform,

        /// Persona (Ruby, Streamer, ContentManager)
        #[arg(long)]
        persona: Option<Persona>,

        /// Simulated generation latency in milliseconds
        #[arg(long)]
        latency_ms: Option<u64>,

        /// Print the event log as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the layout constraints for a platform
    Constraints {
        /// Platform name; unknown names get the neutral policy
        platform: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // stdout carries protocol frames for `mcp` and machine output for the rest
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = GenesisConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            let genesis = Genesis::from_config(&config);
            genesis::api::serve(genesis.app_state(), &bind)
                .await
                .with_context(|| format!("Failed to serve on {bind}"))?;
        }
        Commands::Mcp => {
            let genesis = Genesis::from_config(&config);
            tracing::info!("Starting Genesis tool server on stdio");
            let service = genesis
                .tools
                .serve(stdio())
                .await
                .context("Failed to start tool server")?;
            service.waiting().await?;
        }
        Commands::Run {
            goal,
            platform,
            persona,
            latency_ms,
            json,
        } => {
            if let Some(latency_ms) = latency_ms {
                config.generation = config
                    .generation
                    .with_simulated_latency(Duration::from_millis(latency_ms));
            }
            let genesis = Genesis::from_config(&config);
            let mut request = CampaignRequest::new(goal, platform);
            if let Some(persona) = persona {
                request = request.with_persona(persona);
            }
            let outcome = genesis.orchestrator.run_campaign(request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.events)?);
            } else {
                for event in outcome.events.iter().rev() {
                    print_event(event);
                }
                println!();
                print!("{}", genesis.orchestrator.health_report().format());
            }
        }
        Commands::Constraints { platform } => {
            let constraints = PlatformPolicy::new().constraints_for_name(&platform);
            println!("{}", serde_json::to_string_pretty(&constraints)?);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn print_event(event: &Event) {
    let label = format!("{:<8}", event.event_type.as_str());
    let label = match event.event_type {
        EventType::Info => label.blue().to_string(),
        EventType::Action => label.yellow().to_string(),
        EventType::Success => label.green().to_string(),
        EventType::Error => label.red().bold().to_string(),
        EventType::Finance => label.magenta().to_string(),
    };
    println!(
        "{} {} {:<16} {}",
        event.clock_time().dimmed(),
        label,
        event.agent.bold(),
        event.message
    );
}
