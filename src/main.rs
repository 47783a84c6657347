//! Binary entrypoint for the guild portal.
//!
//! Commands:
//! - `serve` (default) - run the portal web server
//! - `init` - write a starter `config.toml`
//! - `add-monster` / `remove-monster` - mutate the persisted bestiary
//! - `find-monsters` - query the bestiary by weakness

use std::sync::Arc;

use clap::{Parser, Subcommand};

mod admin;
mod config;
mod guard;
mod handler;
mod http;
mod logger;
mod model;
mod render;
mod server;
mod session;
mod store;

#[derive(Parser)]
#[command(name = "witcher-portal")]
#[command(about = "A guild portal demo web application")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (without extension)
    #[arg(short, long, default_value = "config", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the portal web server
    Serve,
    /// Write a starter config.toml
    Init,
    /// Add a monster to the bestiary
    AddMonster,
    /// Remove monsters from the bestiary by exact name
    RemoveMonster,
    /// List monsters with an exact weakness match
    FindMonsters,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(&cli.config),
        Commands::Init => admin::init_config("config.toml").map_err(Into::into),
        Commands::AddMonster => with_state(&cli.config, |state| admin::add_monster(state)),
        Commands::RemoveMonster => with_state(&cli.config, |state| admin::remove_monster(state)),
        Commands::FindMonsters => with_state(&cli.config, |state| admin::find_monsters(state)),
    }
}

/// Load config and state for an admin console command
fn with_state(
    config_path: &str,
    op: impl FnOnce(&mut config::AppState) -> Result<(), String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from(config_path)?;
    logger::init(&cfg)?;

    let mut state = config::AppState::new(cfg);
    op(&mut state).map_err(Into::into)
}

/// Run the web server on a tokio runtime sized from the config
fn serve(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load_from(config_path)?;
    cfg.require_session_secret()?;
    logger::init(&cfg)?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_serve(cfg))
}

async fn async_serve(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(config::AppState::new(cfg));
    server::run(listener, state).await
}
