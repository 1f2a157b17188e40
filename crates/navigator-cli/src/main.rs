//! Life Navigator CLI
//!
//! Opens the persisted session, runs one command and prints JSON on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use life_navigator::persistence::Store;
use life_navigator::{load_rules, JsonFileStore, MemoryStore, Navigator, RedisStore, RuleSet};
use navigator_common::{Profile, Task};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{execute, Cli, Commands};
use config::{Config, StoreBackend};

fn main() -> Result<()> {
    // Initialize logging on stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,life_navigator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");
    info!("  Store backend: {}", config.backend);
    info!("  Upcoming window: {} days", config.upcoming_days);

    let rules = match &config.rules_file {
        Some(path) => load_rules(path)?,
        None => RuleSet::builtin(),
    };

    match config.backend {
        StoreBackend::File => {
            info!("  Data directory: {}", config.data_dir.display());
            let navigator = Navigator::with_rules(
                JsonFileStore::new(config.profile_path()),
                JsonFileStore::new(config.tasks_path()),
                rules,
            );
            run(navigator, &config, cli.command)
        }
        StoreBackend::Memory => {
            let navigator = Navigator::with_rules(MemoryStore::new(), MemoryStore::new(), rules);
            run(navigator, &config, cli.command)
        }
        StoreBackend::Redis => {
            info!("  Redis URL: {}", config.redis_url);
            let profile_store = RedisStore::new(&config.redis_url, &config.session, "profile")
                .context("Failed to set up Redis profile store")?;
            let task_store = RedisStore::new(&config.redis_url, &config.session, "tasks")
                .context("Failed to set up Redis task store")?;
            let navigator = Navigator::with_rules(profile_store, task_store, rules);
            run(navigator, &config, cli.command)
        }
    }
}

fn run<P, T>(navigator: Navigator<P, T>, config: &Config, command: Commands) -> Result<()>
where
    P: Store<Profile>,
    T: Store<Vec<Task>>,
{
    let mut navigator = navigator.with_upcoming_days(config.upcoming_days);
    let output = execute(&mut navigator, command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
