use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stint_cli::commands::{
    add, delete, edit, export, history, merge, note, pause, status, toggle, wipe,
};
use stint_cli::{Cli, Commands, Config};
use stint_store::Store;

/// Load config and open the store from its snapshot file.
async fn open_store(config_path: Option<&Path>) -> Result<Store> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(Store::open(&config.data_path).await)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut out = std::io::stdout().lock();
    let tz = Local;
    let now = Utc::now();

    match &cli.command {
        Some(Commands::Status) => {
            let store = open_store(cli.config.as_deref()).await?;
            status::run(&mut out, &store.state(), &tz, now)?;
        }
        Some(Commands::Toggle) => {
            let store = open_store(cli.config.as_deref()).await?;
            toggle::run(&mut out, &store, &tz, now).await?;
            store.flush().await?;
        }
        Some(Commands::History { day, json }) => {
            let store = open_store(cli.config.as_deref()).await?;
            history::run(&mut out, &store.state(), &tz, *day, *json)?;
        }
        Some(Commands::Add { start, end }) => {
            let store = open_store(cli.config.as_deref()).await?;
            add::run(&mut out, &store, &tz, now, start, end).await?;
            store.flush().await?;
        }
        Some(Commands::Edit { id, start, minutes }) => {
            let store = open_store(cli.config.as_deref()).await?;
            edit::run(&mut out, &store, &tz, id, *start, *minutes).await?;
            store.flush().await?;
        }
        Some(Commands::Delete { id }) => {
            let store = open_store(cli.config.as_deref()).await?;
            delete::run(&mut out, &store, id).await?;
            store.flush().await?;
        }
        Some(Commands::Pause { id }) => {
            let store = open_store(cli.config.as_deref()).await?;
            pause::run(&mut out, &store, &tz, id).await?;
            store.flush().await?;
        }
        Some(Commands::Merge { first, second }) => {
            let store = open_store(cli.config.as_deref()).await?;
            merge::run(&mut out, &store, &tz, first, second).await?;
            store.flush().await?;
        }
        Some(Commands::Note { text, time }) => {
            let store = open_store(cli.config.as_deref()).await?;
            note::run(&mut out, &store, &tz, now, text, time.as_deref()).await?;
            store.flush().await?;
        }
        Some(Commands::Export { format, output }) => {
            let store = open_store(cli.config.as_deref()).await?;
            export::run(&mut out, &store.state(), &tz, *format, output.as_deref())?;
        }
        Some(Commands::Wipe { yes }) => {
            let store = open_store(cli.config.as_deref()).await?;
            wipe::run(&mut out, &store, *yes).await?;
            store.flush().await?;
        }
        Some(Commands::DataPath) => {
            let config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            writeln!(out, "{}", config.data_path.display())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
