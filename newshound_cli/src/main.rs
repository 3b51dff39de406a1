use clap::Parser;
use owo_colors::OwoColorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod env;
mod output;

use cli::{Cli, Commands};
use commands::*;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose > 0 {
        "newshound_cli=debug,newshound_core=debug"
    } else {
        "newshound_cli=info,newshound_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match &cli.command {
        None => show_overview(&cli),
        Some(Commands::Collect(args)) => collect::run(&cli, args).await,
        Some(Commands::Sources) => sources::run(&cli),
        Some(Commands::Validate) => validate::run(&cli),
        Some(Commands::Config { action }) => config::run(&cli, action.clone()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn show_overview(cli: &Cli) -> commands::Result<()> {
    let config = load_config(cli)?;

    println!();
    println!(
        "{}  {}",
        "Newshound".bold().cyan(),
        "- AI news from many sources".dimmed()
    );
    println!();
    println!(
        "  {} engines configured, {} enabled",
        config.available_engines().len().to_string().green().bold(),
        config.enabled_sources().len().to_string().green()
    );
    println!();
    println!("{}", "Quick Start:".bold().cyan());
    println!(
        "  {}{}",
        "newshound collect \"open weights\"".cyan(),
        "   Collect recent articles".dimmed()
    );
    println!(
        "  {}{}",
        "newshound sources".cyan(),
        "                  Show engines and their state".dimmed()
    );
    println!(
        "  {}{}",
        "newshound config init".cyan(),
        "              Write a starter config file".dimmed()
    );
    println!();
    Ok(())
}
