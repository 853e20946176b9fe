//! kbq CLI entry point.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use kbq::cli::commands::{self, Render};
use kbq::cli::{Cli, Commands};
use kbq::config::Settings;
use kbq::knowledge::KnowledgeSearcher;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("kbq={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if !settings.output.color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    if let Some(Commands::Config { action }) = &cli.command {
        return commands::run_config(action, &settings, cli.config.as_deref());
    }

    let Some(mode) = cli.mode() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let searcher = KnowledgeSearcher::from_settings(&settings, cli.root.as_ref().map(PathBuf::from));
    tracing::debug!("Knowledge root: {:?}", searcher.root());

    commands::run_query(&searcher, mode, Render::new(cli.json, &settings))
}
