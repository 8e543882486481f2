mod config;
mod list;
mod view;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file to read, created with defaults if missing
    #[arg(long, default_value = Config::FILENAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load every case and print one page of the table
    List(list::ListArgs),
    /// Print statistics and chart paths for a case's tracks
    View(view::ViewArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("vitaldb=info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(&args.config)?;
    config.save(&args.config)?;

    match args.command {
        Command::List(list_args) => list::run(&config, list_args),
        Command::View(view_args) => view::run(&config, view_args),
    }
}
