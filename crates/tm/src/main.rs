//! Tree menu CLI.
//!
//! Provides commands for:
//! - `draw`: Resolve a menu for a request path and print it
//! - `menus`: List configured menus
//! - `urls`: List named routes available to menu items

mod commands;
mod error;
mod output;
mod registry;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ConfigArgs, DrawArgs, MenusArgs, UrlsArgs};
use output::Output;

/// TM - Navigation menu trees.
#[derive(Parser)]
#[command(name = "tm", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a menu with the active item for a path.
    Draw(DrawArgs),
    /// List configured menus.
    Menus(MenusArgs),
    /// List named URLs.
    Urls(UrlsArgs),
}

impl Commands {
    fn config_args(&self) -> &ConfigArgs {
        match self {
            Self::Draw(args) => &args.config,
            Self::Menus(args) => &args.config,
            Self::Urls(args) => &args.config,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.config_args().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Draw(args) => args.execute(),
        Commands::Menus(args) => args.execute(),
        Commands::Urls(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
