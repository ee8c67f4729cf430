//! Binary entrypoint for the quickmenu launcher.

use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*};

/// Event-loop wiring: the UI-owning thread and the signals marshaled onto it.
mod app;
/// Hotkey spec parsing and the background listener thread.
mod hotkey;
/// Best-effort global pointer position, per platform.
mod pointer;
/// Platform shell: the capture surface, native menus, and the modal call.
mod shell;
/// Real collaborators: launch paths, error dialogs, file config source.
mod system;

#[derive(Parser, Debug)]
#[command(name = "quickmenu", about = "A global-hotkey popup menu", version)]
/// Command-line interface for the `quickmenu` binary.
struct Cli {
    /// Optional subcommand.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: logging::LogArgs,

    /// Optional path to the menu document
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate the menu document then exit.
    Check {
        /// Path to the document to check (defaults to ~/.quickmenu/menu.yaml)
        path: Option<PathBuf>,

        /// Dump the validated configuration as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(logging::env_filter_from_spec(&cli.log.spec()))
        .init();

    match cli.command {
        Some(Command::Check { path, dump }) => run_check(path.or(cli.config), dump),
        None => app::run(cli.config),
    }
}

/// Load and validate the document, reporting success or a pretty error.
fn run_check(path: Option<PathBuf>, dump: bool) {
    let path = config::resolve_config_path(path.as_deref());
    match config::load_from_path(&path) {
        Ok(cfg) => {
            if dump {
                match serde_json::to_string_pretty(&cfg) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprintln!("Failed to encode configuration: {}", err);
                        process::exit(1);
                    }
                }
            } else {
                println!(
                    "OK: {} ({} top-level entries, hotkey {})",
                    path.display(),
                    cfg.menu.len(),
                    cfg.hotkey
                );
            }
        }
        Err(err) => {
            eprintln!("{}", err.pretty());
            process::exit(1);
        }
    }
}
