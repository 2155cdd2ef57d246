//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "vanity")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Configure, price and persist a vanity cabinet assembly")]
pub struct Cli {
    /// Configuration file; defaults to an optional `vanity.toml` in the working directory
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session document to open and update; a new session is started when it does not exist
    #[arg(short, long, global = true)]
    pub session: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the current selection with its quote and parts
    Show {},
    /// Apply `slot=value` changes in order, then save the session
    Set {
        /// Changes such as `breadth=40`, `top=counter-top` or `handle=none`
        #[arg(required = true)]
        changes: Vec<String>,
    },
    /// List the currently selectable choices for a slot
    Options {
        /// Slot name, e.g. `width`
        slot: String,
    },
    /// Inspect the active rule catalog
    Catalog {
        /// Print the full catalog as JSON
        #[arg(long)]
        dump: bool,
    },
}
