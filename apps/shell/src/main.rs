#![allow(clippy::print_stdout)]

mod args;
mod handlers;

use crate::args::{Cli, Commands};
use anyhow::Result;
use clap::Parser;
use vanity::Platform;
use vanity::kernel::config::load_app_config;
use vanity_logger::Logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_app_config(cli.config.as_ref())?;
    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logging)?;
    let platform = Platform::init(&config)?;

    match cli.command {
        Commands::Show {} => handlers::show(&platform, cli.session.as_deref(), cli.json)?,
        Commands::Set { changes } => {
            handlers::set(&platform, cli.session.as_deref(), &changes, cli.json)?;
        },
        Commands::Options { slot } => {
            handlers::options(&platform, cli.session.as_deref(), &slot, cli.json)?;
        },
        Commands::Catalog { dump } => handlers::catalog(&platform, dump)?,
    }

    Ok(())
}
