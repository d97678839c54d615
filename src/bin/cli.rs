// src/bin/cli.rs
use clap::Parser;
use sf6_scrape::cli::{self, Cli};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    cli::run(Cli::parse())
}
