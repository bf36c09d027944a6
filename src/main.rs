//! CSV exporter for the Tekniska verken customer portal ("Mina sidor").
//!
//! Logs in with the account credentials, discovers which services the
//! account has, fetches consumption readings at the requested granularity
//! and writes (date, value) CSV rows to stdout. Logs go to stderr so the
//! CSV stream stays clean.

mod cli;
mod config;
mod error;
mod model;
mod output;
mod portal;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    cli.run().await
}
