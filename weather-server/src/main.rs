//! Binary crate for the `weather-server` proxy.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging bootstrap
//! - Wiring config and the upstream provider into the HTTP server

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    weather_server::logging::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
