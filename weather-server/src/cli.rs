use anyhow::Context;
use clap::Parser;
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    sync::Arc,
};
use tokio::net::TcpListener;
use weather_core::{Config, OpenWeatherProvider};
use weather_server::{AppState, router, serve};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Current-weather HTTP proxy")]
pub struct Cli {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Port to listen on, overriding config and environment.
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind, overriding config.
    #[arg(long)]
    pub bind: Option<IpAddr>,
}

impl Cli {
    /// Resolve configuration with command-line flags taking precedence.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut cfg = Config::load(self.config.as_deref())?;

        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(bind) = self.bind {
            cfg.server.bind = bind;
        }

        Ok(cfg)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let cfg = self.load_config()?;
        tracing::info!(
            bind = %cfg.server.bind,
            port = cfg.server.port,
            base_url = %cfg.provider.base_url,
            timeout_secs = cfg.provider.timeout_secs,
            "Configuration loaded"
        );

        let provider = OpenWeatherProvider::new(&cfg.provider)
            .context("Failed to build weather provider client")?;
        let app = router(AppState::new(Arc::new(provider)));

        let addr = SocketAddr::new(cfg.server.bind, cfg.server.port);
        let listener =
            TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {addr}"))?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Weather API listening at http://{local_addr}");

        serve(listener, app).await.context("HTTP server failed")
    }
}
