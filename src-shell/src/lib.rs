//! RSVP Shell
//!
//! Drives a [`PageSession`] against a running RSVP server without a
//! webview: load a page, follow routes, print the resulting view state.

use anyhow::Context;
use clap::Parser;
use rsvp_core::{Config, PageSession, PageView};

#[derive(Parser, Debug)]
#[command(name = "rsvp-shell")]
#[command(about = "Walk an RSVP site through the in-page navigation core", long_about = None)]
pub struct Cli {
    /// Server to load pages from
    #[arg(long, env = "RSVP_BASE_URL")]
    pub base_url: Option<String>,

    /// Route of the initial full page load
    #[arg(long, default_value = "/")]
    pub start: String,

    /// Routes to navigate to in order; `back` and `forward` step history
    pub routes: Vec<String>,

    /// Refresh the sidebar guest count before printing
    #[arg(long)]
    pub guests: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl Cli {
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::from_env();
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if self.timeout.is_some() {
            config.request_timeout_secs = self.timeout;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

pub async fn run() -> anyhow::Result<()> {
    rsvp_core::init_logging();

    let cli = Cli::parse();
    let view = walk(&cli).await?;

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Load the start page, then visit every requested route. A failed step
/// leaves the page where it was and the walk continues.
pub async fn walk(cli: &Cli) -> anyhow::Result<PageView> {
    let config = cli.config()?;
    let session = PageSession::open(config, &cli.start)
        .await
        .with_context(|| format!("failed to load {}", cli.start))?;

    tracing::info!(route = %cli.start, "Shell started");

    for step in &cli.routes {
        let result = match step.as_str() {
            "back" => session.back().await,
            "forward" => session.forward().await,
            route => session.navigate(route).await,
        };

        match result {
            Ok(outcome) => tracing::info!(step = %step, outcome = ?outcome, "Step done"),
            Err(e) => tracing::warn!(step = %step, error = %e, "Step failed"),
        }
    }

    if cli.guests {
        if let Ok(count) = session.refresh_guest_count().await {
            tracing::info!(count, "Guests attending");
        }
    }

    Ok(session.view())
}
