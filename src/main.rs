use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use siteline::config::SiteConfig;
use siteline::ingress::HttpIngress;
use siteline::site::Siteline;
use siteline::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize telemetry
    telemetry::init();
    info!("Starting siteline");

    // Parse configuration from CLI arguments
    let config = SiteConfig::parse();
    info!(
        "Configuration: bind_addr={}, datastore={:?}, mailer={:?}, cooldown_secs={}",
        config.bind_addr, config.datastore, config.mailer, config.cooldown_secs
    );

    // Initialize the orchestrator and expose it over HTTP
    let bind_addr = config.bind_addr.clone();
    let app = Arc::new(Siteline::initialize(config)?);
    let mut ingress = HttpIngress::new(bind_addr, Arc::clone(&app));
    ingress.open().await?;

    tokio::signal::ctrl_c().await?;
    ingress.close().await?;

    info!("siteline shutdown complete");
    Ok(())
}
