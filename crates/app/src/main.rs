use anyhow::Result;
use tracing::info;

use event_planner_app::bootstrap::{availability_snapshot, build_event_service};
use event_planner_app::config::Config;
use event_planner_app::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    init_logging(&config.logging);

    info!("Starting Event Planner v{}", env!("CARGO_PKG_VERSION"));

    let service = build_event_service(&config).await?;
    info!("Migrations completed");

    availability_snapshot(&service).await?;

    Ok(())
}
