//! Switch command - records a new active version without a running server

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct SwitchArgs {
    /// Target version (v1 or v2)
    pub version: String,
}

/// Update the registry and print the written record
pub async fn run(args: SwitchArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config)?;
    let record = state.registry_mutator.switch_version(&args.version).await?;

    info!(version = %record.active_version(), "Registry switched");

    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
