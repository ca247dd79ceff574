//! Info command - prints the resolved version and artifact availability

use crate::config::AppConfig;
use crate::infrastructure::logging;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config)?;
    let info = state.model_info_service.model_info().await?;

    println!("{}", serde_json::to_string_pretty(&info)?);

    Ok(())
}
