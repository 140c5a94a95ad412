//! Stats command - One-shot dump of the dashboard figures.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::{ServiceContainer, Services};

/// Execute the stats command
pub async fn execute(config: Config) -> AppResult<()> {
    let services = Services::from_config(&config);
    let stats = services.dashboard().stats().await?;

    let json = serde_json::to_string_pretty(&stats)
        .map_err(|e| AppError::internal(e.to_string()))?;
    println!("{json}");

    Ok(())
}
