//! Import command handler

use crate::config::Config;

pub async fn cmd_import(config: &Config) -> anyhow::Result<()> {
    let service = crate::build_service(config).await?;

    let stats = service.import().await?;

    println!(
        "Import complete. {} new movies, {} skipped.",
        stats.inserted, stats.skipped
    );

    Ok(())
}
