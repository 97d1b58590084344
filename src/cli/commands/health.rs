use anyhow::Result;
use colored::Colorize;

use crate::api::TripApiClient;
use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = TripApiClient::from_config(config)?;

    match client.health().await {
        Ok(health) => {
            println!(
                "{} Backend is {} ({} v{})",
                "✓".green(),
                health.status.green(),
                health.service,
                health.version
            );
            println!("{}", format!("Endpoint: {}", client.base_url()).dimmed());
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            eprintln!(
                "{}",
                format!("Is the backend running at {}?", client.base_url()).dimmed()
            );
            return Err(e.into());
        }
    }

    Ok(())
}
