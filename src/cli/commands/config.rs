use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::config::Config;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Config key (e.g., api.base_url, defaults.travel_days)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Config key (e.g., api.base_url, defaults.travel_days)
        key: String,
        /// Value to set
        value: String,
    },

    /// Show the config file path
    Path,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(args: ConfigArgs, config: &mut Config) -> Result<()> {
    match args.command {
        Some(ConfigCommand::Show) | None => show_config(config),
        Some(ConfigCommand::Get { key }) => get_config(&key, config),
        Some(ConfigCommand::Set { key, value }) => set_config(&key, &value, config),
        Some(ConfigCommand::Path) => show_path(config),
        Some(ConfigCommand::Reset { force }) => reset_config(force, config),
    }
}

fn show_config(config: &Config) -> Result<()> {
    println!("{}", "Configuration".cyan().bold());
    println!("{}", "=".repeat(50));
    println!();

    println!("[{}]", "api".yellow());
    println!("  {} = {}", "base_url".bold(), config.api.base_url);
    println!();

    println!("[{}]", "defaults".yellow());
    println!("  {} = {}", "travel_days".bold(), config.defaults.travel_days);
    println!(
        "  {} = {}",
        "transportation".bold(),
        config.defaults.transportation
    );
    println!(
        "  {} = {}",
        "accommodation".bold(),
        config.defaults.accommodation
    );
    println!(
        "  {} = {}",
        "preferences".bold(),
        if config.defaults.preferences.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            config.defaults.preferences.join(", ")
        }
    );
    println!();

    println!("[{}]", "output".yellow());
    println!("  {} = {}", "directory".bold(), config.output.directory);
    println!("  {} = {}", "auto_save".bold(), config.output.auto_save);
    println!("  {} = {}", "format".bold(), config.output.format.as_str());
    println!();

    println!("[{}]", "tui".yellow());
    println!(
        "  {} = {}",
        "show_coordinates".bold(),
        config.tui.show_coordinates
    );
    println!("  {} = {}", "theme".bold(), config.tui.theme);
    println!();

    println!(
        "{}",
        format!("Config file: {}", config.config_path.display()).dimmed()
    );

    Ok(())
}

fn get_config(key: &str, config: &Config) -> Result<()> {
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => {
            eprintln!("{}: Unknown config key '{}'", "Error".red().bold(), key);
            eprintln!();
            eprintln!("Available keys:");
            for k in Config::keys() {
                eprintln!("  {}", k);
            }
        }
    }
    Ok(())
}

fn set_config(key: &str, value: &str, config: &mut Config) -> Result<()> {
    config.set(key, value)?;
    config.save()?;

    println!("{} Set {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

fn show_path(config: &Config) -> Result<()> {
    println!("{}", config.config_path.display());
    Ok(())
}

fn reset_config(force: bool, config: &mut Config) -> Result<()> {
    if !force {
        eprintln!(
            "{}: This will reset all configuration to defaults. Use --force to confirm.",
            "Warning".yellow().bold()
        );
        return Ok(());
    }

    // Preserve the path
    let path = config.config_path.clone();

    *config = Config::default();
    config.config_path = path;

    // Environment override still wins after a reset
    if let Ok(url) = std::env::var("TRIP_API_BASE_URL") {
        config.api.base_url = url;
    }

    config.save()?;

    println!("{} Configuration reset to defaults", "✓".green());
    Ok(())
}
