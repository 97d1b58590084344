use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::api::TripApiClient;
use crate::config::Config;
use crate::db::Database;

use super::plan::print_plan;

#[derive(Args)]
pub struct TripsArgs {
    #[command(subcommand)]
    pub command: Option<TripsCommand>,

    /// Maximum number of trips to show
    #[arg(short, long, default_value = "20")]
    pub limit: u32,

    /// Filter by status (pending, planning, completed, failed)
    #[arg(short, long)]
    pub status: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Subcommand)]
pub enum TripsCommand {
    /// Show the full itinerary of a specific trip
    Show {
        /// Trip ID
        trip_id: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Write a stored itinerary to disk again
    Export {
        /// Trip ID
        trip_id: String,

        /// Output directory, defaults to the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a trip from history
    Delete {
        /// Trip ID
        trip_id: String,
    },

    /// Clear all trips from history
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn run(args: TripsArgs, config: &Config, db: &Database) -> Result<()> {
    match args.command {
        Some(TripsCommand::Show { trip_id, format }) => show_trip(&trip_id, &format, db),
        Some(TripsCommand::Export { trip_id, output }) => {
            export_trip(&trip_id, output, config, db).await
        }
        Some(TripsCommand::Delete { trip_id }) => delete_trip(&trip_id, db),
        Some(TripsCommand::Clear { force }) => clear_trips(force, db),
        None => list_trips(args.limit, args.status.as_deref(), &args.format, db),
    }
}

fn list_trips(limit: u32, status: Option<&str>, format: &str, db: &Database) -> Result<()> {
    let trips = db.list_trips(limit, status)?;

    if trips.is_empty() {
        if format == "json" {
            println!("[]");
        } else {
            println!("{}", "No trips found.".dimmed());
        }
        return Ok(());
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&trips)?);
        return Ok(());
    }

    // Table header
    println!(
        "{:<12} {:<20} {:<24} {:<6} {:<12} {}",
        "ID".bold(),
        "CITY".bold(),
        "DATES".bold(),
        "DAYS".bold(),
        "STATUS".bold(),
        "CREATED".bold()
    );
    println!("{}", "-".repeat(92));

    for trip in trips {
        let status_colored = match trip.status_name() {
            "completed" => "completed".green().to_string(),
            "failed" => "failed".red().to_string(),
            "planning" => "planning".yellow().to_string(),
            "pending" => "pending".blue().to_string(),
            s => s.to_string(),
        };

        let created = trip.created_at.format("%Y-%m-%d %H:%M").to_string();

        println!(
            "{:<12} {:<20} {:<24} {:<6} {:<12} {}",
            trip.id,
            trip.city_preview(18),
            trip.date_range(),
            trip.days_label(),
            status_colored,
            created.dimmed()
        );
    }

    let count = db.count_trips()?;
    if count as u32 > limit {
        println!();
        println!(
            "{}",
            format!(
                "Showing {} of {} trips. Use --limit to see more.",
                limit, count
            )
            .dimmed()
        );
    }

    Ok(())
}

fn show_trip(trip_id: &str, format: &str, db: &Database) -> Result<()> {
    let trip = db.get_trip(trip_id)?;

    match trip {
        Some(trip) => {
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&trip)?);
            } else {
                println!();
                println!("{}: {}", "Trip ID".cyan().bold(), trip.id);
                println!("{}: {}", "City".cyan().bold(), trip.params.city);
                println!("{}: {}", "Dates".cyan().bold(), trip.date_range());
                println!("{}: {}", "Status".cyan().bold(), trip.status);
                println!(
                    "{}: {}",
                    "Created".cyan().bold(),
                    trip.created_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                println!(
                    "{}: {}",
                    "Updated".cyan().bold(),
                    trip.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
                );
                println!();
                println!("{}:", "Parameters".cyan().bold());
                println!("  Transportation: {}", trip.params.transportation);
                println!("  Accommodation: {}", trip.params.accommodation);
                if !trip.params.preferences.is_empty() {
                    println!("  Preferences: {}", trip.params.preferences.join(", "));
                }
                if let Some(notes) = &trip.params.free_text_input {
                    println!("  Notes: {}", notes);
                }

                if let Some(path) = &trip.saved_path {
                    println!();
                    println!("{}: {}", "Saved file".cyan().bold(), path);
                }

                if let Some(plan) = &trip.plan {
                    println!();
                    print_plan(plan, true);
                }
            }
        }
        None => {
            if format == "json" {
                println!("null");
            } else {
                eprintln!("{}: Trip '{}' not found", "Error".red().bold(), trip_id);
            }
        }
    }

    Ok(())
}

async fn export_trip(
    trip_id: &str,
    output: Option<PathBuf>,
    config: &Config,
    db: &Database,
) -> Result<()> {
    let Some(mut trip) = db.get_trip(trip_id)? else {
        eprintln!("{}: Trip '{}' not found", "Error".red().bold(), trip_id);
        return Ok(());
    };

    if trip.plan.is_none() {
        eprintln!(
            "{}: Trip '{}' has no plan to export",
            "Error".red().bold(),
            trip_id
        );
        return Ok(());
    }

    let client = TripApiClient::from_config(config)?;
    let dir = output.unwrap_or_else(|| PathBuf::from(&config.output.directory));
    let path = client.save_plan(&mut trip, &dir).await?;
    db.update_trip(&trip)?;

    println!("{} Exported {} to {}", "✓".green(), trip.id, path);
    Ok(())
}

fn delete_trip(trip_id: &str, db: &Database) -> Result<()> {
    if db.delete_trip(trip_id)? {
        println!("{} Deleted trip: {}", "✓".green(), trip_id);
    } else {
        eprintln!("{}: Trip '{}' not found", "Error".red().bold(), trip_id);
    }
    Ok(())
}

fn clear_trips(force: bool, db: &Database) -> Result<()> {
    let count = db.count_trips()?;

    if count == 0 {
        println!("{}", "No trips to clear.".dimmed());
        return Ok(());
    }

    if !force {
        eprintln!(
            "{}: This will delete {} trip(s). Use --force to confirm.",
            "Warning".yellow().bold(),
            count
        );
        return Ok(());
    }

    let cleared = db.clear_trips()?;
    println!("{} Cleared {} trip(s)", "✓".green(), cleared);
    Ok(())
}
