use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::TripApiClient;
use crate::config::Config;
use crate::core::{PlanParams, SavedTrip, TripPlan};
use crate::db::Database;

#[derive(Args)]
pub struct PlanArgs {
    /// Destination city
    #[arg(required = true)]
    pub city: String,

    /// Start date (YYYY-MM-DD), defaults to today
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub to: Option<String>,

    /// Trip length in days, used when --to is omitted
    #[arg(short, long)]
    pub days: Option<u32>,

    /// How to get around (e.g. "public transit", "walking")
    #[arg(long)]
    pub transport: Option<String>,

    /// Where to stay (e.g. "budget hotel", "hostel")
    #[arg(long)]
    pub stay: Option<String>,

    /// Comma-separated interest tags (e.g. "food,history")
    #[arg(long, value_name = "TAGS")]
    pub prefer: Option<String>,

    /// Free-form notes passed to the planner
    #[arg(long)]
    pub notes: Option<String>,

    /// Output directory for saved itineraries
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Don't save the completed plan to disk
    #[arg(long)]
    pub no_save: bool,

    /// Output format (text, json, quiet)
    #[arg(short, long)]
    pub format: Option<String>,
}

pub async fn run(args: PlanArgs, config: &Config, db: &Database) -> Result<()> {
    let format = args
        .format
        .clone()
        .unwrap_or_else(|| config.output.format.as_str().to_string());

    // Build parameters from flags, falling back to configured defaults
    let (start_date, end_date) = resolve_dates(&args, config)?;

    let preferences = match &args.prefer {
        Some(tags) => tags
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => config.defaults.preferences.clone(),
    };

    let mut params = PlanParams::new(&args.city)
        .with_dates(start_date, end_date)
        .with_transportation(
            args.transport
                .as_deref()
                .unwrap_or(&config.defaults.transportation),
        )
        .with_accommodation(args.stay.as_deref().unwrap_or(&config.defaults.accommodation))
        .with_preferences(preferences);
    if let Some(days) = args.days {
        params = params.with_travel_days(days);
    }
    if let Some(notes) = &args.notes {
        params = params.with_free_text(notes);
    }

    // Reject bad input before anything is stored
    params.validate()?;

    // Create the trip record
    let mut trip = SavedTrip::new(params);
    db.insert_trip(&trip)?;

    // Create API client
    let client = TripApiClient::from_config(config)?;

    // Show progress
    let pb = if format == "text" {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.yellow} {msg}")
                .unwrap(),
        );
        pb.set_message(format!(
            "Planning {} in {}...",
            trip.days_label(),
            trip.city_preview(40)
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    // Mark the request as in flight
    trip.set_planning();
    db.update_trip(&trip)?;

    match client.plan_trip(&trip.params).await {
        Ok(plan) => {
            trip.set_completed(plan);
            db.update_trip(&trip)?;
        }
        Err(e) => {
            trip.set_failed(e.to_string());
            db.update_trip(&trip)?;

            if let Some(pb) = pb {
                pb.finish_with_message(format!("{} Planning failed", "✗".red()));
            }

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&trip)?);
            } else if format != "quiet" {
                eprintln!("{}: {}", "Error".red().bold(), e);
            }
            return Err(e.into());
        }
    }

    // Save the itinerary
    let output_dir = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    let mut saved_path = None;
    if !args.no_save && config.output.auto_save {
        let path = client.save_plan(&mut trip, &output_dir).await?;
        db.update_trip(&trip)?;
        saved_path = Some(path);
    }

    if let Some(pb) = &pb {
        let day_count = trip.plan.as_ref().map(|p| p.days.len()).unwrap_or(0);
        pb.finish_with_message(format!(
            "{} Planned {} day(s) in {}",
            "✓".green(),
            day_count,
            trip.params.city
        ));
    }

    // Display based on format
    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&trip)?);
        }
        "quiet" => {
            println!("{}", trip.id);
            if let Some(path) = &saved_path {
                println!("{}", path);
            }
        }
        _ => {
            println!();
            println!("{}: {}", "Trip ID".cyan().bold(), trip.id);
            println!("{}: {}", "City".cyan().bold(), trip.params.city);
            println!("{}: {}", "Dates".cyan().bold(), trip.date_range());
            println!("{}: {}", "Status".cyan().bold(), "completed".green());
            if let Some(path) = &saved_path {
                println!("{}: {}", "Saved to".cyan().bold(), path);
            }
            if let Some(plan) = &trip.plan {
                println!();
                print_plan(plan, true);
            }
        }
    }

    Ok(())
}

/// Work out start and end dates from flags and config defaults.
/// When --to is omitted the end date follows from the trip length.
fn resolve_dates(args: &PlanArgs, config: &Config) -> Result<(String, String)> {
    let start = match &args.from {
        Some(s) => s.clone(),
        None => Local::now().date_naive().format("%Y-%m-%d").to_string(),
    };

    let end = match &args.to {
        Some(e) => e.clone(),
        None => {
            let days = args.days.unwrap_or(config.defaults.travel_days);
            if days == 0 {
                anyhow::bail!("Trip length must be at least 1 day");
            }
            let start_date = NaiveDate::parse_from_str(&start, "%Y-%m-%d")
                .with_context(|| format!("Invalid start date '{}', expected YYYY-MM-DD", start))?;
            (start_date + chrono::Duration::days(i64::from(days) - 1))
                .format("%Y-%m-%d")
                .to_string()
        }
    };

    Ok((start, end))
}

/// Print a day-by-day itinerary to stdout
pub fn print_plan(plan: &TripPlan, show_coordinates: bool) {
    if let Some(overview) = &plan.overview {
        println!("{}", overview);
        println!();
    }

    for day in &plan.days {
        let mut header = format!("Day {}", day.day);
        if !day.date.is_empty() {
            header.push_str(&format!(" ({})", day.date));
        }
        if let Some(weather) = &day.weather {
            header.push_str(&format!("  {}", weather));
        }
        println!("{}", header.cyan().bold());

        for attraction in &day.attractions {
            match (show_coordinates, attraction.latitude, attraction.longitude) {
                (true, Some(lat), Some(lng)) => println!(
                    "  {} {} ({:.4}, {:.4})",
                    "•".yellow(),
                    attraction.name.bold(),
                    lat,
                    lng
                ),
                _ => println!("  {} {}", "•".yellow(), attraction.name.bold()),
            }
            if let Some(duration) = &attraction.visit_duration {
                println!("    {}", duration.dimmed());
            }
            if let Some(description) = &attraction.description {
                println!("    {}", description);
            }
        }

        let meals = &day.meals;
        if meals.breakfast.is_some() || meals.lunch.is_some() || meals.dinner.is_some() {
            println!("  {}", "Meals".bold());
            if let Some(b) = &meals.breakfast {
                println!("    Breakfast: {}", b);
            }
            if let Some(l) = &meals.lunch {
                println!("    Lunch: {}", l);
            }
            if let Some(d) = &meals.dinner {
                println!("    Dinner: {}", d);
            }
        }

        if let Some(hotel) = &day.hotel {
            match &hotel.price_range {
                Some(price) => println!("  {} {} ({})", "Hotel:".bold(), hotel.name, price),
                None => println!("  {} {}", "Hotel:".bold(), hotel.name),
            }
            if let Some(address) = &hotel.address {
                println!("    {}", address);
            }
            if let Some(reason) = &hotel.reason {
                println!("    {}", reason.dimmed());
            }
        }

        if let Some(note) = &day.transport_note {
            println!("  {} {}", "Transport:".bold(), note);
        }

        println!();
    }

    if let Some(tips) = &plan.tips {
        if !tips.is_empty() {
            println!("{}", "Tips".cyan().bold());
            for tip in tips {
                println!("  - {}", tip);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(city: &str) -> PlanArgs {
        PlanArgs {
            city: city.to_string(),
            from: None,
            to: None,
            days: None,
            transport: None,
            stay: None,
            prefer: None,
            notes: None,
            output: None,
            no_save: false,
            format: None,
        }
    }

    #[test]
    fn explicit_dates_pass_through() {
        let mut a = args("Tokyo");
        a.from = Some("2026-04-01".to_string());
        a.to = Some("2026-04-05".to_string());

        let (start, end) = resolve_dates(&a, &Config::default()).unwrap();
        assert_eq!(start, "2026-04-01");
        assert_eq!(end, "2026-04-05");
    }

    #[test]
    fn end_date_follows_from_days() {
        let mut a = args("Tokyo");
        a.from = Some("2026-04-01".to_string());
        a.days = Some(3);

        let (start, end) = resolve_dates(&a, &Config::default()).unwrap();
        assert_eq!(start, "2026-04-01");
        assert_eq!(end, "2026-04-03");
    }

    #[test]
    fn configured_length_fills_in_when_no_flags() {
        let mut a = args("Tokyo");
        a.from = Some("2026-12-31".to_string());

        let mut config = Config::default();
        config.defaults.travel_days = 2;

        let (_, end) = resolve_dates(&a, &config).unwrap();
        assert_eq!(end, "2027-01-01");
    }

    #[test]
    fn garbled_start_date_is_rejected() {
        let mut a = args("Tokyo");
        a.from = Some("April 1st".to_string());
        a.days = Some(2);

        assert!(resolve_dates(&a, &Config::default()).is_err());
    }
}
