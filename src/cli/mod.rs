pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "trip",
    version,
    about = "🌏 Trip Agent CLI - Plan multi-day city trips with an AI backend",
    long_about = r#"🌏 Trip Agent CLI - Plan multi-day city trips with an AI backend

A CLI front end for the trip planning agent. Describe where and when you want
to travel and get back a day-by-day itinerary with attractions, meals and
hotels. Run without arguments to launch the interactive TUI.

SETUP:
  Start the backend, then point the CLI at it (defaults to localhost):
    export TRIP_API_BASE_URL=http://localhost:8000/api
    trip config set api.base_url http://localhost:8000/api

EXAMPLES:
  Plan a trip:
    trip plan Tokyo --from 2026-04-01 --to 2026-04-03
    trip p Paris --days 5 --prefer food,art
    trip plan Beijing --from 2026-05-01 --days 4 --notes "first visit, slow pace"

  View saved trips:
    trip trips
    trip trips show tp_abc12345
    trip trips --status completed --limit 10

  Manage configuration:
    trip config show
    trip config set defaults.travel_days 5
    trip config set defaults.transportation "public transit"

  Check the backend:
    trip health

  Launch interactive TUI:
    trip

OUTPUT FORMATS:
  --format text   Human-readable output (default)
  --format json   Machine-readable JSON for AI agents
  --format quiet  Minimal output, just the trip ID and saved path

Planning calls the AI backend and can take a couple of minutes for longer
trips. For AI agent integration, use --format json for structured output."#,
    after_help = r#"CONFIGURATION:
  Config file: ~/.config/trip-cli/config.toml (macOS/Linux)
  Database: ~/.local/share/trip-cli/trips.db

  Date format: YYYY-MM-DD (e.g. 2026-04-01)
  Trips are limited to 30 days.

MORE INFO:
  GitHub: https://github.com/trip-agent/trip-agent-cli"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan a new trip
    ///
    /// Sends your destination, dates and preferences to the planning backend
    /// and stores the returned itinerary locally. Completed plans are written
    /// to the configured output directory by default.
    #[command(
        alias = "p",
        after_help = r#"EXAMPLES:
  Basic planning:
    trip plan Tokyo --from 2026-04-01 --to 2026-04-03

  Let the end date follow from a duration:
    trip plan Paris --from 2026-06-10 --days 5

  With preferences and free-form notes:
    trip plan Rome --days 4 --prefer history,food --notes "avoid museums on Monday"

  Choose how to get around and where to stay:
    trip plan Kyoto --days 3 --transport walking --stay "boutique hotel"

  JSON output for AI agents:
    trip plan Lisbon --days 3 --format json

  Custom output directory:
    trip plan Berlin --days 2 --output ./itineraries"#
    )]
    Plan(commands::plan::PlanArgs),

    /// Manage and view saved trips
    ///
    /// View, inspect, and manage your planning history.
    /// All trips are persisted in a local SQLite database.
    #[command(
        alias = "t",
        after_help = r#"EXAMPLES:
  List recent trips:
    trip trips
    trip trips --limit 50

  Filter by status:
    trip trips --status completed
    trip trips --status failed

  View the full itinerary of a trip:
    trip trips show tp_abc12345

  Export a stored itinerary again:
    trip trips export tp_abc12345 --output ./itineraries

  Delete a trip:
    trip trips delete tp_abc12345

  Clear all history:
    trip trips clear --force

  JSON output:
    trip trips --format json"#
    )]
    Trips(commands::trips::TripsArgs),

    /// View or modify configuration
    ///
    /// Manage the backend URL, default trip parameters, and output settings.
    /// Changes are saved to the config file immediately.
    #[command(
        alias = "c",
        after_help = r#"EXAMPLES:
  Show all settings:
    trip config show

  Get a specific value:
    trip config get defaults.travel_days

  Set values:
    trip config set api.base_url http://localhost:8000/api
    trip config set defaults.travel_days 5
    trip config set defaults.preferences "food, history"
    trip config set output.directory ~/Documents/trips

  Show config file path:
    trip config path

  Reset to defaults:
    trip config reset --force

AVAILABLE SETTINGS:
  api.base_url            - Planning backend URL
  defaults.travel_days    - Default trip length in days
  defaults.transportation - How to get around (free text)
  defaults.accommodation  - Where to stay (free text)
  defaults.preferences    - Comma-separated interest tags
  output.directory        - Where to save itineraries
  output.auto_save        - Save completed plans automatically (true/false)
  output.format           - Default output format (text/json)
  tui.show_coordinates    - Show attraction coordinates in the TUI (true/false)
  tui.theme               - TUI theme (dark/light)"#
    )]
    Config(commands::config::ConfigArgs),

    /// Check that the planning backend is reachable
    ///
    /// Probes the backend health endpoint and reports service name and
    /// version. Useful before planning a long trip.
    #[command(after_help = r#"EXAMPLES:
  trip health"#)]
    Health,
}
