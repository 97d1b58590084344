use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

use super::app::{App, AppMode, SettingsField};
use crate::api::TripApiClient;
use crate::core::{PlanParams, SavedTrip};

/// Handle input in main mode
pub async fn handle_main_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.selected_trip = 0,
        KeyCode::End => {
            if !app.trips.is_empty() {
                app.selected_trip = app.trips.len() - 1;
            }
        }

        // Enter input mode
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.mode = AppMode::Input;
            app.clear_messages();
        }

        // View trip details
        KeyCode::Enter => {
            if let Some(trip) = app.selected_trip().cloned() {
                app.current_trip = Some(trip);
                app.detail_scroll = 0;
                app.mode = AppMode::TripDetail;
            }
        }

        // Open settings
        KeyCode::Char('s') => {
            app.mode = AppMode::Settings;
            app.settings_selected = 0;
            app.settings_editing = false;
        }

        // Refresh
        KeyCode::Char('r') => {
            app.load_trips()?;
            app.set_status("Refreshed trip list");
        }

        // Delete trip
        KeyCode::Char('d') => {
            if let Some(trip) = app.selected_trip() {
                let id = trip.id.clone();
                app.db.delete_trip(&id)?;
                app.load_trips()?;
                app.set_status(format!("Deleted trip: {}", id));
            }
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
        }

        _ => {}
    }
    Ok(())
}

/// Handle input in text input mode
pub async fn handle_input_mode(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.mode = AppMode::Main;
            app.input.clear();
            app.cursor_pos = 0;
        }

        KeyCode::Enter => {
            if !app.input.is_empty() {
                let city = app.input.clone();
                app.input.clear();
                app.cursor_pos = 0;
                app.mode = AppMode::Main;

                // Plan a trip with configured defaults
                plan_trip(app, city).await?;
            }
        }

        KeyCode::Char(c) => {
            let idx = app.input_byte_index();
            app.input.insert(idx, c);
            app.cursor_pos += 1;
        }

        KeyCode::Backspace => {
            if app.cursor_pos > 0 {
                app.cursor_pos -= 1;
                let idx = app.input_byte_index();
                app.input.remove(idx);
            }
        }

        KeyCode::Delete => {
            if app.cursor_pos < app.input_char_count() {
                let idx = app.input_byte_index();
                app.input.remove(idx);
            }
        }

        KeyCode::Left => {
            if app.cursor_pos > 0 {
                app.cursor_pos -= 1;
            }
        }

        KeyCode::Right => {
            if app.cursor_pos < app.input_char_count() {
                app.cursor_pos += 1;
            }
        }

        KeyCode::Home => {
            app.cursor_pos = 0;
        }

        KeyCode::End => {
            app.cursor_pos = app.input_char_count();
        }

        _ => {}
    }
    Ok(())
}

/// Handle input in trip detail mode
pub fn handle_trip_detail_input(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
            app.mode = AppMode::Main;
            app.current_trip = None;
            app.detail_scroll = 0;
        }

        // Scroll the itinerary
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::PageUp => {
            app.detail_scroll = app.detail_scroll.saturating_sub(10);
        }
        KeyCode::PageDown => {
            app.detail_scroll = app.detail_scroll.saturating_add(10);
        }
        KeyCode::Home => {
            app.detail_scroll = 0;
        }

        _ => {}
    }
    Ok(())
}

/// Handle input in settings mode
pub fn handle_settings_input(app: &mut App, key: KeyEvent) -> Result<()> {
    let fields = SettingsField::all();

    if app.settings_editing {
        // Editing a text field
        match key.code {
            KeyCode::Esc => {
                app.settings_editing = false;
                app.settings_edit_buffer.clear();
            }

            KeyCode::Enter => {
                let field = fields[app.settings_selected];
                let value = app.settings_edit_buffer.clone();
                if let Err(e) = app.set_settings_value(&field, &value) {
                    app.set_error(e.to_string());
                } else {
                    app.set_status(format!("Updated {}", field.label()));
                }
                app.settings_editing = false;
                app.settings_edit_buffer.clear();
            }

            KeyCode::Char(c) => {
                app.settings_edit_buffer.push(c);
            }

            KeyCode::Backspace => {
                app.settings_edit_buffer.pop();
            }

            _ => {}
        }
    } else {
        // Navigation
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if app.settings_selected > 0 {
                    app.settings_selected -= 1;
                }
            }

            KeyCode::Down | KeyCode::Char('j') => {
                if app.settings_selected < fields.len() - 1 {
                    app.settings_selected += 1;
                }
            }

            // Cycle option fields in place
            KeyCode::Left | KeyCode::Right => {
                let field = &fields[app.settings_selected];
                if app.get_settings_options(field).is_some() {
                    app.cycle_settings_option(field)?;
                    app.set_status(format!("Updated {}", field.label()));
                }
            }

            KeyCode::Enter | KeyCode::Char(' ') => {
                let field = &fields[app.settings_selected];

                // Check if this field has options to cycle
                if app.get_settings_options(field).is_some() {
                    app.cycle_settings_option(field)?;
                    app.set_status(format!("Updated {}", field.label()));
                } else {
                    // Enter edit mode for text fields
                    app.settings_editing = true;
                    app.settings_edit_buffer = app.get_settings_value(field);
                }
            }

            KeyCode::Esc | KeyCode::Char('q') => {
                app.mode = AppMode::Main;
                app.clear_messages();
            }

            _ => {}
        }
    }
    Ok(())
}

/// Plan a trip for a city using the configured defaults.
/// Starts today and runs for the configured number of days.
async fn plan_trip(app: &mut App, city: String) -> Result<()> {
    app.set_status(format!("Planning trip to {}...", city));
    app.planning = true;

    let days = app.config.defaults.travel_days.max(1);
    let start = Local::now().date_naive();
    let end = start + chrono::Duration::days(i64::from(days) - 1);

    let params = PlanParams::new(&city)
        .with_dates(
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        )
        .with_transportation(&app.config.defaults.transportation)
        .with_accommodation(&app.config.defaults.accommodation)
        .with_preferences(app.config.defaults.preferences.clone());

    if let Err(e) = params.validate() {
        app.set_error(e.to_string());
        app.planning = false;
        return Ok(());
    }

    // Create the trip record
    let mut trip = SavedTrip::new(params);
    app.db.insert_trip(&trip)?;

    // Create client
    let client = match TripApiClient::from_config(&app.config) {
        Ok(c) => c,
        Err(e) => {
            trip.set_failed(e.to_string());
            app.db.update_trip(&trip)?;
            app.load_trips()?;
            app.set_error(e.to_string());
            app.planning = false;
            return Ok(());
        }
    };

    trip.set_planning();
    app.db.update_trip(&trip)?;

    match client.plan_trip(&trip.params).await {
        Ok(plan) => {
            let day_count = plan.days.len();
            trip.set_completed(plan);

            // Save if enabled
            if app.config.output.auto_save {
                let output_dir = PathBuf::from(&app.config.output.directory);
                match client.save_plan(&mut trip, &output_dir).await {
                    Ok(path) => {
                        app.set_status(format!(
                            "Planned {} day(s) in {}: {}",
                            day_count, city, path
                        ));
                    }
                    Err(e) => {
                        app.set_error(format!("Save failed: {}", e));
                    }
                }
            } else {
                app.set_status(format!("Planned {} day(s) in {}", day_count, city));
            }
        }
        Err(e) => {
            trip.set_failed(e.to_string());
            app.set_error(e.to_string());
        }
    }

    app.db.update_trip(&trip)?;
    app.load_trips()?;
    app.planning = false;

    Ok(())
}
