use crate::config::Config;
use crate::core::SavedTrip;
use crate::db::Database;
use anyhow::Result;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Main view with trip list
    Main,
    /// Text input mode
    Input,
    /// Viewing a trip's itinerary
    TripDetail,
    /// Settings screen
    Settings,
}

/// Settings field being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    BaseUrl,
    TravelDays,
    Transportation,
    Accommodation,
    Preferences,
    OutputDirectory,
    AutoSave,
    Format,
    ShowCoordinates,
    Theme,
}

impl SettingsField {
    pub fn all() -> &'static [SettingsField] {
        &[
            SettingsField::BaseUrl,
            SettingsField::TravelDays,
            SettingsField::Transportation,
            SettingsField::Accommodation,
            SettingsField::Preferences,
            SettingsField::OutputDirectory,
            SettingsField::AutoSave,
            SettingsField::Format,
            SettingsField::ShowCoordinates,
            SettingsField::Theme,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::BaseUrl => "Backend URL",
            SettingsField::TravelDays => "Trip Length (days)",
            SettingsField::Transportation => "Transportation",
            SettingsField::Accommodation => "Accommodation",
            SettingsField::Preferences => "Preferences",
            SettingsField::OutputDirectory => "Output Directory",
            SettingsField::AutoSave => "Auto Save",
            SettingsField::Format => "Output Format",
            SettingsField::ShowCoordinates => "Show Coordinates",
            SettingsField::Theme => "Theme",
        }
    }

    pub fn config_key(&self) -> &'static str {
        match self {
            SettingsField::BaseUrl => "api.base_url",
            SettingsField::TravelDays => "defaults.travel_days",
            SettingsField::Transportation => "defaults.transportation",
            SettingsField::Accommodation => "defaults.accommodation",
            SettingsField::Preferences => "defaults.preferences",
            SettingsField::OutputDirectory => "output.directory",
            SettingsField::AutoSave => "output.auto_save",
            SettingsField::Format => "output.format",
            SettingsField::ShowCoordinates => "tui.show_coordinates",
            SettingsField::Theme => "tui.theme",
        }
    }
}

/// TUI application state
pub struct App {
    /// Current mode
    pub mode: AppMode,

    /// Configuration
    pub config: Config,

    /// Database
    pub db: Database,

    /// Current city input
    pub input: String,

    /// Cursor position in input, counted in characters
    pub cursor_pos: usize,

    /// Trip list
    pub trips: Vec<SavedTrip>,

    /// Selected trip index
    pub selected_trip: usize,

    /// Currently viewing trip (for detail view)
    pub current_trip: Option<SavedTrip>,

    /// Scroll offset in the detail view
    pub detail_scroll: u16,

    /// Status message
    pub status_message: Option<String>,

    /// Error message
    pub error_message: Option<String>,

    /// Whether to quit
    pub should_quit: bool,

    /// Whether config was changed
    pub config_changed: bool,

    /// Settings: selected field index
    pub settings_selected: usize,

    /// Settings: currently editing
    pub settings_editing: bool,

    /// Settings: edit buffer
    pub settings_edit_buffer: String,

    /// Planning request in flight
    pub planning: bool,
}

impl App {
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            mode: AppMode::Main,
            config,
            db,
            input: String::new(),
            cursor_pos: 0,
            trips: Vec::new(),
            selected_trip: 0,
            current_trip: None,
            detail_scroll: 0,
            status_message: None,
            error_message: None,
            should_quit: false,
            config_changed: false,
            settings_selected: 0,
            settings_editing: false,
            settings_edit_buffer: String::new(),
            planning: false,
        }
    }

    /// Load trips from database
    pub fn load_trips(&mut self) -> Result<()> {
        self.trips = self.db.list_trips(50, None)?;
        if self.selected_trip >= self.trips.len() && !self.trips.is_empty() {
            self.selected_trip = self.trips.len() - 1;
        }
        Ok(())
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
        self.status_message = None;
    }

    /// Clear messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    /// Get the currently selected trip
    pub fn selected_trip(&self) -> Option<&SavedTrip> {
        self.trips.get(self.selected_trip)
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        if self.selected_trip > 0 {
            self.selected_trip -= 1;
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected_trip < self.trips.len().saturating_sub(1) {
            self.selected_trip += 1;
        }
    }

    /// Byte offset of the cursor in the input string.
    /// City names are often multi-byte, so the cursor counts characters.
    pub fn input_byte_index(&self) -> usize {
        self.input
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_pos)
            .unwrap_or(self.input.len())
    }

    /// Number of characters in the input
    pub fn input_char_count(&self) -> usize {
        self.input.chars().count()
    }

    /// Get current settings value
    pub fn get_settings_value(&self, field: &SettingsField) -> String {
        match field {
            SettingsField::BaseUrl => self.config.api.base_url.clone(),
            SettingsField::TravelDays => self.config.defaults.travel_days.to_string(),
            SettingsField::Transportation => self.config.defaults.transportation.clone(),
            SettingsField::Accommodation => self.config.defaults.accommodation.clone(),
            SettingsField::Preferences => self.config.defaults.preferences.join(", "),
            SettingsField::OutputDirectory => self.config.output.directory.clone(),
            SettingsField::AutoSave => self.config.output.auto_save.to_string(),
            SettingsField::Format => self.config.output.format.as_str().to_string(),
            SettingsField::ShowCoordinates => self.config.tui.show_coordinates.to_string(),
            SettingsField::Theme => self.config.tui.theme.clone(),
        }
    }

    /// Set settings value
    pub fn set_settings_value(&mut self, field: &SettingsField, value: &str) -> Result<()> {
        self.config.set(field.config_key(), value)?;
        self.config_changed = true;
        Ok(())
    }

    /// Get options for a settings field (if applicable)
    pub fn get_settings_options(&self, field: &SettingsField) -> Option<Vec<&'static str>> {
        match field {
            SettingsField::Transportation => Some(Config::transport_modes().to_vec()),
            SettingsField::Accommodation => Some(Config::accommodation_types().to_vec()),
            SettingsField::AutoSave => Some(vec!["true", "false"]),
            SettingsField::Format => Some(crate::config::PlanFormat::variants().to_vec()),
            SettingsField::ShowCoordinates => Some(vec!["true", "false"]),
            SettingsField::Theme => Some(vec!["dark", "light"]),
            _ => None,
        }
    }

    /// Cycle to next option for a settings field
    pub fn cycle_settings_option(&mut self, field: &SettingsField) -> Result<()> {
        if let Some(options) = self.get_settings_options(field) {
            let current = self.get_settings_value(field);
            let current_idx = options.iter().position(|&o| o == current).unwrap_or(0);
            let next_idx = (current_idx + 1) % options.len();
            self.set_settings_value(field, options[next_idx])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("t.db")).unwrap();
        (dir, App::new(Config::default(), db))
    }

    #[test]
    fn cursor_byte_index_handles_wide_characters() {
        let (_dir, mut app) = test_app();

        app.input = "北京".to_string();
        app.cursor_pos = 1;
        assert_eq!(app.input_byte_index(), 3);

        app.cursor_pos = 2;
        assert_eq!(app.input_byte_index(), 6);
        assert_eq!(app.input_char_count(), 2);
    }

    #[test]
    fn settings_fields_map_to_real_config_keys() {
        let (_dir, app) = test_app();

        for field in SettingsField::all() {
            assert!(
                Config::keys().contains(&field.config_key()),
                "{} is not a config key",
                field.config_key()
            );
            // Every field must have a readable value
            let _ = app.get_settings_value(field);
        }
    }
}
