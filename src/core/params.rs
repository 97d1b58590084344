use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::TripError;

/// Longest trip the backend planner will accept
pub const MAX_TRAVEL_DAYS: u32 = 30;

/// Parameters for a planning run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanParams {
    /// Destination city
    pub city: String,

    /// First day of the trip (YYYY-MM-DD)
    pub start_date: String,

    /// Last day of the trip (YYYY-MM-DD)
    pub end_date: String,

    /// Number of travel days; derived from the dates when absent
    pub travel_days: Option<u32>,

    /// How to get around (e.g. "public transit", "driving")
    #[serde(default = "default_transportation")]
    pub transportation: String,

    /// Kind of lodging to look for
    #[serde(default = "default_accommodation")]
    pub accommodation: String,

    /// Interest tags; an empty list means "popular picks"
    #[serde(default)]
    pub preferences: Vec<String>,

    /// Free-form extra requirements, passed to the planner verbatim
    pub free_text_input: Option<String>,
}

fn default_transportation() -> String {
    "public transit".to_string()
}

fn default_accommodation() -> String {
    "budget hotel".to_string()
}

impl Default for PlanParams {
    fn default() -> Self {
        Self {
            city: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            travel_days: None,
            transportation: default_transportation(),
            accommodation: default_accommodation(),
            preferences: Vec::new(),
            free_text_input: None,
        }
    }
}

impl PlanParams {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_travel_days(mut self, days: u32) -> Self {
        self.travel_days = Some(days);
        self
    }

    pub fn with_transportation(mut self, transportation: impl Into<String>) -> Self {
        self.transportation = transportation.into();
        self
    }

    pub fn with_accommodation(mut self, accommodation: impl Into<String>) -> Self {
        self.accommodation = accommodation.into();
        self
    }

    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_free_text(mut self, text: impl Into<String>) -> Self {
        self.free_text_input = Some(text.into());
        self
    }

    /// Check the parameters and return the effective travel day count.
    ///
    /// The count is derived from the date range; an explicit `travel_days`
    /// must agree with it.
    pub fn validate(&self) -> Result<u32, TripError> {
        if self.city.trim().is_empty() {
            return Err(TripError::InvalidParameter(
                "city must not be empty".to_string(),
            ));
        }

        let start = parse_date(&self.start_date, "start date")?;
        let end = parse_date(&self.end_date, "end date")?;

        if end < start {
            return Err(TripError::InvalidParameter(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        let span = (end - start).num_days() as u32 + 1;
        if span > MAX_TRAVEL_DAYS {
            return Err(TripError::InvalidParameter(format!(
                "date range covers {} days, the maximum is {}",
                span, MAX_TRAVEL_DAYS
            )));
        }

        if let Some(days) = self.travel_days {
            if days != span {
                return Err(TripError::InvalidParameter(format!(
                    "travel_days is {} but the date range covers {} days",
                    days, span
                )));
            }
        }

        Ok(span)
    }
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, TripError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        TripError::InvalidParameter(format!("{} must be YYYY-MM-DD, got '{}'", field, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> PlanParams {
        PlanParams::new("Kyoto").with_dates("2026-04-01", "2026-04-03")
    }

    #[test]
    fn derives_day_count_from_dates() {
        assert_eq!(base_params().validate().unwrap(), 3);
    }

    #[test]
    fn accepts_matching_explicit_day_count() {
        let params = base_params().with_travel_days(3);
        assert_eq!(params.validate().unwrap(), 3);
    }

    #[test]
    fn rejects_mismatched_day_count() {
        let err = base_params().with_travel_days(5).validate().unwrap_err();
        assert!(matches!(err, TripError::InvalidParameter(_)));
    }

    #[test]
    fn rejects_empty_city() {
        let params = PlanParams::new("  ").with_dates("2026-04-01", "2026-04-03");
        assert!(matches!(
            params.validate(),
            Err(TripError::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_malformed_dates() {
        let params = PlanParams::new("Kyoto").with_dates("04/01/2026", "2026-04-03");
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("start date"));
    }

    #[test]
    fn rejects_inverted_range() {
        let params = PlanParams::new("Kyoto").with_dates("2026-04-05", "2026-04-01");
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_overlong_trips() {
        let params = PlanParams::new("Kyoto").with_dates("2026-04-01", "2026-06-01");
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("maximum"));
    }

    #[test]
    fn single_day_trip_counts_one_day() {
        let params = PlanParams::new("Kyoto").with_dates("2026-04-01", "2026-04-01");
        assert_eq!(params.validate().unwrap(), 1);
    }
}
