use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::params::PlanParams;
use super::plan::TripPlan;

/// Status of a planning run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TripStatus {
    /// Recorded but not yet sent to the backend
    Pending,
    /// Request is in flight
    Planning,
    /// A plan came back
    Completed,
    /// Planning failed
    Failed {
        /// Error message
        error: String,
    },
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripStatus::Pending => write!(f, "pending"),
            TripStatus::Planning => write!(f, "planning"),
            TripStatus::Completed => write!(f, "completed"),
            TripStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

impl TripStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Failed { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TripStatus::Completed)
    }
}

/// A planning run with its parameters and, once finished, the plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTrip {
    /// Unique trip ID (e.g., "tp_ab12cd34")
    pub id: String,

    /// Planning parameters
    pub params: PlanParams,

    /// Current status
    pub status: TripStatus,

    /// The generated plan, present once planning completed
    pub plan: Option<TripPlan>,

    /// Where the plan JSON was written, if exported
    pub saved_path: Option<String>,

    /// When the trip was created
    pub created_at: DateTime<Utc>,

    /// When the trip was last updated
    pub updated_at: DateTime<Utc>,
}

impl SavedTrip {
    /// Create a new pending planning run
    pub fn new(params: PlanParams) -> Self {
        let uuid = Uuid::new_v4();
        let id = format!("tp_{}", &uuid.simple().to_string()[..8]);
        let now = Utc::now();

        Self {
            id,
            params,
            status: TripStatus::Pending,
            plan: None,
            saved_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the request as in flight
    pub fn set_planning(&mut self) {
        self.status = TripStatus::Planning;
        self.updated_at = Utc::now();
    }

    /// Store the returned plan and mark the run completed
    pub fn set_completed(&mut self, plan: TripPlan) {
        self.plan = Some(plan);
        self.status = TripStatus::Completed;
        self.updated_at = Utc::now();
    }

    /// Mark the run as failed
    pub fn set_failed(&mut self, error: impl Into<String>) {
        self.status = TripStatus::Failed {
            error: error.into(),
        };
        self.updated_at = Utc::now();
    }

    /// Record where the plan JSON was exported
    pub fn set_saved_path(&mut self, path: impl Into<String>) {
        self.saved_path = Some(path.into());
        self.updated_at = Utc::now();
    }

    /// Get the destination (truncated for display)
    pub fn city_preview(&self, max_len: usize) -> String {
        if self.params.city.chars().count() <= max_len {
            self.params.city.clone()
        } else {
            let truncated: String = self
                .params
                .city
                .chars()
                .take(max_len.saturating_sub(3))
                .collect();
            format!("{}...", truncated)
        }
    }

    /// The trip's date range for display
    pub fn date_range(&self) -> String {
        format!("{} - {}", self.params.start_date, self.params.end_date)
    }

    /// Day count label, from the plan when present
    pub fn days_label(&self) -> String {
        let days = self
            .plan
            .as_ref()
            .map(|p| p.travel_days)
            .or(self.params.travel_days);
        match days {
            Some(d) => format!("{}d", d),
            None => "-".to_string(),
        }
    }

    /// Get status as a simple string for filtering
    pub fn status_name(&self) -> &'static str {
        match &self.status {
            TripStatus::Pending => "pending",
            TripStatus::Planning => "planning",
            TripStatus::Completed => "completed",
            TripStatus::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PlanParams {
        PlanParams::new("Kyoto").with_dates("2026-04-01", "2026-04-03")
    }

    fn plan() -> TripPlan {
        TripPlan {
            city: "Kyoto".to_string(),
            start_date: "2026-04-01".to_string(),
            end_date: "2026-04-03".to_string(),
            travel_days: 3,
            overview: None,
            days: Vec::new(),
            tips: None,
        }
    }

    #[test]
    fn new_trip_is_pending_with_prefixed_id() {
        let trip = SavedTrip::new(params());
        assert!(trip.id.starts_with("tp_"));
        assert_eq!(trip.id.len(), 11);
        assert_eq!(trip.status, TripStatus::Pending);
        assert!(trip.plan.is_none());
    }

    #[test]
    fn completing_stores_the_plan() {
        let mut trip = SavedTrip::new(params());
        trip.set_planning();
        assert_eq!(trip.status_name(), "planning");

        trip.set_completed(plan());
        assert!(trip.status.is_success());
        assert!(trip.status.is_terminal());
        assert_eq!(trip.days_label(), "3d");
    }

    #[test]
    fn failing_keeps_the_message() {
        let mut trip = SavedTrip::new(params());
        trip.set_failed("backend unreachable");
        assert_eq!(trip.status_name(), "failed");
        assert!(trip.status.to_string().contains("backend unreachable"));
        assert!(!trip.status.is_success());
    }

    #[test]
    fn city_preview_handles_multibyte_names() {
        let mut p = params();
        p.city = "乌鲁木齐迪化古城历史街区".to_string();
        let trip = SavedTrip::new(p);
        let preview = trip.city_preview(8);
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 8);
    }

    #[test]
    fn date_range_is_human_readable() {
        let trip = SavedTrip::new(params());
        assert_eq!(trip.date_range(), "2026-04-01 - 2026-04-03");
    }
}
