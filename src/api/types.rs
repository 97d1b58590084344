use serde::{Deserialize, Serialize};

use crate::core::TripPlan;

/// Request body for the trip/plan endpoint
#[derive(Debug, Serialize)]
pub struct TripPlanRequest {
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    pub travel_days: u32,
    pub transportation: String,
    pub accommodation: String,
    pub preferences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text_input: Option<String>,
}

/// Response envelope for trip/plan
#[derive(Debug, Deserialize)]
pub struct TripPlanResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<TripPlan>,
}

/// Error body the backend sends on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

/// Response from the root health endpoint
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_snake_case_and_skips_empty_notes() {
        let request = TripPlanRequest {
            city: "Kyoto".to_string(),
            start_date: "2026-04-01".to_string(),
            end_date: "2026-04-03".to_string(),
            travel_days: 3,
            transportation: "public transit".to_string(),
            accommodation: "budget hotel".to_string(),
            preferences: vec!["history".to_string(), "food".to_string()],
            free_text_input: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["city"], "Kyoto");
        assert_eq!(value["start_date"], "2026-04-01");
        assert_eq!(value["travel_days"], 3);
        assert_eq!(value["preferences"][1], "food");
        assert!(value.get("free_text_input").is_none());
    }

    #[test]
    fn request_keeps_notes_when_present() {
        let request = TripPlanRequest {
            city: "Kyoto".to_string(),
            start_date: "2026-04-01".to_string(),
            end_date: "2026-04-03".to_string(),
            travel_days: 3,
            transportation: "walking".to_string(),
            accommodation: "hostel".to_string(),
            preferences: Vec::new(),
            free_text_input: Some("more museums please".to_string()),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["free_text_input"], "more museums please");
    }

    #[test]
    fn envelope_parses_failure_without_data() {
        let json = r#"{"success": false, "message": "planner unavailable", "data": null}"#;
        let response: TripPlanResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.message, "planner unavailable");
        assert!(response.data.is_none());
    }

    #[test]
    fn error_body_parses_fastapi_detail() {
        let json = r#"{"detail": "Trip planning failed: model timeout"}"#;
        let body: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert!(body.detail.contains("model timeout"));
    }

    #[test]
    fn health_parses_backend_shape() {
        let json = r#"{"status": "healthy", "service": "Trip Agent", "version": "1.0.0"}"#;
        let health: HealthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, "1.0.0");
    }
}
