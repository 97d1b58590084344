mod types;

use std::path::Path;

use reqwest::{Client, Url};
use tokio::fs;

pub use types::*;

use crate::config::Config;
use crate::core::{PlanParams, SavedTrip, TripError, TripPlan};
use crate::http_client::HTTP_CLIENT;

/// Client for the trip planning backend.
pub struct TripApiClient {
    base_url: String,
    http: Client,
}

impl TripApiClient {
    /// Create a client from config. Validates the base URL up front so a
    /// typo in config fails here instead of on the first request.
    pub fn from_config(config: &Config) -> Result<Self, TripError> {
        let base_url = config.api.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            TripError::ConfigError(format!("invalid api.base_url '{}': {}", base_url, e))
        })?;

        Ok(Self {
            base_url,
            http: HTTP_CLIENT.clone(),
        })
    }

    /// Create a client against a specific endpoint with a caller-supplied
    /// transport. Used by tests to point at a local mock server.
    pub fn with_http_client(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a full itinerary for the given parameters. Blocks until the
    /// backend finishes planning, which can take a couple of minutes.
    pub async fn plan_trip(&self, params: &PlanParams) -> Result<TripPlan, TripError> {
        let url = format!("{}/trip/plan", self.base_url);
        let request = self.build_plan_request(params)?;

        tracing::debug!("Sending plan request to: {}", url);
        tracing::debug!("Planning {} for {} days", request.city, request.travel_days);

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("Response status: {}", status);
        tracing::debug!("Response body length: {} bytes", body.len());

        if !status.is_success() {
            // FastAPI errors carry {"detail": "..."}; fall back to the raw
            // body for anything else (proxies, panics).
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.detail)
                .unwrap_or_else(|_| format!("{}: {}", status, body));
            return Err(TripError::ApiError {
                message,
                source: None,
            });
        }

        let envelope: TripPlanResponse = serde_json::from_str(&body)
            .map_err(|e| TripError::InvalidResponse(format!("malformed plan response: {}", e)))?;

        if !envelope.success {
            let message = if envelope.message.is_empty() {
                "backend reported failure".to_string()
            } else {
                envelope.message
            };
            return Err(TripError::PlanningFailed(message));
        }

        envelope.data.ok_or_else(|| {
            TripError::InvalidResponse("success response without plan data".to_string())
        })
    }

    /// Probe the backend health endpoint, which lives at the server root
    /// rather than under the API prefix.
    pub async fn health(&self) -> Result<HealthResponse, TripError> {
        let url = format!("{}/health", self.server_root());
        tracing::debug!("Probing backend health at: {}", url);

        let response = self.http.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TripError::ApiError {
                message: format!("health probe returned {}: {}", status, body),
                source: None,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| TripError::InvalidResponse(format!("malformed health response: {}", e)))
    }

    /// Write a trip's plan to disk as pretty-printed JSON and record the
    /// path on the trip. Returns the path written.
    pub async fn save_plan(
        &self,
        trip: &mut SavedTrip,
        output_dir: &Path,
    ) -> Result<String, TripError> {
        let plan = trip
            .plan
            .as_ref()
            .ok_or_else(|| TripError::PlanningFailed("trip has no plan to save".to_string()))?;

        fs::create_dir_all(output_dir).await?;

        let filename = format!("{}.json", trip.id);
        let path = output_dir.join(&filename);
        let json = serde_json::to_string_pretty(plan)
            .map_err(|e| TripError::InvalidResponse(format!("failed to encode plan: {}", e)))?;
        fs::write(&path, json.as_bytes()).await?;

        let path_str = path.to_string_lossy().to_string();
        trip.set_saved_path(&path_str);
        tracing::info!("Saved plan to: {}", path.display());

        Ok(path_str)
    }

    fn build_plan_request(&self, params: &PlanParams) -> Result<TripPlanRequest, TripError> {
        let travel_days = params.validate()?;

        Ok(TripPlanRequest {
            city: params.city.trim().to_string(),
            start_date: params.start_date.clone(),
            end_date: params.end_date.clone(),
            travel_days,
            transportation: params.transportation.clone(),
            accommodation: params.accommodation.clone(),
            preferences: params.preferences.clone(),
            free_text_input: params.free_text_input.clone(),
        })
    }

    fn server_root(&self) -> &str {
        let base = self.base_url.trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn params() -> PlanParams {
        PlanParams::new("Tokyo").with_dates("2026-04-01", "2026-04-03")
    }

    fn plan_json() -> serde_json::Value {
        json!({
            "city": "Tokyo",
            "start_date": "2026-04-01",
            "end_date": "2026-04-03",
            "travel_days": 3,
            "days": []
        })
    }

    fn client_for(server: &MockServer) -> TripApiClient {
        TripApiClient::with_http_client(format!("{}/api", server.uri()), Client::new())
    }

    #[tokio::test]
    async fn plan_trip_posts_payload_and_returns_plan() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trip/plan"))
            .and(body_partial_json(json!({
                "city": "Tokyo",
                "start_date": "2026-04-01",
                "end_date": "2026-04-03",
                "travel_days": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "ok",
                "data": plan_json()
            })))
            .expect(1)
            .mount(&server)
            .await;

        let plan = client_for(&server).plan_trip(&params()).await.unwrap();
        assert_eq!(plan.city, "Tokyo");
        assert_eq!(plan.travel_days, 3);
    }

    #[tokio::test]
    async fn backend_detail_is_surfaced_on_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trip/plan"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "planning pipeline exploded"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).plan_trip(&params()).await.unwrap_err();
        match err {
            TripError::ApiError { message, .. } => {
                assert!(message.contains("planning pipeline exploded"))
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_raw() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trip/plan"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = client_for(&server).plan_trip(&params()).await.unwrap_err();
        match err {
            TripError::ApiError { message, .. } => assert!(message.contains("Bad Gateway")),
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failure_envelope_maps_to_planning_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trip/plan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "no attractions found",
                "data": null
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).plan_trip(&params()).await.unwrap_err();
        match err {
            TripError::PlanningFailed(message) => assert_eq!(message, "no attractions found"),
            other => panic!("expected PlanningFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn success_without_data_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trip/plan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "ok",
                "data": null
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).plan_trip(&params()).await.unwrap_err();
        assert!(matches!(err, TripError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn slow_backend_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trip/plan"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(json!({"success": true, "data": plan_json()})),
            )
            .mount(&server)
            .await;

        let impatient = Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let client = TripApiClient::with_http_client(format!("{}/api", server.uri()), impatient);

        let err = client.plan_trip(&params()).await.unwrap_err();
        assert!(matches!(err, TripError::Timeout));
    }

    #[tokio::test]
    async fn invalid_params_fail_before_any_request() {
        let server = MockServer::start().await;

        let err = client_for(&server)
            .plan_trip(&PlanParams::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, TripError::InvalidParameter(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn health_probe_hits_server_root_not_api_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "healthy",
                "service": "trip-agent",
                "version": "1.0.0"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let health = client_for(&server).health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.service, "trip-agent");
    }

    #[tokio::test]
    async fn save_plan_writes_json_and_records_path() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let plan: TripPlan = serde_json::from_value(plan_json()).unwrap();
        let mut trip = SavedTrip::new(params());
        trip.set_completed(plan);

        let written = client_for(&server)
            .save_plan(&mut trip, dir.path())
            .await
            .unwrap();

        assert_eq!(trip.saved_path.as_deref(), Some(written.as_str()));
        let contents = std::fs::read_to_string(&written).unwrap();
        let reloaded: TripPlan = serde_json::from_str(&contents).unwrap();
        assert_eq!(reloaded.city, "Tokyo");
    }
}
