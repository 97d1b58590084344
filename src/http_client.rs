use once_cell::sync::Lazy;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Maximum time a request may stay pending before failing with a timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Shared HTTP client with connection pooling
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(REQUEST_TIMEOUT) // Two minute timeout, plan generation is slow
        .default_headers(headers)
        .pool_max_idle_per_host(5)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .expect("Failed to create HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn timeout_is_two_minutes() {
        assert_eq!(REQUEST_TIMEOUT.as_millis(), 120_000);
    }

    #[test]
    fn shared_client_is_a_single_instance() {
        let first: &Client = &HTTP_CLIENT;
        let second: &Client = &HTTP_CLIENT;
        assert!(std::ptr::eq(first, second));
    }

    #[tokio::test]
    async fn construction_issues_no_requests() {
        let server = MockServer::start().await;

        // Forcing the lazy client must not touch the network.
        let _client: &Client = &HTTP_CLIENT;

        let received = server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn requests_carry_json_content_type_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/probe"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        HTTP_CLIENT
            .get(format!("{}/probe", server.uri()))
            .send()
            .await
            .expect("probe request failed");
    }
}
