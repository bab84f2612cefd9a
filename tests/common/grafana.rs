//! Mock Grafana API built on wiremock

use super::fixtures::{API_KEY, SEARCH_RESPONSE, dashboard_bodies};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start a mock Grafana serving [`SEARCH_RESPONSE`] and [`dashboard_bodies`]
///
/// Requests without the expected bearer token get a 401.
pub async fn start_grafana() -> MockServer {
    let server = MockServer::start().await;
    let auth = format!("Bearer {}", API_KEY);

    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(header("Authorization", auth.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_RESPONSE))
        .mount(&server)
        .await;

    for (uri, body) in dashboard_bodies() {
        let response = match body {
            Some(body) => ResponseTemplate::new(200).set_body_string(body),
            None => ResponseTemplate::new(500),
        };
        Mock::given(method("GET"))
            .and(path(format!("/api/dashboards/{}", uri)))
            .and(header("Authorization", auth.as_str()))
            .respond_with(response)
            .mount(&server)
            .await;
    }

    // Anything not matched above, including requests with a wrong token
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(u8::MAX)
        .mount(&server)
        .await;

    server
}
