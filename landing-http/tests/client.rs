use landing_http::{HttpClient, HttpError, RequestOpts};
use reqwest::StatusCode;
use serde::Deserialize;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AGENT: &str = "Mozilla/5.0 (compatible; GyandhanBot/1.0)";

fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&server.uri())
        .unwrap()
        .with_user_agent(AGENT)
        .unwrap()
        .with_retries(0)
}

#[tokio::test]
async fn get_text_sends_user_agent_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(header("user-agent", AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>events</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get_text("/events", RequestOpts::default())
        .await
        .unwrap();

    assert_eq!(body, "<html>events</html>");
}

#[tokio::test]
async fn not_found_is_an_api_error_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .with_retries(3)
        .get_text("/events", RequestOpts::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    match err {
        HttpError::Api { message, .. } => assert_eq!(message, "missing"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_errors_are_retried_within_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .get_text(
            "/events",
            RequestOpts {
                retries: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(body, "ok");
}

#[tokio::test]
async fn zero_retry_budget_surfaces_the_first_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_text("/events", RequestOpts::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
}

#[derive(Debug, Deserialize)]
struct Payload {
    events: Vec<serde_json::Value>,
}

#[tokio::test]
async fn get_json_decodes_and_reports_bad_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"events":[{"title":"A"}]}"#, "application/json"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ok: Payload = client.get_json("/feed", RequestOpts::default()).await.unwrap();
    assert_eq!(ok.events.len(), 1);

    let err = client
        .get_json::<Payload>("/broken", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Decode(_, ref snippet) if snippet == "not json"));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let client = HttpClient::new("http://127.0.0.1:9").unwrap().with_retries(0);
    let err = client
        .get_text("/events", RequestOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, HttpError::Network(_)));
}
