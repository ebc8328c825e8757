//! Integration tests — build the router against a wiremock upstream and drive
//! `/api/proxy` and `/api/hello` end to end.

use agentchat_api::config::{ApiConfig, UpstreamConfig};
use agentchat_api::{AppState, router};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREDICT_PATH: &str = "/api/v1/prediction/flow-1";
const TOKEN: &str = "test-token";

fn app_with(upstream: UpstreamConfig) -> Router {
    router(AppState::new(ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        upstream,
    }))
}

fn app_for(server: &MockServer) -> Router {
    app_with(UpstreamConfig::new(
        Some(format!("{}{PREDICT_PATH}", server.uri())),
        Some(TOKEN.into()),
    ))
}

async fn post_proxy(app: Router, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri("/api/proxy")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("parse JSON");
    (status, json)
}

fn hi_request() -> Value {
    json!({ "question": "Hi", "history": [], "overrideConfig": { "sessionId": "u1-abc" } })
}

#[tokio::test]
async fn relays_text_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PREDICT_PATH))
        .and(header_eq("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(body_json(json!({
            "question": "Hi",
            "history": [],
            "overrideConfig": { "sessionId": "u1-abc", "returnSourceDocuments": false }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Hello!" })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_proxy(app_for(&server), hi_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Hello!" }));
}

#[tokio::test]
async fn relays_legacy_reply_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "reply": "Hi there",
            "sourceDocuments": [{ "pageContent": "doc" }]
        })))
        .mount(&server)
        .await;

    let (status, body) = post_proxy(app_for(&server), hi_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Hi there" }));
}

#[tokio::test]
async fn forwards_history_and_source_documents_flag() {
    let server = MockServer::start().await;
    let history = json!([
        { "role": "userMessage", "content": "Hi" },
        { "role": "apiMessage", "content": "Hello!" },
        { "role": "userMessage", "content": "What's new?" }
    ]);
    Mock::given(method("POST"))
        .and(body_json(json!({
            "question": "What's new?",
            "history": history.clone(),
            "overrideConfig": { "sessionId": "u1-abc", "returnSourceDocuments": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Not much." })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _) = post_proxy(
        app_for(&server),
        json!({
            "question": "What's new?",
            "history": history,
            "overrideConfig": { "sessionId": "u1-abc", "returnSourceDocuments": true }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn forwards_history_turns_as_received() {
    let server = MockServer::start().await;
    let history = json!([
        { "role": "user", "content": "earlier" },
        { "role": "apiMessage", "content": "noted", "sourceDocuments": [] }
    ]);
    Mock::given(method("POST"))
        .and(body_json(json!({
            "question": "Hi",
            "history": history.clone(),
            "overrideConfig": { "sessionId": "u1-abc", "returnSourceDocuments": false }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Hello!" })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = post_proxy(
        app_for(&server),
        json!({
            "question": "Hi",
            "history": history,
            "overrideConfig": { "sessionId": "u1-abc" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Hello!" }));
}

#[tokio::test]
async fn body_is_parsed_without_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Hello!" })))
        .expect(1)
        .mount(&server)
        .await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/proxy")
        .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
        .body(Body::from(hi_request().to_string()))
        .unwrap();
    let (status, body) = send(app_for(&server), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Hello!" }));
}

#[tokio::test]
async fn missing_question_makes_no_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_proxy(
        app_for(&server),
        json!({ "history": [], "overrideConfig": { "sessionId": "u1-abc" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Question is required");
}

#[tokio::test]
async fn missing_session_makes_no_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = post_proxy(
        app_for(&server),
        json!({ "question": "Hi", "history": [], "overrideConfig": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "missing 'error' field");
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/proxy")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app_for(&server), req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn upstream_error_status_is_passed_through_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let (status, body) = post_proxy(app_for(&server), hi_request()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Error from prediction API");
    assert!(!body.to_string().contains("unavailable"));
}

#[tokio::test]
async fn large_upstream_error_page_is_not_returned() {
    let server = MockServer::start().await;
    let page = format!("<html>{}</html>", "x".repeat(256 * 1024));
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string(page))
        .mount(&server)
        .await;

    let (status, body) = post_proxy(app_for(&server), hi_request()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "error": "Error from prediction API" }));
}

#[tokio::test]
async fn upstream_without_reply_field_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "?" })))
        .mount(&server)
        .await;

    let (status, body) = post_proxy(app_for(&server), hi_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invalid response format from API");
}

#[tokio::test]
async fn upstream_non_json_success_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let (status, body) = post_proxy(app_for(&server), hi_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invalid response format from API");
    assert!(!body.to_string().contains("oops"));
}

#[tokio::test]
async fn unreachable_upstream_is_a_generic_500() {
    // Bind and drop a listener so its port refuses connections.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr").port()
    };
    let app = app_with(UpstreamConfig::new(
        Some(format!("http://127.0.0.1:{port}{PREDICT_PATH}")),
        Some(TOKEN.into()),
    ));

    let (status, body) = post_proxy(app, hi_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error from prediction API");
}

#[tokio::test]
async fn missing_configuration_does_not_leak_which_value() {
    let app = app_with(UpstreamConfig::new(
        Some("https://agent.example.com/predict".into()),
        None,
    ));

    let (status, body) = post_proxy(app, hi_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server configuration error" }));
}

#[tokio::test]
async fn identical_requests_are_forwarded_twice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "Hello!" })))
        .expect(2)
        .mount(&server)
        .await;

    let app = app_for(&server);
    let (first, _) = post_proxy(app.clone(), hi_request()).await;
    let (second, _) = post_proxy(app, hi_request()).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
}

#[tokio::test]
async fn hello_reports_relay_configuration() {
    let server = MockServer::start().await;
    let req = Request::builder()
        .uri("/api/hello")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app_for(&server), req).await;

    assert_eq!(status, StatusCode::OK);
    let greeting = json["greeting"].as_str().expect("greeting is string");
    assert!(
        greeting.starts_with("Hello from agentchat_core v"),
        "unexpected greeting: {greeting}"
    );
    assert_eq!(json["relayConfigured"], true);
    assert!(!json.to_string().contains(TOKEN));

    let req = Request::builder()
        .uri("/api/hello")
        .body(Body::empty())
        .unwrap();
    let (_, json) = send(app_with(UpstreamConfig::default()), req).await;
    assert_eq!(json["relayConfigured"], false);
}
