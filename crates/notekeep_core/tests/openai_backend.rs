use chrono::{TimeZone, Utc};
use mockito::{Matcher, Server};
use notekeep_core::analysis::parse_model_reply;
use notekeep_core::{
    AnalysisConfig, AnalysisService, BackendError, CompletionBackend, CompletionRequest,
    DegradedReason, FixedClock, OpenAiBackend,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

const PATH: &str = "/v1/chat/completions";

fn request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4o-mini".to_string(),
        system: "system text".to_string(),
        prompt: "user prompt".to_string(),
        temperature: 0.3,
        max_tokens: 1500,
    }
}

fn backend(server: &Server) -> OpenAiBackend {
    OpenAiBackend::new(&server.url(), "sk-test", Some(Duration::from_secs(5))).unwrap()
}

fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

#[tokio::test]
async fn sends_bearer_token_and_both_messages() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 1500,
            "messages": [
                { "role": "system", "content": "system text" },
                { "role": "user", "content": "user prompt" }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(r#"{"tasks":[],"summary":"ok"}"#))
        .create_async()
        .await;

    let reply = backend(&server).complete(&request()).await.unwrap();
    assert_eq!(reply, r#"{"tasks":[],"summary":"ok"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn fenced_reply_parses_after_stripping() {
    let mut server = Server::new_async().await;
    let fenced = "```json\n{\"reminders\":[{\"title\":\"Huur betalen\",\"reminderDate\":\"2026-11-01\"}]}\n```";
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body(fenced))
        .create_async()
        .await;

    let reply = backend(&server).complete(&request()).await.unwrap();
    let result = parse_model_reply(&reply).unwrap();
    assert_eq!(result.reminders.len(), 1);
    assert_eq!(result.reminders[0].title, "Huur betalen");
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(401)
        .with_body(r#"{"error":{"message":"invalid key"}}"#)
        .create_async()
        .await;

    let err = backend(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, BackendError::Auth { status: 401 }));
    assert_eq!(err.code(), "auth");
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(429)
        .create_async()
        .await;

    let err = backend(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, BackendError::RateLimited));
}

#[tokio::test]
async fn server_error_keeps_status_and_truncated_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(500)
        .with_body("x".repeat(1_000))
        .create_async()
        .await;

    let err = backend(&server).complete(&request()).await.unwrap_err();
    match err {
        BackendError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body.chars().count(), 200);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_is_an_empty_response() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = backend(&server).complete(&request()).await.unwrap_err();
    assert!(matches!(err, BackendError::EmptyResponse));
}


/// Accepts connections and holds them open without ever answering.
async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// Address of a port that was bound and released, so nothing listens there.
fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn service_for(base_url: String, timeout_secs: u64) -> AnalysisService {
    let config = AnalysisConfig {
        api_key: Some("sk-test".to_string()),
        base_url,
        request_timeout_secs: timeout_secs,
        ..AnalysisConfig::default()
    };
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap(),
    ));
    AnalysisService::from_config(config, clock)
}

#[tokio::test]
async fn unanswered_request_times_out() {
    let addr = silent_server().await;
    let backend =
        OpenAiBackend::new(&format!("http://{addr}"), "sk-test", Some(Duration::from_secs(1)))
            .unwrap();

    let err = backend.complete(&request()).await.unwrap_err();
    assert!(matches!(err, BackendError::Timeout), "{err:?}");
    assert_eq!(err.code(), "timeout");
}

#[tokio::test]
async fn timeout_degrades_to_demo_analysis() {
    let addr = silent_server().await;
    let service = service_for(format!("http://{addr}"), 1);
    assert!(service.is_available());

    let outcome = service
        .analyze("Werk", "vergadering morgen", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.mode(), "fallback");
    assert!(matches!(
        outcome.reason(),
        Some(DegradedReason::ServiceFailure(_))
    ));
    assert_eq!(outcome.result().events.len(), 1);
    assert_eq!(outcome.result().confidence, 0.8);
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let addr = closed_port();
    let backend =
        OpenAiBackend::new(&format!("http://{addr}"), "sk-test", Some(Duration::from_secs(5)))
            .unwrap();

    let err = backend.complete(&request()).await.unwrap_err();
    assert!(matches!(err, BackendError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn refused_connection_degrades_to_demo_analysis() {
    let service = service_for(format!("http://{}", closed_port()), 5);

    let outcome = service
        .analyze("Werk", "moet de presentatie maken", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.mode(), "fallback");
    assert_eq!(outcome.result().tasks.len(), 1);
}
