//! End-to-end agent requests against mocked search and completion providers

use askweb::config::{AgentMode, Dispatch, Settings};
use askweb::network::HttpClient;
use askweb::web::{create_router, AppState};
use askweb::AgentAnswer;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tokio_test::assert_ok;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(provider: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.search.api_key = Some("serp-key".to_string());
    settings.search.base_url = format!("{}/search.json", provider.uri());
    settings.llm.api_key = Some("sk-test".to_string());
    settings.llm.base_url = format!("{}/v1", provider.uri());
    settings
}

fn router(settings: Settings) -> Router {
    let state = AppState::new(settings, HttpClient::new().unwrap()).unwrap();
    create_router(state)
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "model": "gpt-4o-mini",
        "choices": [{"message": {"role": "assistant", "content": text}}],
        "usage": {"prompt_tokens": 100, "completion_tokens": 20, "total_tokens": 120}
    }))
}

fn organic(results: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "search_metadata": {"status": "Success"},
        "organic_results": results
    }))
}

async fn post_agent(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::post("/api/agent")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn mount_decompose_flow(provider: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("JSON array only"))
        .respond_with(completion(
            "```json\n[{\"query\": \"rust ownership\", \"reason\": \"memory model\"}, {\"query\": \"rust borrow checker\", \"reason\": \"enforcement\"}]\n```",
        ))
        .expect(1)
        .mount(provider)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Organize your answer by sub-query"))
        .respond_with(completion("**Ownership** moves values [[Source 1]](https://o/1)."))
        .expect(1)
        .mount(provider)
        .await;

    for topic in ["rust ownership", "rust borrow checker"] {
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("q", topic))
            .respond_with(organic(json!([
                {"position": 1, "title": format!("{} one", topic), "link": "https://o/1", "snippet": "first"},
                {"position": 2, "title": format!("{} two", topic), "link": "https://o/2", "snippet": "second"},
                {"position": 3, "title": format!("{} three", topic), "link": "https://o/3", "snippet": "third"}
            ])))
            .expect(1)
            .mount(provider)
            .await;
    }
}

#[tokio::test]
async fn single_shot_capital_of_france() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "capital of France"))
        .respond_with(organic(json!([
            {"title": "Paris", "link": "https://x", "snippet": "Paris is the capital..."}
        ])))
        .expect(1)
        .mount(&provider)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("[Source 1] Paris"))
        .respond_with(completion("The capital of France is **Paris** [[Source 1]](https://x)."))
        .expect(1)
        .mount(&provider)
        .await;

    let mut settings = settings_for(&provider);
    settings.agent.mode = AgentMode::SingleShot;

    let (status, body) = post_agent(router(settings), json!({"query": "capital of France"})).await;
    assert_eq!(status, StatusCode::OK);

    let answer: AgentAnswer = assert_ok!(serde_json::from_value(body));
    assert!(!answer.answer.is_empty());
    assert!(answer.is_markdown);
    assert_eq!(answer.sources.len(), 1);
    assert_eq!(answer.sources[0].link, "https://x");
}

#[tokio::test]
async fn decompose_in_process() {
    let provider = MockServer::start().await;
    mount_decompose_flow(&provider).await;

    let (status, body) = post_agent(
        router(settings_for(&provider)),
        json!({"query": "How does Rust manage memory?", "history": []}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isMarkdown"], true);
    let sources = body["sources"].as_array().unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["title"], "Sub-query: rust ownership");
    assert_eq!(sources[0]["number"], 1);
    assert_eq!(sources[1]["link"], "#");
    assert_eq!(sources[1]["number"], 2);
}

#[tokio::test]
async fn decompose_over_loopback() {
    let provider = MockServer::start().await;
    mount_decompose_flow(&provider).await;

    let mut settings = settings_for(&provider);
    settings.agent.dispatch = Dispatch::Loopback;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(settings)).await.unwrap();
    });

    let response = reqwest::Client::new()
        .post(format!("http://{}/api/agent", addr))
        .json(&json!({"query": "How does Rust manage memory?"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let answer: AgentAnswer = response.json().await.unwrap();
    assert_eq!(answer.sources.len(), 2);
    assert!(answer.answer.contains("Ownership"));
}

#[tokio::test]
async fn upstream_failure_is_500_with_error() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API key."})))
        .mount(&provider)
        .await;

    let mut settings = settings_for(&provider);
    settings.agent.mode = AgentMode::SingleShot;

    let (status, body) = post_agent(router(settings), json!({"query": "anything"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invalid API key.");
}

#[tokio::test]
async fn search_endpoint_normalizes_missing_results() {
    let provider = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"search_metadata": {}})))
        .mount(&provider)
        .await;

    let response = router(settings_for(&provider))
        .oneshot(Request::get("/api/search?q=nothing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["organic_results"], json!([]));
}
