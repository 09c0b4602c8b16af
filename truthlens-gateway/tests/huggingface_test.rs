//! Hugging Face provider tests against a mock Inference API.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use truthlens_common::config::{Config, HuggingFaceConfig};
use truthlens_gateway::{
    build_router, build_state, ClassificationProvider, HuggingFaceProvider, LabelCatalog,
    ProviderError,
};
use wiremock::matchers::{body_json, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/facebook/bart-large-mnli";

fn provider_for(server: &MockServer, token: Option<&str>) -> HuggingFaceProvider {
    HuggingFaceProvider::from_config(&HuggingFaceConfig {
        api_token: token.map(String::from),
        base_url: server.uri(),
        ..Default::default()
    })
    .unwrap()
}

fn labels() -> Vec<String> {
    LabelCatalog::builtin().candidates().to_vec()
}

fn zero_shot_body() -> Value {
    json!({
        "sequence": "The earth is flat.",
        "labels": ["misinformation", "bias", "none"],
        "scores": [0.81, 0.12, 0.07]
    })
}

#[tokio::test]
async fn test_request_shape_and_auth_header() {
    let server = MockServer::start().await;
    let labels = labels();

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(header_matcher("authorization", "Bearer hf_test_token"))
        .and(body_json(json!({
            "inputs": "The earth is flat.",
            "parameters": { "candidate_labels": labels },
            "options": { "wait_for_model": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(zero_shot_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("hf_test_token"));
    let result = provider
        .classify("The earth is flat.", &labels)
        .await
        .unwrap();

    assert_eq!(result.labels, vec!["misinformation", "bias", "none"]);
    assert_eq!(result.scores, vec![0.81, 0.12, 0.07]);
}

#[tokio::test]
async fn test_missing_token_sends_no_auth_header() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "Invalid credentials in Authorization header"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Some("   "));
    let err = provider.classify("hello", &labels()).await.unwrap_err();

    assert_eq!(
        err,
        ProviderError::Upstream {
            status: 401,
            message: "Invalid credentials in Authorization header".into(),
        }
    );

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_upstream_error_message_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "model loading"})),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server, Some("hf_test_token"))
        .classify("hello", &labels())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProviderError::Upstream {
            status: 503,
            message: "model loading".into(),
        }
    );
}

#[tokio::test]
async fn test_upstream_error_without_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let err = provider_for(&server, None)
        .classify("hello", &labels())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProviderError::Upstream {
            status: 500,
            message: "Hugging Face API error".into(),
        }
    );
}

#[tokio::test]
async fn test_non_json_error_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = provider_for(&server, None)
        .classify("hello", &labels())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedPayload(_)));
}

#[tokio::test]
async fn test_html_gateway_error_becomes_generic_500() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.static_assets.enabled = false;
    config.huggingface.base_url = server.uri();

    let app = build_router(build_state(&config).unwrap(), &config);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"text":"hi"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({"error": "Error communicating with Hugging Face API"}));
}

#[test]
fn test_from_config_builds_client() {
    let provider = HuggingFaceProvider::from_config(&HuggingFaceConfig {
        api_token: Some("hf_test_token".into()),
        timeout_secs: 30,
        ..Default::default()
    });

    let provider = provider.unwrap();
    assert_eq!(
        provider.endpoint(),
        "https://api-inference.huggingface.co/models/facebook/bart-large-mnli"
    );
}

#[tokio::test]
async fn test_unparseable_success_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = provider_for(&server, None)
        .classify("hello", &labels())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::MalformedPayload(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let provider = HuggingFaceProvider::from_config(&HuggingFaceConfig {
        base_url: "http://127.0.0.1:1".into(),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap();

    let err = provider.classify("hello", &labels()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(zero_shot_body())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let provider = HuggingFaceProvider::from_config(&HuggingFaceConfig {
        base_url: server.uri(),
        timeout_secs: 1,
        ..Default::default()
    })
    .unwrap();

    let err = provider.classify("hello", &labels()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn test_end_to_end_through_router() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sequence": "Either you're with us or against us.",
            "labels": ["false dilemma", "fallacy", "bias"],
            "scores": [0.6, 0.3, 0.1]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.static_assets.enabled = false;
    config.huggingface.base_url = server.uri();
    config.huggingface.api_token = Some("hf_test_token".into());

    let app = build_router(build_state(&config).unwrap(), &config);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/analyze")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"text":"Either you're with us or against us."}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        json!({
            "category": "false dilemma",
            "type": "false dilemma",
            "confidence": "60.0%",
            "explanation": "This text presents a situation as having only two choices, ignoring alternatives."
        })
    );
}

#[tokio::test]
async fn test_provider_as_trait_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(zero_shot_body()))
        .mount(&server)
        .await;

    let provider: Arc<dyn ClassificationProvider> = Arc::new(provider_for(&server, None));
    assert_eq!(provider.name(), "huggingface");
    assert_eq!(provider.model(), "facebook/bart-large-mnli");

    let result = provider.classify("The earth is flat.", &labels()).await.unwrap();
    assert!(result.ensure_aligned().is_ok());
}
