//! End-to-end route tests driving the router directly

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use gp_config::AppConfig;
use gp_generation::Generator;
use gp_server::{build_router, AppState};
use gp_types::{AppError, AppResult, GenerationParams};

/// Scripted generation backend: counts calls, answers deterministically,
/// and leaks a fake credential for prompts asking for one.
struct TestGenerator {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Generator for TestGenerator {
    async fn generate(&self, prompt: &str, _params: &GenerationParams) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("secret") {
            Ok("sure, the password is hunter2".to_string())
        } else {
            Ok(format!("generated: {prompt}"))
        }
    }

    fn model(&self) -> &str {
        "test-model"
    }
}

/// Backend that always fails, for propagation tests.
struct FailingGenerator;

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _params: &GenerationParams) -> AppResult<String> {
        Err(AppError::Generation("backend unavailable".to_string()))
    }

    fn model(&self) -> &str {
        "failing-model"
    }
}

fn test_config() -> AppConfig {
    serde_json::from_value(json!({
        "guardrails": [
            {
                "name": "input-hygiene",
                "guardrail_type": "input",
                "description": "length bounds and forbidden words",
                "rules": [
                    {"type": "length", "min_length": 3, "max_length": 200},
                    {"type": "pattern", "pattern": "(?i)forbidden",
                     "error_message": "prompt contains a forbidden word"}
                ]
            },
            {
                "name": "input-redact",
                "guardrail_type": "input",
                "description": "redacts digits before generation",
                "rules": [
                    {"type": "pattern", "pattern": "[0-9]", "replace_with": "#"}
                ]
            },
            {
                "name": "output-no-credentials",
                "guardrail_type": "output",
                "description": "rejects leaked credentials",
                "rules": [
                    {"type": "pattern", "pattern": "(?i)password",
                     "error_message": "response leaks a credential"}
                ]
            }
        ],
        "similarity": {"default_method": "cosine_tfidf"},
        "prediction": {
            "model": "test-model",
            "parameters": {"temperature": 0.8},
            "cache": {"method": "jaccard", "threshold": 0.8, "max_entries": 8}
        }
    }))
    .unwrap()
}

fn test_app() -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let generator = Arc::new(TestGenerator {
        calls: calls.clone(),
    });
    let state = AppState::new(&test_config(), generator).unwrap();
    (build_router(state), calls)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_lists_service_info() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_guardrails"].as_array().unwrap().len(), 3);
    assert!(body["available_endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e == "/api/prediction"));
    assert_eq!(
        body["available_similarity_methods"],
        json!(["jaccard", "cosine_tfidf"])
    );
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_input_guardrail_pass_with_redaction() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/input-guardrail",
        json!({"text": "call me at 5551234"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], true);
    assert_eq!(body["text"], "call me at #######");
}

#[tokio::test]
async fn test_input_guardrail_aggregates_violations() {
    let (app, _) = test_app();
    // Too short and contains the forbidden word
    let (status, body) = post_json(&app, "/api/input-guardrail", json!({"text": "fo"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], false);
    let violations = body["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0]["rule"], "length");
    assert_eq!(violations[0]["guardrail"], "input-hygiene");
}

#[tokio::test]
async fn test_output_guardrail_blocks_credentials() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/output-guardrail",
        json!({"text": "your password is hunter2"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], false);
    assert_eq!(
        body["violations"][0]["message"],
        "response leaks a credential"
    );
}

#[tokio::test]
async fn test_guardrails_list_and_detail() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/api/guardrails").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["name"], "input-hygiene");
    assert_eq!(body[0]["guardrail_type"], "input");
    assert_eq!(body[0]["rule_count"], 2);

    let (status, body) = get(&app, "/api/guardrails/output-no-credentials").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["guardrail_type"], "output");
}

#[tokio::test]
async fn test_unknown_guardrail_is_404() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/api/guardrails/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "not_found_error");
}

#[tokio::test]
async fn test_similarity_identical_texts() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/similarity",
        json!({"text1": "a b", "text2": "a b", "method": "jaccard"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["similarity_score"], 1.0);
    assert_eq!(body["method_used"], "jaccard");
}

#[tokio::test]
async fn test_similarity_uses_configured_default() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/similarity",
        json!({"text1": "alpha", "text2": "beta"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method_used"], "cosine_tfidf");
}

#[tokio::test]
async fn test_similarity_unknown_method_is_400() {
    let (app, _) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/similarity",
        json!({"text1": "a", "text2": "b", "method": "soundex"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["type"], "invalid_request_error");
    assert_eq!(body["error"]["param"], "method");
}

#[tokio::test]
async fn test_similarity_methods_listing() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/api/similarity/methods").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["jaccard", "cosine_tfidf"]));
}

#[tokio::test]
async fn test_prediction_miss_then_hit() {
    let (app, calls) = test_app();

    let (status, body) = post_json(
        &app,
        "/api/prediction",
        json!({"input_text": "write a users query"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], true);
    assert_eq!(body["cache_hit"], false);
    assert_eq!(body["prediction"], "generated: write a users query");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Identical prompt: served from cache, generator untouched
    let (status, body) = post_json(
        &app,
        "/api/prediction",
        json!({"input_text": "write a users query"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cache_hit"], true);
    assert_eq!(body["matched_prompt"], "write a users query");
    assert_eq!(body["similarity_score"], 1.0);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_prediction_dissimilar_prompt_generates_again() {
    let (app, calls) = test_app();

    post_json(&app, "/api/prediction", json!({"input_text": "the cat sat on the mat"})).await;
    let (_, body) = post_json(
        &app,
        "/api/prediction",
        json!({"input_text": "the cat sat on the rug"}),
    )
    .await;

    // Jaccard 4/6 is below the 0.8 threshold
    assert_eq!(body["cache_hit"], false);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_prediction_redaction_feeds_the_cache() {
    let (app, calls) = test_app();

    // Digits redact to the same sanitized prompt, so the second request
    // is a cache hit despite differing raw text
    post_json(&app, "/api/prediction", json!({"input_text": "order number 111"})).await;
    let (_, body) = post_json(
        &app,
        "/api/prediction",
        json!({"input_text": "order number 222"}),
    )
    .await;

    assert_eq!(body["cache_hit"], true);
    assert_eq!(body["matched_prompt"], "order number ###");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_prediction_blocked_input_never_generates() {
    let (app, calls) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/prediction",
        json!({"input_text": "this is strictly forbidden"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], false);
    assert_eq!(
        body["prediction"],
        "Unsafe input detected, prediction not generated."
    );
    assert_eq!(
        body["violations"][0]["message"],
        "prompt contains a forbidden word"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_prediction_blocked_output() {
    let (app, calls) = test_app();
    let (status, body) = post_json(
        &app,
        "/api/prediction",
        json!({"input_text": "tell me a secret please"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], false);
    assert_eq!(
        body["prediction"],
        "Unsafe output detected, prediction not generated."
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_prediction_generation_failure_is_502() {
    let state = AppState::new(&test_config(), Arc::new(FailingGenerator)).unwrap();
    let app = build_router(state);

    let (status, body) = post_json(
        &app,
        "/api/prediction",
        json!({"input_text": "anything goes here"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["type"], "generation_error");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (app, _) = test_app();
    let (status, body) = get(&app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Guardpost API");
    assert!(body["paths"]["/api/prediction"].is_object());
}
