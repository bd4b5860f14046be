//! End-to-end request flows through the router and a real SQLite store.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use question_service::api::create_router;
use question_service::app::AppState;
use question_service::domain::Question;
use question_service::infra::{MIGRATOR, SqliteConfig, SqliteQuestionRepository};

async fn create_test_router() -> Router {
    let repo = SqliteQuestionRepository::new("sqlite::memory:", SqliteConfig::in_memory())
        .await
        .expect("Failed to open in-memory database");
    repo.run_migrations(&MIGRATOR)
        .await
        .expect("Failed to run migrations");

    create_router(Arc::new(AppState::new(Arc::new(repo))))
}

fn json_request(method: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/questions")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn list_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/questions")
        .body(Body::empty())
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

async fn list_questions(router: &Router) -> Vec<Question> {
    let response = router.clone().oneshot(list_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn sample_payload(id: i64, body: &str) -> Value {
    json!({
        "id": id,
        "body": body,
        "options": [
            {"body": "a", "correct": false},
            {"body": "b", "correct": true}
        ]
    })
}

#[tokio::test]
async fn test_full_question_lifecycle_flow() {
    let router = create_test_router().await;

    // 1. GET - Store starts empty
    assert!(list_questions(&router).await.is_empty());

    // 2. POST - Create question, echoed back unchanged
    let payload = sample_payload(1, "hello");
    let response = router
        .clone()
        .oneshot(json_request("POST", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let echoed: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(echoed, payload);

    // 3. GET - Question is listed
    let listed = list_questions(&router).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(serde_json::to_value(&listed[0]).unwrap(), payload);

    // 4. PUT - Replace body and options
    let replacement = json!({
        "id": 1,
        "body": "goodbye",
        "options": [
            {"body": "x", "correct": true},
            {"body": "y", "correct": false},
            {"body": "z", "correct": false}
        ]
    });
    let response = router
        .clone()
        .oneshot(json_request("PUT", &replacement))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let echoed: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(echoed, replacement);

    // 5. GET - Only the replacement remains
    let listed = list_questions(&router).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(serde_json::to_value(&listed[0]).unwrap(), replacement);
}

#[tokio::test]
async fn test_list_is_newest_id_first() {
    let router = create_test_router().await;

    for id in [3, 10, 6] {
        let response = router
            .clone()
            .oneshot(json_request("POST", &sample_payload(id, "q")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let ids: Vec<_> = list_questions(&router).await.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![10, 6, 3]);
}

#[tokio::test]
async fn test_create_with_zero_options_is_rejected() {
    let router = create_test_router().await;

    let payload = json!({"id": 1, "body": "hello", "options": []});
    let response = router
        .clone()
        .oneshot(json_request("POST", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(list_questions(&router).await.is_empty());
}

#[tokio::test]
async fn test_create_with_negative_id_is_accepted() {
    let router = create_test_router().await;

    let response = router
        .clone()
        .oneshot(json_request("POST", &sample_payload(-5, "hello")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ids: Vec<_> = list_questions(&router).await.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![-5]);
}

#[tokio::test]
async fn test_create_with_zero_id_is_rejected() {
    let router = create_test_router().await;

    let response = router
        .oneshot(json_request("POST", &sample_payload(0, "hello")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_option_missing_correct_defaults_to_false() {
    let router = create_test_router().await;

    let payload = json!({
        "id": 1,
        "body": "hello",
        "options": [{"body": "a"}, {"body": "b", "correct": true}]
    });
    let response = router
        .clone()
        .oneshot(json_request("POST", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = list_questions(&router).await;
    assert!(!listed[0].options[0].correct);
    assert!(listed[0].options[1].correct);
}

#[tokio::test]
async fn test_create_with_oversized_body_is_413() {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .header("Content-Type", "application/json")
        .body(Body::from(vec![b' '; 3 * 1024 * 1024]))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_create_with_too_few_options_is_rejected() {
    let router = create_test_router().await;

    let payload = json!({"id": 1, "body": "hello", "options": [{"body": "only", "correct": true}]});
    let response = router
        .clone()
        .oneshot(json_request("POST", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(list_questions(&router).await.is_empty());
}

#[tokio::test]
async fn test_create_with_too_many_options_is_rejected() {
    let router = create_test_router().await;

    let options: Vec<Value> = (0..11)
        .map(|i| json!({"body": format!("option {i}"), "correct": i == 0}))
        .collect();
    let payload = json!({"id": 1, "body": "hello", "options": options});
    let response = router.oneshot(json_request("POST", &payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_empty_option_body_is_rejected() {
    let router = create_test_router().await;

    let payload = json!({
        "id": 1,
        "body": "hello",
        "options": [{"body": "", "correct": false}, {"body": "b", "correct": true}]
    });
    let response = router.oneshot(json_request("POST", &payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_without_body_is_bad_request() {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .header("Content-Type", "application/json")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_with_wrong_content_type_is_415() {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .header("Content-Type", "text/plain")
        .body(Body::from(sample_payload(1, "hello").to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(list_questions(&router).await.is_empty());
}

#[tokio::test]
async fn test_create_with_malformed_json_is_bad_request() {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/questions")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"id\": 1, \"body\": "))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_duplicate_id_is_server_error() {
    let router = create_test_router().await;

    let response = router
        .clone()
        .oneshot(json_request("POST", &sample_payload(1, "first")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(json_request("POST", &sample_payload(1, "second")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let listed = list_questions(&router).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].body, "first");
}

#[tokio::test]
async fn test_update_unknown_question_is_404() {
    let router = create_test_router().await;

    let response = router
        .clone()
        .oneshot(json_request("PUT", &sample_payload(99, "ghost")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(response).await.is_empty());

    assert!(list_questions(&router).await.is_empty());
}

#[tokio::test]
async fn test_update_invalid_payload_leaves_store_unchanged() {
    let router = create_test_router().await;

    let response = router
        .clone()
        .oneshot(json_request("POST", &sample_payload(1, "stable")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = json!({"id": 1, "body": "changed", "options": []});
    let response = router
        .clone()
        .oneshot(json_request("PUT", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = list_questions(&router).await;
    assert_eq!(listed[0].body, "stable");
    assert_eq!(listed[0].options.len(), 2);
}

#[tokio::test]
async fn test_status_endpoint() {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("GET")
        .uri("/status")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());

    let request = Request::builder()
        .method("POST")
        .uri("/status")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_head_is_not_allowed() {
    let router = create_test_router().await;

    for path in ["/status", "/questions"] {
        let request = Request::builder()
            .method("HEAD")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "HEAD {path}");
    }
}
