//! API endpoint integration tests
//!
//! The generation client is absent in these tests, so every path that
//! reaches the external call reports a structured not-configured failure.
//! Validation paths are exercised end to end.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use pestbot_gateway::api::{ApiServer, ApiState};
use pestbot_gateway::{GroqClient, KnowledgeBase};
use tower::ServiceExt;

const BOUNDARY: &str = "pestbot-test-boundary";

/// Build a test API router with no generation client
fn build_test_router() -> axum::Router {
    let knowledge = KnowledgeBase::from_lines(vec![
        "aphid colony".to_string(),
        "fungus stem low".to_string(),
    ]);

    let state = Arc::new(ApiState {
        knowledge,
        groq: None,
        llm_model: "test-model".to_string(),
        stt_model: "test-stt".to_string(),
        retrieval_limit: 5,
    });

    ApiServer::router(state)
}

/// Wrap bytes in a single-field multipart body
fn multipart_body(filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Spawn a local stub that answers every request with HTTP 500
///
/// Stands in for the Groq endpoint so the external-failure path runs for
/// real instead of being short-circuited by a missing client.
async fn spawn_failing_generation_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                use tokio::io::{AsyncReadExt, AsyncWriteExt};

                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream
                    .write_all(
                        b"HTTP/1.1 500 Internal Server Error\r\n\
                          content-length: 0\r\nconnection: close\r\n\r\n",
                    )
                    .await;
            });
        }
    });

    format!("http://{addr}")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_chat_empty_prompt_rejected() {
    let app = build_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("prompt=%20%20"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_chat_missing_prompt_field_rejected() {
    let app = build_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_without_client_reports_not_configured() {
    let app = build_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"prompt": "aphid treatment"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Failure is structured and distinguishable from a successful answer
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "not_configured");
    assert!(json.get("reply").is_none());
}

#[tokio::test]
async fn test_failing_generation_call_reports_structured_error() {
    let base_url = spawn_failing_generation_stub().await;

    let state = Arc::new(ApiState {
        knowledge: KnowledgeBase::from_lines(vec!["aphid colony".to_string()]),
        groq: Some(GroqClient::with_base_url("test-key".to_string(), base_url)),
        llm_model: "test-model".to_string(),
        stt_model: "test-stt".to_string(),
        retrieval_limit: 5,
    });
    let app = ApiServer::router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"prompt": "aphid treatment"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // The upstream failure surfaces as a generation error, never as a reply
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "generation_failed");
    assert!(json["error"]["message"].is_string());
    assert!(json.get("reply").is_none());
}

#[tokio::test]
async fn test_chat_accepts_form_bodies() {
    let app = build_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("prompt=aphid+treatment"))
                .unwrap(),
        )
        .await
        .unwrap();

    // Form parsing succeeded; only the missing client stops the request
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_image_missing_upload_rejected() {
    let app = build_test_router();

    let body = format!("--{BOUNDARY}--\r\n");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/image")
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_image_invalid_bytes_rejected_before_generation() {
    let app = build_test_router();

    let body = multipart_body("crop.png", "image/png", b"definitely not an image");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/image")
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    // 400, not 503: the upload is rejected before the generation call
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_image_valid_upload_reaches_generation() {
    let app = build_test_router();

    let img = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 160, 30]));
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let body = multipart_body("crop.png", "image/png", &png);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/image")
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    // Decode and JPEG conversion passed; the stub client is the only gap
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_voice_empty_audio_rejected() {
    let app = build_test_router();

    let body = multipart_body("query.wav", "audio/wav", b"");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/voice")
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_voice_audio_reaches_transcription() {
    let app = build_test_router();

    let body = multipart_body("query.wav", "audio/wav", &[0u8; 64]);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/voice")
                .header(
                    CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "not_configured");
}
