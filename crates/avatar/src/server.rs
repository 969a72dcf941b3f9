//! HTTP API: `POST /generate` and `GET /health`.
//!
//! Provider configuration is resolved once at startup and shared by all
//! requests. Each request makes its own outbound call; nothing else is shared.

use avatar_core::output::{api_output_path, persist};
use avatar_core::{BinaryMedia, Config, Dispatcher, GenerationRequest, GenerationResult};
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

/// Filename offered to clients downloading a generated video.
const DOWNLOAD_FILENAME: &str = "generated_video.mp4";

/// Shared state backing HTTP handlers.
pub(crate) struct AppState {
    pub(crate) dispatcher: Dispatcher,
    pub(crate) config: Config,
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .config
        .server
        .max_upload_bytes()
        .unwrap_or(usize::MAX);
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "provider": state.dispatcher.provider_kind(),
        "model": state.dispatcher.model_id(),
        "version": avatar_core::VERSION,
    }))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn video_response(media: BinaryMedia) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, media.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILENAME}\""),
            ),
        ],
        media.bytes,
    )
        .into_response()
}

/// Status for a failed generation. Non-error upstream codes become 502.
fn failure_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if code.is_client_error() || code.is_server_error() => code,
        Ok(_) => StatusCode::BAD_GATEWAY,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn generate(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(e) => return error_response(e.status(), e.body_text()),
    };
    let mut image: Option<Vec<u8>> = None;
    let mut prompt: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(e.status(), e.body_text()),
        };
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => match field.bytes().await {
                Ok(bytes) => image = Some(bytes.to_vec()),
                Err(e) => return error_response(e.status(), e.body_text()),
            },
            Some("prompt") => match field.text().await {
                Ok(text) => prompt = Some(text),
                Err(e) => return error_response(e.status(), e.body_text()),
            },
            other => tracing::debug!("Ignoring multipart field {other:?}"),
        }
    }

    let Some(image) = image else {
        return error_response(StatusCode::BAD_REQUEST, "missing form field: image");
    };
    let Some(prompt) = prompt else {
        return error_response(StatusCode::BAD_REQUEST, "missing form field: prompt");
    };

    let request = GenerationRequest::new(image, prompt);
    let result = match state.dispatcher.dispatch(&request).await {
        Ok(result) => result,
        Err(e) => return error_response(StatusCode::NOT_IMPLEMENTED, e.to_string()),
    };

    match result {
        GenerationResult::BinaryMedia(media) => {
            let destination = api_output_path(&state.config, &media);
            if let Err(e) = persist(&media, &destination).await {
                tracing::error!("Failed to save video to {}: {e}", destination.display());
                return error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to save generated video: {e}"),
                );
            }
            video_response(media)
        }
        GenerationResult::StructuredMetadata(document) => {
            (StatusCode::OK, Json(document)).into_response()
        }
        GenerationResult::Failure(failure) => {
            error_response(failure_status(failure.status), failure.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{hugging_face_env, MockUpstream};
    use avatar_core::ProviderConfig;
    use reqwest::multipart::{Form, Part};
    use std::net::SocketAddr;
    use std::path::Path;

    async fn spawn_api(config: Config, provider: ProviderConfig) -> SocketAddr {
        let dispatcher = Dispatcher::new(&provider, &config.inference).unwrap();
        let app = router(Arc::new(AppState { dispatcher, config }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn hugging_face() -> ProviderConfig {
        ProviderConfig::resolve_with(hugging_face_env()).unwrap()
    }

    fn form() -> Form {
        Form::new()
            .part(
                "image",
                Part::bytes(vec![0x89, 0x50, 0x4E, 0x47]).file_name("face.png"),
            )
            .text("prompt", "smile and wave")
    }

    async fn post_generate(addr: SocketAddr, form: Form) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("http://{addr}/generate"))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    fn files_in(dir: &Path) -> Vec<std::path::PathBuf> {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    #[tokio::test]
    async fn binary_result_is_returned_and_saved() {
        let video = vec![0u8, 1, 2, 3, 250, 251, 252];
        let upstream = MockUpstream::start(200, "video/mp4", &video).await;
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("output");
        let addr = spawn_api(upstream.config(&out_dir), hugging_face()).await;

        let resp = post_generate(addr, form()).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "video/mp4");
        assert!(resp.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("generated_video.mp4"));
        assert_eq!(resp.bytes().await.unwrap().to_vec(), video);

        let saved = files_in(&out_dir);
        assert_eq!(saved.len(), 1);
        assert_eq!(std::fs::read(&saved[0]).unwrap(), video);
    }

    #[tokio::test]
    async fn concurrent_requests_get_separate_files() {
        let upstream = MockUpstream::start(200, "video/mp4", b"clip").await;
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("output");
        let addr = spawn_api(upstream.config(&out_dir), hugging_face()).await;

        let (a, b) = tokio::join!(post_generate(addr, form()), post_generate(addr, form()));
        assert_eq!(a.status(), 200);
        assert_eq!(b.status(), 200);
        assert_eq!(files_in(&out_dir).len(), 2);
    }

    #[tokio::test]
    async fn json_result_is_passed_through() {
        let upstream = MockUpstream::start(200, "application/json", br#"{"output": "ok"}"#).await;
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("output");
        let addr = spawn_api(upstream.config(&out_dir), hugging_face()).await;

        let resp = post_generate(addr, form()).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, json!({"output": "ok"}));
        assert!(files_in(&out_dir).is_empty());
    }

    #[tokio::test]
    async fn provider_failure_keeps_status() {
        let upstream = MockUpstream::start(503, "text/plain", b"overloaded").await;
        let dir = tempfile::tempdir().unwrap();
        let addr = spawn_api(upstream.config(dir.path()), hugging_face()).await;

        let resp = post_generate(addr, form()).await;

        assert_eq!(resp.status(), 503);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, json!({"error": "overloaded"}));
    }

    #[tokio::test]
    async fn missing_prompt_is_bad_request() {
        let upstream = MockUpstream::start(200, "video/mp4", b"clip").await;
        let dir = tempfile::tempdir().unwrap();
        let addr = spawn_api(upstream.config(dir.path()), hugging_face()).await;

        let form = Form::new().part("image", Part::bytes(vec![1, 2, 3]).file_name("a.png"));
        let resp = post_generate(addr, form).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("prompt"));
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn missing_image_is_bad_request() {
        let upstream = MockUpstream::start(200, "video/mp4", b"clip").await;
        let dir = tempfile::tempdir().unwrap();
        let addr = spawn_api(upstream.config(dir.path()), hugging_face()).await;

        let resp = post_generate(addr, Form::new().text("prompt", "smile")).await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("image"));
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn non_multipart_body_gets_error_envelope() {
        let upstream = MockUpstream::start(200, "video/mp4", b"clip").await;
        let dir = tempfile::tempdir().unwrap();
        let addr = spawn_api(upstream.config(dir.path()), hugging_face()).await;

        let resp = reqwest::Client::new()
            .post(format!("http://{addr}/generate"))
            .header(header::CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"].is_string());
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn unreachable_provider_is_internal_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let closed = listener.local_addr().unwrap();
        drop(listener);

        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.inference.base_url = format!("http://{closed}");
        config.inference.timeout_secs = 5;
        config.output.dir = dir.path().join("output");
        let addr = spawn_api(config, hugging_face()).await;

        let resp = post_generate(addr, form()).await;

        assert_eq!(resp.status(), 500);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert!(files_in(&dir.path().join("output")).is_empty());
    }

    #[tokio::test]
    async fn upstream_no_content_is_bad_gateway() {
        let upstream = MockUpstream::start(204, "text/plain", b"").await;
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("output");
        let addr = spawn_api(upstream.config(&out_dir), hugging_face()).await;

        let resp = post_generate(addr, form()).await;

        assert_eq!(resp.status(), 502);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body, json!({"error": ""}));
        assert!(files_in(&out_dir).is_empty());
    }

    #[test]
    fn failure_status_keeps_error_codes() {
        assert_eq!(failure_status(503), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(failure_status(404), StatusCode::NOT_FOUND);
        assert_eq!(failure_status(204), StatusCode::BAD_GATEWAY);
        assert_eq!(failure_status(301), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn openai_answers_not_implemented() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.output.dir = dir.path().to_path_buf();
        let provider = ProviderConfig::OpenAi {
            api_key: "sk-1".into(),
        };
        let addr = spawn_api(config, provider).await;

        let resp = post_generate(addr, form()).await;

        assert_eq!(resp.status(), 501);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("not yet implemented"));
    }

    #[tokio::test]
    async fn health_reports_provider() {
        let upstream = MockUpstream::start(200, "video/mp4", b"clip").await;
        let dir = tempfile::tempdir().unwrap();
        let addr = spawn_api(upstream.config(dir.path()), hugging_face()).await;

        let body: serde_json::Value = reqwest::get(format!("http://{addr}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "hugging_face");
        assert_eq!(body["model"], "org/i2v");
    }
}
