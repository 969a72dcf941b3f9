//! In-process stand-in for the Hugging Face Inference API.

use avatar_core::Config;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers every `/models/*` POST with a fixed reply and counts requests.
pub struct MockUpstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub async fn start(status: u16, content_type: &'static str, body: &[u8]) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let body = body.to_vec();
        let app = Router::new().route(
            "/models/{*model}",
            post(move || {
                let counter = counter.clone();
                let body = body.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (
                        StatusCode::from_u16(status).unwrap(),
                        [(header::CONTENT_TYPE, content_type)],
                        body,
                    )
                        .into_response()
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, hits }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Config pointing at this upstream and writing into `output_dir`.
    pub fn config(&self, output_dir: &Path) -> Config {
        let mut config = Config::default();
        config.inference.base_url = format!("http://{}", self.addr);
        config.inference.timeout_secs = 10;
        config.output.dir = output_dir.to_path_buf();
        config
    }
}

/// Environment lookup backed by a fixed list of pairs.
pub fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

/// Credentials for the Hugging Face provider.
pub fn hugging_face_env() -> impl Fn(&str) -> Option<String> {
    env(&[("HF_API_TOKEN", "hf_test"), ("HF_MODEL_ID", "org/i2v")])
}
