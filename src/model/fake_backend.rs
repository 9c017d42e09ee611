//! In-process stand-in for the inference backend, for tests.
//!
//! Runs on its own thread and runtime so blocking clients can call it from
//! plain `#[test]` functions.

use std::sync::{Arc, Mutex, mpsc};

use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

/// One multipart part received on `/generate`.
#[derive(Debug, Clone)]
pub(crate) struct ReceivedPart {
    pub name: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// What `/generate` answers with.
#[derive(Debug, Clone)]
pub(crate) enum Reply {
    Wav(Vec<u8>),
    Status(StatusCode),
}

#[derive(Clone)]
struct BackendState {
    health: Option<serde_json::Value>,
    reply: Reply,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
}

pub(crate) struct FakeBackend {
    pub port: u16,
    parts: Arc<Mutex<Vec<ReceivedPart>>>,
}

impl FakeBackend {
    /// Start a backend. `health: None` makes `/health` answer 503.
    pub fn spawn(health: Option<serde_json::Value>, reply: Reply) -> Self {
        let parts = Arc::new(Mutex::new(Vec::new()));
        let state = BackendState {
            health,
            reply,
            parts: Arc::clone(&parts),
        };
        let app = Router::new()
            .route("/health", get(health_handler))
            .route("/generate", post(generate_handler))
            .with_state(state);

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap().port()).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Self {
            port: rx.recv().unwrap(),
            parts,
        }
    }

    /// Parts received so far, in order.
    pub fn parts(&self) -> Vec<ReceivedPart> {
        self.parts.lock().unwrap().clone()
    }
}

/// Health body as the Chatterbox backend reports it.
pub(crate) fn health_body(cuda_available: bool, sample_rate: u32) -> serde_json::Value {
    serde_json::json!({
        "status": "healthy",
        "model": "chatterbox_turbo",
        "cuda_available": cuda_available,
        "gpu": if cuda_available { Some("NVIDIA RTX 5060") } else { None },
        "device": if cuda_available { "cuda:0" } else { "cpu" },
        "sample_rate": sample_rate
    })
}

async fn health_handler(State(state): State<BackendState>) -> Response {
    match state.health {
        Some(body) => Json(body).into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

async fn generate_handler(State(state): State<BackendState>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        state.parts.lock().unwrap().push(ReceivedPart {
            name,
            file_name,
            bytes,
        });
    }

    match state.reply {
        Reply::Wav(bytes) => ([(header::CONTENT_TYPE, "audio/wav")], bytes).into_response(),
        Reply::Status(status) => (status, "synthesis failed").into_response(),
    }
}
