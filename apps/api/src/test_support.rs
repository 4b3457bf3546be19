//! Shared fixtures for handler tests: a scripted completion provider and
//! helpers that drive the router in-process.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::colleges::CollegeData;
use crate::llm_client::{ChatCompletion, CompletionRequest, LlmError};
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Debug, Clone)]
pub enum FakeReply {
    Text(String),
    ApiError(u16, String),
    Empty,
}

/// Completion provider that replays one scripted reply and records every call.
pub struct FakeCompletion {
    reply: FakeReply,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn new(reply: FakeReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(FakeReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for FakeCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        match &self.reply {
            FakeReply::Text(t) => Ok(t.clone()),
            FakeReply::ApiError(status, message) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            FakeReply::Empty => Err(LlmError::EmptyContent),
        }
    }
}

pub fn test_state(
    openai: Option<Arc<FakeCompletion>>,
    groq: Option<Arc<FakeCompletion>>,
    colleges: CollegeData,
) -> AppState {
    AppState {
        openai: openai.map(|f| f as Arc<dyn ChatCompletion>),
        groq: groq.map(|f| f as Arc<dyn ChatCompletion>),
        colleges: Arc::new(colleges),
    }
}

pub fn test_router(
    openai: Option<Arc<FakeCompletion>>,
    groq: Option<Arc<FakeCompletion>>,
) -> Router {
    build_router(test_state(openai, groq, CollegeData::default()))
}

/// Sends a JSON POST and returns the status with the parsed JSON body.
pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Sends a JSON POST and returns the raw response parts.
pub async fn post_raw(
    router: Router,
    uri: &str,
    body: Value,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, _, bytes) = send(router, request).await;
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn send(
    router: Router,
    request: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}
