//! Shared fixtures: an in-process policy engine and gateway request helpers.

#![allow(dead_code)]

use a2a_server::{app, engine::PolicyEngineClient, AppState};
use a2a_types::AgentCard;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceExt;

/// One call received by the mock engine.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub authorization: Option<String>,
    pub body: Value,
}

/// Calls received by the mock engine, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EngineLog(Arc<Mutex<Vec<RecordedCall>>>);

impl EngineLog {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[derive(Clone)]
struct MockEngine {
    log: EngineLog,
    status: StatusCode,
    reply: String,
    delay: Duration,
}

async fn evaluate(
    State(mock): State<MockEngine>,
    headers: HeaderMap,
    body: String,
) -> Response {
    mock.log.0.lock().unwrap().push(RecordedCall {
        authorization: headers
            .get(header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string()),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }

    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.reply.clone(),
    )
        .into_response()
}

/// Starts a mock engine answering every evaluation with `status` and the raw `reply` body.
pub async fn spawn_engine_raw(
    status: StatusCode,
    reply: &str,
    delay: Duration,
) -> (String, EngineLog) {
    let log = EngineLog::default();
    let mock = MockEngine {
        log: log.clone(),
        status,
        reply: reply.to_string(),
        delay,
    };
    let router = Router::new()
        .route("/npl/evaluate", post(evaluate))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}", addr), log)
}

/// Starts a mock engine answering every evaluation with `status` and a JSON `reply`.
pub async fn spawn_engine(status: StatusCode, reply: Value) -> (String, EngineLog) {
    spawn_engine_raw(status, &reply.to_string(), Duration::ZERO).await
}

/// Starts a mock engine that accepts every evaluation with `{"success": true}`.
pub async fn spawn_accepting_engine() -> (String, EngineLog) {
    let reply = serde_json::json!({"success": true});
    spawn_engine(StatusCode::OK, reply).await
}

/// Returns a base URL nothing is listening on.
pub async fn unreachable_engine_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn state_with_client(engine: PolicyEngineClient) -> AppState {
    AppState {
        engine,
        agent_card: Arc::new(AgentCard::gateway("http://localhost:8000/a2a", "1.0.0")),
    }
}

/// Gateway router pointed at `engine_url`.
pub fn gateway(engine_url: &str) -> Router {
    let engine = PolicyEngineClient::new(engine_url).unwrap();
    app(state_with_client(engine))
}

/// Sends `POST /a2a/request` and returns the status and decoded JSON body.
pub async fn post_rpc(
    router: Router,
    authorization: Option<&str>,
    body: &Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/a2a/request")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = authorization {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    let response = router
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

/// Sends `GET uri` and returns the status and decoded JSON body.
pub async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
