//! Server-Sent-Events sessions for the HTTP transport.
//!
//! A client opens `GET /sse` and receives an `endpoint` event naming the URL
//! to POST its JSON-RPC messages to (`/messages?sessionId=<id>`). Responses to
//! those messages are pushed back on the stream as `message` events. Idle
//! streams get a keep-alive comment every configured interval.
//!
//! Each stream owns a guard that removes its session when the stream is
//! dropped, whether the client disconnected or the server is shutting down.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, StreamExt, stream};
use parking_lot::RwLock;
use serde::Deserialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::http::{AppState, JsonRpcRequest, JsonRpcResponse, process_request};

/// Session identifier handed to the client in the `endpoint` event.
pub type SessionId = String;

/// Path clients POST their messages to.
pub const MESSAGES_PATH: &str = "/messages";

/// Buffered responses per session; further messages are refused until the
/// client reads its stream.
const SESSION_BUFFER: usize = 32;

/// Table of open SSE sessions.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, mpsc::Sender<JsonRpcResponse>>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new session and return its id and the receiving half.
    pub fn open(&self) -> (SessionId, mpsc::Receiver<JsonRpcResponse>) {
        let id = Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);
        self.sessions.write().insert(id.clone(), tx);
        (id, rx)
    }

    /// Sender for a session, if it is still open.
    pub fn sender(&self, id: &str) -> Option<mpsc::Sender<JsonRpcResponse>> {
        self.sessions.read().get(id).cloned()
    }

    /// Remove a session. Removing an unknown session is a no-op.
    pub fn close(&self, id: &str) -> bool {
        self.sessions.write().remove(id).is_some()
    }

    /// Drop every session; their streams end once drained.
    pub fn close_all(&self) {
        let mut sessions = self.sessions.write();
        if !sessions.is_empty() {
            info!("Closing {} SSE session(s)", sessions.len());
        }
        sessions.clear();
    }

    /// Number of open sessions.
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }
}

/// Removes its session from the registry when dropped.
struct SessionGuard {
    id: SessionId,
    registry: SessionRegistry,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.registry.close(&self.id) {
            info!("SSE session {} disconnected", self.id);
        }
    }
}

/// Build the event stream for one session.
fn session_stream(
    id: SessionId,
    rx: mpsc::Receiver<JsonRpcResponse>,
    registry: SessionRegistry,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?sessionId={}", MESSAGES_PATH, id));

    let guard = SessionGuard { id, registry };

    let messages = stream::unfold((rx, guard), |(mut rx, guard)| async move {
        let response = rx.recv().await?;
        let event = Event::default().event("message").json_data(&response);
        Some((event, (rx, guard)))
    });

    stream::once(async move { Ok(endpoint) }).chain(messages)
}

/// `GET /sse` - open a session.
pub async fn sse_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (id, rx) = state.sessions.open();
    info!("SSE session {} opened", id);

    let stream = session_stream(id, rx, state.sessions.clone());

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(state.keep_alive)
            .text("keep-alive"),
    )
}

/// Query string of `POST /messages`.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// `POST /messages?sessionId=<id>` - route a JSON-RPC message into a session.
///
/// Never waits on the stream: a full session buffer answers 503 and a closed
/// stream answers 410.
pub async fn message_handler(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    let Some(sender) = state.sessions.sender(&query.session_id) else {
        warn!("Message for unknown SSE session {}", query.session_id);
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Unknown session" })),
        )
            .into_response();
    };

    debug!(
        "SSE session {} received {}",
        query.session_id, request.method
    );

    if let Some(response) = process_request(&state.server, request) {
        match sender.try_send(response) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("SSE session {} is not reading its stream", query.session_id);
                return StatusCode::SERVICE_UNAVAILABLE.into_response();
            }
            Err(TrySendError::Closed(_)) => {
                warn!("SSE session {} closed before response", query.session_id);
                return StatusCode::GONE.into_response();
            }
        }
    }

    StatusCode::ACCEPTED.into_response()
}
