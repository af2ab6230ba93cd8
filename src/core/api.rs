//! HTTP + WebSocket API for guided sessions
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session snapshot
//! - POST /session/{id}/frame - Process one recognition result
//! - POST /session/{id}/reset - Request a deferred reset
//! - PUT /session/{id}/readiness - Set solver readiness count
//! - GET /session/{id}/instruction - Current renderer instruction
//! - WS /ws/{id} - Live snapshots
//! - GET /health - Health check

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

use crate::core::{Instruction, PhaseController, ScriptedSolver};
use crate::types::{ControllerConfig, FaceRecognitionResult, FrameOutput, SessionSnapshot};

/// Session state
pub struct Session {
    pub id: String,
    pub controller: PhaseController<ScriptedSolver>,
}

/// App state
#[derive(Default)]
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    /// Canned solver answers for this session
    pub solver: Option<ScriptedSolver>,
    pub config: Option<ControllerConfig>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
    pub error: Option<String>,
}

/// Reset request response
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub reset_pending: bool,
}

/// Readiness update
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessRequest {
    pub count: usize,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

fn not_found() -> ApiError {
    api_error(StatusCode::NOT_FOUND, "session not found")
}

/// Create the API router
pub fn create_router() -> Router {
    create_router_with_state(Arc::new(AppState::default()))
}

/// Router over existing state (lets tests share sessions between requests)
pub fn create_router_with_state(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/frame", post(process_frame))
        .route("/session/:id/reset", post(request_reset))
        .route("/session/:id/readiness", put(set_readiness))
        .route("/session/:id/instruction", get(get_instruction))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Json<NewSessionResponse> {
    let session_id = generate_session_id();
    let controller = PhaseController::with_config(
        req.solver.unwrap_or_default(),
        req.config.unwrap_or_default(),
    );

    let mut sessions = state.sessions.write().await;
    sessions.insert(
        session_id.clone(),
        Session {
            id: session_id.clone(),
            controller,
        },
    );
    info!(session = %session_id, "session created");

    Json(NewSessionResponse {
        websocket_url: format!("/ws/{}", session_id),
        session_id,
    })
}

/// Get session snapshot
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(not_found)?;
    let snapshot = session.controller.snapshot();

    Ok(Json(SessionStatusResponse {
        session_id: session.id.clone(),
        error: snapshot.error().map(|e| e.to_string()),
        snapshot,
    }))
}

/// Process one frame
async fn process_frame(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(result): Json<FaceRecognitionResult>,
) -> Result<Json<FrameOutput>, ApiError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(not_found)?;

    let output = session.controller.process_face(&result).map_err(|e| {
        warn!(session = %id, error = %e, "frame rejected");
        api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;
    for t in &output.transitions {
        info!(session = %id, from = %t.from, to = %t.to, reason = t.reason.code(), "phase changed");
    }
    Ok(Json(output))
}

/// Request a reset at the next frame
async fn request_reset(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ResetResponse>), ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(not_found)?;
    session.controller.request_reset();
    Ok((StatusCode::ACCEPTED, Json(ResetResponse { reset_pending: true })))
}

/// Set solver readiness
async fn set_readiness(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ReadinessRequest>,
) -> Result<Json<ReadinessRequest>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(not_found)?;
    let readiness = session.controller.readiness();
    readiness.set(req.count);
    Ok(Json(ReadinessRequest {
        count: readiness.get(),
    }))
}

/// Current renderer instruction
async fn get_instruction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Instruction>, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(not_found)?;
    Ok(Json(Instruction::from_snapshot(&session.controller.snapshot())))
}

/// WebSocket handler for live snapshots
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or_else(not_found)?;
    let rx = session.controller.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Push every published snapshot until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: watch::Receiver<Arc<SessionSnapshot>>) {
    let (mut sender, mut receiver) = socket.split();

    loop {
        let encoded = {
            let snapshot = rx.borrow_and_update();
            serde_json::to_string(&**snapshot)
        };
        match encoded {
            Ok(json) => {
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            Err(e) => warn!(error = %e, "cannot serialize snapshot, skipping"),
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    // Any other client message just re-sends the current snapshot.
                    Some(Ok(_)) => {}
                }
            }
        }
    }
    debug!("websocket closed");
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    format!("session_{:x}_{}", nanos, SEQ.fetch_add(1, Ordering::Relaxed))
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "cubeguide API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
