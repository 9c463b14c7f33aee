//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ActionsResponse, ErrorResponse, MessagesResponse, SubmitRequest, SubmitResponse,
    SuccessResponse,
};
use super::AppState;
use crate::action::ACTION_LABELS;
use crate::runtime::SubmitError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", get(list_messages).post(submit_message))
        .route("/api/clear", post(clear_history))
        .route("/api/stream", get(stream_history))
        .route("/api/actions", get(list_actions))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Conversation
// ============================================================

async fn list_messages(State(state): State<AppState>) -> Json<MessagesResponse> {
    let messages = state.dispatcher.history().lock().unwrap().snapshot();
    Json(MessagesResponse { messages })
}

async fn submit_message(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    // An empty label from a form field means no action
    let action = req.action.as_deref().filter(|a| !a.is_empty());
    let submission = state.dispatcher.submit(&req.text, action)?;
    Ok(Json(SubmitResponse {
        message: submission.message,
    }))
}

async fn clear_history(State(state): State<AppState>) -> Json<SuccessResponse> {
    state.dispatcher.history().lock().unwrap().clear_history();
    Json(SuccessResponse { success: true })
}

async fn stream_history(State(state): State<AppState>) -> impl IntoResponse {
    let (snapshot, broadcast_rx) = {
        let history = state.dispatcher.history().lock().unwrap();
        (history.snapshot(), history.subscribe())
    };
    sse_stream(snapshot, broadcast_rx)
}

async fn list_actions() -> Json<ActionsResponse> {
    Json(ActionsResponse {
        actions: ACTION_LABELS.to_vec(),
    })
}

async fn get_version() -> &'static str {
    concat!("chatlog ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest(String),
}

impl From<SubmitError> for AppError {
    fn from(e: SubmitError) -> Self {
        match e {
            SubmitError::EmptyText => AppError::BadRequest(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
