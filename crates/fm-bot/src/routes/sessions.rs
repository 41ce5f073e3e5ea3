//! Session endpoints: start a conversation, send messages, inspect the order.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use fm_protocol::Order;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::session::SharedSession;
use crate::state::AppState;

/// Longest message accepted from a client, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Response body for a newly created session.
#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request body for an inbound chat message.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Bot reply to one message.
#[derive(Debug, Serialize)]
pub struct MessageReply {
    pub reply: String,
}

async fn find_session(state: &AppState, id: Uuid) -> ApiResult<SharedSession> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("session '{id}' not found")))
}

/// POST /api/v1/sessions — start a session with an empty order.
pub async fn create_session(State(state): State<AppState>) -> Json<SessionCreated> {
    let session = state.sessions.create().await;
    let session = session.lock().await;
    Json(SessionCreated {
        session_id: session.id,
        created_at: session.created_at,
    })
}

/// POST /api/v1/sessions/{id}/messages — handle one message.
///
/// Blank messages are accepted but produce no reply (204).
pub async fn post_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MessageRequest>,
) -> ApiResult<Response> {
    if req.text.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::BadRequest(format!(
            "message longer than {MAX_MESSAGE_CHARS} characters"
        )));
    }
    let session = find_session(&state, id).await?;
    let mut session = session.lock().await;

    match session.handle_message(&state.dispatcher, &req.text).await {
        Some(reply) => Ok(Json(MessageReply { reply }).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// GET /api/v1/sessions/{id}/order — current order contents.
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Order>> {
    let session = find_session(&state, id).await?;
    let order = session.lock().await.order.clone();
    Ok(Json(order))
}

/// DELETE /api/v1/sessions/{id} — end the session and discard its order.
pub async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("session '{id}' not found")))
    }
}
