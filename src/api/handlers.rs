use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::bot::BotResponder;
use crate::store::{ClientStore, StoreError};

/// Application state shared across handlers
pub struct AppState {
    pub store: ClientStore,
    /// Absent when the receiver only persists telemetry
    pub bot: Option<Arc<BotResponder>>,
}

// ============================================================================
// Liveness
// ============================================================================

pub async fn index() -> Html<&'static str> {
    Html("<h1>Receiver App is Up!</h1>")
}

// ============================================================================
// Wireless client telemetry
// ============================================================================

pub async fn wireless_clients(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let username = payload
        .get("username")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::BadRequest("missing string field 'username'".to_string()))?;

    tracing::info!(username = %username, "Wireless clients data received");
    tracing::debug!(payload = %payload, "Payload");

    let path = state.store.save_client(username, &payload).await?;
    tracing::debug!(path = %path.display(), "Client data saved");

    Ok((StatusCode::ACCEPTED, "Wireless Clients Data Received"))
}

// ============================================================================
// Chat webhook
// ============================================================================

pub async fn wireless_teams(
    State(state): State<Arc<AppState>>,
    Json(event): Json<Value>,
) -> Result<(StatusCode, &'static str), ApiError> {
    tracing::info!("Wireless teams webhook received");
    tracing::debug!(payload = %event, "Payload");

    state.store.append_event(&event).await?;

    if let Some(bot) = &state.bot {
        match bot.handle_event(&event).await {
            Ok(reply) => tracing::debug!(?reply, "Bot handled event"),
            Err(e) => tracing::error!(error = %e, "Bot failed to handle event"),
        }
    }

    Ok((StatusCode::ACCEPTED, "Webhook Received"))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidUsername(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
