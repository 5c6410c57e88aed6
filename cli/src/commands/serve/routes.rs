//! # Parley HTTP Routes
//!
//! File: cli/src/commands/serve/routes.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The HTTP surface of the responder:
//! - `GET /` serves the chat page
//! - `POST /ask` (and `POST /`) takes `{"message": "..."}` and answers with
//!   `{"reply": "..."}`
//!
//! A missing, empty or unparseable message is answered with
//! `400 Bad Request` and `{"reply": "Empty"}`. Methods that are not routed
//! get `405 Method Not Allowed` from axum's method router.
//!
use crate::engine::Responder;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// The chat page served at `/`.
pub const CHAT_PAGE: &str = include_str!("../../../assets/chat.html");

/// Reply sent when the request carries no usable message.
pub const EMPTY_REPLY: &str = "Empty";

/// Request body for `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `POST /ask`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub reply: String,
}

/// Builds the routes, without middleware, around a shared responder.
pub fn chat_routes(responder: Arc<Responder>) -> Router {
    Router::new()
        .route("/", get(chat_page).post(ask))
        .route("/ask", post(ask))
        .with_state(responder)
}

async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

async fn ask(
    State(responder): State<Arc<Responder>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> (StatusCode, Json<AskResponse>) {
    let message = match payload {
        Ok(Json(request)) => request.message.unwrap_or_default(),
        Err(rejection) => {
            warn!("Rejected /ask body: {}", rejection.body_text());
            String::new()
        }
    };

    match responder.try_respond(&message) {
        Ok(reply) => {
            debug!("Replying to {:?} with {:?}", message, reply);
            (StatusCode::OK, Json(AskResponse { reply }))
        }
        Err(e) => {
            debug!("Rejecting message: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(AskResponse {
                    reply: EMPTY_REPLY.to_string(),
                }),
            )
        }
    }
}
