use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Every failure the gateway can surface, tagged by kind. Constructed at the
/// boundary where the failure is detected and translated to a transport
/// status exactly once, here.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    BadRequest(String),
    #[error("missing or insufficient scope")]
    Unauthorized,
    #[error("Bot not found.")]
    BotNotFound,
    #[error("registry query failed: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("{0}")]
    Downstream(String),
    #[error("no matching record")]
    NoContent,
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Downstream(err.to_string())
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::BotNotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Bot not found." })),
            )
                .into_response(),
            Self::Storage(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response(),
            Self::Downstream(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
