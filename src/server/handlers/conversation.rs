use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::server::config::AppState;
use crate::server::error::GatewayError;
use crate::server::models::Principal;
use crate::server::services::Scope;

#[derive(Debug, Deserialize)]
pub struct HandleRequest {
    pub bot: String,
    pub identifier: String,
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub bot: String,
    pub query: String,
}

/// Forwards a user utterance to the bot and relays its interpretation
/// result. Unscoped: end users talk to their bot through this route.
pub async fn handle(
    State(state): State<AppState>,
    Json(request): Json<HandleRequest>,
) -> Result<Json<Value>, GatewayError> {
    let bot = state.registry.resolve(&request.bot).await?;
    let answer = state
        .bots
        .handle(&bot, &request.identifier, &request.query)
        .await?;

    Ok(Json(answer))
}

pub async fn explain(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<Value>, GatewayError> {
    state.identity.require(&principal, &Scope::write(&request.bot))?;

    let bot = state.registry.resolve(&request.bot).await?;
    let explanation = state.bots.explain(&bot, &request.query).await?;

    Ok(Json(explanation))
}
