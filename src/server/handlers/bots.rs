use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::server::config::AppState;
use crate::server::error::GatewayError;
use crate::server::models::{Bot, BotKind, Principal};
use crate::server::services::Scope;

#[derive(Debug, Deserialize)]
pub struct RegisterBotRequest {
    pub name: String,
    pub host: String,
    pub port: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

pub async fn list_bots(State(state): State<AppState>) -> Result<Json<Vec<Bot>>, GatewayError> {
    Ok(Json(state.registry.all().await?))
}

pub async fn register_bot(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<RegisterBotRequest>,
) -> Result<StatusCode, GatewayError> {
    state.identity.require(&principal, &Scope::admin())?;

    let bot = Bot {
        name: request.name,
        host: request.host,
        port: request.port,
        kind: BotKind::normalize(request.kind.as_deref().unwrap_or_default()),
    };
    state.registry.register(&bot).await?;

    Ok(StatusCode::OK)
}

pub async fn bot_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, GatewayError> {
    let bot = state.registry.resolve(&name).await?;
    state.bots.probe(&bot).await?;

    Ok(StatusCode::OK)
}

/// Scope-sensitive, not scope-gated: without the bot's write scope the
/// record's location fields are blanked and only the downstream language
/// payload is kept.
pub async fn bot_settings(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(name): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let bot = state.registry.resolve(&name).await?;
    let language = state.bots.language(&bot).await?;

    if state.identity.authorize(&principal, &Scope::write(&name)) {
        Ok(Json(json!({
            "name": bot.name,
            "host": bot.host,
            "port": bot.port,
            "type": bot.kind,
            "language": language,
        })))
    } else {
        Ok(Json(json!({
            "host": "",
            "port": "",
            "type": "",
            "language": language,
        })))
    }
}

pub async fn bot_actions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(name): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    state.identity.require(&principal, &Scope::write(&name))?;

    let bot = state.registry.resolve(&name).await?;
    Ok(Json(state.bots.actions(&bot).await?))
}

pub async fn bot_phrases(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    let bot = state.registry.resolve(&name).await?;
    Ok(Json(state.bots.phrases(&bot).await?))
}

pub async fn bot_intents(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(name): Path<String>,
) -> Result<Json<Value>, GatewayError> {
    state.identity.require(&principal, &Scope::write(&name))?;

    let bot = state.registry.resolve(&name).await?;
    Ok(Json(state.bots.intents(&bot).await?))
}

pub async fn intent_examples(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((intent, name)): Path<(String, String)>,
) -> Result<Json<Value>, GatewayError> {
    state.identity.require(&principal, &Scope::write(&name))?;

    let bot = state.registry.resolve(&name).await?;
    Ok(Json(state.bots.examples(&bot, &intent).await?))
}
