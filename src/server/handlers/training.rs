use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;

use crate::server::config::AppState;
use crate::server::error::GatewayError;
use crate::server::models::{Phrase, Principal};
use crate::server::services::Scope;

#[derive(Debug, Deserialize)]
pub struct CreatePhrasesRequest {
    pub bot: String,
    pub phrases: Vec<Phrase>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePhraseRequest {
    pub bot: String,
    pub intent: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateExampleRequest {
    pub bot: String,
    pub example: String,
    pub intent: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteExampleRequest {
    pub bot: String,
    pub example: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub bot: String,
    pub intent: String,
    pub action: String,
    #[serde(default)]
    pub examples: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub bot: String,
    pub country_code: String,
}

pub async fn create_phrases(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreatePhrasesRequest>,
) -> Result<StatusCode, GatewayError> {
    state.identity.require(&principal, &Scope::write(&request.bot))?;

    let bot = state.registry.resolve(&request.bot).await?;
    state.bots.create_phrases(&bot, &request.phrases).await?;

    Ok(StatusCode::OK)
}

pub async fn delete_phrase(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<DeletePhraseRequest>,
) -> Result<StatusCode, GatewayError> {
    state.identity.require(&principal, &Scope::write(&request.bot))?;

    let bot = state.registry.resolve(&request.bot).await?;
    state
        .bots
        .delete_phrase(&bot, &request.intent, &request.text)
        .await?;

    Ok(StatusCode::OK)
}

pub async fn create_example(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateExampleRequest>,
) -> Result<StatusCode, GatewayError> {
    state.identity.require(&principal, &Scope::write(&request.bot))?;

    let bot = state.registry.resolve(&request.bot).await?;
    state
        .bots
        .create_example(&bot, &request.example, &request.intent)
        .await?;

    Ok(StatusCode::OK)
}

pub async fn delete_example(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<DeleteExampleRequest>,
) -> Result<StatusCode, GatewayError> {
    state.identity.require(&principal, &Scope::write(&request.bot))?;

    let bot = state.registry.resolve(&request.bot).await?;
    state.bots.delete_example(&bot, &request.example).await?;

    Ok(StatusCode::OK)
}

/// Best-effort fan-out: reports success once the pushes have been attempted,
/// whatever their individual outcomes.
pub async fn create_intent(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<StatusCode, GatewayError> {
    state.identity.require(&principal, &Scope::write(&request.bot))?;

    let bot = state.registry.resolve(&request.bot).await?;
    let examples = request.examples.unwrap_or_default();
    state
        .bots
        .create_intent(&bot, &request.intent, &request.action, &examples)
        .await;

    Ok(StatusCode::OK)
}

pub async fn set_language(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<SetLanguageRequest>,
) -> Result<StatusCode, GatewayError> {
    state.identity.require(&principal, &Scope::write(&request.bot))?;

    let bot = state.registry.resolve(&request.bot).await?;
    state.bots.set_language(&bot, &request.country_code).await?;

    Ok(StatusCode::OK)
}
