use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::server::config::AppState;
use crate::server::error::GatewayError;
use crate::server::models::integration::IntegrationFilter;
use crate::server::models::{IntegrationKey, IntegrationWrite};

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub id: String,
}

/// Create or update, tagged once at this boundary by `uuid` presence.
/// Authorization is delegated entirely to the integration subsystem.
pub async fn write_integration(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, GatewayError> {
    let write = IntegrationWrite::from_payload(payload);
    let integration = state.integrations.write(write).await?;

    Ok(Json(integration))
}

pub async fn delete_integration(
    State(state): State<AppState>,
    Query(key): Query<IntegrationKey>,
) -> Result<StatusCode, GatewayError> {
    let (bot, uuid) = key.require()?;
    state.integrations.delete(&bot, &uuid).await?;

    Ok(StatusCode::OK)
}

pub async fn get_integration(
    State(state): State<AppState>,
    Query(key): Query<IntegrationKey>,
) -> Result<Json<Value>, GatewayError> {
    let (bot, uuid) = key.require()?;

    match state.integrations.get(&bot, &uuid).await? {
        Some(integration) => Ok(Json(integration)),
        None => Err(GatewayError::NoContent),
    }
}

pub async fn list_integrations(
    State(state): State<AppState>,
    Query(filter): Query<IntegrationFilter>,
) -> Result<Json<Value>, GatewayError> {
    let integrations = state
        .integrations
        .list(filter.bot.as_deref(), filter.kind.as_deref())
        .await?;

    Ok(Json(integrations))
}

pub async fn integration_body(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<Value>, GatewayError> {
    Ok(Json(state.integrations.generate(&query.id).await?))
}
