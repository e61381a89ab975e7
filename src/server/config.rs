use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::server::configuration::Settings;
use crate::server::handlers::{
    alive, banner,
    bots::{
        bot_actions, bot_intents, bot_phrases, bot_settings, bot_status, intent_examples,
        list_bots, register_bot,
    },
    conversation::{explain, handle},
    integrations::{
        delete_integration, get_integration, integration_body, list_integrations,
        write_integration,
    },
    training::{
        create_example, create_intent, create_phrases, delete_example, delete_phrase,
        set_language,
    },
};
use crate::server::services::{BotClient, BotRegistry, ClementineClient, IdentityService};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<BotRegistry>,
    pub identity: Arc<IdentityService>,
    pub bots: Arc<BotClient>,
    pub integrations: Arc<ClementineClient>,
}

pub fn configure_app(pool: SqlitePool, settings: &Settings) -> Router {
    // One outbound client shared by identity verification and every proxied
    // call.
    let http = reqwest::Client::new();

    let registry = Arc::new(BotRegistry::new(pool));
    let identity = Arc::new(IdentityService::new(http.clone(), settings.keycloak.clone()));
    let bots = Arc::new(BotClient::new(http.clone()));
    let integrations = Arc::new(ClementineClient::new(http, settings.clementine.url()));

    let state = AppState {
        registry,
        identity,
        bots,
        integrations,
    };

    app_router(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}

/// Resolves the request's principal and stashes it in extensions. Always
/// continues the pipeline; unverifiable credentials resolve to anonymous.
async fn resolve_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let principal = state.identity.resolve(request.headers()).await;
    request.extensions_mut().insert(principal);
    next.run(request).await
}

fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/alive", get(alive))
        .route("/bots", get(list_bots))
        .route("/bot", post(register_bot))
        .route("/bot/:name/status", get(bot_status))
        .route("/bot/:name/settings", get(bot_settings))
        .route("/bot/:name/actions", get(bot_actions))
        .route("/bot/:name/phrases", get(bot_phrases))
        .route("/bot/:name/intents", get(bot_intents))
        .route("/intent/:intent/bot/:name/examples", get(intent_examples))
        .route("/phrases", post(create_phrases))
        .route("/phrase", delete(delete_phrase))
        .route("/example", post(create_example).delete(delete_example))
        .route("/intent", post(create_intent))
        .route("/language", post(set_language))
        .route("/handle", post(handle))
        .route("/explain", post(explain))
        .route(
            "/integration",
            post(write_integration)
                .get(get_integration)
                .delete(delete_integration),
        )
        .route("/integrations", get(list_integrations))
        .route("/integration/body", get(integration_body))
        .layer(middleware::from_fn(log_request))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_principal,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
