//! Principal resolution and the authorization gate.
//!
//! Tokens are verified against the identity provider's userinfo endpoint;
//! the role list is read from the token's own claims under this gateway's
//! client id. Verification failure never rejects a request: it degrades to
//! an anonymous principal and the pipeline continues.

use axum::http::{header, HeaderMap};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use crate::server::configuration::KeycloakSettings;
use crate::server::error::GatewayError;
use crate::server::models::Principal;

pub const ADMIN_ROLE: &str = "maeve-admin";

/// A permission required for one operation: either the fixed administrative
/// scope or write access to a single bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope(String);

impl Scope {
    pub fn admin() -> Self {
        Self(ADMIN_ROLE.to_string())
    }

    pub fn write(bot: &str) -> Self {
        Self(format!("{bot}-write"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Error)]
enum IdentityError {
    #[error("userinfo request failed: {0}")]
    Userinfo(#[from] reqwest::Error),
    #[error("malformed bearer token")]
    MalformedToken,
    #[error("token claims are not valid JSON: {0}")]
    Claims(#[from] serde_json::Error),
    #[error("token carries no roles for client {0}")]
    MissingClientRoles(String),
}

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    resource_access: HashMap<String, ClientAccess>,
}

#[derive(Debug, Deserialize)]
struct ClientAccess {
    roles: Vec<String>,
}

pub struct IdentityService {
    http: reqwest::Client,
    settings: KeycloakSettings,
}

impl IdentityService {
    pub fn new(http: reqwest::Client, settings: KeycloakSettings) -> Self {
        Self { http, settings }
    }

    /// Resolves the request's principal. With verification disabled this is
    /// always anonymous; so is any request without a bearer credential or
    /// whose credential fails verification (fail-open).
    pub async fn resolve(&self, headers: &HeaderMap) -> Principal {
        if !self.settings.enabled {
            return Principal::Anonymous;
        }

        let Some(header) = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        else {
            return Principal::Anonymous;
        };
        let Some(token) = header.strip_prefix("Bearer ") else {
            return Principal::Anonymous;
        };

        match self.verify(header, token).await {
            Ok(principal) => principal,
            Err(err) => {
                warn!("token verification failed, continuing as anonymous: {err}");
                Principal::Anonymous
            }
        }
    }

    async fn verify(&self, header: &str, token: &str) -> Result<Principal, IdentityError> {
        let subject = self
            .http
            .get(self.settings.userinfo_endpoint())
            .header(reqwest::header::AUTHORIZATION, header)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let roles = decode_roles(token, &self.settings.client_id)?;

        Ok(Principal::Authenticated { subject, roles })
    }

    /// The authorization gate. With verification disabled every request is
    /// allowed; the deployment is assumed to be perimeter-secured.
    pub fn authorize(&self, principal: &Principal, scope: &Scope) -> bool {
        if !self.settings.enabled {
            return true;
        }

        principal.roles().iter().any(|role| role == scope.as_str())
    }

    pub fn require(&self, principal: &Principal, scope: &Scope) -> Result<(), GatewayError> {
        if self.authorize(principal, scope) {
            Ok(())
        } else {
            Err(GatewayError::Unauthorized)
        }
    }
}

fn decode_roles(token: &str, client_id: &str) -> Result<Vec<String>, IdentityError> {
    let claims_segment = token.split('.').nth(1).ok_or(IdentityError::MalformedToken)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(claims_segment)
        .map_err(|_| IdentityError::MalformedToken)?;
    let claims: TokenClaims = serde_json::from_slice(&bytes)?;

    claims
        .resource_access
        .get(client_id)
        .map(|access| access.roles.clone())
        .ok_or_else(|| IdentityError::MissingClientRoles(client_id.to_string()))
}
