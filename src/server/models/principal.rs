use serde_json::Value;

/// The resolved identity of an inbound request. Derived per request from the
/// `Authorization` header, never persisted.
#[derive(Debug, Clone)]
pub enum Principal {
    Anonymous,
    Authenticated {
        /// Opaque userinfo payload from the identity provider.
        subject: Value,
        /// Role strings scoped to this gateway's client id.
        roles: Vec<String>,
    },
}

impl Principal {
    pub fn roles(&self) -> &[String] {
        match self {
            Principal::Anonymous => &[],
            Principal::Authenticated { roles, .. } => roles,
        }
    }
}
