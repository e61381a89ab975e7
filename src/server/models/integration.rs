use serde::Deserialize;
use serde_json::Value;

use crate::server::error::GatewayError;

/// A write against the integration subsystem, tagged at the boundary so the
/// create-vs-update decision is made exactly once. A `uuid` that is present
/// but `null` counts as absent.
#[derive(Debug, Clone)]
pub enum IntegrationWrite {
    Create(Value),
    Update(Value),
}

impl IntegrationWrite {
    pub fn from_payload(payload: Value) -> Self {
        match payload.get("uuid") {
            Some(uuid) if !uuid.is_null() => IntegrationWrite::Update(payload),
            _ => IntegrationWrite::Create(payload),
        }
    }
}

/// Identifies a single integration. Delete and point-read refuse to proceed
/// unless both halves are present.
#[derive(Debug, Deserialize)]
pub struct IntegrationKey {
    pub bot: Option<String>,
    pub uuid: Option<String>,
}

impl IntegrationKey {
    pub fn require(self) -> Result<(String, String), GatewayError> {
        match (self.bot, self.uuid) {
            (Some(bot), Some(uuid)) => Ok((bot, uuid)),
            _ => Err(GatewayError::BadRequest(
                "Missing parameters. Needed {bot, uuid}".to_string(),
            )),
        }
    }
}

/// Optional filter for listing integrations.
#[derive(Debug, Deserialize)]
pub struct IntegrationFilter {
    pub bot: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}
