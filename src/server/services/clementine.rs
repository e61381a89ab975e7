//! Thin façade over the integration subsystem ("clementine"). The gateway
//! relays integration lifecycle operations and interprets nothing beyond the
//! create-vs-update tag and the empty point-read.

use serde_json::Value;

use crate::server::error::GatewayError;
use crate::server::models::IntegrationWrite;

pub struct ClementineClient {
    http: reqwest::Client,
    base_url: String,
}

impl ClementineClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn write(&self, write: IntegrationWrite) -> Result<Value, GatewayError> {
        let request = match &write {
            IntegrationWrite::Create(payload) => {
                self.http.post(self.url("/integration")).json(payload)
            }
            IntegrationWrite::Update(payload) => {
                self.http.put(self.url("/integration")).json(payload)
            }
        };

        let integration = request
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(integration)
    }

    pub async fn delete(&self, bot: &str, uuid: &str) -> Result<(), GatewayError> {
        self.http
            .delete(self.url("/integration"))
            .query(&[("bot", bot), ("uuid", uuid)])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Point-read. `None` means the subsystem answered with no record, which
    /// callers surface as 204 rather than an error.
    pub async fn get(&self, bot: &str, uuid: &str) -> Result<Option<Value>, GatewayError> {
        let response = self
            .http
            .get(self.url("/integration"))
            .query(&[("bot", bot), ("uuid", uuid)])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let integration = response.error_for_status()?.json::<Value>().await?;
        Ok(Some(integration))
    }

    pub async fn list(
        &self,
        bot: Option<&str>,
        kind: Option<&str>,
    ) -> Result<Value, GatewayError> {
        let mut request = self.http.get(self.url("/integrations"));
        if let Some(bot) = bot {
            request = request.query(&[("bot", bot)]);
        }
        if let Some(kind) = kind {
            request = request.query(&[("type", kind)]);
        }

        let integrations = request
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(integrations)
    }

    pub async fn generate(&self, id: &str) -> Result<Value, GatewayError> {
        let body = self
            .http
            .get(self.url(&format!("/integration/{id}/body")))
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(body)
    }
}
