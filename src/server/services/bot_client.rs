//! Outbound calls to bot instances. Each logical operation maps to a fixed
//! path under the bot's `host:port`; successful JSON bodies are relayed
//! verbatim and failures collapse into `GatewayError::Downstream`.

use serde_json::{json, Value};
use tracing::warn;

use crate::server::error::GatewayError;
use crate::server::models::{Bot, Phrase};

pub struct BotClient {
    http: reqwest::Client,
}

impl BotClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    fn url(bot: &Bot, path: &str) -> String {
        format!("{}{}", bot.base_url(), path)
    }

    async fn get_json(&self, bot: &Bot, path: &str) -> Result<Value, GatewayError> {
        let payload = self
            .http
            .get(Self::url(bot, path))
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(payload)
    }

    async fn post(&self, bot: &Bot, path: &str, body: &Value) -> Result<(), GatewayError> {
        self.http
            .post(Self::url(bot, path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Liveness probe against the bot's root path.
    pub async fn probe(&self, bot: &Bot) -> Result<(), GatewayError> {
        self.http
            .get(Self::url(bot, "/"))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub async fn language(&self, bot: &Bot) -> Result<Value, GatewayError> {
        self.get_json(bot, "/language").await
    }

    pub async fn actions(&self, bot: &Bot) -> Result<Value, GatewayError> {
        self.get_json(bot, "/actions").await
    }

    pub async fn phrases(&self, bot: &Bot) -> Result<Value, GatewayError> {
        self.get_json(bot, "/phrases").await
    }

    pub async fn create_phrases(&self, bot: &Bot, phrases: &[Phrase]) -> Result<(), GatewayError> {
        self.post(bot, "/phrases", &json!({ "phrases": phrases })).await
    }

    pub async fn delete_phrase(
        &self,
        bot: &Bot,
        intent: &str,
        text: &str,
    ) -> Result<(), GatewayError> {
        self.http
            .delete(Self::url(bot, "/phrases"))
            .json(&json!({ "phrases": [{ "intent": intent, "text": text }] }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// The bot reports its known intents from the example endpoint.
    pub async fn intents(&self, bot: &Bot) -> Result<Value, GatewayError> {
        self.get_json(bot, "/example").await
    }

    pub async fn examples(&self, bot: &Bot, intent: &str) -> Result<Value, GatewayError> {
        self.get_json(bot, &format!("/example/{intent}")).await
    }

    pub async fn create_example(
        &self,
        bot: &Bot,
        example: &str,
        intent: &str,
    ) -> Result<(), GatewayError> {
        self.post(bot, "/example", &json!({ "example": example, "intent": intent }))
            .await
    }

    pub async fn delete_example(&self, bot: &Bot, example: &str) -> Result<(), GatewayError> {
        self.http
            .delete(Self::url(bot, "/example"))
            .json(&json!({ "example": example }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub async fn set_language(&self, bot: &Bot, country_code: &str) -> Result<(), GatewayError> {
        self.post(bot, "/language", &json!({ "country_code": country_code }))
            .await
    }

    pub async fn handle(
        &self,
        bot: &Bot,
        identifier: &str,
        query: &str,
    ) -> Result<Value, GatewayError> {
        let payload = self
            .http
            .post(Self::url(bot, "/handle"))
            .json(&json!({ "identifier": identifier, "query": query }))
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(payload)
    }

    pub async fn explain(&self, bot: &Bot, query: &str) -> Result<Value, GatewayError> {
        let payload = self
            .http
            .post(Self::url(bot, "/explain"))
            .json(&json!({ "query": query }))
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        Ok(payload)
    }

    /// Intent creation fans out to the bot's action registry and example
    /// endpoint. Every sub-call is best-effort: failures are logged and the
    /// remaining pushes still run, sequentially and in order, so partial
    /// failure stays deterministic. There is no rollback.
    pub async fn create_intent(&self, bot: &Bot, intent: &str, action: &str, examples: &[String]) {
        let body = json!({ "name": action, "intent": intent, "settings": {} });
        if let Err(err) = self.post(bot, "/actions", &body).await {
            warn!(
                "could not update core bot: failed to push action to {}/actions: {err}",
                bot.base_url()
            );
        }

        for example in examples {
            if let Err(err) = self.create_example(bot, example, intent).await {
                warn!(
                    "could not update core bot: failed to push example to {}/example: {err}",
                    bot.base_url()
                );
            }
        }
    }
}
