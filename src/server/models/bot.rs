use serde::{Deserialize, Serialize};

/// A registered bot instance, addressable at `host:port`. `name` is the
/// primary key; records are created by registration and never updated or
/// deleted through the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bot {
    pub name: String,
    pub host: String,
    pub port: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: BotKind,
}

impl Bot {
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BotKind {
    Charlotte,
    Robert,
}

impl BotKind {
    /// Case-insensitive normalization; anything that is not `charlotte`
    /// registers as `robert`.
    pub fn normalize(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("charlotte") {
            BotKind::Charlotte
        } else {
            BotKind::Robert
        }
    }
}

/// One training phrase attached to an intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phrase {
    pub text: String,
    pub intent: String,
}
