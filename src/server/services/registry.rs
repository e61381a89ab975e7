use sqlx::SqlitePool;

use crate::server::error::GatewayError;
use crate::server::models::Bot;

/// Key lookups against the persistent bot registry. Queries are independent
/// and non-transactional; the store owns its own concurrency discipline.
pub struct BotRegistry {
    pool: SqlitePool,
}

impl BotRegistry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn all(&self) -> Result<Vec<Bot>, GatewayError> {
        let bots = sqlx::query_as::<_, Bot>("SELECT name, host, port, type FROM bots")
            .fetch_all(&self.pool)
            .await?;

        Ok(bots)
    }

    /// Resolves a bot name to its record. Names are unique by registration
    /// contract; if the store is inconsistent the first row wins.
    pub async fn resolve(&self, name: &str) -> Result<Bot, GatewayError> {
        let bot = sqlx::query_as::<_, Bot>(
            "SELECT name, host, port, type FROM bots WHERE name = ? LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        bot.ok_or(GatewayError::BotNotFound)
    }

    pub async fn register(&self, bot: &Bot) -> Result<(), GatewayError> {
        sqlx::query("INSERT INTO bots (name, host, port, type) VALUES (?, ?, ?, ?)")
            .bind(&bot.name)
            .bind(&bot.host)
            .bind(bot.port)
            .bind(bot.kind)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
