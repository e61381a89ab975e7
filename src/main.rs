use maeve::server::config::configure_app;
use maeve::server::configuration::get_configuration;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::net::SocketAddr;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = get_configuration()?;

    let options =
        SqliteConnectOptions::from_str(&settings.database.url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("bot registry ready at {}", settings.database.url);

    let app = configure_app(pool, &settings);

    let addr: SocketAddr = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    )
    .parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        "\"It's Time You And I Had A Chat\" - listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
