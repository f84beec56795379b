mod announcement_params;
mod api_error;
mod config;
mod routes;

use announcement_feed::FeedConfig;
use anyhow::Context;

use crate::config::ServerConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server = ServerConfig::from_env();
    let feed = FeedConfig::from_env();
    log::info!(
        "Upstream endpoints: {} (fallback {}), timeout {:?}",
        feed.primary_url,
        feed.fallback_url,
        feed.request_timeout
    );

    let app = routes::app(AppState::new(feed));

    let listener = tokio::net::TcpListener::bind(server.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", server.bind_addr()))?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
