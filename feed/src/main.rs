// Fetches one day of announcements without starting the server.
// Usage: announcement_feed [YYYY-MM-DD] [limit_pages]

use announcement_feed::{fetch_announcements, resolve_date, FeedConfig, PageLimit};
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = std::env::args().skip(1);
    let date_arg = args.next();
    let limit = PageLimit::from_param(args.next().as_deref());

    let date = resolve_date(date_arg.as_deref())?;
    let config = FeedConfig::from_env();

    log::info!("Fetching announcements for {} (up to {} pages)", date.iso(), limit.get());
    let response = fetch_announcements(&config, &date, limit).await?;

    let output = serde_json::to_string_pretty(&response).context("serializing announcements")?;
    println!("{}", output);
    Ok(())
}
