use crate::bse_client::{BseClient, PageSource};
use crate::config::FeedConfig;
use crate::date_resolver::ResolvedDate;
use crate::error::Result;
use crate::models::{extract_table, AnnouncementQuery, AnnouncementsResponse, PageLimit, Row};

/// One complete fetch with its own upstream session.
pub async fn fetch_announcements(config: &FeedConfig, date: &ResolvedDate, limit: PageLimit) -> Result<AnnouncementsResponse> {
    let client = BseClient::new(config)?;
    let rows = AnnouncementFetcher::new(&client, config.endpoints())
        .gather(date, limit)
        .await;

    Ok(AnnouncementsResponse::new(date.iso(), rows))
}

/// Walks the endpoint chain and paginates the first endpoint that has data.
pub struct AnnouncementFetcher<'a, S: PageSource> {
    source: &'a S,
    endpoints: Vec<String>,
}

impl<'a, S: PageSource> AnnouncementFetcher<'a, S> {
    pub fn new(source: &'a S, endpoints: Vec<String>) -> Self {
        Self { source, endpoints }
    }

    /// All rows for `date`, or an empty list when no endpoint produced any.
    pub async fn gather(&self, date: &ResolvedDate, limit: PageLimit) -> Vec<Row> {
        let query = AnnouncementQuery::for_date(&date.bse_format());

        for endpoint in &self.endpoints {
            match self.fetch_endpoint(endpoint, &query, limit).await {
                Ok(rows) if !rows.is_empty() => {
                    log::info!("Fetched {} rows from {}", rows.len(), endpoint);
                    return rows;
                }
                Ok(_) => {
                    log::info!("No rows from {}, trying next endpoint", endpoint);
                }
                Err(e) => {
                    log::warn!("Endpoint {} failed: {}", endpoint, e);
                }
            }
        }

        log::info!("No announcements found for {}", date.iso());
        Vec::new()
    }

    /// Pages 1..=limit in order, stopping at the first empty page. Any
    /// failure throws away what this endpoint returned so far.
    pub async fn fetch_endpoint(&self, endpoint: &str, query: &AnnouncementQuery, limit: PageLimit) -> Result<Vec<Row>> {
        let mut rows = Vec::new();

        for page in 1..=limit.get() {
            let raw = self.source.fetch_page(endpoint, query, page).await?;
            let table = extract_table(raw)?;
            if table.is_empty() {
                log::debug!("{} page {} is empty, stopping", endpoint, page);
                break;
            }

            log::debug!("{} page {}: {} rows", endpoint, page, table.len());
            rows.extend(table);
        }

        Ok(rows)
    }
}
