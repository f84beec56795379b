use std::sync::Arc;

use announcement_feed::{fetch_announcements, resolve_date, FeedConfig, PageLimit};
use axum::{
    extract::{Query, State},
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN},
        HeaderValue, StatusCode,
    },
    response::Response,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::announcement_params::AnnouncementParams;
use crate::api_error::{json_response, ApiError};

pub const ANNOUNCEMENTS_PATH: &str = "/api/announcements";

#[derive(Clone)]
pub struct AppState {
    pub feed: Arc<FeedConfig>,
}

impl AppState {
    pub fn new(feed: FeedConfig) -> Self {
        Self { feed: Arc::new(feed) }
    }
}

pub fn app(state: AppState) -> Router {
    // The mobile app calls from arbitrary origins, and error responses need
    // the headers just as much as successful ones.
    let cors = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    Router::new()
        .route(ANNOUNCEMENTS_PATH, get(get_announcements).options(preflight))
        .layer(cors)
        .with_state(state)
}

pub async fn get_announcements(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let params = AnnouncementParams::from_pairs(pairs);
    let date = resolve_date(params.date.as_deref())?;
    let limit = PageLimit::from_param(params.limit_pages.as_deref());

    log::info!("Announcements requested for {} (limit_pages={})", date.iso(), limit.get());

    let response = fetch_announcements(&state.feed, &date, limit).await?;
    Ok(json_response(StatusCode::OK, &response))
}

pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
