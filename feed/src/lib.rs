pub mod models;
pub mod error;
pub mod config;
pub mod date_resolver;
pub mod bse_client;
pub mod fetch_service;

pub use models::*;
pub use error::FeedError;
pub use config::FeedConfig;
pub use date_resolver::{resolve_date, ResolvedDate};
pub use bse_client::{BseClient, PageSource};
pub use fetch_service::{fetch_announcements, AnnouncementFetcher};
