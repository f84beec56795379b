use chrono::{DateTime, Duration, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::error::{FeedError, Result};

static ISO_DATE: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
}

impl ResolvedDate {
    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// The provider wants dates as `yyyymmdd`.
    pub fn bse_format(&self) -> String {
        self.date.format("%Y%m%d").to_string()
    }
}

/// Calendar date in India (UTC+5:30) at the given instant.
pub fn today_ist(now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::hours(5) + Duration::minutes(30)).date_naive()
}

pub fn parse_iso_date(input: &str) -> Result<NaiveDate> {
    let re = ISO_DATE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
    if !re.is_match(input) {
        return Err(FeedError::InvalidDate);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| FeedError::InvalidDate)
}

pub fn resolve_date(input: Option<&str>) -> Result<ResolvedDate> {
    let date = match input.filter(|s| !s.is_empty()) {
        Some(raw) => parse_iso_date(raw)?,
        None => today_ist(Utc::now()),
    };

    Ok(ResolvedDate { date })
}
