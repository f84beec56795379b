use serde::Serialize;
use serde_json::{Map, Value};
use std::num::IntErrorKind;

use crate::error::{FeedError, Result};

pub const ATTACHMENT_BASE_URL: &str = "https://www.bseindia.com/xml-data/corpfiling/AttachLive/";

/// One announcement exactly as the provider sent it, plus `pdf_url` when available.
pub type Row = Map<String, Value>;

/// Base query the announcements page itself sends: all categories,
/// announcements only, a single-day window.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementQuery {
    #[serde(rename = "strCat")]
    pub category: String,
    #[serde(rename = "strPrevDate")]
    pub prev_date: String,
    #[serde(rename = "strScrip")]
    pub scrip: String,
    #[serde(rename = "strSearch")]
    pub search: String,
    #[serde(rename = "strToDate")]
    pub to_date: String,
    #[serde(rename = "strType")]
    pub kind: String,
    pub subcategory: String,
}

impl AnnouncementQuery {
    pub fn for_date(yyyymmdd: &str) -> Self {
        Self {
            category: "-1".to_string(),
            prev_date: yyyymmdd.to_string(),
            scrip: String::new(),
            search: "P".to_string(),
            to_date: yyyymmdd.to_string(),
            kind: "C".to_string(),
            subcategory: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimit(u32);

impl PageLimit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 200;
    pub const DEFAULT: u32 = 50;

    pub fn new(pages: i64) -> Self {
        Self(pages.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }

    /// Lenient parse of the `limit_pages` query value. Garbage falls back to
    /// the default instead of failing the request.
    pub fn from_param(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        match raw.parse::<i64>() {
            Ok(pages) => Self::new(pages),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Self(Self::MAX),
                IntErrorKind::NegOverflow => Self(Self::MIN),
                _ => Self::default(),
            },
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Serialize)]
pub struct AnnouncementsResponse {
    pub date: String,
    pub count: usize,
    pub rows: Vec<Row>,
}

impl AnnouncementsResponse {
    pub fn new(date: String, rows: Vec<Row>) -> Self {
        Self {
            date,
            count: rows.len(),
            rows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub fn attachment_url(name: &str) -> String {
    format!("{}{}", ATTACHMENT_BASE_URL, name)
}

fn attachment_name(row: &Row) -> Option<&str> {
    ["ATTACHMENTNAME", "AttachmentName"]
        .iter()
        .filter_map(|key| row.get(*key).and_then(Value::as_str))
        .find(|name| !name.is_empty())
}

pub fn enrich_row(mut row: Row) -> Row {
    if let Some(url) = attachment_name(&row).map(attachment_url) {
        row.insert("pdf_url".to_string(), Value::String(url));
    }
    row
}

/// Null, false, zero, and empty strings, arrays, or objects all count as "no value".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Pulls the announcement rows out of one upstream page.
///
/// The provider is inconsistent about casing, so `Table` wins when it holds
/// anything and `table` is the fallback. A blank or missing table means the
/// end of the listing. Anything other than an array of objects is a broken
/// page.
pub fn extract_table(mut page: Map<String, Value>) -> Result<Vec<Row>> {
    let table = ["Table", "table"]
        .iter()
        .filter_map(|key| page.remove(*key))
        .find(|value| !is_blank(value));

    let items = match table {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(FeedError::UnexpectedShape(format!(
                "table is not an array: {}",
                other
            )))
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(row) => Ok(enrich_row(row)),
            other => Err(FeedError::UnexpectedShape(format!(
                "table entry is not an object: {}",
                other
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn page_limit_clamps_and_defaults() {
        assert_eq!(PageLimit::from_param(Some("0")).get(), 1);
        assert_eq!(PageLimit::from_param(Some("-4")).get(), 1);
        assert_eq!(PageLimit::from_param(Some("9999")).get(), 200);
        assert_eq!(PageLimit::from_param(Some("abc")).get(), 50);
        assert_eq!(PageLimit::from_param(Some("2.5")).get(), 50);
        assert_eq!(PageLimit::from_param(Some("")).get(), 50);
        assert_eq!(PageLimit::from_param(None).get(), 50);
        assert_eq!(PageLimit::from_param(Some(" 7 ")).get(), 7);
        assert_eq!(PageLimit::from_param(Some("+3")).get(), 3);
    }

    #[test]
    fn page_limit_overflow_clamps_by_sign() {
        assert_eq!(PageLimit::from_param(Some("99999999999999999999999")).get(), 200);
        assert_eq!(PageLimit::from_param(Some("-99999999999999999999999")).get(), 1);
    }

    #[test]
    fn base_query_uses_same_day_window() {
        let query = AnnouncementQuery::for_date("20240215");
        let encoded = serde_json::to_value(&query).unwrap();
        assert_eq!(
            encoded,
            json!({
                "strCat": "-1",
                "strPrevDate": "20240215",
                "strScrip": "",
                "strSearch": "P",
                "strToDate": "20240215",
                "strType": "C",
                "subcategory": ""
            })
        );
    }

    #[test]
    fn enrich_adds_pdf_url_from_either_casing() {
        let row = enrich_row(obj(json!({"AttachmentName": "123.pdf"})));
        assert_eq!(
            row["pdf_url"],
            "https://www.bseindia.com/xml-data/corpfiling/AttachLive/123.pdf"
        );

        let row = enrich_row(obj(json!({"ATTACHMENTNAME": "a b.pdf", "AttachmentName": "other.pdf"})));
        assert_eq!(row["pdf_url"], format!("{}a b.pdf", ATTACHMENT_BASE_URL));

        let row = enrich_row(obj(json!({"ATTACHMENTNAME": "", "AttachmentName": "x.pdf"})));
        assert_eq!(row["pdf_url"], format!("{}x.pdf", ATTACHMENT_BASE_URL));
    }

    #[test]
    fn enrich_skips_rows_without_attachment() {
        let row = enrich_row(obj(json!({"NEWSID": "1", "HEADLINE": "Board meeting"})));
        assert!(!row.contains_key("pdf_url"));

        let row = enrich_row(obj(json!({"ATTACHMENTNAME": ""})));
        assert!(!row.contains_key("pdf_url"));

        let row = enrich_row(obj(json!({"ATTACHMENTNAME": null})));
        assert!(!row.contains_key("pdf_url"));
    }

    #[test]
    fn extract_prefers_non_empty_table() {
        let rows = extract_table(obj(json!({"Table": [], "table": [{"id": 1}]}))).unwrap();
        assert_eq!(rows.len(), 1);

        let rows = extract_table(obj(json!({"Table": [{"id": 1}, {"id": 2}], "Table1": [{"n": 9}]}))).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["id"], 2);
    }

    #[test]
    fn extract_treats_missing_table_as_end() {
        assert!(extract_table(obj(json!({}))).unwrap().is_empty());
        assert!(extract_table(obj(json!({"Table": null}))).unwrap().is_empty());
        assert!(extract_table(obj(json!({"Table": "", "table": {}}))).unwrap().is_empty());
        assert!(extract_table(obj(json!({"Table": false, "table": 0}))).unwrap().is_empty());
    }

    #[test]
    fn extract_rejects_non_array_table() {
        for page in [
            json!({"Table": "nope"}),
            json!({"Table": {"NEWSID": "1"}}),
            json!({"Table": [], "table": 7}),
        ] {
            let err = extract_table(obj(page)).unwrap_err();
            assert!(matches!(err, FeedError::UnexpectedShape(_)));
        }
    }

    #[test]
    fn extract_rejects_non_object_rows() {
        let err = extract_table(obj(json!({"Table": [1, 2]}))).unwrap_err();
        assert!(matches!(err, FeedError::UnexpectedShape(_)));
    }

    #[test]
    fn response_counts_rows() {
        let response = AnnouncementsResponse::new(
            "2024-02-15".to_string(),
            vec![obj(json!({"a": 1})), obj(json!({"b": 2}))],
        );
        assert_eq!(response.count, 2);
    }
}
