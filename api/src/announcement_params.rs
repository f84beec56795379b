/// Raw query string values. Both stay strings so a bad `limit_pages`
/// can fall back to the default instead of rejecting the request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AnnouncementParams {
    pub date: Option<String>,
    pub limit_pages: Option<String>,
}

impl AnnouncementParams {
    /// Repeated keys never fail the request: the first non-blank value wins
    /// and blank values are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            let slot = match key.as_str() {
                "date" => &mut params.date,
                "limit_pages" => &mut params.limit_pages,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }
}
