use chrono::NaiveDate;
use nf_core::OrderBy;
use url::form_urlencoded;

pub const GUARDIAN_SEARCH_ENDPOINT: &str = "https://content.guardianapis.com/search";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Static part of a search query. Only the sort order varies per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub endpoint: String,
    pub topic: String,
    pub show_tags: String,
    pub api_key: String,
    pub section: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub use_date: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: GUARDIAN_SEARCH_ENDPOINT.to_string(),
            topic: "art".to_string(),
            show_tags: "contributor".to_string(),
            api_key: "test".to_string(),
            section: "culture".to_string(),
            from_date: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or_default(),
            to_date: NaiveDate::from_ymd_opt(2018, 6, 6).unwrap_or_default(),
            use_date: "published".to_string(),
        }
    }
}

impl QueryConfig {
    /// Query pairs in the order they are appended to the endpoint.
    pub fn query_pairs(&self, order_by: OrderBy) -> Vec<(&'static str, String)> {
        vec![
            ("q", self.topic.clone()),
            ("show-tags", self.show_tags.clone()),
            ("api-key", self.api_key.clone()),
            ("section", self.section.clone()),
            ("from-date", self.from_date.format(DATE_FORMAT).to_string()),
            ("to-date", self.to_date.format(DATE_FORMAT).to_string()),
            ("use-date", self.use_date.clone()),
            ("order-by", order_by.as_str().to_string()),
        ]
    }
}

/// Percent-encodes a query component. Spaces become `%20` rather than the
/// form-style `+`.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Builds the full search URL. The endpoint is not validated here; an unusable
/// endpoint shows up when the pipeline parses the result.
pub fn build_url(config: &QueryConfig, order_by: OrderBy) -> String {
    let query = config
        .query_pairs(order_by)
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if !config.endpoint.contains('?') {
        "?"
    } else if config.endpoint.ends_with('?') || config.endpoint.ends_with('&') {
        ""
    } else {
        "&"
    };

    format!("{}{}{}", config.endpoint, separator, query)
}
