use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A single news item as returned by the content API.
///
/// Values are stored exactly as extracted; the publication date stays in the
/// API's own string encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    section: String,
    publication_date: String,
    title: String,
    author: String,
    url: String,
}

impl Article {
    pub fn new(
        section: impl Into<String>,
        publication_date: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            section: section.into(),
            publication_date: publication_date.into(),
            title: title.into(),
            author: author.into(),
            url: url.into(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn publication_date(&self) -> &str {
        &self.publication_date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// First contributor's name, empty when the API lists none.
    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Sort order accepted by the search endpoint's `order-by` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OrderBy {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl OrderBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderBy::Newest => "newest",
            OrderBy::Oldest => "oldest",
            OrderBy::Relevance => "relevance",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(OrderBy::Newest),
            "oldest" => Ok(OrderBy::Oldest),
            "relevance" => Ok(OrderBy::Relevance),
            other => Err(Error::Config(format!("Unknown order: {}", other))),
        }
    }
}
