use nf_core::{Article, Error};

use crate::http::{self, HttpConfig};
use crate::logging::Logger;
use crate::parse::{self, Extraction, FaultPolicy};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub http: HttpConfig,
    pub fault_policy: FaultPolicy,
}

/// Result of one load, with the failure attached instead of thrown.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The body was parsed. `faults` lists what was lost along the way.
    Parsed(Extraction),
    /// The server answered 200 with nothing in it.
    EmptyBody,
    /// No body was obtained.
    Failed(Error),
}

impl FetchOutcome {
    pub fn into_articles(self) -> Option<Vec<Article>> {
        match self {
            FetchOutcome::Parsed(extraction) => Some(extraction.articles),
            FetchOutcome::EmptyBody | FetchOutcome::Failed(_) => None,
        }
    }

    /// Emits one diagnostic per failure or fault.
    pub fn log(&self, logger: &Logger) {
        match self {
            FetchOutcome::Parsed(extraction) => {
                for fault in &extraction.faults {
                    match fault.index {
                        Some(index) => logger.error(&format!(
                            "Problem parsing article {} of the JSON results: {}",
                            index, fault.error
                        )),
                        None => logger.error(&format!(
                            "Problem parsing the article JSON results: {}",
                            fault.error
                        )),
                    }
                }
                logger.debug(&format!("Extracted {} articles", extraction.articles.len()));
            }
            FetchOutcome::EmptyBody => logger.warn("Empty response body"),
            FetchOutcome::Failed(error) => {
                logger.error(&format!("Problem retrieving the article JSON results ({:?}): {}", error.kind(), error))
            }
        }
    }
}

/// Runs the whole pipeline once without logging.
pub async fn load(url: &str, options: &FetchOptions) -> FetchOutcome {
    let body = match fetch(url, &options.http).await {
        Ok(body) => body,
        Err(error) => return FetchOutcome::Failed(error),
    };

    match parse::extract_articles(Some(&body), options.fault_policy) {
        Some(extraction) => FetchOutcome::Parsed(extraction),
        None => FetchOutcome::EmptyBody,
    }
}

async fn fetch(url: &str, config: &HttpConfig) -> nf_core::Result<String> {
    let url = http::parse_url(url)?;
    let client = http::client(config)?;
    http::fetch_body(&client, url).await
}

/// Fetches and parses articles from `url`. Never fails: every problem is
/// logged and degrades to `None` or to the articles parsed before it.
pub async fn fetch_articles_with(url: &str, options: &FetchOptions) -> Option<Vec<Article>> {
    let outcome = load(url, options).await;
    outcome.log(&Logger::new().with_prefix("[fetch]"));
    outcome.into_articles()
}

pub async fn fetch_articles(url: &str) -> Option<Vec<Article>> {
    fetch_articles_with(url, &FetchOptions::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_core::ErrorKind;

    #[tokio::test]
    async fn test_malformed_url_returns_none() {
        let outcome = load("not a url", &FetchOptions::default()).await;
        match outcome {
            FetchOutcome::Failed(error) => assert_eq!(error.kind(), ErrorKind::MalformedUrl),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(fetch_articles("not a url").await.is_none());
    }

    #[test]
    fn test_into_articles() {
        let parsed = FetchOutcome::Parsed(Extraction {
            articles: vec![Article::new("s", "d", "t", "", "u")],
            faults: vec![],
        });
        assert_eq!(parsed.into_articles().map(|a| a.len()), Some(1));
        assert!(FetchOutcome::EmptyBody.into_articles().is_none());
        assert!(FetchOutcome::Failed(Error::Status(500)).into_articles().is_none());
    }
}
