use nf_core::{Article, Error, Result};
use serde_json::{Map, Value};

/// What happens when one element of `results` cannot be turned into an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FaultPolicy {
    /// Keep the articles read so far and stop at the first faulty element.
    #[default]
    Abort,
    /// Drop the faulty element and keep going.
    Skip,
}

/// A parse failure. `index` is the position in `results`, or `None` when the
/// document itself could not be read.
#[derive(Debug)]
pub struct Fault {
    pub index: Option<usize>,
    pub error: Error,
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub articles: Vec<Article>,
    pub faults: Vec<Fault>,
}

/// Turns a search response body into articles.
///
/// Returns `None` for an empty body without attempting to parse it. Any other
/// input yields an [`Extraction`], possibly with no articles.
pub fn extract_articles(body: Option<&str>, policy: FaultPolicy) -> Option<Extraction> {
    let body = body.filter(|b| !b.is_empty())?;
    let mut extraction = Extraction::default();

    let results = match results_array(body) {
        Ok(results) => results,
        Err(error) => {
            extraction.faults.push(Fault { index: None, error });
            return Some(extraction);
        }
    };

    for (index, item) in results.iter().enumerate() {
        match article_from_value(item) {
            Ok(article) => extraction.articles.push(article),
            Err(error) => {
                extraction.faults.push(Fault { index: Some(index), error });
                if policy == FaultPolicy::Abort {
                    break;
                }
            }
        }
    }

    Some(extraction)
}

fn results_array(body: &str) -> Result<Vec<Value>> {
    let mut document: Value = serde_json::from_str(body)?;
    match document
        .get_mut("response")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::missing_field("response"))?
        .remove("results")
    {
        Some(Value::Array(results)) => Ok(results),
        _ => Err(Error::missing_field("response.results")),
    }
}

pub fn article_from_value(value: &Value) -> Result<Article> {
    let item = value
        .as_object()
        .ok_or_else(|| Error::missing_field("results[]"))?;

    let section = string_field(item, "sectionName")?;
    let publication_date = string_field(item, "webPublicationDate")?;
    let title = string_field(item, "webTitle")?;
    let url = string_field(item, "webUrl")?;

    let tags = item
        .get("tags")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::missing_field("tags"))?;

    let author = match tags.first() {
        Some(tag) => {
            let tag = tag
                .as_object()
                .ok_or_else(|| Error::missing_field("tags[0]"))?;
            string_field(tag, "webTitle")?
        }
        None => String::new(),
    };

    Ok(Article::new(section, publication_date, title, author, url))
}

fn string_field(object: &Map<String, Value>, key: &str) -> Result<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::missing_field(key))
}
