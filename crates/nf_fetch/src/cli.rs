use std::io::Write;

use chrono::DateTime;
use clap::Subcommand;
use nf_core::{Article, OrderBy, Result};

use crate::connectivity::{self, PROBE_TIMEOUT};
use crate::loader::ArticleLoader;
use crate::request::{build_url, QueryConfig};

pub const NO_CONNECTION: &str = "No internet connection, please check your connectivity and try again.";
pub const NO_ARTICLES: &str = "No articles found, please try again later.";

#[derive(Subcommand, Debug, Clone)]
pub enum FetchCommands {
    /// Fetch and list articles for the configured query
    List {
        /// Print the articles as JSON instead of a list
        #[arg(long)]
        json: bool,
    },
    /// Fetch and list articles from an explicit search URL
    Url {
        url: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the search URL that would be requested
    Query,
}

#[derive(Debug, Clone)]
pub struct FetchArgs {
    pub command: FetchCommands,
    pub query: QueryConfig,
    pub order_by: OrderBy,
}

/// Runs one load trigger for `args` and writes the result to `out`.
pub async fn handle_command<W: Write>(args: &FetchArgs, loader: &mut ArticleLoader, out: &mut W) -> Result<()> {
    let (url, json) = match &args.command {
        FetchCommands::Query => {
            writeln!(out, "{}", build_url(&args.query, args.order_by))?;
            return Ok(());
        }
        FetchCommands::List { json } => (build_url(&args.query, args.order_by), *json),
        FetchCommands::Url { url, json } => (url.clone(), *json),
    };

    if !connectivity::is_online(&url, PROBE_TIMEOUT).await {
        tracing::warn!("Network unavailable, skipping load");
        writeln!(out, "{}", NO_CONNECTION)?;
        return Ok(());
    }

    loader.start(url);
    let articles = loader.finish().await.unwrap_or_default();
    tracing::info!("📰 Loaded {} articles", articles.len());

    if json {
        render_json(&articles, out)
    } else {
        render_list(&articles, out)
    }
}

pub fn render_list<W: Write>(articles: &[Article], out: &mut W) -> Result<()> {
    if articles.is_empty() {
        writeln!(out, "{}", NO_ARTICLES)?;
        return Ok(());
    }

    for (i, article) in articles.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, article.title())?;
        let mut meta = vec![article.section().to_string()];
        if !article.author().is_empty() {
            meta.push(article.author().to_string());
        }
        meta.push(format_date(article.publication_date()));
        writeln!(out, "     {}", meta.join(" · "))?;
        writeln!(out, "     {}", article.url())?;
    }
    Ok(())
}

pub fn render_json<W: Write>(articles: &[Article], out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, articles).map_err(std::io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

/// Friendly date such as `Tue, May 1, '18`; falls back to the raw value.
pub fn format_date(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|date| date.format("%a, %b %-d, '%y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FetchOptions;

    fn render(articles: &[Article]) -> String {
        let mut out = Vec::new();
        render_list(articles, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_list_message() {
        assert_eq!(render(&[]), format!("{}\n", NO_ARTICLES));
    }

    #[test]
    fn test_list_layout() {
        let articles = vec![
            Article::new("Art and design", "2018-05-01T10:00:00Z", "First", "Jonathan Jones", "http://x/1"),
            Article::new("Culture", "someday", "Second", "", "http://x/2"),
        ];
        let text = render(&articles);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "  1. First");
        assert_eq!(lines[1], "     Art and design · Jonathan Jones · Tue, May 1, '18");
        assert_eq!(lines[2], "     http://x/1");
        assert_eq!(lines[4], "     Culture · someday");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2018-03-03T00:00:00Z"), "Sat, Mar 3, '18");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        render_json(&[Article::new("s", "d", "t", "a", "u")], &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["title"], "t");
    }

    #[tokio::test]
    async fn test_query_command_prints_url() {
        let args = FetchArgs {
            command: FetchCommands::Query,
            query: QueryConfig::default(),
            order_by: OrderBy::Oldest,
        };
        let mut loader = ArticleLoader::new(FetchOptions::default());
        let mut out = Vec::new();
        handle_command(&args, &mut loader, &mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("https://content.guardianapis.com/search?q=art"));
        assert!(text.trim_end().ends_with("order-by=oldest"));
        assert_eq!(loader.generation(), 0);
    }

    #[tokio::test]
    async fn test_unusable_url_reports_no_connection() {
        let args = FetchArgs {
            command: FetchCommands::Url { url: "nowhere".to_string(), json: false },
            query: QueryConfig::default(),
            order_by: OrderBy::Newest,
        };
        let mut loader = ArticleLoader::new(FetchOptions::default());
        let mut out = Vec::new();
        handle_command(&args, &mut loader, &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", NO_CONNECTION));
        assert_eq!(loader.generation(), 0);
    }
}
