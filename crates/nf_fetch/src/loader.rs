use nf_core::Article;
use tokio::task::JoinHandle;

use crate::pipeline::{self, FetchOptions};

/// Runs one background fetch at a time. Starting a new load aborts the one in
/// flight, so a stale result can never arrive after a newer trigger.
#[derive(Debug)]
pub struct ArticleLoader {
    options: FetchOptions,
    current: Option<JoinHandle<Option<Vec<Article>>>>,
    generation: u64,
}

impl ArticleLoader {
    pub fn new(options: FetchOptions) -> Self {
        Self {
            options,
            current: None,
            generation: 0,
        }
    }

    /// Number of loads started so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Starts a load for `url`, superseding any load still running.
    pub fn start(&mut self, url: impl Into<String>) {
        self.reset();
        let url = url.into();
        let options = self.options;
        self.generation += 1;
        tracing::debug!("Starting load #{} for {}", self.generation, url);
        self.current = Some(tokio::spawn(async move {
            pipeline::fetch_articles_with(&url, &options).await
        }));
    }

    /// Waits for the current load. `None` if nothing was started, the load was
    /// aborted, or the pipeline produced no data.
    pub async fn finish(&mut self) -> Option<Vec<Article>> {
        let handle = self.current.take()?;
        match handle.await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!("Load #{} did not complete: {}", self.generation, e);
                None
            }
        }
    }

    /// Aborts the in-flight load, if any.
    pub fn reset(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }
}

impl Drop for ArticleLoader {
    fn drop(&mut self) {
        self.reset();
    }
}
