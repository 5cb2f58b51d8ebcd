pub mod cli;
pub mod connectivity;
pub mod http;
pub mod loader;
pub mod logging;
pub mod parse;
pub mod pipeline;
pub mod request;

pub use cli::{handle_command, FetchArgs, FetchCommands};
pub use loader::ArticleLoader;
pub use parse::{extract_articles, Extraction, Fault, FaultPolicy};
pub use pipeline::{fetch_articles, fetch_articles_with, load, FetchOptions, FetchOutcome};
pub use request::{build_url, QueryConfig, GUARDIAN_SEARCH_ENDPOINT};
