use std::time::Duration;

use nf_core::{Error, Result};
use reqwest::{redirect, Client, StatusCode};
use url::Url;

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(15_000);
pub const READ_TIMEOUT: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
        }
    }
}

pub fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
}

/// Client for a single fetch. Redirects are not followed so that anything but
/// a direct 200 counts as "no data".
pub fn client(config: &HttpConfig) -> Result<Client> {
    Ok(Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .redirect(redirect::Policy::none())
        .build()?)
}

/// Performs the GET and returns the body with its line breaks removed.
///
/// The body is only read when the status is exactly 200.
pub async fn fetch_body(client: &Client, url: Url) -> Result<String> {
    tracing::debug!("GET {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?;
    Ok(join_lines(&String::from_utf8_lossy(&bytes)))
}

/// Concatenates the lines of `text` without their terminators. A line ends at
/// `\n`, `\r\n` or a lone `\r`.
pub fn join_lines(text: &str) -> String {
    text.split(&['\r', '\n'][..]).collect()
}
