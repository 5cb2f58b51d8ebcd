use std::time::Duration;

use tokio::net::lookup_host;
use url::Url;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns true when the endpoint's host resolves within `timeout`.
///
/// This stands in for "is there an active network" and is checked before a
/// load is attempted.
pub async fn is_online(endpoint: &str, timeout: Duration) -> bool {
    let Ok(url) = Url::parse(endpoint) else {
        return false;
    };
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return false;
    };
    let host = host.trim_start_matches('[').trim_end_matches(']').to_string();

    let resolved = match tokio::time::timeout(timeout, lookup_host((host.as_str(), port))).await {
        Ok(Ok(mut addrs)) => addrs.next().is_some(),
        Ok(Err(e)) => {
            tracing::debug!("Could not resolve {}: {}", host, e);
            false
        }
        Err(_) => {
            tracing::debug!("Resolving {} timed out", host);
            false
        }
    };
    resolved
}
