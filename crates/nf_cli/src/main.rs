use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use clap::Parser;
use nf_core::{OrderBy, Result};
use nf_fetch::http::{HttpConfig, CONNECT_TIMEOUT, READ_TIMEOUT};
use nf_fetch::logging::init_logging;
use nf_fetch::{handle_command, ArticleLoader, FaultPolicy, FetchArgs, FetchCommands, FetchOptions, QueryConfig};
use tracing::info;

/// Reload interval written as unit-suffixed parts, e.g. `1h15m30s`. A bare
/// number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HumanDuration(Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Duration must include a number".to_string());
        }

        let mut total: u64 = 0;
        let mut rest = s;
        while !rest.is_empty() {
            let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            if digits == 0 {
                return Err(format!("Expected a number at '{}'", rest));
            }
            let value: u64 = rest[..digits]
                .parse()
                .map_err(|_| format!("Number too large in duration: {}", s))?;
            rest = &rest[digits..];

            let multiplier = match rest.chars().next() {
                None => 1,
                Some(unit) => {
                    rest = &rest[unit.len_utf8()..];
                    unit_seconds(unit).ok_or_else(|| format!("Invalid duration unit: {}", unit))?
                }
            };

            total = value
                .checked_mul(multiplier)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(|| format!("Duration too long: {}", s))?;
        }

        if total == 0 {
            return Err("Duration must be greater than zero".to_string());
        }
        Ok(HumanDuration(Duration::from_secs(total)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse Guardian articles from the terminal", long_about = None)]
struct Cli {
    /// Search endpoint
    #[arg(long, env = "NF_ENDPOINT", default_value = nf_fetch::GUARDIAN_SEARCH_ENDPOINT)]
    endpoint: String,
    #[arg(long, env = "NF_API_KEY", default_value = "test", hide_env_values = true)]
    api_key: String,
    #[arg(long, default_value = "art")]
    topic: String,
    #[arg(long, default_value = "culture")]
    section: String,
    #[arg(long, value_enum, default_value_t = OrderBy::Newest)]
    order_by: OrderBy,
    #[arg(long, default_value = "2018-01-01")]
    from_date: NaiveDate,
    #[arg(long, default_value = "2018-06-06")]
    to_date: NaiveDate,
    /// What to do when one result cannot be parsed: stop there (abort) or drop it (skip)
    #[arg(long, value_enum, default_value_t = FaultPolicy::Abort)]
    fault_policy: FaultPolicy,
    #[arg(long, default_value_t = CONNECT_TIMEOUT.as_millis() as u64)]
    connect_timeout_ms: u64,
    #[arg(long, default_value_t = READ_TIMEOUT.as_millis() as u64)]
    read_timeout_ms: u64,
    /// Reload every interval (e.g. 30m, 1h, 1h15m30s) instead of once
    #[arg(long)]
    interval: Option<HumanDuration>,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<FetchCommands>,
}

impl Cli {
    fn query_config(&self) -> QueryConfig {
        QueryConfig {
            endpoint: self.endpoint.clone(),
            topic: self.topic.clone(),
            api_key: self.api_key.clone(),
            section: self.section.clone(),
            from_date: self.from_date,
            to_date: self.to_date,
            ..QueryConfig::default()
        }
    }

    fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            http: HttpConfig {
                connect_timeout: Duration::from_millis(self.connect_timeout_ms),
                read_timeout: Duration::from_millis(self.read_timeout_ms),
            },
            fault_policy: self.fault_policy,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { "debug" } else { "info" });

    if cli.from_date > cli.to_date {
        return Err(nf_core::Error::Config(format!(
            "from-date {} is after to-date {}",
            cli.from_date, cli.to_date
        )));
    }

    let args = FetchArgs {
        command: cli.command.clone().unwrap_or(FetchCommands::List { json: false }),
        query: cli.query_config(),
        order_by: cli.order_by,
    };
    let mut loader = ArticleLoader::new(cli.fetch_options());
    let mut stdout = std::io::stdout();

    match cli.interval {
        Some(interval) if !matches!(args.command, FetchCommands::Query) => {
            info!("Running in periodic mode with {}s interval", interval.0.as_secs());
            loop {
                if let Err(e) = handle_command(&args, &mut loader, &mut stdout).await {
                    tracing::error!("Error during load: {}", e);
                }
                info!("Waiting {}s before next load", interval.0.as_secs());
                tokio::time::sleep(interval.0).await;
            }
        }
        _ => handle_command(&args, &mut loader, &mut stdout).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("45".parse::<HumanDuration>().unwrap().0, Duration::from_secs(45));
        assert_eq!("30m".parse::<HumanDuration>().unwrap().0, Duration::from_secs(1800));
        assert_eq!("1h15m30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(4530));
        assert_eq!("1d".parse::<HumanDuration>().unwrap().0, Duration::from_secs(86400));
        assert!("".parse::<HumanDuration>().is_err());
        assert!("0s".parse::<HumanDuration>().is_err());
        assert!("5x".parse::<HumanDuration>().is_err());
        assert!("h".parse::<HumanDuration>().is_err());
        assert!("1h 30m".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_human_duration_overflow() {
        assert!("99999999999999999999s".parse::<HumanDuration>().is_err());
        assert!("300000000000000d".parse::<HumanDuration>().is_err());
        assert!(format!("{}s1s", u64::MAX).parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["nf"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.order_by, OrderBy::Newest);
        assert_eq!(cli.fault_policy, FaultPolicy::Abort);
        assert_eq!(cli.fetch_options(), FetchOptions::default());
        assert_eq!(cli.query_config().section, "culture");
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "nf",
            "--order-by",
            "relevance",
            "--section",
            "artanddesign",
            "--fault-policy",
            "skip",
            "--interval",
            "10m",
            "list",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.order_by, OrderBy::Relevance);
        assert_eq!(cli.query_config().section, "artanddesign");
        assert_eq!(cli.fault_policy, FaultPolicy::Skip);
        assert_eq!(cli.interval, Some(HumanDuration(Duration::from_secs(600))));
        assert!(matches!(cli.command, Some(FetchCommands::List { json: true })));
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from(["nf", "--from-date", "2018-13-01"]).is_err());
    }
}
