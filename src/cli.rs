use std::io;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::config::PortalConfig;
use crate::output;
use crate::portal::PortalClient;

/// Export utility consumption from the Tekniska verken customer portal as CSV
#[derive(Parser, Debug)]
#[command(name = "tekniskaverken-exporter", version, about)]
pub struct Cli {
    /// Username for mina-sidor.tekniskaverken.se
    #[arg(short, long)]
    pub username: String,

    /// Password for mina-sidor.tekniskaverken.se
    #[arg(short, long)]
    pub password: String,

    /// The requested service (eg. fjarrvarme, el, vatten, avfall).
    /// Availability depends on the account.
    #[arg(long)]
    pub service: String,

    /// Aggregation level of the exported readings
    #[arg(long, value_enum)]
    pub period: Period,

    /// Start of the range: "YYYY-MM-DD" for daily, "YYYY-MM" for monthly,
    /// "YYYY" for yearly
    #[arg(long)]
    pub since: String,

    /// End of the range, same format as --since
    #[arg(long)]
    pub until: String,

    /// Disable TLS certificate verification when talking to the portal
    #[arg(long)]
    pub danger_accept_invalid_certs: bool,

    /// Log verbosity (error, warn, info, debug, trace), written to stderr
    #[arg(short, long, default_value = "error")]
    pub verbosity: String,
}

/// Granularity choice on the command line, which also fixes the date format
/// used for `--since`/`--until` and for the CSV date column.
#[derive(ValueEnum, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Period {
    Daily,
    Monthly,
    Yearly,
}

impl Period {
    pub fn date_format(self) -> &'static str {
        match self {
            Period::Daily => "%Y-%m-%d",
            Period::Monthly => "%Y-%m",
            Period::Yearly => "%Y",
        }
    }

    /// Parses a range bound in this period's format. Monthly and yearly
    /// values resolve to the first day of the month respectively year.
    fn parse_date(self, text: &str) -> Result<NaiveDate, chrono::ParseError> {
        match self {
            Period::Daily => NaiveDate::parse_from_str(text, "%Y-%m-%d"),
            Period::Monthly => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d"),
            Period::Yearly => NaiveDate::parse_from_str(&format!("{text}-01-01"), "%Y-%m-%d"),
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.verbosity.as_str()).unwrap_or(tracing::Level::ERROR)
    }

    pub async fn run(self) -> Result<()> {
        let since = self
            .period
            .parse_date(&self.since)
            .with_context(|| format!("invalid --since value '{}'", self.since))?;
        let until = self
            .period
            .parse_date(&self.until)
            .with_context(|| format!("invalid --until value '{}'", self.until))?;

        let mut config = PortalConfig::new(self.username, self.password);
        config.danger_accept_invalid_certs = self.danger_accept_invalid_certs;
        let mut client = PortalClient::new(config)?;

        let points = match self.period {
            Period::Daily => client.get_daily(&self.service, since, until).await?,
            Period::Monthly => client.get_monthly(&self.service, since, until).await?,
            Period::Yearly => client.get_yearly(&self.service, since, until, false).await?,
        };

        output::write_csv(io::stdout().lock(), &points, self.period.date_format())?;
        Ok(())
    }
}
