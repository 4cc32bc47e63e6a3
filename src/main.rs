use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use fuel_prices::{
    schedule::{self, Settings},
    stations::{Fetcher, ENDPOINT},
};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Snapshot diesel and Euro 95 prices from brandstof-zoeker.nl to CSV
#[derive(Debug, Parser)]
struct Cli {
    /// Number of fetch cycles to run
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    cycles: u32,

    /// Minutes to wait between cycles
    #[arg(default_value = "1", value_parser = parse_minutes)]
    wait: Duration,

    /// CSV of lat1,lng1,lat2,lng2 rows
    #[arg(long, default_value = "partitions.csv")]
    areas: PathBuf,

    /// Directory for the timestamped and latest snapshots
    #[arg(long, default_value = "data")]
    output: PathBuf,

    #[arg(long, default_value = ENDPOINT)]
    endpoint: String,
}

fn parse_minutes(s: &str) -> Result<Duration, String> {
    let minutes: f64 = s.parse().map_err(|_| format!("{s:?} is not a number"))?;
    Duration::try_from_secs_f64(minutes * 60.0)
        .map_err(|_| format!("{s} is not a usable number of minutes"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
    debug!("{cli:?}");

    let settings = Settings {
        areas: cli.areas,
        output: cli.output,
        cycles: cli.cycles,
        wait: cli.wait,
    };
    let fetcher = Fetcher::new(cli.endpoint);

    schedule::run(&settings, &fetcher).context("Fetch cycle failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["fuel-prices"]);
        assert_eq!(cli.cycles, 1);
        assert_eq!(cli.wait, Duration::from_secs(60));
        assert_eq!(cli.areas, PathBuf::from("partitions.csv"));
        assert_eq!(cli.output, PathBuf::from("data"));
        assert_eq!(cli.endpoint, ENDPOINT);
    }

    #[test]
    fn positional_cycles_and_wait() {
        let cli = Cli::parse_from(["fuel-prices", "3", "0.5"]);
        assert_eq!(cli.cycles, 3);
        assert_eq!(cli.wait, Duration::from_secs(30));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["fuel-prices", "0"]).is_err());
        assert!(Cli::try_parse_from(["fuel-prices", "2", "-1"]).is_err());
        assert!(Cli::try_parse_from(["fuel-prices", "two"]).is_err());
        assert!(Cli::try_parse_from(["fuel-prices", "2", "1e300"]).is_err());
        assert!(Cli::try_parse_from(["fuel-prices", "2", "inf"]).is_err());
        assert!(Cli::try_parse_from(["fuel-prices", "2", "NaN"]).is_err());
    }
}
