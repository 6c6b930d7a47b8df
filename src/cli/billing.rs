use chrono::{DateTime, Local, Utc};
use clap::Parser;

use crate::{
    api::Backend,
    cli::SiteArgs,
    core::{interval::Interval, period::Period, tariff::TariffRegistry},
    dashboard::{SiteBilling, load_site_billing},
    prelude::*,
    tables::build_billing_table,
};

#[derive(Parser)]
pub struct BillingArgs {
    #[clap(flatten)]
    pub site: SiteArgs,

    /// Billing period preset, ignored when `--from` is given.
    #[clap(long, value_enum, default_value_t, env = "SITEBILL_PERIOD")]
    pub period: Period,

    /// Inclusive period start, for example: `2025-01-01T00:00:00Z`.
    #[clap(long)]
    pub from: Option<DateTime<Utc>>,

    /// Exclusive period end, defaults to now.
    #[clap(long, requires = "from")]
    pub to: Option<DateTime<Utc>>,

    /// Ask the backend for its summary instead of computing it from the readings and tariffs.
    #[clap(long)]
    pub remote: bool,

    /// Print the summary as JSON.
    #[clap(long)]
    pub json: bool,

    /// Currency of the meters without a known tariff.
    #[clap(long, default_value = "GBP", env = "SITEBILL_CURRENCY")]
    pub currency: String,
}

impl BillingArgs {
    pub fn interval(&self, now: DateTime<Local>) -> Interval {
        match self.from {
            Some(from) => Interval::new(from, self.to.unwrap_or_else(|| now.with_timezone(&Utc))),
            None => self.period.interval(&now),
        }
    }
}

#[instrument(skip_all, fields(site_code = %args.site.site_code))]
pub async fn billing(backend: &impl Backend, args: &BillingArgs) -> Result {
    let now = Local::now();
    let period = args.interval(now);
    ensure!(period.start <= period.end, "the period ends before it starts");
    info!(?period, remote = args.remote, "billing…");

    let SiteBilling { summary, tariffs } = if args.remote {
        SiteBilling {
            summary: backend.get_billing_summary(&args.site.site_code, period).await,
            tariffs: TariffRegistry::new(),
        }
    } else {
        load_site_billing(backend, &args.site.site_code, period, now.with_timezone(&Utc)).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if summary.rows.is_empty() {
        println!("No billing data in this period.");
    } else {
        println!("{}", build_billing_table(&summary, &tariffs, &args.currency));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn parse(extra: &[&str]) -> BillingArgs {
        let mut argv = vec!["billing", "--site", "LNT01"];
        argv.extend_from_slice(extra);
        BillingArgs::parse_from(argv)
    }

    #[test]
    fn test_explicit_interval() -> Result {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let args = parse(&["--from", "2025-01-01T00:00:00Z", "--to", "2025-01-31T00:00:00Z"]);
        let interval = args.interval(now);
        assert_eq!(interval.start, "2025-01-01T00:00:00Z".parse::<DateTime<Utc>>()?);
        assert_eq!(interval.end, "2025-01-31T00:00:00Z".parse::<DateTime<Utc>>()?);
        Ok(())
    }

    #[test]
    fn test_open_ended_interval() -> Result {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let args = parse(&["--from", "2025-03-01T00:00:00Z"]);
        assert_eq!(args.interval(now).end, now.with_timezone(&Utc));
        Ok(())
    }

    #[test]
    fn test_preset_interval() {
        let now = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let args = parse(&["--period", "last-month"]);
        assert_eq!(args.interval(now), Period::LastMonth.interval(&now));
    }

    #[test]
    fn test_to_requires_from() {
        let result =
            BillingArgs::try_parse_from(["billing", "--site", "X", "--to", "2025-01-01T00:00:00Z"]);
        assert!(result.is_err());
    }
}
