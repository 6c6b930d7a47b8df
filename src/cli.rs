mod api;
mod billing;
mod series;
mod tariff;
mod watch;

use clap::{Parser, Subcommand};

pub use self::{
    api::ApiArgs,
    billing::{BillingArgs, billing},
    series::{SeriesArgs, series},
    tariff::{TariffArgs, tariff},
    watch::{WatchArgs, watch},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the sites.
    #[clap(name = "sites")]
    Sites,

    /// List the meters of a site.
    #[clap(name = "meters")]
    Meters(SiteArgs),

    /// Show the interval usage of a meter, optionally with the cost overlay.
    #[clap(name = "series")]
    Series(Box<SeriesArgs>),

    /// Show or set the tariff of a meter.
    #[clap(name = "tariff")]
    Tariff(Box<TariffArgs>),

    /// Site billing summary over a period.
    #[clap(name = "billing")]
    Billing(Box<BillingArgs>),

    /// Keep refreshing the usage of a meter.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),
}

#[derive(Parser)]
pub struct SiteArgs {
    /// Site code, for example: `LNT01`.
    #[clap(long = "site", env = "SITEBILL_SITE")]
    pub site_code: String,
}

#[derive(Parser)]
pub struct MeterArgs {
    #[clap(flatten)]
    pub site: SiteArgs,

    #[clap(long = "meter", env = "SITEBILL_METER")]
    pub meter_id: String,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_consistent() {
        Args::command().debug_assert();
    }
}
