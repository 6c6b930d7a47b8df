use std::{sync::Arc, time::Duration};

use clap::Parser;
use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};

use crate::{
    api::Backend,
    cli::MeterArgs,
    core::latest::Latest,
    dashboard::{MeterView, load_meter_view},
    prelude::*,
    tables::build_series_table,
};

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(flatten)]
    pub meter: MeterArgs,

    #[clap(long, default_value = "24", env = "SITEBILL_SERIES_HOURS")]
    pub hours: u32,

    /// Refresh period.
    #[clap(long = "every-secs", default_value = "30", env = "SITEBILL_WATCH_EVERY_SECS")]
    pub every_secs: u64,

    #[clap(long)]
    pub show_cost: bool,
}

/// Refresh the meter view periodically until interrupted.
///
/// Every refresh runs in its own task. Only the view of the latest started refresh
/// gets printed, a slower earlier one that completes afterwards is dropped.
#[instrument(skip_all, fields(meter_id = %args.meter.meter_id))]
pub async fn watch<B: Backend + Send + 'static>(backend: Arc<B>, args: &WatchArgs) -> Result {
    let site_code = &args.meter.site.site_code;
    let meter_id = &args.meter.meter_id;
    let unit = backend
        .get_meters(site_code)
        .await
        .into_iter()
        .find(|meter| &meter.meter_id == meter_id)
        .map_or_else(|| String::from("units"), |meter| meter.unit);

    let latest = Latest::<MeterView>::new();
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let mut ticker = interval(Duration::from_secs(args.every_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let ticket = latest.begin();
                let backend = Arc::clone(&backend);
                let sender = sender.clone();
                let (site_code, meter_id) = (site_code.clone(), meter_id.clone());
                let hours = args.hours;
                tokio::spawn(async move {
                    let view = load_meter_view(&*backend, &site_code, &meter_id, hours).await;
                    let _ = sender.send((ticket, view));
                });
            }
            Some((ticket, view)) = receiver.recv() => {
                let table = build_series_table(&view, &unit, args.show_cost);
                let n_readings = view.series.readings.len();
                if latest.complete(ticket, view) {
                    info!(n_readings, "refreshed");
                    println!("{table}");
                } else {
                    debug!(?ticket, "superseded, dropping");
                }
            }
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for the interrupt signal")?;
                info!("interrupted");
                break;
            }
        }
    }

    Ok(())
}
