use clap::Parser;

use crate::{
    api::Backend,
    cli::MeterArgs,
    dashboard::load_meter_view,
    prelude::*,
    tables::build_series_table,
};

#[derive(Parser)]
pub struct SeriesArgs {
    #[clap(flatten)]
    pub meter: MeterArgs,

    /// Look-back window.
    #[clap(long, default_value = "24", env = "SITEBILL_SERIES_HOURS")]
    pub hours: u32,

    /// Add the cost column, when the meter has a tariff.
    #[clap(long)]
    pub show_cost: bool,
}

#[instrument(skip_all, fields(meter_id = %args.meter.meter_id))]
pub async fn series(backend: &impl Backend, args: &SeriesArgs) -> Result {
    let site_code = &args.meter.site.site_code;
    let meter_id = &args.meter.meter_id;

    let (meters, view) = tokio::join!(
        backend.get_meters(site_code),
        load_meter_view(backend, site_code, meter_id, args.hours),
    );
    if view.series.is_empty() {
        println!("No readings for `{meter_id}` in the last {} hours.", args.hours);
        return Ok(());
    }
    if args.show_cost && view.tariff.is_none() {
        println!("No tariff set for this meter.");
    }

    let unit = meters
        .iter()
        .find(|meter| &meter.meter_id == meter_id)
        .map(|meter| meter.unit.as_str())
        .or_else(|| view.tariff.as_ref().map(|tariff| tariff.unit.as_str()))
        .unwrap_or("units");
    println!("{}", build_series_table(&view, unit, args.show_cost));
    Ok(())
}
