use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::{
    api::Backend,
    cli::MeterArgs,
    core::tariff::TariffRegistry,
    prelude::*,
    tables::build_tariff_table,
};

#[derive(Parser)]
pub struct TariffArgs {
    #[command(subcommand)]
    pub command: TariffCommand,
}

#[derive(Subcommand)]
pub enum TariffCommand {
    /// Show the current tariff of a meter.
    #[clap(name = "show")]
    Show(MeterArgs),

    /// Validate and store a new tariff, replacing the current one.
    #[clap(name = "set")]
    Set(SetTariffArgs),
}

#[derive(Parser)]
pub struct SetTariffArgs {
    #[clap(flatten)]
    pub meter: MeterArgs,

    /// Currency per unit, for example: `0.245`.
    #[clap(long = "unit-rate", allow_hyphen_values = true)]
    pub unit_rate: String,

    /// Currency per day.
    #[clap(long = "standing-charge", allow_hyphen_values = true)]
    pub standing_charge: String,

    /// Billing unit, defaults to the meter's unit.
    #[clap(long)]
    pub unit: Option<String>,

    #[clap(long, default_value = "GBP", env = "SITEBILL_CURRENCY")]
    pub currency: String,
}

pub async fn tariff(backend: &impl Backend, args: &TariffArgs) -> Result {
    match &args.command {
        TariffCommand::Show(args) => show(backend, args).await,
        TariffCommand::Set(args) => set(backend, args).await,
    }
}

#[instrument(skip_all, fields(meter_id = %args.meter_id))]
async fn show(backend: &impl Backend, args: &MeterArgs) -> Result {
    match backend.get_tariff(&args.meter_id).await {
        Some(tariff) => println!("{}", build_tariff_table(&tariff)),
        None => println!("No tariff set for this meter."),
    }
    Ok(())
}

#[instrument(skip_all, fields(meter_id = %args.meter.meter_id))]
async fn set(backend: &impl Backend, args: &SetTariffArgs) -> Result {
    let site_code = &args.meter.site.site_code;
    let meter_id = &args.meter.meter_id;

    let (meters, current) =
        tokio::join!(backend.get_meters(site_code), backend.get_tariff(meter_id));
    let unit = match &args.unit {
        Some(unit) => unit.clone(),
        None => meters
            .into_iter()
            .find(|meter| &meter.meter_id == meter_id)
            .map(|meter| meter.unit)
            .or_else(|| current.as_ref().map(|tariff| tariff.unit.clone()))
            .with_context(|| format!("unknown unit for `{meter_id}`, pass `--unit`"))?,
    };

    let mut registry: TariffRegistry = current.into_iter().collect();
    let tariff = registry
        .upsert(
            meter_id,
            &unit,
            &Value::String(args.unit_rate.clone()),
            &Value::String(args.standing_charge.clone()),
            &args.currency,
        )
        .context("invalid tariff")?;
    let stored = backend.put_tariff(site_code, &tariff).await?;
    if stored != tariff {
        warn!(?tariff, ?stored, "the backend stored a different tariff");
    }
    println!("{}", build_tariff_table(&stored));
    Ok(())
}
