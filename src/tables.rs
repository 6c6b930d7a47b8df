use average::Mean;
use chrono::Local;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    core::{
        billing::BillingSummary,
        meter::{Meter, Site},
        numeric::to_finite_number_or_zero,
        tariff::{Tariff, TariffRegistry},
    },
    dashboard::MeterView,
    fmt::Money,
    quantity::cost::Cost,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

pub fn build_sites_table(sites: &[Site]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Code", "Name"]);
    for site in sites {
        table.add_row(vec![
            Cell::new(&site.code).add_attribute(Attribute::Bold),
            Cell::new(&site.name),
        ]);
    }
    table
}

pub fn build_meters_table(meters: &[Meter]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Meter", "Type", "Unit"]);
    for meter in meters {
        table.add_row(vec![
            Cell::new(&meter.meter_id).add_attribute(Attribute::Bold),
            Cell::new(&meter.kind),
            Cell::new(&meter.unit).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

/// Usage series, with the cost overlay as an extra column when requested and available.
pub fn build_series_table(view: &MeterView, unit: &str, show_cost: bool) -> Table {
    let values = view
        .series
        .readings
        .iter()
        .map(|reading| to_finite_number_or_zero(&reading.value))
        .collect_vec();
    let mean_value = mean(&values);
    let currency = view.tariff.as_ref().map_or("", |tariff| tariff.currency.as_str());
    let show_cost = show_cost && !view.cost.is_empty();

    let mut table = new_table();
    let mut header = vec!["Date".to_owned(), "Time".to_owned(), format!("Usage, {unit}")];
    if show_cost {
        header.push("Cost".to_owned());
    }
    table.set_header(header);

    for (index, (reading, value)) in view.series.readings.iter().zip(&values).enumerate() {
        let timestamp = reading.timestamp.with_timezone(&Local);
        let mut row = vec![
            Cell::new(timestamp.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(timestamp.format("%H:%M")),
            Cell::new(format!("{value:.3}"))
                .set_alignment(CellAlignment::Right)
                .fg(if *value > mean_value { Color::Red } else { Color::Green }),
        ];
        if show_cost && let Some(point) = view.cost.get(index) {
            row.push(
                Cell::new(Money::new(Cost::from(point.value), currency))
                    .set_alignment(CellAlignment::Right),
            );
        }
        table.add_row(row);
    }
    table
}

pub fn build_tariff_table(tariff: &Tariff) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Meter", "Unit", "Rate", "Standing", "Currency"]);
    table.add_row(vec![
        Cell::new(&tariff.meter_id).add_attribute(Attribute::Bold),
        Cell::new(&tariff.unit),
        Cell::new(format!("{}/{}", tariff.unit_rate, tariff.unit))
            .set_alignment(CellAlignment::Right),
        Cell::new(format!("{}/day", tariff.standing_charge)).set_alignment(CellAlignment::Right),
        Cell::new(&tariff.currency).add_attribute(Attribute::Dim),
    ]);
    table
}

/// Billing rows plus the site subtotal.
///
/// The currency of a row comes from the meter's tariff, if known, or falls back to `currency`.
pub fn build_billing_table(
    summary: &BillingSummary,
    tariffs: &TariffRegistry,
    currency: &str,
) -> Table {
    let currency_of = |meter_id: &str| {
        tariffs.get(meter_id).map_or(currency, |tariff| tariff.currency.as_str())
    };
    let row_currencies = summary.rows.iter().map(|row| currency_of(&row.meter_id)).collect_vec();
    let subtotal_currency = match row_currencies.first() {
        Some(first) if row_currencies.iter().all_equal() => *first,
        _ => currency,
    };

    let mut table = new_table();
    table.set_header(vec!["Meter", "Quantity", "Energy", "Days", "Standing", "Total"]);
    for (row, currency) in summary.rows.iter().zip(row_currencies) {
        table.add_row(vec![
            Cell::new(&row.meter_id).add_attribute(Attribute::Bold),
            Cell::new(format!("{} {}", row.quantity, row.unit)).set_alignment(CellAlignment::Right),
            Cell::new(Money::new(row.energy_cost, currency)).set_alignment(CellAlignment::Right),
            Cell::new(row.days).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(Money::new(row.standing_cost, currency)).set_alignment(CellAlignment::Right),
            Cell::new(Money::new(row.total, currency))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("Site subtotal").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(Money::new(summary.site_subtotal, subtotal_currency))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(Color::Cyan),
    ]);
    table
}

fn mean(values: &[f64]) -> f64 {
    let estimate: Mean = values.iter().copied().collect();
    if estimate.is_empty() { 0.0 } else { estimate.mean() }
}
