use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        interval::Interval,
        meter::Meter,
        numeric::to_finite_number_or_zero,
        series::Reading,
        tariff::Tariff,
    },
    prelude::*,
    quantity::{cost::Cost, usage::Usage},
};

#[must_use]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BillingRow {
    pub meter_id: String,
    pub unit: String,

    #[serde(rename = "qty")]
    pub quantity: Usage,

    pub energy_cost: Cost,
    pub standing_cost: Cost,
    pub days: i64,

    /// Energy cost plus standing cost, unrounded.
    pub total: Cost,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct BillingSummary {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub rows: Vec<BillingRow>,
    pub site_subtotal: Cost,
}

impl BillingSummary {
    pub fn empty(period: Interval) -> Self {
        Self { from: period.start, to: period.end, rows: Vec::new(), site_subtotal: Cost::ZERO }
    }
}

/// Roll up the site billing over the period.
///
/// Meters are visited in the given order and produce at most one row each.
/// A meter without readings in the period, or without a tariff, is omitted.
#[instrument(skip_all, fields(period = ?period, n_meters = site_meters.len()))]
pub fn compute_site_billing(
    site_meters: &[Meter],
    mut period_readings: impl FnMut(&str) -> Vec<Reading>,
    mut tariffs: impl FnMut(&str) -> Option<Tariff>,
    period: Interval,
) -> BillingSummary {
    let days = period.n_days();
    let mut rows = Vec::with_capacity(site_meters.len());

    for meter in site_meters {
        let readings = period_readings(&meter.meter_id);
        let mut readings =
            readings.iter().filter(|reading| period.contains(reading.timestamp)).peekable();
        if readings.peek().is_none() {
            debug!(meter_id = %meter.meter_id, "no readings in the period, skipped");
            continue;
        }
        let Some(tariff) = tariffs(&meter.meter_id) else {
            debug!(meter_id = %meter.meter_id, "no tariff, skipped");
            continue;
        };
        if tariff.unit != meter.unit {
            warn!(
                meter_id = %meter.meter_id,
                meter_unit = %meter.unit,
                tariff_unit = %tariff.unit,
                "meter and tariff units differ",
            );
        }

        let quantity: Usage =
            readings.map(|reading| Usage::from(to_finite_number_or_zero(&reading.value))).sum();
        let energy_cost = quantity * tariff.unit_rate;
        let standing_cost = tariff.standing_charge * days;
        rows.push(BillingRow {
            meter_id: meter.meter_id.clone(),
            unit: meter.unit.clone(),
            quantity,
            energy_cost,
            standing_cost,
            days,
            total: energy_cost + standing_cost,
        });
    }

    let site_subtotal = rows.iter().map(|row| row.total).sum();
    info!(n_rows = rows.len(), ?site_subtotal, "computed");
    BillingSummary { from: period.start, to: period.end, rows, site_subtotal }
}
