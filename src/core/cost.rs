use crate::{
    core::{
        numeric::to_finite_number_or_zero,
        series::{CostPoint, Reading},
        tariff::Tariff,
    },
    quantity::{cost::Cost, usage::Usage},
};

/// Derive the cost overlay of a series.
///
/// The standing charge is spread evenly over the points, so that the overlay has a
/// baseline consistent with the series resolution. This is for display only: the
/// billing standing cost is computed per day by [`crate::core::billing`].
///
/// Without a tariff, or without readings, there is no overlay.
#[must_use]
pub fn derive_cost(readings: &[Reading], tariff: Option<&Tariff>) -> Vec<CostPoint> {
    let Some(tariff) = tariff else {
        return Vec::new();
    };
    if readings.is_empty() {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let per_point_standing = Cost::from(tariff.standing_charge.0) / readings.len() as f64;

    readings
        .iter()
        .map(|reading| {
            let usage = Usage::from(to_finite_number_or_zero(&reading.value));
            CostPoint {
                timestamp: reading.timestamp,
                value: (usage * tariff.unit_rate + per_point_standing).0,
            }
        })
        .collect()
}
