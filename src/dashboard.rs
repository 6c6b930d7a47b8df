//! Loading what a dashboard view displays, on top of a [`Backend`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::{
    api::Backend,
    core::{
        billing::{BillingSummary, compute_site_billing},
        cost::derive_cost,
        interval::Interval,
        series::{CostPoint, MeterSeries},
        tariff::{Tariff, TariffRegistry},
    },
    prelude::*,
};

/// Usage series of one meter together with its tariff and cost overlay.
#[must_use]
#[derive(Clone, Debug)]
pub struct MeterView {
    pub series: MeterSeries,
    pub tariff: Option<Tariff>,
    pub cost: Vec<CostPoint>,
}

#[instrument(skip_all, fields(site_code = site_code, meter_id = meter_id))]
pub async fn load_meter_view<B: Backend + ?Sized>(
    backend: &B,
    site_code: &str,
    meter_id: &str,
    hours: u32,
) -> MeterView {
    let (series, tariff) =
        tokio::join!(backend.get_series(site_code, meter_id, hours), backend.get_tariff(meter_id));
    let cost = derive_cost(&series.readings, tariff.as_ref());
    MeterView { series, tariff, cost }
}

/// Billing summary of a site with the tariffs it has been computed from.
#[must_use]
#[derive(Clone, Debug)]
pub struct SiteBilling {
    pub summary: BillingSummary,
    pub tariffs: TariffRegistry,
}

/// Fetch every meter's series and tariff concurrently and roll up the billing.
///
/// A meter whose fetches fail simply has no data and drops out of the summary.
#[instrument(skip_all, fields(site_code = site_code, period = ?period))]
pub async fn load_site_billing<B: Backend + ?Sized>(
    backend: &B,
    site_code: &str,
    period: Interval,
    now: DateTime<Utc>,
) -> SiteBilling {
    let meters = backend.get_meters(site_code).await;
    let hours = period.hours_since_start(now);
    info!(n_meters = meters.len(), hours, "fetching the meters…");

    let fetched = join_all(meters.iter().map(|meter| async move {
        tokio::join!(
            backend.get_series(site_code, &meter.meter_id, hours),
            backend.get_tariff(&meter.meter_id),
        )
    }))
    .await;

    let mut series = HashMap::with_capacity(meters.len());
    let mut tariffs = TariffRegistry::new();
    for (meter, (meter_series, tariff)) in meters.iter().zip(fetched) {
        if let Some(tariff) = tariff {
            tariffs.insert(Tariff { meter_id: meter.meter_id.clone(), ..tariff });
        }
        series.insert(meter.meter_id.as_str(), meter_series.readings);
    }

    let summary = compute_site_billing(
        &meters,
        |meter_id| series.get(meter_id).cloned().unwrap_or_default(),
        |meter_id| tariffs.get(meter_id).cloned(),
        period,
    );
    SiteBilling { summary, tariffs }
}
