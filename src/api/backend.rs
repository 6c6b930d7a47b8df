use async_trait::async_trait;

use crate::{
    api::{Api, FetchError},
    core::{
        billing::BillingSummary,
        interval::Interval,
        meter::{Meter, Site},
        series::MeterSeries,
        tariff::Tariff,
    },
    prelude::*,
};

/// Source of everything the dashboard displays.
///
/// The read methods never fail: an unreachable backend or a malformed response
/// yields an empty result, so that one bad endpoint cannot take the dashboard down.
#[async_trait]
pub trait Backend: Sync {
    async fn get_sites(&self) -> Vec<Site>;

    async fn get_meters(&self, site_code: &str) -> Vec<Meter>;

    async fn get_series(&self, site_code: &str, meter_id: &str, hours: u32) -> MeterSeries;

    /// [`None`] means that the meter has no tariff.
    async fn get_tariff(&self, meter_id: &str) -> Option<Tariff>;

    async fn get_billing_summary(&self, site_code: &str, period: Interval) -> BillingSummary;

    /// Upsert the tariff. Unlike the reads, this one reports failures to the caller.
    async fn put_tariff(&self, site_code: &str, tariff: &Tariff) -> Result<Tariff>;
}

#[async_trait]
impl Backend for Api {
    async fn get_sites(&self) -> Vec<Site> {
        fail_soft(self.try_get_sites().await, Vec::new)
    }

    async fn get_meters(&self, site_code: &str) -> Vec<Meter> {
        fail_soft(self.try_get_meters(site_code).await, Vec::new)
    }

    async fn get_series(&self, site_code: &str, meter_id: &str, hours: u32) -> MeterSeries {
        let readings = fail_soft(self.try_get_series(site_code, meter_id, hours).await, Vec::new);
        MeterSeries::new(meter_id, readings)
    }

    async fn get_tariff(&self, meter_id: &str) -> Option<Tariff> {
        fail_soft(self.try_get_tariff(meter_id).await, || None)
    }

    async fn get_billing_summary(&self, site_code: &str, period: Interval) -> BillingSummary {
        fail_soft(self.try_get_billing_summary(site_code, period).await, || {
            BillingSummary::empty(period)
        })
    }

    async fn put_tariff(&self, site_code: &str, tariff: &Tariff) -> Result<Tariff> {
        self.try_put_tariff(site_code, tariff)
            .await
            .with_context(|| format!("failed to save the tariff for `{}`", tariff.meter_id))
    }
}

/// The only place where fetch errors are turned into empty results.
fn fail_soft<T>(result: Result<T, FetchError>, empty: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|error| {
        warn!("falling back to an empty result: {:#}", Error::from(error));
        empty()
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use reqwest::Url;

    use super::*;
    use crate::api::{
        ApiConfig,
        client::decode,
        models::{BillingSummaryResponse, Readings, TariffResponse},
    };

    fn url() -> Url {
        Url::parse("http://localhost:8000/endpoint").unwrap()
    }

    fn unreachable_api() -> Result<Api> {
        // Nothing listens on the discard port.
        Api::new(ApiConfig::new("http://127.0.0.1:9".parse()?, Duration::from_millis(500)))
    }

    #[test]
    fn test_fail_soft_passes_values_through() {
        assert_eq!(fail_soft(Ok(vec![1, 2]), Vec::new), vec![1, 2]);
    }

    #[test]
    fn test_fail_soft_on_error() -> Result {
        let error = FetchError::InvalidBaseUrl("mailto:nobody@example.com".parse()?);
        assert_eq!(fail_soft(Err(error), || vec![0]), vec![0]);
        Ok(())
    }

    #[tokio::test]
    async fn test_network_error_degrades_to_empty() -> Result {
        let api = unreachable_api()?;
        assert!(api.get_sites().await.is_empty());
        assert!(api.get_meters("LNT01").await.is_empty());
        assert!(api.get_series("LNT01", "M1", 24).await.is_empty());
        assert!(api.get_tariff("M1").await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_network_error_is_reported_on_put() -> Result {
        let tariff = Tariff::builder()
            .meter_id("M1")
            .unit("kWh")
            .unit_rate(0.2)
            .standing_charge(0.35)
            .currency("GBP")
            .build();
        assert!(unreachable_api()?.put_tariff("LNT01", &tariff).await.is_err());
        Ok(())
    }

    #[test]
    fn test_tariff_array_body_falls_back_to_none() {
        let result = decode::<Option<TariffResponse>>(url(), br#"[{"unit": "kWh"}]"#);
        assert!(matches!(result, Err(FetchError::MalformedResponse { .. })));
        let tariff = fail_soft(result.map(|tariff| tariff.map(|it| it.into_tariff("M1"))), || None);
        assert!(tariff.is_none());
    }

    #[test]
    fn test_billing_rows_not_an_array_falls_back_to_empty() {
        let period = Interval::new(
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap(),
        );
        let result = decode::<BillingSummaryResponse>(url(), br#"{"rows": "nope"}"#);
        assert!(matches!(result, Err(FetchError::MalformedResponse { .. })));
        let summary = fail_soft(result.map(|summary| summary.into_summary(period)), || {
            BillingSummary::empty(period)
        });
        assert_eq!(summary, BillingSummary::empty(period));
    }

    #[test]
    fn test_series_object_body_falls_back_to_empty() {
        let result = decode::<Readings>(url(), br#"{"ts": "2026-10-01T00:00:00Z", "value": 1}"#);
        assert!(matches!(result, Err(FetchError::MalformedResponse { .. })));
        let series = MeterSeries::new("M1", fail_soft(result.map(|readings| readings.0), Vec::new));
        assert!(series.is_empty());
    }
}
