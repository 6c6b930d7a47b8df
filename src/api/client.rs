use reqwest::{Client, RequestBuilder, Url};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    api::{
        config::ApiConfig,
        error::FetchError,
        models::{
            BillingQuery,
            BillingSummaryResponse,
            Meters,
            MetersQuery,
            Readings,
            SeriesQuery,
            Sites,
            TariffQuery,
            TariffRequest,
            TariffResponse,
        },
    },
    core::{
        billing::BillingSummary,
        interval::Interval,
        meter::{Meter, Site},
        series::Reading,
        tariff::Tariff,
    },
    prelude::*,
};

/// Dashboard backend client.
///
/// The `try_*` methods surface every failure; the fail-soft variants live in the
/// [`crate::api::Backend`] implementation.
pub struct Api {
    client: Client,
    config: ApiConfig,
}

impl Api {
    #[instrument(skip_all, fields(base_url = %config.base_url))]
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[instrument(skip_all)]
    pub async fn try_get_sites(&self) -> Result<Vec<Site>, FetchError> {
        let url = self.config.endpoint(&["sites"])?;
        let sites = self.fetch::<Sites>(url).await?.0;
        info!(n_sites = sites.len(), "fetched");
        Ok(sites)
    }

    #[instrument(skip_all, fields(site_code = site_code))]
    pub async fn try_get_meters(&self, site_code: &str) -> Result<Vec<Meter>, FetchError> {
        let url = self.url_with_query(&["meters"], &MetersQuery { site_code })?;
        let meters: Vec<Meter> =
            self.fetch::<Meters>(url).await?.0.into_iter().map(Meter::from).collect();
        info!(n_meters = meters.len(), "fetched");
        Ok(meters)
    }

    #[instrument(skip_all, fields(site_code = site_code, meter_id = meter_id, hours = hours))]
    pub async fn try_get_series(
        &self,
        site_code: &str,
        meter_id: &str,
        hours: u32,
    ) -> Result<Vec<Reading>, FetchError> {
        let url = self.url_with_query(&["series"], &SeriesQuery { site_code, meter_id, hours })?;
        let readings = self.fetch::<Readings>(url).await?.0;
        info!(n_readings = readings.len(), "fetched");
        Ok(readings)
    }

    #[instrument(skip_all, fields(meter_id = meter_id))]
    pub async fn try_get_tariff(&self, meter_id: &str) -> Result<Option<Tariff>, FetchError> {
        let url = self.url_with_query(&["tariffs"], &TariffQuery { meter_id })?;
        let tariff = self
            .fetch::<Option<TariffResponse>>(url)
            .await?
            .map(|tariff| tariff.into_tariff(meter_id));
        info!(is_set = tariff.is_some(), "fetched");
        Ok(tariff)
    }

    /// Store the tariff upstream and return what the backend has persisted.
    #[instrument(skip_all, fields(site_code = site_code, meter_id = %tariff.meter_id))]
    pub async fn try_put_tariff(
        &self,
        site_code: &str,
        tariff: &Tariff,
    ) -> Result<Tariff, FetchError> {
        let url = self.config.endpoint(&["tariffs"])?;
        let request = self.client.post(url.clone()).json(&TariffRequest::new(site_code, tariff));
        let stored = self
            .send::<Option<TariffResponse>>(url.clone(), request)
            .await?
            .map(|stored| stored.into_tariff(&tariff.meter_id))
            .ok_or_else(|| FetchError::MalformedResponse {
                url,
                source: serde::de::Error::custom("the backend returned no tariff"),
            })?;
        info!(unit_rate = ?stored.unit_rate, standing_charge = ?stored.standing_charge, "stored");
        Ok(stored)
    }

    #[instrument(skip_all, fields(site_code = site_code, period = ?period))]
    pub async fn try_get_billing_summary(
        &self,
        site_code: &str,
        period: Interval,
    ) -> Result<BillingSummary, FetchError> {
        let query = BillingQuery { site_code, from: period.start, to: period.end };
        let url = self.url_with_query(&["billing", "summary"], &query)?;
        let summary = self.fetch::<BillingSummaryResponse>(url).await?.into_summary(period);
        info!(n_rows = summary.rows.len(), site_subtotal = ?summary.site_subtotal, "fetched");
        Ok(summary)
    }

    fn url_with_query(&self, segments: &[&str], query: &impl Serialize) -> Result<Url, FetchError> {
        let mut url = self.config.endpoint(segments)?;
        url.set_query(Some(&serde_qs::to_string(query)?));
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let request = self.client.get(url.clone());
        self.send(url, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        url: Url,
        request: RequestBuilder,
    ) -> Result<T, FetchError> {
        debug!(%url, "requesting…");
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Network { url: url.clone(), source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }
        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Network { url: url.clone(), source })?;
        decode(url, &body)
    }
}

/// Parse the response body, a body of the wrong shape being a [`FetchError::MalformedResponse`].
pub(super) fn decode<T: DeserializeOwned>(url: Url, body: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(body).map_err(|source| FetchError::MalformedResponse { url, source })
}
