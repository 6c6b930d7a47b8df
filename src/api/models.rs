//! Upstream response and request shapes.
//!
//! Collections tolerate broken elements (they are skipped), and loosely-typed
//! numeric fields are coerced with [`to_finite_number_or_zero`]. A body of the
//! wrong overall shape fails to deserialize and is handled by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use serde_with::serde_as;

use crate::{
    core::{
        billing::{BillingRow, BillingSummary},
        interval::Interval,
        meter::{Meter, MeterKind, Site},
        numeric::to_finite_number_or_zero,
        series::Reading,
        tariff::Tariff,
    },
    quantity::{
        cost::Cost,
        rate::{DailyCharge, UnitRate},
        usage::Usage,
    },
};

#[must_use]
#[serde_as]
#[derive(Deserialize)]
pub struct Sites(#[serde_as(as = "serde_with::VecSkipError<_>")] pub Vec<Site>);

#[must_use]
#[serde_as]
#[derive(Deserialize)]
pub struct Meters(#[serde_as(as = "serde_with::VecSkipError<_>")] pub Vec<MeterResponse>);

#[derive(Deserialize)]
pub struct MeterResponse {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,

    #[serde(deserialize_with = "deserialize_id")]
    meter_id: String,

    #[serde(rename = "type", default)]
    kind: MeterKind,

    #[serde(default)]
    unit: String,
}

impl From<MeterResponse> for Meter {
    fn from(meter: MeterResponse) -> Self {
        Self { id: meter.id, meter_id: meter.meter_id, kind: meter.kind, unit: meter.unit }
    }
}

#[must_use]
#[serde_as]
#[derive(Deserialize)]
pub struct Readings(#[serde_as(as = "serde_with::VecSkipError<_>")] pub Vec<Reading>);

/// `GET /tariffs` body, `null` when the meter has no tariff.
#[derive(Deserialize)]
pub struct TariffResponse {
    #[serde(default)]
    unit: String,

    #[serde(default)]
    unit_rate: Value,

    #[serde(default)]
    standing_charge: Value,

    #[serde(default = "default_currency", deserialize_with = "deserialize_currency")]
    currency: String,
}

impl TariffResponse {
    pub fn into_tariff(self, meter_id: &str) -> Tariff {
        Tariff {
            meter_id: meter_id.to_owned(),
            unit: self.unit,
            unit_rate: UnitRate::from(to_finite_number_or_zero(&self.unit_rate)),
            standing_charge: DailyCharge::from(to_finite_number_or_zero(&self.standing_charge)),
            currency: self.currency,
        }
    }
}

/// `POST /tariffs` body.
#[derive(Serialize)]
pub struct TariffRequest<'a> {
    pub site_code: &'a str,
    pub meter_id: &'a str,
    pub unit: &'a str,
    pub unit_rate: f64,
    pub standing_charge: f64,
    pub currency: &'a str,
}

impl<'a> TariffRequest<'a> {
    pub const fn new(site_code: &'a str, tariff: &'a Tariff) -> Self {
        Self {
            site_code,
            meter_id: tariff.meter_id.as_str(),
            unit: tariff.unit.as_str(),
            unit_rate: tariff.unit_rate.0,
            standing_charge: tariff.standing_charge.0,
            currency: tariff.currency.as_str(),
        }
    }
}

#[serde_as]
#[derive(Deserialize)]
pub struct BillingSummaryResponse {
    #[serde(default)]
    from: Option<DateTime<Utc>>,

    #[serde(default)]
    to: Option<DateTime<Utc>>,

    #[serde_as(as = "serde_with::VecSkipError<_>")]
    #[serde(default)]
    rows: Vec<BillingRowResponse>,

    #[serde(default)]
    site_subtotal: Value,
}

impl BillingSummaryResponse {
    /// Convert into the summary, falling back to the requested period for missing bounds.
    pub fn into_summary(self, requested: Interval) -> BillingSummary {
        BillingSummary {
            from: self.from.unwrap_or(requested.start),
            to: self.to.unwrap_or(requested.end),
            rows: self.rows.into_iter().map(BillingRow::from).collect(),
            site_subtotal: Cost::from(to_finite_number_or_zero(&self.site_subtotal)),
        }
    }
}

#[derive(Deserialize)]
struct BillingRowResponse {
    #[serde(deserialize_with = "deserialize_id")]
    meter_id: String,

    #[serde(default)]
    unit: String,

    #[serde(default)]
    qty: Value,

    #[serde(default)]
    energy_cost: Value,

    #[serde(default)]
    standing_cost: Value,

    #[serde(default)]
    days: Value,

    #[serde(default)]
    total: Value,
}

impl From<BillingRowResponse> for BillingRow {
    fn from(row: BillingRowResponse) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let days = to_finite_number_or_zero(&row.days).round() as i64;
        Self {
            meter_id: row.meter_id,
            unit: row.unit,
            quantity: Usage::from(to_finite_number_or_zero(&row.qty)),
            energy_cost: Cost::from(to_finite_number_or_zero(&row.energy_cost)),
            standing_cost: Cost::from(to_finite_number_or_zero(&row.standing_cost)),
            days,
            total: Cost::from(to_finite_number_or_zero(&row.total)),
        }
    }
}

#[derive(Serialize)]
pub struct MetersQuery<'a> {
    pub site_code: &'a str,
}

#[derive(Serialize)]
pub struct SeriesQuery<'a> {
    pub site_code: &'a str,
    pub meter_id: &'a str,
    pub hours: u32,
}

#[derive(Serialize)]
pub struct TariffQuery<'a> {
    pub meter_id: &'a str,
}

#[derive(Serialize)]
pub struct BillingQuery<'a> {
    pub site_code: &'a str,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Identifiers come either as strings or as bare numbers.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(de::Error::invalid_type(unexpected(&other), &"a string or a number")),
    }
}

fn deserialize_currency<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let currency = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(if currency.trim().is_empty() { default_currency() } else { currency })
}

fn default_currency() -> String {
    "GBP".to_owned()
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(value) => de::Unexpected::Bool(*value),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
        Value::String(value) => de::Unexpected::Str(value),
        Value::Number(_) => de::Unexpected::Other("number"),
    }
}
