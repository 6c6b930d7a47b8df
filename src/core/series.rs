//! Interval readings of a single meter and their derived cost points.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// One interval measurement as received from upstream.
///
/// The value is kept as-is: it is coerced into a number only when used,
/// see [`crate::core::numeric`].
#[must_use]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Reading {
    #[serde(rename = "ts", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,

    #[serde(default)]
    pub value: Value,
}

#[cfg(test)]
impl Reading {
    pub fn new(timestamp: DateTime<Utc>, value: impl Into<Value>) -> Self {
        Self { timestamp, value: value.into() }
    }
}

/// Cost of one interval, parallel to a [`Reading`].
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CostPoint {
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,

    pub value: f64,
}

/// Readings of one meter over the requested window, in upstream order.
#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeterSeries {
    pub meter_id: String,
    pub readings: Vec<Reading>,
}

impl MeterSeries {
    pub fn new(meter_id: impl Into<String>, readings: Vec<Reading>) -> Self {
        Self { meter_id: meter_id.into(), readings }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Timestamp with an offset, or a naive one which is then taken as local time.
fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let text = String::deserialize(deserializer)?;
    if let Ok(timestamp) = text.parse::<DateTime<FixedOffset>>() {
        return Ok(timestamp.with_timezone(&Utc));
    }
    let naive = text.parse::<NaiveDateTime>().map_err(|_| {
        de::Error::invalid_value(de::Unexpected::Str(&text), &"an ISO 8601 timestamp")
    })?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&text), &"an existing local time")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_deserialize_reading_with_odd_value() -> Result {
        // language=JSON
        let reading: Reading =
            serde_json::from_str(r#"{"ts": "2026-10-01T00:30:00Z", "value": "n/a"}"#)?;
        assert_eq!(reading.value, Value::from("n/a"));
        let reading: Reading = serde_json::from_str(r#"{"ts": "2026-10-01T00:30:00+01:00"}"#)?;
        assert_eq!(reading.value, Value::Null);
        assert_eq!(reading.timestamp, Utc.with_ymd_and_hms(2026, 9, 30, 23, 30, 0).unwrap());
        Ok(())
    }

    #[test]
    fn test_deserialize_naive_timestamp_as_local() -> Result {
        // language=JSON
        let reading: Reading =
            serde_json::from_str(r#"{"ts": "2026-10-01T12:15:00", "value": 1}"#)?;
        let expected = Local.with_ymd_and_hms(2026, 10, 1, 12, 15, 0).unwrap().with_timezone(&Utc);
        assert_eq!(reading.timestamp, expected);
        Ok(())
    }

    #[test]
    fn test_deserialize_garbage_timestamp() {
        assert!(serde_json::from_str::<Reading>(r#"{"ts": "yesterday", "value": 1}"#).is_err());
    }
}
