use std::collections::HashMap;

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    core::numeric::coerce_finite,
    prelude::*,
    quantity::rate::{DailyCharge, UnitRate},
};

/// Flat unit rate plus a daily standing charge, assigned to a single meter.
#[must_use]
#[derive(Clone, Debug, PartialEq, Builder, Deserialize, Serialize)]
pub struct Tariff {
    #[builder(into)]
    pub meter_id: String,

    #[builder(into)]
    pub unit: String,

    #[builder(into)]
    pub unit_rate: UnitRate,

    #[builder(into)]
    pub standing_charge: DailyCharge,

    #[builder(into)]
    pub currency: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("`{field}` must be a finite number, got `{value}`")]
    NotFinite { field: &'static str, value: String },
}

impl Tariff {
    /// Validate the raw user input and build the tariff.
    pub fn try_from_raw(
        meter_id: &str,
        unit: &str,
        unit_rate: &Value,
        standing_charge: &Value,
        currency: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            meter_id: meter_id.to_owned(),
            unit: unit.to_owned(),
            unit_rate: UnitRate::from(finite("unit_rate", unit_rate)?),
            standing_charge: DailyCharge::from(finite("standing_charge", standing_charge)?),
            currency: currency.to_owned(),
        })
    }
}

fn finite(field: &'static str, value: &Value) -> Result<f64, ValidationError> {
    coerce_finite(value).ok_or_else(|| ValidationError::NotFinite {
        field,
        value: match value {
            Value::String(text) => text.clone(),
            _ => value.to_string(),
        },
    })
}

/// Current tariff per meter.
///
/// There is no rate history: an upsert replaces the previous entry entirely.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct TariffRegistry(HashMap<String, Tariff>);

impl TariffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, meter_id: &str) -> Option<&Tariff> {
        self.0.get(meter_id)
    }

    /// Store an already validated tariff, replacing any previous one.
    pub fn insert(&mut self, tariff: Tariff) {
        self.0.insert(tariff.meter_id.clone(), tariff);
    }

    /// Validate and store the tariff.
    ///
    /// On a validation error, the previously stored tariff is left untouched.
    pub fn upsert(
        &mut self,
        meter_id: &str,
        unit: &str,
        unit_rate: &Value,
        standing_charge: &Value,
        currency: &str,
    ) -> Result<Tariff, ValidationError> {
        let tariff = Tariff::try_from_raw(meter_id, unit, unit_rate, standing_charge, currency)?;
        debug!(
            meter_id,
            unit_rate = ?tariff.unit_rate,
            standing_charge = ?tariff.standing_charge,
            "upserting…",
        );
        self.insert(tariff.clone());
        Ok(tariff)
    }
}

impl FromIterator<Tariff> for TariffRegistry {
    fn from_iter<T: IntoIterator<Item = Tariff>>(iter: T) -> Self {
        let mut registry = Self::new();
        for tariff in iter {
            registry.insert(tariff);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_upsert_round_trip() -> Result {
        let mut registry = TariffRegistry::new();
        let stored = registry.upsert("M1", "kWh", &json!(0.2573), &json!("0.35"), "GBP")?;
        assert_eq!(registry.get("M1"), Some(&stored));
        assert_eq!(stored.unit_rate, UnitRate::from(0.2573));
        assert_eq!(stored.standing_charge, DailyCharge::from(0.35));
        assert_eq!(stored.currency, "GBP");
        Ok(())
    }

    #[test]
    fn test_upsert_replaces_entirely() -> Result {
        let mut registry = TariffRegistry::new();
        let first = registry.upsert("M1", "kWh", &json!(0.2), &json!(0.35), "GBP")?;
        let second = registry.upsert("M1", "m3", &json!(1.1), &json!(0), "EUR")?;
        assert_ne!(first, second);
        let tariff = registry.get("M1").unwrap();
        assert_eq!(tariff, &second);
        assert_eq!(tariff.unit, "m3");
        assert_eq!(tariff.unit_rate, UnitRate::from(1.1));
        assert_eq!(tariff.standing_charge, DailyCharge::ZERO);
        assert_eq!(tariff.currency, "EUR");
        Ok(())
    }

    #[test]
    fn test_upsert_invalid_rate_keeps_previous() -> Result {
        let mut registry = TariffRegistry::new();
        let previous = registry.upsert("M1", "kWh", &json!(0.2), &json!(0.35), "GBP")?;
        let error = registry.upsert("M1", "kWh", &json!("abc"), &json!(0.5), "GBP").unwrap_err();
        assert_eq!(
            error,
            ValidationError::NotFinite { field: "unit_rate", value: "abc".to_owned() }
        );
        assert_eq!(registry.get("M1"), Some(&previous));
        Ok(())
    }

    #[test]
    fn test_upsert_invalid_standing_charge_stores_nothing() {
        let mut registry = TariffRegistry::new();
        let result = registry.upsert("M1", "kWh", &json!(0.2), &json!(null), "GBP");
        assert!(matches!(
            result,
            Err(ValidationError::NotFinite { field: "standing_charge", .. })
        ));
        assert!(registry.get("M1").is_none());
    }

    #[test]
    fn test_zero_rate_is_not_absence() -> Result {
        let mut registry = TariffRegistry::new();
        let zero = registry.upsert("M1", "kWh", &json!(0), &json!(0), "GBP")?;
        assert_eq!(zero.unit_rate, UnitRate::ZERO);
        assert_eq!(registry.get("M1"), Some(&zero));
        assert!(registry.get("M2").is_none());
        Ok(())
    }
}
