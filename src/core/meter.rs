use std::fmt::{Display, Formatter};

use bon::Builder;
use serde::{Deserialize, Serialize};

#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Site {
    pub code: String,

    #[serde(default)]
    pub name: String,
}

#[must_use]
#[derive(Clone, Debug, Eq, PartialEq, Builder)]
pub struct Meter {
    /// Backend row identifier.
    #[builder(into)]
    pub id: String,

    /// Meter identifier used in every per-meter request.
    #[builder(into)]
    pub meter_id: String,

    #[builder(default)]
    pub kind: MeterKind,

    /// Physical unit of the readings, for example `kWh` or `m3`.
    #[builder(into)]
    pub unit: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum MeterKind {
    #[default]
    Electric,
    Heat,
    Water,
    Gas,
    Other(String),
}

impl From<String> for MeterKind {
    fn from(kind: String) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "electric" | "electricity" => Self::Electric,
            "heat" => Self::Heat,
            "water" => Self::Water,
            "gas" => Self::Gas,
            _ => Self::Other(kind),
        }
    }
}

impl From<MeterKind> for String {
    fn from(kind: MeterKind) -> Self {
        kind.to_string()
    }
}

impl Display for MeterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Electric => write!(f, "electric"),
            Self::Heat => write!(f, "heat"),
            Self::Water => write!(f, "water"),
            Self::Gas => write!(f, "gas"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_known() {
        assert_eq!(MeterKind::from("Water".to_owned()), MeterKind::Water);
        assert_eq!(MeterKind::from("electricity".to_owned()), MeterKind::Electric);
    }

    #[test]
    fn test_kind_other_keeps_name() {
        let kind = MeterKind::from("steam".to_owned());
        assert_eq!(kind, MeterKind::Other("steam".to_owned()));
        assert_eq!(kind.to_string(), "steam");
    }
}
