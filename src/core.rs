pub mod billing;
pub mod cost;
pub mod interval;
pub mod latest;
pub mod meter;
pub mod numeric;
pub mod period;
pub mod series;
pub mod tariff;
