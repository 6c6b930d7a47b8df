use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};

use crate::core::interval::Interval;

/// Billing period presets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Period {
    /// From the first of the current month till now.
    #[default]
    ThisMonth,

    /// The whole previous calendar month.
    LastMonth,
}

impl Period {
    /// Resolve the preset against `now`, month boundaries taken at midnight in `now`'s timezone.
    pub fn interval<Tz: TimeZone>(self, now: &DateTime<Tz>) -> Interval {
        let timezone = now.timezone();
        let first_of_month = now.date_naive().with_day(1).unwrap_or_else(|| now.date_naive());
        match self {
            Self::ThisMonth => {
                Interval::new(midnight(&timezone, first_of_month), now.with_timezone(&Utc))
            }
            Self::LastMonth => {
                let first_of_previous =
                    first_of_month.checked_sub_months(Months::new(1)).unwrap_or(first_of_month);
                Interval::new(
                    midnight(&timezone, first_of_previous),
                    midnight(&timezone, first_of_month),
                )
            }
        }
    }
}

/// Midnight of the date in the timezone, or the earliest existing instant if midnight is skipped.
fn midnight<Tz: TimeZone>(timezone: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |datetime| datetime.with_timezone(&Utc))
}
