use std::fmt;

use chrono::{Datelike, NaiveDate};

/// A single consumption reading: a date and the measured quantity in the
/// provider's native unit.
///
/// The date's meaning depends on granularity: the calendar day for daily
/// readings, the first day of the reported month for monthly readings, and
/// January 1 of the reported year for yearly readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl MeasurementPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Aggregation level of the export API.
///
/// The `Display` form is the literal api name in the export URL
/// (`.../export/{lpid}/{granularity}.json`).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Granularity {
    Daily,
    Monthly,
    Yearly,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Monthly => write!(f, "monthly"),
            Granularity::Yearly => write!(f, "yearly"),
        }
    }
}

/// A calendar year, accepted by the yearly query either as a bare year or as
/// any date (in which case the date's year component is used).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Year(pub i32);

impl From<i32> for Year {
    fn from(year: i32) -> Self {
        Self(year)
    }
}

impl From<NaiveDate> for Year {
    fn from(date: NaiveDate) -> Self {
        Self(date.year())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
