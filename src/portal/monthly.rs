//! Monthly readings.
//!
//! The monthly feed indexes months from zero while every other granularity
//! counts from one. Each record is therefore stamped with the first day of
//! month `manad + 1`, which is the calendar first-of-month of the reported
//! month.

use chrono::{Datelike, NaiveDate};
use serde_derive::Deserialize;

use crate::error::{DecodeError, Result};
use crate::model::{Granularity, MeasurementPoint};
use crate::portal::client::PortalClient;
use crate::portal::decode::{lenient_f64, lenient_i32, lenient_u32};

/// One per-year object of the monthly response.
#[derive(Debug, Deserialize)]
struct YearEntry {
    value: Vec<MonthlyRecord>,
}

/// One month's reading. `manad` is 0-based in this feed.
#[derive(Debug, Deserialize)]
struct MonthlyRecord {
    #[serde(deserialize_with = "lenient_i32")]
    ar: i32,
    #[serde(deserialize_with = "lenient_u32")]
    manad: u32,
    #[serde(deserialize_with = "lenient_f64")]
    forbrukning: f64,
}

impl PortalClient {
    /// Fetches monthly readings for `service` and returns every reading
    /// whose month marker falls within `[since, until]`, sorted ascending.
    pub async fn get_monthly(
        &mut self,
        service: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<MeasurementPoint>> {
        let params: Vec<(&str, String)> = (since.year()..=until.year())
            .map(|year| ("years", year.to_string()))
            .collect();
        let raw = self.get_raw(service, Granularity::Monthly, &params).await?;
        let points = normalize(raw, since, until)?;
        tracing::debug!("{} monthly readings within range", points.len());
        Ok(points)
    }
}

fn normalize(
    raw: serde_json::Value,
    since: NaiveDate,
    until: NaiveDate,
) -> Result<Vec<MeasurementPoint>, DecodeError> {
    let years: Vec<YearEntry> = serde_json::from_value(raw)?;

    let mut points = Vec::new();
    for record in years.into_iter().flat_map(|year| year.value) {
        let month = record.manad + 1;
        let date = NaiveDate::from_ymd_opt(record.ar, month, 1)
            .ok_or_else(|| DecodeError::invalid_date(record.ar, month, 1))?;
        if since <= date && date <= until {
            points.push(MeasurementPoint::new(date, record.forbrukning));
        }
    }
    points.sort_by_key(|point| point.date);
    Ok(points)
}
