//! Yearly readings.
//!
//! The yearly response shape depends on the service. District heating
//! answers with two labelled series (actual and normal-year-corrected
//! usage) whose labels contain a replacement character exactly as the
//! portal serves them; the labels are matched byte-for-byte and must not be
//! "repaired". Every other service answers with a single series under a
//! key whose name varies, so the one key is used whatever it is called and
//! anything else is rejected as ambiguous.

use chrono::NaiveDate;
use serde_derive::Deserialize;

use crate::error::{DecodeError, Result};
use crate::model::{Granularity, MeasurementPoint, Year};
use crate::portal::client::PortalClient;
use crate::portal::decode::{lenient_f64, lenient_i32};

/// Series label for actual usage, as served ("Verklig användning" with the
/// portal's own mojibake).
const ACTUAL_USAGE_LABEL: &str = "Verklig anv\u{FFFD}ndning";

/// Series label for normal-year-corrected usage, as served.
const ADJUSTED_USAGE_LABEL: &str = "Normal\u{FFFD}rskorrigerad anv\u{FFFD}ndning";

/// The one service with the two-series yearly response.
const DISTRICT_HEATING: &str = "fjarrvarme";

/// One year's reading.
#[derive(Debug, Deserialize)]
struct YearlyRecord {
    #[serde(deserialize_with = "lenient_i32")]
    ar: i32,
    #[serde(deserialize_with = "lenient_f64")]
    forbrukning: f64,
}

impl PortalClient {
    /// Fetches yearly readings for `service` between the `since` and `until`
    /// years (inclusive; bare years and dates are both accepted). For
    /// district heating, `adjusted` selects the normal-year-corrected series
    /// instead of actual usage.
    ///
    /// Records are returned as the portal reports them for the requested
    /// span, sorted ascending; unlike the daily and monthly queries, no
    /// client-side range filter is applied on top of the `from`/`to`
    /// request parameters.
    pub async fn get_yearly(
        &mut self,
        service: &str,
        since: impl Into<Year>,
        until: impl Into<Year>,
        adjusted: bool,
    ) -> Result<Vec<MeasurementPoint>> {
        let (since, until) = (since.into(), until.into());
        let params = [("from", since.to_string()), ("to", until.to_string())];
        let raw = self.get_raw(service, Granularity::Yearly, &params).await?;

        let mut points = select_series(raw, service, adjusted)?
            .into_iter()
            .map(|record| {
                let date = NaiveDate::from_ymd_opt(record.ar, 1, 1)
                    .ok_or_else(|| DecodeError::invalid_date(record.ar, 1, 1))?;
                Ok(MeasurementPoint::new(date, record.forbrukning))
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;
        points.sort_by_key(|point| point.date);
        tracing::debug!("{} yearly readings", points.len());
        Ok(points)
    }
}

/// Picks the series list out of the service-dependent response object.
fn select_series(
    raw: serde_json::Value,
    service: &str,
    adjusted: bool,
) -> Result<Vec<YearlyRecord>, DecodeError> {
    let mut object: serde_json::Map<String, serde_json::Value> = serde_json::from_value(raw)?;

    if service == DISTRICT_HEATING {
        let label = if adjusted {
            ADJUSTED_USAGE_LABEL
        } else {
            ACTUAL_USAGE_LABEL
        };
        let series = object
            .remove(label)
            .ok_or_else(|| DecodeError::missing_series(label))?;
        return Ok(serde_json::from_value(series)?);
    }

    let keys: Vec<String> = object.keys().cloned().collect();
    match object.into_iter().next() {
        Some((_, series)) if keys.len() == 1 => Ok(serde_json::from_value(series)?),
        _ => Err(DecodeError::AmbiguousSeries { keys }),
    }
}
