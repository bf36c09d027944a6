//! Daily readings.
//!
//! The daily endpoint only returns complete data when asked for whole
//! calendar months; partial-month requests come back unreliable. The fetch
//! therefore requests every month start covering the range in a single GET
//! (one repeated `months` parameter per month) and filters the flattened
//! answer down to `[since, until]`.

use chrono::NaiveDate;
use serde_derive::Deserialize;

use crate::error::{DecodeError, Result};
use crate::model::{Granularity, MeasurementPoint};
use crate::portal::calendar;
use crate::portal::client::PortalClient;
use crate::portal::decode::{lenient_f64, lenient_i32, lenient_u32};

/// One per-month object of the daily response.
#[derive(Debug, Deserialize)]
struct MonthEntry {
    data: Vec<DailyRecord>,
}

/// One day's reading. `manad` is 1-based here, unlike the monthly feed.
#[derive(Debug, Deserialize)]
struct DailyRecord {
    #[serde(deserialize_with = "lenient_i32")]
    ar: i32,
    #[serde(deserialize_with = "lenient_u32")]
    manad: u32,
    #[serde(deserialize_with = "lenient_u32")]
    dag: u32,
    #[serde(deserialize_with = "lenient_f64")]
    forbrukning: f64,
}

impl PortalClient {
    /// Fetches daily readings for `service` and returns every reading with
    /// `since <= date <= until`, sorted ascending.
    pub async fn get_daily(
        &mut self,
        service: &str,
        since: NaiveDate,
        until: NaiveDate,
    ) -> Result<Vec<MeasurementPoint>> {
        let params: Vec<(&str, String)> = calendar::month_starts(since, until)
            .into_iter()
            .map(|month| ("months", month.format("%Y-%m-%d").to_string()))
            .collect();
        let raw = self.get_raw(service, Granularity::Daily, &params).await?;
        let points = normalize(raw, since, until)?;
        tracing::debug!("{} daily readings within range", points.len());
        Ok(points)
    }
}

fn normalize(
    raw: serde_json::Value,
    since: NaiveDate,
    until: NaiveDate,
) -> Result<Vec<MeasurementPoint>, DecodeError> {
    let months: Vec<MonthEntry> = serde_json::from_value(raw)?;

    let mut points = Vec::new();
    for record in months.into_iter().flat_map(|month| month.data) {
        let date = NaiveDate::from_ymd_opt(record.ar, record.manad, record.dag)
            .ok_or_else(|| DecodeError::invalid_date(record.ar, record.manad, record.dag))?;
        if since <= date && date <= until {
            points.push(MeasurementPoint::new(date, record.forbrukning));
        }
    }
    points.sort_by_key(|point| point.date);
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PortalConfig;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod normalize {
        use super::*;

        #[test]
        fn test_flattens_filters_and_sorts() {
            let raw = json!([
                {"data": [
                    {"ar": 2021, "manad": 3, "dag": 10, "forbrukning": "2.5"},
                    {"ar": 2021, "manad": 3, "dag": 4, "forbrukning": 9.0},
                    {"ar": 2021, "manad": 3, "dag": 5, "forbrukning": 1.0}
                ]},
                {"data": [
                    {"ar": 2021, "manad": 4, "dag": 1, "forbrukning": 3.0}
                ]}
            ]);

            let points = normalize(raw, date(2021, 3, 5), date(2021, 3, 10)).unwrap();

            assert_eq!(
                points,
                vec![
                    MeasurementPoint::new(date(2021, 3, 5), 1.0),
                    MeasurementPoint::new(date(2021, 3, 10), 2.5),
                ]
            );
        }

        #[test]
        fn test_unsorted_input_comes_out_ascending() {
            let raw = json!([
                {"data": [
                    {"ar": 2021, "manad": 3, "dag": 9, "forbrukning": 3.0},
                    {"ar": 2021, "manad": 3, "dag": 7, "forbrukning": 1.0},
                    {"ar": 2021, "manad": 3, "dag": 8, "forbrukning": 2.0}
                ]}
            ]);

            let points = normalize(raw, date(2021, 3, 1), date(2021, 3, 31)).unwrap();
            let dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();

            assert_eq!(
                dates,
                vec![date(2021, 3, 7), date(2021, 3, 8), date(2021, 3, 9)]
            );
        }

        #[test]
        fn test_range_bounds_are_inclusive() {
            let raw = json!([
                {"data": [
                    {"ar": 2021, "manad": 3, "dag": 4, "forbrukning": 1.0},
                    {"ar": 2021, "manad": 3, "dag": 5, "forbrukning": 2.0},
                    {"ar": 2021, "manad": 3, "dag": 10, "forbrukning": 3.0},
                    {"ar": 2021, "manad": 3, "dag": 11, "forbrukning": 4.0}
                ]}
            ]);

            let points = normalize(raw, date(2021, 3, 5), date(2021, 3, 10)).unwrap();

            assert_eq!(points.first().unwrap().date, date(2021, 3, 5));
            assert_eq!(points.last().unwrap().date, date(2021, 3, 10));
        }

        #[test]
        fn test_invalid_calendar_date_fails() {
            let raw = json!([
                {"data": [{"ar": 2021, "manad": 2, "dag": 30, "forbrukning": 1.0}]}
            ]);

            let result = normalize(raw, date(2021, 2, 1), date(2021, 2, 28));

            assert!(matches!(
                result,
                Err(DecodeError::InvalidDate {
                    year: 2021,
                    month: 2,
                    day: 30
                })
            ));
        }

        #[test]
        fn test_unexpected_shape_fails() {
            let raw = json!({"data": []});
            assert!(matches!(
                normalize(raw, date(2021, 1, 1), date(2021, 1, 31)),
                Err(DecodeError::Json(_))
            ));
        }
    }

    mod fetch {
        use super::*;

        fn test_config(base_url: String) -> PortalConfig {
            PortalConfig {
                base_url,
                username: "testuser".to_string(),
                password: "secret".to_string(),
                danger_accept_invalid_certs: false,
            }
        }

        async fn logged_in_client(server: &mut mockito::ServerGuard) -> (PortalClient, mockito::Mock) {
            let login = server
                .mock("POST", "/portalen/index.xml")
                .with_status(200)
                .with_body(r#"<a href="el/info/?lpid=10002">El</a>"#)
                .create_async()
                .await;
            (PortalClient::new(test_config(server.url())).unwrap(), login)
        }

        #[tokio::test]
        async fn test_mid_month_range_requests_that_month_only() {
            let mut server = mockito::Server::new_async().await;
            let (mut client, _login) = logged_in_client(&mut server).await;

            let _export = server
                .mock(
                    "GET",
                    "/_internal/kundportal/export/10002/daily.json?months=2021-03-01",
                )
                .with_status(200)
                .with_body(
                    r#"[{"data": [{"ar": 2021, "manad": 3, "dag": 6, "forbrukning": "4.2"}]}]"#,
                )
                .create_async()
                .await;

            let points = client
                .get_daily("el", date(2021, 3, 5), date(2021, 3, 10))
                .await
                .unwrap();

            assert_eq!(points, vec![MeasurementPoint::new(date(2021, 3, 6), 4.2)]);
        }

        #[tokio::test]
        async fn test_range_into_next_month_requests_both_months() {
            let mut server = mockito::Server::new_async().await;
            let (mut client, _login) = logged_in_client(&mut server).await;

            let _export = server
                .mock(
                    "GET",
                    "/_internal/kundportal/export/10002/daily.json?months=2021-03-01&months=2021-04-01",
                )
                .with_status(200)
                .with_body(
                    r#"[
                        {"data": [{"ar": 2021, "manad": 3, "dag": 31, "forbrukning": 1.0}]},
                        {"data": [{"ar": 2021, "manad": 4, "dag": 2, "forbrukning": 2.0},
                                  {"ar": 2021, "manad": 4, "dag": 3, "forbrukning": 3.0}]}
                    ]"#,
                )
                .create_async()
                .await;

            let points = client
                .get_daily("el", date(2021, 3, 5), date(2021, 4, 2))
                .await
                .unwrap();

            assert_eq!(
                points,
                vec![
                    MeasurementPoint::new(date(2021, 3, 31), 1.0),
                    MeasurementPoint::new(date(2021, 4, 2), 2.0),
                ]
            );
        }
    }
}
