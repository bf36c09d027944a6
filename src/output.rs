use std::io::{self, Write};

use crate::model::MeasurementPoint;

/// Writes measurement points as CSV rows of `formatted-date,value`, one per
/// line. `date_format` is the same period-specific format the CLI accepted
/// the range in.
pub fn write_csv<W: Write>(
    mut out: W,
    points: &[MeasurementPoint],
    date_format: &str,
) -> io::Result<()> {
    for point in points {
        writeln!(out, "{},{}", point.date.format(date_format), point.value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(y: i32, m: u32, d: u32, value: f64) -> MeasurementPoint {
        MeasurementPoint::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), value)
    }

    #[test]
    fn test_daily_rows() {
        let points = vec![point(2021, 3, 5, 1.5), point(2021, 3, 6, 2.0)];
        let mut out = Vec::new();

        write_csv(&mut out, &points, "%Y-%m-%d").unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2021-03-05,1.5\n2021-03-06,2\n"
        );
    }

    #[test]
    fn test_monthly_rows_use_month_format() {
        let points = vec![point(2021, 1, 1, 12.5)];
        let mut out = Vec::new();

        write_csv(&mut out, &points, "%Y-%m").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "2021-01,12.5\n");
    }

    #[test]
    fn test_yearly_rows_use_year_format() {
        let points = vec![point(2020, 1, 1, 110.5)];
        let mut out = Vec::new();

        write_csv(&mut out, &points, "%Y").unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "2020,110.5\n");
    }

    #[test]
    fn test_no_points_no_output() {
        let mut out = Vec::new();
        write_csv(&mut out, &[], "%Y-%m-%d").unwrap();
        assert!(out.is_empty());
    }
}
