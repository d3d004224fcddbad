use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;

use crate::error::{Result, SeaBreezeError};

/// Decodes CF convention time offsets such as `hours since 1900-01-01 00:00:00.0`
/// into UTC timestamps
pub fn decode_cf_times(values: &[f64], units: &str) -> Result<Vec<DateTime<Utc>>> {
    let (unit_seconds, reference) = parse_cf_time_units(units)?;

    values
        .iter()
        .map(|v| {
            let out_of_range = || SeaBreezeError::InvalidTimeUnits(format!("{v} {units}"));
            let millis = (v * unit_seconds * 1000.0).round();
            if !millis.is_finite() {
                return Err(out_of_range());
            }
            Duration::try_milliseconds(millis as i64)
                .and_then(|offset| reference.checked_add_signed(offset))
                .ok_or_else(out_of_range)
        })
        .collect()
}

/// Splits CF time units into the length of one step in seconds and the reference
/// instant
pub fn parse_cf_time_units(units: &str) -> Result<(f64, DateTime<Utc>)> {
    let invalid = || SeaBreezeError::InvalidTimeUnits(units.to_string());

    let parser = Regex::new(
        r"^\s*(\w+)\s+since\s+(\d{4}-\d{1,2}-\d{1,2})(?:[ T](\d{1,2}):(\d{1,2})(?::(\d{1,2})(?:\.\d+)?)?)?\s*(?:Z|UTC|[+-]00:?00)?\s*$",
    )
    .map_err(|_| invalid())?;

    let captures = parser.captures(units).ok_or_else(invalid)?;

    let unit_seconds = match captures[1].to_lowercase().as_str() {
        "second" | "seconds" | "s" | "sec" | "secs" => 1.0,
        "minute" | "minutes" | "min" | "mins" => 60.0,
        "hour" | "hours" | "h" | "hr" | "hrs" => 3600.0,
        "day" | "days" | "d" => 86400.0,
        _ => return Err(invalid()),
    };

    let date = NaiveDate::parse_from_str(&captures[2], "%Y-%m-%d").map_err(|_| invalid())?;

    let component = |i: usize| -> Result<u32> {
        captures
            .get(i)
            .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
            .unwrap_or(Ok(0))
    };
    let time = NaiveTime::from_hms_opt(component(3)?, component(4)?, component(5)?).ok_or_else(invalid)?;

    let reference = NaiveDateTime::new(date, time).and_utc();
    Ok((unit_seconds, reference))
}

pub fn format_timestamp(datetime: &DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::error::SeaBreezeError;

    use super::{decode_cf_times, format_timestamp, parse_cf_time_units};

    #[test]
    fn test_era5_hours_since() {
        let times = decode_cf_times(&[1_094_616.0, 1_094_617.0], "hours since 1900-01-01 00:00:00.0").unwrap();
        assert_eq!(times[0], Utc.with_ymd_and_hms(2024, 11, 15, 0, 0, 0).unwrap());
        assert_eq!(times[1], Utc.with_ymd_and_hms(2024, 11, 15, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_seconds_since_epoch() {
        let times = decode_cf_times(&[0.0, 3600.0], "seconds since 1970-01-01").unwrap();
        assert_eq!(times[0], Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(times[1], Utc.with_ymd_and_hms(1970, 1, 1, 1, 0, 0).unwrap());
    }

    #[test]
    fn test_reference_time_of_day() {
        let (step, reference) = parse_cf_time_units("days since 2023-4-13T06:30:00Z").unwrap();
        assert_eq!(step, 86400.0);
        assert_eq!(reference, Utc.with_ymd_and_hms(2023, 4, 13, 6, 30, 0).unwrap());
    }

    #[test]
    fn test_offset_past_calendar_range() {
        let err = decode_cf_times(&[0.0, 1.0e12], "hours since 1900-01-01").unwrap_err();
        assert!(matches!(err, SeaBreezeError::InvalidTimeUnits(msg) if msg.starts_with("1000000000000")));

        assert!(decode_cf_times(&[1.0e18], "hours since 1900-01-01").is_err());
        assert!(decode_cf_times(&[-1.0e18], "days since 1970-01-01").is_err());
        assert!(decode_cf_times(&[f64::NAN], "days since 1970-01-01").is_err());
    }

    #[test]
    fn test_invalid_units() {
        assert!(parse_cf_time_units("fortnights since 2000-01-01").is_err());
        assert!(parse_cf_time_units("kelvin").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let datetime = Utc.with_ymd_and_hms(2023, 1, 17, 13, 0, 0).unwrap();
        assert_eq!(format_timestamp(&datetime), "2023-01-17 13:00 UTC");
    }
}
