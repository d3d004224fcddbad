use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    error::Result,
    tools::serde::serialize_series,
    units::{Measurement, UnitConvertible, Units},
};

/// Sea and land mean temperature over the whole time axis, with the instant
/// currently selected for the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub times: Vec<DateTime<Utc>>,
    #[serde(serialize_with = "serialize_series")]
    pub sea: Vec<f64>,
    #[serde(serialize_with = "serialize_series")]
    pub land: Vec<f64>,
    pub selected_index: usize,
    pub selected_time: DateTime<Utc>,
    pub units: Units,
}

#[derive(Serialize)]
struct SeriesRow {
    time: DateTime<Utc>,
    sea: Option<f64>,
    land: Option<f64>,
    contrast: Option<f64>,
    selected: bool,
}

impl ComparisonSeries {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Land minus sea at every timestamp
    pub fn contrast(&self) -> Vec<f64> {
        self.land.iter().zip(self.sea.iter()).map(|(l, s)| l - s).collect()
    }

    /// Index and value of the largest land minus sea contrast
    pub fn peak_contrast(&self) -> Option<(usize, f64)> {
        self.contrast()
            .into_iter()
            .enumerate()
            .filter(|(_, c)| !c.is_nan())
            .fold(None, |peak, (i, c)| match peak {
                Some((_, best)) if best >= c => peak,
                _ => Some((i, c)),
            })
    }

    /// Sea and land values at the selected instant
    pub fn selected_values(&self) -> (f64, f64) {
        (self.sea[self.selected_index], self.land[self.selected_index])
    }

    /// Writes `time,sea,land,contrast,selected` rows, empty where a mean is missing
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        let contrast = self.contrast();
        let present = |v: f64| if v.is_nan() { None } else { Some(v) };

        for (i, time) in self.times.iter().enumerate() {
            writer.serialize(SeriesRow {
                time: *time,
                sea: present(self.sea[i]),
                land: present(self.land[i]),
                contrast: present(contrast[i]),
                selected: i == self.selected_index,
            })?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl UnitConvertible<ComparisonSeries> for ComparisonSeries {
    fn to_units(&mut self, new_units: &Units) {
        if new_units == &self.units || new_units == &Units::Knots {
            return;
        }

        let from = self.units;
        let convert = |v: &mut f64| *v = from.convert(&Measurement::Temperature, new_units, *v);
        self.sea.iter_mut().for_each(convert);
        self.land.iter_mut().for_each(convert);
        self.units = *new_units;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::units::{UnitConvertible, Units};

    use super::ComparisonSeries;

    fn series() -> ComparisonSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let times = (0..4).map(|h| start + Duration::hours(h)).collect::<Vec<_>>();
        ComparisonSeries {
            selected_time: times[1],
            times,
            sea: vec![300.0, 300.5, f64::NAN, 301.0],
            land: vec![299.0, 302.5, 303.0, 301.5],
            selected_index: 1,
            units: Units::Kelvin,
        }
    }

    #[test]
    fn test_contrast_and_peak() {
        let series = series();
        let contrast = series.contrast();
        assert_eq!(contrast[0], -1.0);
        assert_eq!(contrast[1], 2.0);
        assert!(contrast[2].is_nan());

        assert_eq!(series.peak_contrast(), Some((1, 2.0)));
        assert_eq!(series.selected_values(), (300.5, 302.5));
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        series().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines = text.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "time,sea,land,contrast,selected");
        assert_eq!(lines.len(), 5);
        assert!(lines[2].ends_with(",300.5,302.5,2.0,true"));
        assert!(lines[3].ends_with(",,303.0,,false"));
    }

    #[test]
    fn test_serialize_missing_as_null() {
        let json = serde_json::to_value(series()).unwrap();
        assert!(json["sea"][2].is_null());
        assert_eq!(json["land"][2], 303.0);
    }

    #[test]
    fn test_convert_to_celsius() {
        let mut series = series();
        series.to_units(&Units::Metric);
        assert!((series.sea[0] - 26.85).abs() < 1e-9);
        assert!((series.contrast()[1] - 2.0).abs() < 1e-9);
        assert_eq!(series.units, Units::Metric);
    }
}
