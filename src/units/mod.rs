pub mod measurement;

pub use measurement::Measurement;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit systems for displaying dataset values. Fields are stored in Kelvin and
/// meters per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    English,
    Knots,
    Kelvin,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::English => "english",
            Units::Knots => "knots",
            Units::Kelvin => "kelvin",
        }
    }

    pub fn label(&self, measurement: &Measurement, abbrev: bool) -> &'static str {
        let unit_tuple = (self, measurement, abbrev);
        match unit_tuple {
            (Units::Metric, Measurement::Speed, true) => "m/s",
            (Units::Metric, Measurement::Speed, false) => "meters per second",
            (Units::Metric, Measurement::Temperature, true) => "°C",
            (Units::Metric, Measurement::Temperature, false) => "° celsius",

            (Units::English, Measurement::Speed, true) => "mph",
            (Units::English, Measurement::Speed, false) => "miles per hour",
            (Units::English, Measurement::Temperature, true) => "°F",
            (Units::English, Measurement::Temperature, false) => "° fahrenheit",

            (Units::Knots, Measurement::Speed, true) => "knt",
            (Units::Knots, Measurement::Speed, false) => "knots",

            (Units::Kelvin, Measurement::Temperature, true) => "K",
            (Units::Kelvin, Measurement::Temperature, false) => "kelvin",
            (Units::Kelvin, Measurement::Speed, true) => "m/s",
            (Units::Kelvin, Measurement::Speed, false) => "meters per second",

            (_, Measurement::Direction, _) => "°",
            _ => "",
        }
    }

    pub fn convert(&self, measurement: &Measurement, destination: &Units, value: f64) -> f64 {
        let unit_tuple = (self, measurement, destination);
        match unit_tuple {
            (Units::Metric, Measurement::Speed, Units::English) => value * 2.237,
            (Units::Metric, Measurement::Speed, Units::Knots) => value * 1.944,
            (Units::Metric, Measurement::Temperature, Units::English) => value * (9.0 / 5.0) + 32.0,
            (Units::Metric, Measurement::Temperature, Units::Kelvin) => value + 273.15,

            (Units::English, Measurement::Speed, Units::Metric) => value / 2.237,
            (Units::English, Measurement::Speed, Units::Knots) => value / 1.15,
            (Units::English, Measurement::Temperature, Units::Metric) => (value - 32.0) * (5.0 / 9.0),
            (Units::English, Measurement::Temperature, Units::Kelvin) => {
                (value + 459.67) * (5.0 / 9.0)
            }

            (Units::Knots, Measurement::Speed, Units::Metric) => value * 0.514,
            (Units::Knots, Measurement::Speed, Units::English) => value * 1.15,

            (Units::Kelvin, Measurement::Temperature, Units::Metric) => value - 273.15,
            (Units::Kelvin, Measurement::Temperature, Units::English) => {
                value * (9.0 / 5.0) - 459.67
            }
            (Units::Kelvin, Measurement::Speed, Units::English) => value * 2.237,
            (Units::Kelvin, Measurement::Speed, Units::Knots) => value * 1.944,

            _ => value,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Units::Kelvin
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Values that can be re-expressed in another unit system
pub trait UnitConvertible<T> {
    fn to_units(&mut self, new_units: &Units);
}

#[cfg(test)]
mod tests {
    use super::{Measurement, Units};

    #[test]
    fn test_temperature_conversion() {
        let celsius = Units::Kelvin.convert(&Measurement::Temperature, &Units::Metric, 300.15);
        assert!((celsius - 27.0).abs() < 1e-9);

        let fahrenheit = Units::Kelvin.convert(&Measurement::Temperature, &Units::English, 273.15);
        assert!((fahrenheit - 32.0).abs() < 1e-9);

        let kelvin = Units::English.convert(&Measurement::Temperature, &Units::Kelvin, 32.0);
        assert!((kelvin - 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_unchanged_when_same_units() {
        let value = Units::Kelvin.convert(&Measurement::Temperature, &Units::Kelvin, 301.0);
        assert_eq!(value, 301.0);
        assert!(Units::Kelvin.convert(&Measurement::Temperature, &Units::Metric, f64::NAN).is_nan());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Units::Kelvin.label(&Measurement::Temperature, true), "K");
        assert_eq!(Units::Metric.label(&Measurement::Temperature, true), "°C");
        assert_eq!(Units::Knots.label(&Measurement::Speed, true), "knt");
    }
}
