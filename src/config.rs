use std::{fs, path::{Path, PathBuf}};

use serde::{Deserialize, Serialize};

use crate::{
    comparator::ComparatorOptions,
    error::{Result, SeaBreezeError},
    location::{default_catalog, Location},
    map::{DEFAULT_CONTOUR_LEVELS, DEFAULT_WIND_STRIDE},
    region::Margins,
    units::Units,
};

pub const DEFAULT_DATASET_PATH: &str = "seabreeze.nc";
pub const DEFAULT_TIME_INDEX: usize = 12;

/// Settings for a comparator session, usually read from YAML. Every field is
/// optional in the file and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset: PathBuf,
    pub margins: Margins,
    pub wind_stride: usize,
    pub contour_levels: usize,
    pub default_time_index: usize,
    pub temperature_units: Units,
    pub wind_units: Units,
    pub locations: Vec<Location>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            margins: Margins::default(),
            wind_stride: DEFAULT_WIND_STRIDE,
            contour_levels: DEFAULT_CONTOUR_LEVELS,
            default_time_index: DEFAULT_TIME_INDEX,
            temperature_units: Units::Kelvin,
            wind_units: Units::Metric,
            locations: default_catalog(),
        }
    }
}

impl AppConfig {
    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects unit settings that cannot express their quantity: temperatures in
    /// knots, winds in kelvin
    pub fn validate(&self) -> Result<()> {
        if self.temperature_units == Units::Knots {
            return Err(SeaBreezeError::UnsupportedUnits {
                setting: "temperature_units",
                units: self.temperature_units,
            });
        }
        if self.wind_units == Units::Kelvin {
            return Err(SeaBreezeError::UnsupportedUnits {
                setting: "wind_units",
                units: self.wind_units,
            });
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn comparator_options(&self) -> ComparatorOptions {
        ComparatorOptions {
            margins: self.margins,
            wind_stride: self.wind_stride.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use crate::{error::SeaBreezeError, units::Units};

    use super::AppConfig;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.dataset, PathBuf::from("seabreeze.nc"));
        assert_eq!(config.margins.latitude, 1.0);
        assert_eq!(config.margins.longitude, 1.0);
        assert_eq!(config.wind_stride, 4);
        assert_eq!(config.default_time_index, 12);
        assert_eq!(config.locations.len(), 5);
    }

    #[test]
    fn test_partial_yaml() {
        let raw = r#"
dataset: data/era5_java.nc
temperature_units: metric
locations:
  - name: Semarang
    latitude: -6.97
    longitude: 110.42
"#;
        let config = AppConfig::from_yaml(raw).unwrap();
        assert_eq!(config.dataset, PathBuf::from("data/era5_java.nc"));
        assert_eq!(config.temperature_units, Units::Metric);
        assert_eq!(config.wind_units, Units::Metric);
        assert_eq!(config.wind_stride, 4);
        assert_eq!(config.locations.len(), 1);
        assert_eq!(config.locations[0].name, "Semarang");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wind_stride: 0\nmargins:\n  latitude: 0.5\n  longitude: 0.75").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.margins.latitude, 0.5);
        assert_eq!(config.comparator_options().margins.longitude, 0.75);
        assert_eq!(config.comparator_options().wind_stride, 1);
    }

    #[test]
    fn test_unsupported_units() {
        let err = AppConfig::from_yaml("temperature_units: knots").unwrap_err();
        assert!(matches!(
            err,
            SeaBreezeError::UnsupportedUnits {
                setting: "temperature_units",
                units: Units::Knots
            }
        ));
        assert_eq!(err.to_string(), "temperature_units cannot be expressed in knots");

        assert!(AppConfig::from_yaml("wind_units: kelvin").is_err());
        assert!(AppConfig::from_yaml("temperature_units: english\nwind_units: english").is_ok());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(AppConfig::from_yaml("wind_stride: [").is_err());
        assert!(AppConfig::load("/nonexistent/seabreeze.yaml").is_err());
    }
}
