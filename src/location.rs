use serde::{Deserialize, Serialize};

use crate::error::{Result, SeaBreezeError};

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64, name: String) -> Location {
        Location {
            name,
            latitude: lat,
            longitude: lon,
        }
    }

    /// Longitude in the [-180, 180] convention
    pub fn relative_longitude(&self) -> f64 {
        if self.longitude > 180.0 {
            self.longitude - 360.0
        } else {
            self.longitude
        }
    }

    /// Longitude in the [0, 360] convention
    pub fn absolute_longitude(&self) -> f64 {
        if self.longitude < 0.0 {
            self.longitude + 360.0
        } else {
            self.longitude
        }
    }

    /// Longitude expressed in the same convention as a dataset longitude axis. Axes
    /// with any value past 180 are treated as [0, 360].
    pub fn longitude_for_axis(&self, axis: &[f64]) -> f64 {
        if axis.iter().any(|l| *l > 180.0) {
            self.absolute_longitude()
        } else {
            self.relative_longitude()
        }
    }
}

/// The coastal cities offered when no catalog is configured.
pub fn default_catalog() -> Vec<Location> {
    vec![
        Location::new(-6.2, 106.85, "Jakarta".into()),
        Location::new(-7.25, 112.75, "Surabaya".into()),
        Location::new(-5.1, 119.40, "Makassar".into()),
        Location::new(-10.1, 123.60, "Kupang".into()),
        Location::new(3.59, 98.67, "Medan".into()),
    ]
}

/// Position of a location in the catalog, matching names case-insensitively
pub fn location_index(catalog: &[Location], name: &str) -> Result<usize> {
    catalog
        .iter()
        .position(|l| l.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| SeaBreezeError::UnknownLocation(name.to_string()))
}
