use serde::{Deserialize, Serialize};

use crate::error::{Result, SeaBreezeError};

pub const LATITUDE_NAMES: [&str; 2] = ["latitude", "lat"];
pub const LONGITUDE_NAMES: [&str; 2] = ["longitude", "lon"];
pub const TIME_NAMES: [&str; 2] = ["time", "valid_time"];

/// The names a dataset uses for its time and spatial axes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateNames {
    pub time: String,
    pub latitude: String,
    pub longitude: String,
}

impl CoordinateNames {
    /// Picks the axis names out of a dataset's declared coordinate names, preferring
    /// the long spelling when both are declared.
    pub fn resolve<S: AsRef<str>>(declared: &[S]) -> Result<Self> {
        Ok(CoordinateNames {
            time: resolve_axis(declared, "time", &TIME_NAMES)?,
            latitude: resolve_axis(declared, "latitude", &LATITUDE_NAMES)?,
            longitude: resolve_axis(declared, "longitude", &LONGITUDE_NAMES)?,
        })
    }
}

fn resolve_axis<S: AsRef<str>>(
    declared: &[S],
    axis: &'static str,
    accepted: &[&'static str],
) -> Result<String> {
    accepted
        .iter()
        .find(|name| declared.iter().any(|d| d.as_ref() == **name))
        .map(|name| name.to_string())
        .ok_or_else(|| SeaBreezeError::UnresolvedCoordinate {
            axis,
            accepted: accepted.to_vec(),
        })
}
