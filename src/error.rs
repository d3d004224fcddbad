use thiserror::Error;

use crate::units::Units;

pub type Result<T> = std::result::Result<T, SeaBreezeError>;

#[derive(Debug, Error)]
pub enum SeaBreezeError {
    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("no {axis} coordinate found, expected one of: {}", .accepted.join(", "))]
    UnresolvedCoordinate {
        axis: &'static str,
        accepted: Vec<&'static str>,
    },

    #[error("missing variable: {0}")]
    MissingVariable(String),

    #[error("shape mismatch for {name}: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        name: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("{0} axis is not monotonic")]
    NonMonotonicAxis(String),

    #[error("invalid time units: {0}")]
    InvalidTimeUnits(String),

    #[error("time index {index} is out of range for {len} timestamps")]
    TimeIndexOutOfRange { index: usize, len: usize },

    #[error("unknown location: {0}")]
    UnknownLocation(String),

    #[error("no locations configured")]
    EmptyCatalog,

    #[error("{setting} cannot be expressed in {units}")]
    UnsupportedUnits { setting: &'static str, units: Units },

    #[error("{region} region selects no grid cells (lat {lat_min}..{lat_max}, lon {lon_min}..{lon_max})")]
    EmptyRegion {
        region: &'static str,
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    },

    #[error("failed to contour {0}")]
    Contour(String),

    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "netcdf")]
    #[error("netCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    #[error("netCDF support is not enabled, rebuild with the `netcdf` feature")]
    FeatureDisabled,
}
