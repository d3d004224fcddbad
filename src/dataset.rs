use chrono::{DateTime, Utc};
use itertools::Itertools;
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::{
    coordinates::CoordinateNames,
    error::{Result, SeaBreezeError},
    units::Measurement,
};

/// The near-surface fields the comparator reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Temperature,
    EastwardWind,
    NorthwardWind,
}

impl Variable {
    pub fn name(&self) -> &'static str {
        match self {
            Variable::Temperature => "t2m",
            Variable::EastwardWind => "u10",
            Variable::NorthwardWind => "v10",
        }
    }

    /// Every name the variable is published under, ERA5 short names first
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Variable::Temperature => &["t2m", "2t"],
            Variable::EastwardWind => &["u10", "10u"],
            Variable::NorthwardWind => &["v10", "10v"],
        }
    }

    pub fn long_name(&self) -> &'static str {
        match self {
            Variable::Temperature => "2 metre temperature",
            Variable::EastwardWind => "10 metre U wind component",
            Variable::NorthwardWind => "10 metre V wind component",
        }
    }

    pub fn measurement(&self) -> Measurement {
        match self {
            Variable::Temperature => Measurement::Temperature,
            Variable::EastwardWind | Variable::NorthwardWind => Measurement::Speed,
        }
    }
}

/// Field values laid out as (time, latitude, longitude)
#[derive(Debug, Clone)]
pub struct SurfaceFields {
    pub temperature: Array3<f64>,
    pub eastward_wind: Array3<f64>,
    pub northward_wind: Array3<f64>,
}

/// An hourly gridded dataset held in memory. Missing cells are NaN.
#[derive(Debug, Clone)]
pub struct GriddedDataset {
    coordinates: CoordinateNames,
    times: Vec<DateTime<Utc>>,
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    fields: SurfaceFields,
}

impl GriddedDataset {
    pub fn new(
        coordinates: CoordinateNames,
        times: Vec<DateTime<Utc>>,
        latitudes: Vec<f64>,
        longitudes: Vec<f64>,
        fields: SurfaceFields,
    ) -> Result<Self> {
        check_monotonic(&coordinates.latitude, &latitudes)?;
        check_monotonic(&coordinates.longitude, &longitudes)?;

        let expected = [times.len(), latitudes.len(), longitudes.len()];
        for (variable, field) in [
            (Variable::Temperature, &fields.temperature),
            (Variable::EastwardWind, &fields.eastward_wind),
            (Variable::NorthwardWind, &fields.northward_wind),
        ] {
            if field.shape() != &expected[..] {
                return Err(SeaBreezeError::ShapeMismatch {
                    name: variable.name().to_string(),
                    expected: expected.to_vec(),
                    found: field.shape().to_vec(),
                });
            }
        }

        Ok(GriddedDataset {
            coordinates,
            times,
            latitudes,
            longitudes,
            fields,
        })
    }

    pub fn coordinates(&self) -> &CoordinateNames {
        &self.coordinates
    }

    pub fn times(&self) -> &[DateTime<Utc>] {
        &self.times
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn field(&self, variable: Variable) -> &Array3<f64> {
        match variable {
            Variable::Temperature => &self.fields.temperature,
            Variable::EastwardWind => &self.fields.eastward_wind,
            Variable::NorthwardWind => &self.fields.northward_wind,
        }
    }

    /// Number of timestamps
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn check_time_index(&self, index: usize) -> Result<()> {
        if index >= self.times.len() {
            return Err(SeaBreezeError::TimeIndexOutOfRange {
                index,
                len: self.times.len(),
            });
        }
        Ok(())
    }
}

fn check_monotonic(name: &str, axis: &[f64]) -> Result<()> {
    let ascending = axis.iter().tuple_windows().all(|(a, b)| b > a);
    let descending = axis.iter().tuple_windows().all(|(a, b)| b < a);
    if ascending || descending {
        Ok(())
    } else {
        Err(SeaBreezeError::NonMonotonicAxis(name.to_string()))
    }
}
