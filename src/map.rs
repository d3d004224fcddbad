use chrono::{DateTime, Utc};
use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use ndarray::{s, Array2};
use serde::Serialize;

use crate::{
    dataset::{GriddedDataset, Variable},
    error::Result,
    tools::{
        contour::compute_latlng_gridded_contours,
        linspace::linspace,
        math::scalar_from_uv,
        serde::serialize_grid,
        vector::fill_missing,
    },
    units::{Measurement, UnitConvertible, Units},
};

pub const DEFAULT_WIND_STRIDE: usize = 4;
pub const DEFAULT_CONTOUR_LEVELS: usize = 20;

/// Wind components on a grid thinned for arrow rendering
#[derive(Debug, Clone, Serialize)]
pub struct WindVectors {
    pub stride: usize,
    pub units: Units,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    #[serde(serialize_with = "serialize_grid")]
    pub u: Array2<f64>,
    #[serde(serialize_with = "serialize_grid")]
    pub v: Array2<f64>,
}

/// Everything a map renderer needs for one instant: temperature over the full
/// grid and subsampled wind arrows
#[derive(Debug, Clone, Serialize)]
pub struct MapSlice {
    pub time: DateTime<Utc>,
    pub time_index: usize,
    pub units: Units,
    pub latitudes: Vec<f64>,
    pub longitudes: Vec<f64>,
    #[serde(serialize_with = "serialize_grid")]
    pub temperature: Array2<f64>,
    pub wind: WindVectors,
}

impl MapSlice {
    pub fn extract(dataset: &GriddedDataset, time_index: usize, wind_stride: usize) -> Result<Self> {
        dataset.check_time_index(time_index)?;
        let stride = wind_stride.max(1);
        let step = stride as isize;

        let temperature = dataset
            .field(Variable::Temperature)
            .slice(s![time_index, .., ..])
            .to_owned();
        let u = dataset
            .field(Variable::EastwardWind)
            .slice(s![time_index, ..;step, ..;step])
            .to_owned();
        let v = dataset
            .field(Variable::NorthwardWind)
            .slice(s![time_index, ..;step, ..;step])
            .to_owned();

        let wind = WindVectors {
            stride,
            units: Units::Metric,
            latitudes: dataset.latitudes().iter().step_by(stride).copied().collect(),
            longitudes: dataset.longitudes().iter().step_by(stride).copied().collect(),
            u,
            v,
        };

        Ok(MapSlice {
            time: dataset.times()[time_index],
            time_index,
            units: Units::Kelvin,
            latitudes: dataset.latitudes().to_vec(),
            longitudes: dataset.longitudes().to_vec(),
            temperature,
            wind,
        })
    }

    /// Temperature contour polygons at `levels` thresholds evenly spaced between
    /// the field's min and max
    pub fn temperature_contours(&self, levels: usize) -> Result<Vec<Feature>> {
        let mut data = self.temperature.iter().copied().collect::<Vec<_>>();
        let Some((min, max)) = fill_missing(&mut data, -99999.0) else {
            return Ok(vec![]);
        };

        let thresholds = linspace(min, max, levels).collect::<Vec<_>>();
        let mut features =
            compute_latlng_gridded_contours(&data, &self.latitudes, &self.longitudes, &thresholds)?;

        let variable = Variable::Temperature;
        let units = self.units.label(&variable.measurement(), true);
        features.iter_mut().for_each(|f| {
            f.set_property("variable", variable.name());
            f.set_property("long_name", variable.long_name());
            f.set_property("units", units);
        });

        Ok(features)
    }

    /// One point feature per wind arrow, skipping cells with missing components
    pub fn wind_features(&self) -> Vec<Feature> {
        let speed_units = self.wind.units.label(&Measurement::Speed, true);
        let direction_units = self.wind.units.label(&Measurement::Direction, true);

        self.wind
            .u
            .indexed_iter()
            .filter_map(|((i, j), u)| {
                let v = self.wind.v[[i, j]];
                if u.is_nan() || v.is_nan() {
                    return None;
                }

                let (speed, direction) = scalar_from_uv(*u, v);
                let mut properties = JsonObject::new();
                properties.insert("u".into(), JsonValue::from(*u));
                properties.insert("v".into(), JsonValue::from(v));
                properties.insert("speed".into(), JsonValue::from(speed));
                properties.insert("direction".into(), JsonValue::from(direction));
                properties.insert("units".into(), JsonValue::from(speed_units));
                properties.insert("direction_units".into(), JsonValue::from(direction_units));

                let point = Value::Point(vec![self.wind.longitudes[j], self.wind.latitudes[i]]);
                Some(Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(point)),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                })
            })
            .collect()
    }
}

impl UnitConvertible<MapSlice> for MapSlice {
    fn to_units(&mut self, new_units: &Units) {
        match new_units {
            Units::Kelvin | Units::Metric | Units::English if new_units != &self.units => {
                let from = self.units;
                self.temperature
                    .mapv_inplace(|t| from.convert(&Measurement::Temperature, new_units, t));
                self.units = *new_units;
            }
            _ => {}
        }
    }
}

impl UnitConvertible<WindVectors> for WindVectors {
    fn to_units(&mut self, new_units: &Units) {
        let destination = match new_units {
            Units::Kelvin => Units::Metric,
            other => *other,
        };
        if destination == self.units {
            return;
        }

        let from = self.units;
        self.u.mapv_inplace(|c| from.convert(&Measurement::Speed, &destination, c));
        self.v.mapv_inplace(|c| from.convert(&Measurement::Speed, &destination, c));
        self.units = destination;
    }
}
