use geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    aggregate::regional_mean_series,
    dataset::{GriddedDataset, Variable},
    error::Result,
    location::Location,
    map::{MapSlice, DEFAULT_WIND_STRIDE},
    region::{Margins, RegionSplit},
    series::ComparisonSeries,
    units::{UnitConvertible, Units},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparatorOptions {
    pub margins: Margins,
    pub wind_stride: usize,
}

impl Default for ComparatorOptions {
    fn default() -> Self {
        ComparatorOptions {
            margins: Margins::default(),
            wind_stride: DEFAULT_WIND_STRIDE,
        }
    }
}

/// The map slice and the sea/land series for one location and instant
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub location: Location,
    pub split: RegionSplit,
    pub map: MapSlice,
    pub series: ComparisonSeries,
}

impl Comparison {
    /// Map features for a renderer: temperature contours, wind arrows, then the
    /// sea and land boxes
    pub fn to_feature_collection(&self, contour_levels: usize) -> Result<FeatureCollection> {
        let mut features: Vec<Feature> = self.map.temperature_contours(contour_levels)?;
        features.extend(self.map.wind_features());
        features.push(self.split.sea.to_feature("sea"));
        features.push(self.split.land.to_feature("land"));

        Ok(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}

impl UnitConvertible<Comparison> for Comparison {
    fn to_units(&mut self, new_units: &Units) {
        self.map.to_units(new_units);
        self.series.to_units(new_units);
    }
}

/// Computes the map slice and the sea/land temperature series for a location and a
/// time index. Nothing is cached, so equal inputs always give equal output.
pub fn compare(
    dataset: &GriddedDataset,
    location: &Location,
    time_index: usize,
    options: &ComparatorOptions,
) -> Result<Comparison> {
    dataset.check_time_index(time_index)?;

    let longitude = location.longitude_for_axis(dataset.longitudes());
    let split = RegionSplit::around(longitude, location.latitude, &options.margins);

    let map = MapSlice::extract(dataset, time_index, options.wind_stride)?;
    let sea = regional_mean_series(dataset, Variable::Temperature, &split.sea, "sea")?;
    let land = regional_mean_series(dataset, Variable::Temperature, &split.land, "land")?;

    debug!(
        location = %location.name,
        time_index,
        timestamps = sea.len(),
        "computed sea and land series"
    );

    let series = ComparisonSeries {
        times: dataset.times().to_vec(),
        sea,
        land,
        selected_index: time_index,
        selected_time: dataset.times()[time_index],
        units: Units::Kelvin,
    };

    Ok(Comparison {
        location: location.clone(),
        split,
        map,
        series,
    })
}
