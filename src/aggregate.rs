use std::ops::Range;

use ndarray::{s, ArrayView2};
use num_traits::{Float, NumCast};
use tracing::warn;

use crate::{
    dataset::{GriddedDataset, Variable},
    error::{Result, SeaBreezeError},
    region::Region,
};

/// Arithmetic mean of the values that are not NaN, or None when every value is
pub fn nan_mean<T, I>(values: I) -> Option<T>
where
    T: Float,
    I: IntoIterator<Item = T>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((T::zero(), 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        return None;
    }

    let count: T = NumCast::from(count)?;
    Some(sum / count)
}

/// Unweighted mean over both spatial axes. Cells are not weighted by area.
pub fn spatial_mean(field: ArrayView2<f64>) -> f64 {
    nan_mean(field.iter().copied()).unwrap_or(f64::NAN)
}

/// Grid index ranges covered by a named region, failing when the region holds no
/// cells of the dataset
pub fn region_cells(
    dataset: &GriddedDataset,
    region: &Region,
    name: &'static str,
) -> Result<(Range<usize>, Range<usize>)> {
    region
        .select(dataset.latitudes(), dataset.longitudes())
        .ok_or_else(|| {
            warn!(
                region = name,
                lat_min = region.latitude.min(),
                lat_max = region.latitude.max(),
                lon_min = region.longitude.min(),
                lon_max = region.longitude.max(),
                "region selects no grid cells"
            );
            SeaBreezeError::EmptyRegion {
                region: name,
                lat_min: region.latitude.min(),
                lat_max: region.latitude.max(),
                lon_min: region.longitude.min(),
                lon_max: region.longitude.max(),
            }
        })
}

/// Spatial mean of a variable over a region, one value per timestamp
pub fn regional_mean_series(
    dataset: &GriddedDataset,
    variable: Variable,
    region: &Region,
    name: &'static str,
) -> Result<Vec<f64>> {
    let (lat, lon) = region_cells(dataset, region, name)?;
    let field = dataset.field(variable);

    Ok(field
        .slice(s![.., lat, lon])
        .outer_iter()
        .map(spatial_mean)
        .collect())
}

/// Spatial mean of a variable over a region at a single timestamp
pub fn regional_mean(
    dataset: &GriddedDataset,
    variable: Variable,
    region: &Region,
    name: &'static str,
    time_index: usize,
) -> Result<f64> {
    dataset.check_time_index(time_index)?;
    let (lat, lon) = region_cells(dataset, region, name)?;
    let field = dataset.field(variable);

    Ok(spatial_mean(field.slice(s![time_index, lat, lon])))
}
