//! Loads ERA5 style netCDF files into a [`GriddedDataset`].
//!
//! Coordinate variables are the 1-D variables named after their own dimension.
//! Field variables may be packed (`scale_factor`, `add_offset`), may carry
//! `_FillValue` or `missing_value`, may store their dimensions in any order and
//! may have extra length-one dimensions such as `expver` or `number`.

use std::path::Path;

use crate::{
    dataset::GriddedDataset,
    error::{Result, SeaBreezeError},
};

#[cfg(feature = "netcdf")]
use ndarray::{ArrayD, Axis, Ix3, IxDyn};
#[cfg(feature = "netcdf")]
use tracing::{debug, info};

#[cfg(feature = "netcdf")]
use crate::{
    coordinates::CoordinateNames,
    dataset::{SurfaceFields, Variable},
    tools::date::decode_cf_times,
};

/// Opens a dataset file once. The returned handle is meant to be kept for the
/// life of the session.
pub fn open_dataset(path: impl AsRef<Path>) -> Result<GriddedDataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SeaBreezeError::DatasetNotFound(path.display().to_string()));
    }

    read_netcdf(path)
}

#[cfg(not(feature = "netcdf"))]
fn read_netcdf(_path: &Path) -> Result<GriddedDataset> {
    Err(SeaBreezeError::FeatureDisabled)
}

#[cfg(feature = "netcdf")]
fn read_netcdf(path: &Path) -> Result<GriddedDataset> {
    let file = netcdf::open(path)?;

    let declared = file
        .variables()
        .filter(|v| {
            let dims = v.dimensions();
            dims.len() == 1 && dims[0].name() == v.name()
        })
        .map(|v| v.name())
        .collect::<Vec<_>>();
    debug!(coordinates = ?declared, "declared coordinates");

    let coordinates = CoordinateNames::resolve(&declared)?;

    let latitudes = read_axis(&file, &coordinates.latitude)?;
    let longitudes = read_axis(&file, &coordinates.longitude)?;

    let time_var = file
        .variable(&coordinates.time)
        .ok_or_else(|| SeaBreezeError::MissingVariable(coordinates.time.clone()))?;
    let time_values: Vec<f64> = time_var.get_values(..)?;
    let time_units = string_attribute(&time_var, "units")
        .ok_or_else(|| SeaBreezeError::InvalidTimeUnits(format!("{} has no units", coordinates.time)))?;
    let times = decode_cf_times(&time_values, &time_units)?;

    let grid = [times.len(), latitudes.len(), longitudes.len()];
    let fields = SurfaceFields {
        temperature: read_field(&file, Variable::Temperature, &coordinates, grid)?,
        eastward_wind: read_field(&file, Variable::EastwardWind, &coordinates, grid)?,
        northward_wind: read_field(&file, Variable::NorthwardWind, &coordinates, grid)?,
    };

    info!(
        path = %path.display(),
        timestamps = times.len(),
        latitudes = latitudes.len(),
        longitudes = longitudes.len(),
        "loaded dataset"
    );

    GriddedDataset::new(coordinates, times, latitudes, longitudes, fields)
}

#[cfg(feature = "netcdf")]
fn read_axis(file: &netcdf::File, name: &str) -> Result<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| SeaBreezeError::MissingVariable(name.to_string()))?;
    let values: Vec<f64> = var.get_values(..)?;
    Ok(values)
}

/// Reads a field as (time, latitude, longitude) with missing cells as NaN. `grid`
/// holds the time, latitude and longitude axis lengths.
#[cfg(feature = "netcdf")]
fn read_field(
    file: &netcdf::File,
    variable: Variable,
    coordinates: &CoordinateNames,
    grid: [usize; 3],
) -> Result<ndarray::Array3<f64>> {
    let var = variable
        .aliases()
        .iter()
        .find_map(|name| file.variable(name))
        .ok_or_else(|| SeaBreezeError::MissingVariable(variable.name().to_string()))?;

    let dims = var
        .dimensions()
        .iter()
        .map(|d| (d.name(), d.len()))
        .collect::<Vec<_>>();
    let shape = dims.iter().map(|(_, len)| *len).collect::<Vec<_>>();
    let mismatch = || SeaBreezeError::ShapeMismatch {
        name: variable.name().to_string(),
        expected: grid.to_vec(),
        found: shape.clone(),
    };

    let scale = numeric_attribute(&var, "scale_factor").unwrap_or(1.0);
    let offset = numeric_attribute(&var, "add_offset").unwrap_or(0.0);
    let fill = numeric_attribute(&var, "_FillValue");
    let missing = numeric_attribute(&var, "missing_value");

    let raw: Vec<f64> = var.get_values(..)?;
    let values = raw
        .into_iter()
        .map(|v| {
            if Some(v) == fill || Some(v) == missing || !v.is_finite() {
                f64::NAN
            } else {
                v * scale + offset
            }
        })
        .collect::<Vec<_>>();

    let mut array = ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|_| mismatch())?;

    // Drop length-one dimensions that are not one of the three axes
    let roles = [&coordinates.time, &coordinates.latitude, &coordinates.longitude];
    let mut names = dims.iter().map(|(name, _)| name.clone()).collect::<Vec<_>>();
    for i in (0..names.len()).rev() {
        if roles.contains(&&names[i]) {
            continue;
        }
        if array.len_of(Axis(i)) != 1 {
            return Err(mismatch());
        }
        array = array.index_axis_move(Axis(i), 0);
        names.remove(i);
    }

    let mut order = Vec::with_capacity(3);
    for role in roles {
        let position = names.iter().position(|n| n == role).ok_or_else(mismatch)?;
        order.push(position);
    }

    let array = array
        .permuted_axes(IxDyn(&order))
        .into_dimensionality::<Ix3>()
        .map_err(|_| mismatch())?;

    Ok(array.as_standard_layout().into_owned())
}

#[cfg(feature = "netcdf")]
fn numeric_attribute(var: &netcdf::Variable, name: &str) -> Option<f64> {
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Double(d) => Some(d),
        netcdf::AttributeValue::Float(f) => Some(f as f64),
        netcdf::AttributeValue::Short(s) => Some(s as f64),
        netcdf::AttributeValue::Int(i) => Some(i as f64),
        netcdf::AttributeValue::Longlong(l) => Some(l as f64),
        netcdf::AttributeValue::Schar(c) => Some(c as f64),
        netcdf::AttributeValue::Uchar(c) => Some(c as f64),
        _ => None,
    }
}

#[cfg(feature = "netcdf")]
fn string_attribute(var: &netcdf::Variable, name: &str) -> Option<String> {
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}
