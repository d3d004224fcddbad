use contour::ContourBuilder;
use geojson::{Feature, Value};

use crate::error::{Result, SeaBreezeError};

pub fn compute_contours<F: Fn(&Vec<f64>) -> Vec<f64>>(
    data: &[f64],
    width: usize,
    height: usize,
    thresholds: &[f64],
    coordinate_transform: Option<F>,
) -> Result<Vec<Feature>> {
    let contour_builder = ContourBuilder::new(width as u32, height as u32, true);

    let features = contour_builder
        .contours(data, thresholds)
        .map_err(|e| SeaBreezeError::Contour(format!("{e:?}")))?
        .iter()
        .map(|c| {
            let mut f = c.to_geojson();

            let Some(coordinate_transform) = coordinate_transform.as_ref() else {
                return f;
            };

            let Some(g) = &f.geometry else {
                return f;
            };

            let Value::MultiPolygon(coords) = &g.value else {
                return f;
            };

            let new_coordinates: Vec<Vec<Vec<Vec<f64>>>> = coords
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|c| c.iter().map(|point| coordinate_transform(point)).collect())
                        .collect()
                })
                .collect();
            f.geometry = Some(Value::MultiPolygon(new_coordinates).into());

            f
        })
        .collect::<Vec<_>>();

    Ok(features)
}

/// Contours a (latitude, longitude) row-major grid, placing the polygons at the
/// grid's own coordinates. Cells must already be free of NaN.
pub fn compute_latlng_gridded_contours(
    data: &[f64],
    latitudes: &[f64],
    longitudes: &[f64],
    thresholds: &[f64],
) -> Result<Vec<Feature>> {
    compute_contours(
        data,
        longitudes.len(),
        latitudes.len(),
        thresholds,
        Some(|point: &Vec<f64>| {
            vec![
                axis_position(longitudes, point[0]),
                axis_position(latitudes, point[1]),
            ]
        }),
    )
}

/// Maps a contour grid position onto an axis. Cell centers sit at half-integer
/// positions; anything beyond the outer centers is clamped onto them.
fn axis_position(axis: &[f64], position: f64) -> f64 {
    let last = axis.len().saturating_sub(1);
    let position = (position - 0.5).clamp(0.0, last as f64);
    let i = position.floor() as usize;
    if i >= last {
        return axis[last];
    }

    let fraction = position - i as f64;
    axis[i] + (axis[i + 1] - axis[i]) * fraction
}
