#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use ndarray::Array3;
use seabreeze::{CoordinateNames, GriddedDataset, SurfaceFields};

pub const TIMESTAMPS: usize = 48;

/// Latitudes on a 0.25 degree grid from -3 down to -9, stored north to south the
/// way ERA5 ships them
pub fn latitudes() -> Vec<f64> {
    (0..25).map(|i| -3.0 - 0.25 * i as f64).collect()
}

/// Longitudes on a 0.25 degree grid from 105 to 114
pub fn longitudes() -> Vec<f64> {
    (0..37).map(|i| 105.0 + 0.25 * i as f64).collect()
}

/// Temperature rising 0.5 K per degree east, falling 0.2 K per degree north of
/// 6S, and warming 0.1 K per hour
pub fn temperature(t: usize, lat: f64, lon: f64) -> f64 {
    300.0 + 0.1 * t as f64 + 0.5 * (lon - 105.0) - 0.2 * (lat + 6.0)
}

pub fn synthetic_fields(latitudes: &[f64], longitudes: &[f64]) -> SurfaceFields {
    let shape = (TIMESTAMPS, latitudes.len(), longitudes.len());
    SurfaceFields {
        temperature: Array3::from_shape_fn(shape, |(t, i, j)| temperature(t, latitudes[i], longitudes[j])),
        eastward_wind: Array3::from_shape_fn(shape, |(t, _, _)| if t % 24 < 12 { 3.0 } else { -3.0 }),
        northward_wind: Array3::from_elem(shape, 0.5),
    }
}

pub fn assemble(latitudes: Vec<f64>, longitudes: Vec<f64>, fields: SurfaceFields) -> GriddedDataset {
    let start = Utc.with_ymd_and_hms(2024, 11, 15, 0, 0, 0).unwrap();
    let times = (0..TIMESTAMPS as i64)
        .map(|h| start + Duration::hours(h))
        .collect::<Vec<_>>();

    GriddedDataset::new(
        CoordinateNames::resolve(&["time", "latitude", "longitude"]).unwrap(),
        times,
        latitudes,
        longitudes,
        fields,
    )
    .unwrap()
}

pub fn synthetic_dataset_with(latitudes: Vec<f64>, longitudes: Vec<f64>) -> GriddedDataset {
    let fields = synthetic_fields(&latitudes, &longitudes);
    assemble(latitudes, longitudes, fields)
}

pub fn synthetic_dataset() -> GriddedDataset {
    synthetic_dataset_with(latitudes(), longitudes())
}

pub fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}
