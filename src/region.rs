use std::ops::Range;

use geojson::{Feature, Geometry, Value};
use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Half-width of the window drawn around a location, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Margins {
            latitude: 1.0,
            longitude: 1.0,
        }
    }
}

/// An inclusive range of coordinate values in degrees. The bounds carry no
/// orientation, so the same range selects the same cells whether an axis is stored
/// ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRange {
    pub start: f64,
    pub end: f64,
}

impl CoordinateRange {
    pub fn new(start: f64, end: f64) -> Self {
        CoordinateRange { start, end }
    }

    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Index range of the axis values falling inside this range, or None when no
    /// value does. The axis must be monotonic, which makes the matches contiguous.
    pub fn select(&self, axis: &[f64]) -> Option<Range<usize>> {
        let first = axis.iter().position(|v| self.contains(*v))?;
        let last = axis.iter().rposition(|v| self.contains(*v))?;
        Some(first..last + 1)
    }
}

/// A rectangular sub-region of the spatial grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: CoordinateRange,
    pub longitude: CoordinateRange,
}

impl Region {
    /// The region as a closed polygon feature tagged with its name
    pub fn to_feature(&self, name: &str) -> Feature {
        let (west, east) = (self.longitude.min(), self.longitude.max());
        let (south, north) = (self.latitude.min(), self.latitude.max());
        let ring = vec![
            vec![west, south],
            vec![east, south],
            vec![east, north],
            vec![west, north],
            vec![west, south],
        ];

        let mut feature = Feature::from(Geometry::new(Value::Polygon(vec![ring])));
        feature.set_property("region", name);
        feature
    }

    /// Index ranges of the (latitude, longitude) cells inside the region
    pub fn select(&self, latitudes: &[f64], longitudes: &[f64]) -> Option<(Range<usize>, Range<usize>)> {
        let lat = self.latitude.select(latitudes)?;
        let lon = self.longitude.select(longitudes)?;
        Some((lat, lon))
    }
}

/// The window around a location split at the location's longitude. Sea is
/// always taken to lie west of the point and land east of it, which misplaces
/// both halves wherever the real coastline runs the other way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionSplit {
    pub window: Region,
    pub sea: Region,
    pub land: Region,
}

impl RegionSplit {
    pub fn around(longitude: f64, latitude: f64, margins: &Margins) -> Self {
        let lat_range = CoordinateRange::new(latitude - margins.latitude, latitude + margins.latitude);

        let window = Region {
            latitude: lat_range,
            longitude: CoordinateRange::new(longitude - margins.longitude, longitude + margins.longitude),
        };

        let sea = Region {
            latitude: lat_range,
            longitude: CoordinateRange::new(longitude - margins.longitude, longitude),
        };

        let land = Region {
            latitude: lat_range,
            longitude: CoordinateRange::new(longitude, longitude + margins.longitude),
        };

        RegionSplit { window, sea, land }
    }

    pub fn for_location(location: &Location, margins: &Margins) -> Self {
        Self::around(location.longitude, location.latitude, margins)
    }
}

#[cfg(test)]
mod tests {
    use crate::location::Location;

    use super::{CoordinateRange, Margins, RegionSplit};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_split_shares_boundary() {
        let split = RegionSplit::around(112.75, -7.25, &Margins::default());
        assert_eq!(split.sea.longitude.end, 112.75);
        assert_eq!(split.land.longitude.start, 112.75);
        assert_eq!(split.sea.latitude, split.land.latitude);
        assert_eq!(split.window.latitude, split.sea.latitude);
    }

    #[test]
    fn test_split_jakarta() {
        let jakarta = Location::new(-6.2, 106.85, "Jakarta".into());
        let split = RegionSplit::for_location(&jakarta, &Margins::default());

        assert_close(split.sea.longitude.min(), 105.85);
        assert_close(split.sea.longitude.max(), 106.85);
        assert_close(split.land.longitude.min(), 106.85);
        assert_close(split.land.longitude.max(), 107.85);
        assert_close(split.sea.latitude.min(), -7.2);
        assert_close(split.sea.latitude.max(), -5.2);
        assert_close(split.window.longitude.min(), 105.85);
        assert_close(split.window.longitude.max(), 107.85);
    }

    #[test]
    fn test_select_ascending_and_descending() {
        let ascending = vec![-8.0, -7.0, -6.0, -5.0, -4.0];
        let descending: Vec<f64> = ascending.iter().rev().cloned().collect();
        let range = CoordinateRange::new(-7.0, -5.0);

        let up = range.select(&ascending).unwrap();
        assert_eq!(up, 1..4);
        let down = range.select(&descending).unwrap();
        assert_eq!(down, 1..4);

        let up_values: Vec<f64> = ascending[up].to_vec();
        let mut down_values: Vec<f64> = descending[down].to_vec();
        down_values.reverse();
        assert_eq!(up_values, down_values);
    }

    #[test]
    fn test_select_inclusive_bounds() {
        let axis = vec![0.0, 0.5, 1.0, 1.5];
        assert_eq!(CoordinateRange::new(0.5, 1.0).select(&axis), Some(1..3));
        assert_eq!(CoordinateRange::new(1.0, 1.0).select(&axis), Some(2..3));
    }

    #[test]
    fn test_region_feature() {
        let split = RegionSplit::around(106.85, -6.2, &Margins::default());
        let feature = split.sea.to_feature("sea");
        assert_eq!(feature.property("region").and_then(|r| r.as_str()), Some("sea"));

        let geometry = feature.geometry.unwrap();
        let geojson::Value::Polygon(rings) = geometry.value else {
            panic!("expected a polygon");
        };
        assert_eq!(rings[0].len(), 5);
        assert_eq!(rings[0][0], rings[0][4]);
        assert_eq!(rings[0][1][0], 106.85);
    }

    #[test]
    fn test_select_outside_axis() {
        let axis = vec![0.0, 0.5, 1.0];
        assert_eq!(CoordinateRange::new(10.0, 11.0).select(&axis), None);
        assert_eq!(CoordinateRange::new(0.1, 0.4).select(&axis), None);
    }
}
