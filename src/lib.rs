//! Land versus sea temperature comparison around coastal locations, read from
//! hourly gridded reanalysis data.
//!
//! A [`Session`] owns a loaded [`GriddedDataset`] and the current selection; each
//! render calls [`compare`], a pure function producing the map payload and the
//! sea/land series handed to renderers.

pub mod aggregate;
pub mod comparator;
pub mod config;
pub mod coordinates;
pub mod dataset;
pub mod error;
pub mod location;
pub mod map;
pub mod reader;
pub mod region;
pub mod series;
pub mod session;
pub mod tools;
pub mod units;

pub use comparator::{compare, ComparatorOptions, Comparison};
pub use config::AppConfig;
pub use coordinates::CoordinateNames;
pub use dataset::{GriddedDataset, SurfaceFields, Variable};
pub use error::{Result, SeaBreezeError};
pub use location::Location;
pub use map::{MapSlice, WindVectors};
pub use reader::open_dataset;
pub use region::{CoordinateRange, Margins, Region, RegionSplit};
pub use series::ComparisonSeries;
pub use session::Session;
