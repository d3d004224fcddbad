pub mod contour;
pub mod date;
pub mod linspace;
pub mod math;
pub mod serde;
pub mod vector;
