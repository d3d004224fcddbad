use std::f64::consts::PI;

/// Calculates the scalar magnitude and the heading in degrees the wind is blowing
/// from, given its eastward and northward components
pub fn scalar_from_uv(u: f64, v: f64) -> (f64, i32) {
    let angle = (270.0 - (v.atan2(u) * (180.0 / PI))) as i32 % 360;
    let speed = (v.abs().powi(2) + u.abs().powi(2)).sqrt();
    (speed, angle)
}
