use super::Point2d;
use cgmath::{Angle, Deg, Rad};

/// Computes the direction from `from` towards `to` in degrees,
/// measured from the positive x-axis towards the positive y-axis.
///
/// The result lies in [-180, 180].
pub fn heading_to(from: Point2d, to: Point2d) -> f64 {
    let v = to - from;
    Deg::from(Rad::atan2(v.y, v.x)).0
}

/// Reduces a heading in degrees to whole degrees in (-360, 360).
///
/// The fraction is truncated towards zero before taking the remainder,
/// and the remainder keeps the sign of the heading.
pub fn whole_degrees(angle: f64) -> f64 {
    (angle.trunc() as i64 % 360) as f64
}

/// Wraps an angle difference in degrees into the range (-180, 180],
/// so that it describes the shorter way around the circle.
///
/// Works for any finite magnitude, not just a single wrap.
pub fn normalize_angle(diff: f64) -> f64 {
    let wrapped = (diff + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}
