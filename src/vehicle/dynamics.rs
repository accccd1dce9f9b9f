use crate::math::{Point2d, Vector2d};
use std::f64::consts::TAU;

/// Maps a longitudinal position along the track to world space coordinates,
/// treating the track as a circle centred on the origin with the given
/// circumference. Returns the position and a unit tangent in the direction
/// of travel.
pub fn calc_ring_coords(pos: f64, track_length: f64) -> (Point2d, Vector2d) {
    let radius = track_length / TAU;
    let theta = TAU * pos / track_length;
    let (sin, cos) = theta.sin_cos();
    let world_pos = Point2d::new(radius * cos, radius * sin);
    let world_dir = Vector2d::new(-sin, cos);
    (world_pos, world_dir)
}
