// Segment boundary functions.
//
// `random_init` seeds a blip somewhere inside its segment, `clip` pulls an
// arbitrary point back inside. Both take the segment explicitly.
//
// Clipping order is angle first, then radius:
// - the angle is clamped into [start + offset, end - offset], keeping the
//   point's distance from the center, so a blip pushed across a sector border
//   slides along its ring;
// - the radius is then clamped into [blip_min_radius, blip_max_radius].
// The angular offset is evaluated at the radius the point ends up with, so
// the inset always matches the final footprint.

use crate::model::Segment;
use super::geometry::{
    angular_offset_for_radius, clamp_angle, clamp_interval, to_cartesian, to_polar, PointF,
};
use super::random::RandomSource;

/// Starting position: uniform angle, triangular radius.
pub fn random_init(segment: &Segment, rng: &mut RandomSource) -> PointF {
    let angle = rng.uniform_between(segment.start_angle, segment.end_angle);
    let radius = rng.triangular_between(segment.blip_min_radius, segment.blip_max_radius);
    to_cartesian(angle, radius)
}

/// Angular interval legal at `radius`.
pub fn angle_bounds(segment: &Segment, radius: f64) -> (f64, f64) {
    let offset = angular_offset_for_radius(radius, segment.blip_half_size);
    (segment.start_angle + offset, segment.end_angle - offset)
}

/// Project `point` into the segment. Points already inside come back unchanged.
pub fn clip(segment: &Segment, point: PointF) -> PointF {
    let polar = to_polar(point);
    let radius = clamp_interval(polar.radius, segment.blip_min_radius, segment.blip_max_radius);
    let (min_angle, max_angle) = angle_bounds(segment, radius);
    let angle = clamp_angle(polar.angle, min_angle, max_angle);

    if angle == polar.angle && radius == polar.radius {
        return point;
    }
    to_cartesian(angle, radius)
}

/// True if `point` satisfies the segment's bounds within `tolerance`.
pub fn contains(segment: &Segment, point: PointF, tolerance: f64) -> bool {
    let polar = to_polar(point);
    if polar.radius < segment.blip_min_radius - tolerance
        || polar.radius > segment.blip_max_radius + tolerance
    {
        return false;
    }
    let (min_angle, max_angle) = angle_bounds(segment, polar.radius);
    let within = |a: f64| a >= min_angle - tolerance && a <= max_angle + tolerance;
    within(polar.angle)
        || within(polar.angle + std::f64::consts::TAU)
        || within(polar.angle - std::f64::consts::TAU)
}
