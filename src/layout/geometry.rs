// Polar geometry helpers.
//
// All angles are in radians, measured from the positive x axis towards the
// positive y axis (clockwise on screen, since SVG's y axis points down).
// Points are relative to the radar center.

use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const ORIGIN: PointF = PointF { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_polar(self) -> Polar {
        to_polar(self)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Polar {
    /// Always in [0, 2π).
    pub angle: f64,
    pub radius: f64,
}

impl Polar {
    pub fn to_cartesian(self) -> PointF {
        to_cartesian(self.angle, self.radius)
    }
}

pub fn to_cartesian(angle: f64, radius: f64) -> PointF {
    PointF {
        x: angle.cos() * radius,
        y: angle.sin() * radius,
    }
}

pub fn to_polar(point: PointF) -> Polar {
    let raw = point.y.atan2(point.x);
    let mut angle = if raw < 0.0 { raw + TAU } else { raw };
    // -ε + 2π can round up to exactly 2π
    if angle >= TAU {
        angle -= TAU;
    }
    Polar {
        angle,
        radius: point.x.hypot(point.y),
    }
}

/// Two-sided clamp. The bounds may be given in either order.
pub fn clamp_interval(value: f64, min: f64, max: f64) -> f64 {
    let low = min.min(max);
    let high = min.max(max);
    value.max(low).min(high)
}

/// Extra angle a blip needs at `radius` so its footprint (of half-size
/// `half_size_with_padding`) stays clear of a sector border.
///
/// Tends to π/2 as the radius goes to zero.
pub fn angular_offset_for_radius(radius: f64, half_size_with_padding: f64) -> f64 {
    if half_size_with_padding <= 0.0 {
        return 0.0;
    }
    if radius <= 0.0 {
        return FRAC_PI_2;
    }
    (half_size_with_padding / radius).atan()
}

/// Clamp an angle into `[min, max]`, treating angles as periodic.
///
/// The angle is first unwrapped by ±2π to whichever representation is
/// closest to the interval, so a point just below the positive x axis
/// (angle ≈ 2π) lands on the start edge of a sector beginning at 0 instead
/// of jumping across to its far edge.
pub fn clamp_angle(angle: f64, min: f64, max: f64) -> f64 {
    let mut best = clamp_interval(angle, min, max);
    let mut best_dist = (best - angle).abs();
    for candidate in [angle - TAU, angle + TAU] {
        let clamped = clamp_interval(candidate, min, max);
        let dist = (clamped - candidate).abs();
        if dist < best_dist {
            best = clamped;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_to_polar_quadrants() {
        let p = to_polar(PointF::new(1.0, 0.0));
        assert!((p.angle - 0.0).abs() < EPS);
        assert!((p.radius - 1.0).abs() < EPS);

        let p = to_polar(PointF::new(0.0, 2.0));
        assert!((p.angle - FRAC_PI_2).abs() < EPS);
        assert!((p.radius - 2.0).abs() < EPS);

        let p = to_polar(PointF::new(-1.0, 0.0));
        assert!((p.angle - PI).abs() < EPS);

        let p = to_polar(PointF::new(0.0, -3.0));
        assert!((p.angle - 3.0 * FRAC_PI_2).abs() < EPS);
        assert!((p.radius - 3.0).abs() < EPS);
    }

    #[test]
    fn test_to_polar_never_negative() {
        for &(x, y) in &[(1.0, -1e-300), (-1.0, -0.0), (5.0, -1e-17), (0.0, 0.0)] {
            let p = to_polar(PointF::new(x, y));
            assert!(p.angle >= 0.0 && p.angle < TAU, "angle {} for ({}, {})", p.angle, x, y);
        }
    }

    #[test]
    fn test_polar_roundtrip() {
        let p = PointF::new(-3.5, 7.25);
        let back = p.to_polar().to_cartesian();
        assert!((back.x - p.x).abs() < EPS);
        assert!((back.y - p.y).abs() < EPS);
    }

    #[test]
    fn test_clamp_interval_order_agnostic() {
        assert_eq!(clamp_interval(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_interval(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_interval(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_interval(11.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp_interval(-1.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_angular_offset() {
        assert!((angular_offset_for_radius(10.0, 10.0) - PI / 4.0).abs() < EPS);
        assert_eq!(angular_offset_for_radius(0.0, 5.0), FRAC_PI_2);
        assert_eq!(angular_offset_for_radius(10.0, 0.0), 0.0);

        // Shrinks monotonically as the radius grows.
        let near = angular_offset_for_radius(1e-9, 5.0);
        let mid = angular_offset_for_radius(50.0, 5.0);
        let far = angular_offset_for_radius(5000.0, 5.0);
        assert!(near <= FRAC_PI_2 && near > mid && mid > far);
    }

    #[test]
    fn test_clamp_angle_wraps_to_nearest_edge() {
        // Sector starting at 0: an angle just below 2π belongs at the start.
        let a = clamp_angle(TAU - 0.01, 0.1, 1.0);
        assert!((a - 0.1).abs() < EPS);

        // Last sector ending at 2π: a small angle belongs at the end.
        let a = clamp_angle(0.01, 3.0 * FRAC_PI_2 + 0.1, TAU - 0.1);
        assert!((a - (TAU - 0.1)).abs() < EPS);

        // Inside values are untouched.
        assert_eq!(clamp_angle(0.5, 0.1, 1.0), 0.5);
    }
}
