// SVG path data and view framing.
//
// Pure geometry for the presentation layer: path `d` strings for segment
// outlines, sector name baselines and blip movement markers, plus the view
// box used when a single sector is shown. No DOM access happens here.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::Serialize;

use crate::model::{Entry, RadarModel, Sector, SectorId, Segment};
use super::geometry::{to_cartesian, PointF};

/// Sector names sit this far outside the outermost ring.
pub const SECTOR_NAME_OFFSET: f64 = 6.0;

fn num(v: f64) -> String {
    // Avoid "-0.000" for values that are zero up to rounding.
    let s = format!("{:.3}", v);
    if s == "-0.000" { "0.000".to_string() } else { s }
}

fn point(p: PointF) -> String {
    format!("{} {}", num(p.x), num(p.y))
}

/// Arc commands from `from` to `to` (radians, `to > from`) at `radius`.
/// Spans over π are split in two so the large-arc flag is never needed and
/// a full circle still draws.
fn arc_commands(radius: f64, from: f64, to: f64, sweep: u8) -> String {
    let r = num(radius);
    let (a, b) = if sweep == 1 { (from, to) } else { (to, from) };
    if (to - from).abs() > PI {
        let mid = (a + b) / 2.0;
        format!(
            "A {r} {r} 0 0 {sweep} {} A {r} {r} 0 0 {sweep} {}",
            point(to_cartesian(mid, radius)),
            point(to_cartesian(b, radius)),
        )
    } else {
        format!("A {r} {r} 0 0 {sweep} {}", point(to_cartesian(b, radius)))
    }
}

/// Closed outline of a segment: outer arc, border, inner arc, border.
pub fn segment_path(segment: &Segment) -> String {
    let start_outer = to_cartesian(segment.start_angle, segment.outer_radius);
    let end_inner = to_cartesian(segment.end_angle, segment.inner_radius);
    format!(
        "M {} {} L {} {} L {} Z",
        point(start_outer),
        arc_commands(segment.outer_radius, segment.start_angle, segment.end_angle, 1),
        point(end_inner),
        arc_commands(segment.inner_radius, segment.start_angle, segment.end_angle, 0),
        point(start_outer),
    )
}

/// Baseline for a sector's name, just outside the outermost ring.
pub fn sector_name_path(sector: &Sector, outer_radius: f64) -> String {
    let radius = outer_radius + SECTOR_NAME_OFFSET;
    format!(
        "M {} {}",
        point(to_cartesian(sector.start_angle, radius)),
        arc_commands(radius, sector.start_angle, sector.end_angle, 1),
    )
}

/// Half-ring marker drawn on a moved blip, facing the direction of movement.
/// `None` for unmoved blips.
pub fn moved_indicator_path(model: &RadarModel, entry: &Entry) -> Option<String> {
    if entry.moved == 0 {
        return None;
    }
    let sector = &model.sectors[entry.sector.0];
    let turn = if entry.moved > 0 { PI } else { 0.0 };
    let start = sector.start_angle + turn;
    let end = sector.end_angle + turn;
    let radius = model.blip_style.outer_circle_radius;
    Some(format!(
        "M {} {}",
        point(to_cartesian(start, radius)),
        arc_commands(radius, start, end, 1),
    ))
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BoundingBox {
    fn around(points: &[PointF]) -> BoundingBox {
        let mut min = PointF::new(f64::INFINITY, f64::INFINITY);
        let mut max = PointF::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        BoundingBox { x: min.x, y: min.y, w: max.x - min.x, h: max.y - min.y }
    }
}

/// Bounds of a wedge of radius `radius` between two angles, apex included.
pub fn wedge_bounds(start_angle: f64, end_angle: f64, radius: f64) -> BoundingBox {
    let mut points = vec![
        PointF::ORIGIN,
        to_cartesian(start_angle, radius),
        to_cartesian(end_angle, radius),
    ];
    // Axis crossings inside the span are the arc's extreme points.
    let mut axis = (start_angle / FRAC_PI_2).ceil() * FRAC_PI_2;
    while axis < end_angle {
        points.push(to_cartesian(axis, radius));
        axis += FRAC_PI_2;
    }
    BoundingBox::around(&points)
}

pub fn sector_bounds(model: &RadarModel, sector: SectorId) -> BoundingBox {
    let s = &model.sectors[sector.0];
    wedge_bounds(s.start_angle, s.end_angle, model.radius)
}

/// `viewBox` framing for the whole radar or one sector. Coordinates are in
/// SVG space, where the radar center sits at (radius, radius).
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl ViewBox {
    pub fn to_attr(&self) -> String {
        format!("{} {} {} {}", num(self.x), num(self.y), num(self.size), num(self.size))
    }
}

pub fn view_box(model: &RadarModel, focus: Option<SectorId>) -> ViewBox {
    let bounds = match focus {
        Some(sector) => sector_bounds(model, sector),
        None => wedge_bounds(0.0, TAU, model.radius),
    };
    ViewBox {
        x: model.radius + bounds.x,
        y: model.radius + bounds.y,
        size: bounds.w.max(bounds.h),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum LayoutMode {
    Desktop,
    /// The container is narrower than the radar: one sector at a time.
    Mobile,
}

impl LayoutMode {
    pub fn for_width(container_width: f64, diameter: f64) -> LayoutMode {
        if container_width < diameter { LayoutMode::Mobile } else { LayoutMode::Desktop }
    }
}
