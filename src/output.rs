//! Output types for the presentation layer.
//!
//! These structs are serialized to JSON and handed to the page that draws the
//! radar. Geometry is final here: the page only binds values to SVG elements.

use serde::Serialize;

use crate::layout::arcs::{moved_indicator_path, sector_name_path, segment_path, view_box, ViewBox};
use crate::layout::geometry::PointF;
use crate::model::{BlipStyle, ConfigError, MovementInput, NamedColor, RadarModel};

#[derive(Debug, Clone, Serialize)]
pub struct RingOutput {
    pub index: usize,
    pub name: String,
    pub color: String,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectorOutput {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Baseline path for the sector name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_path: Option<String>,
    pub segments: Vec<SegmentOutput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentOutput {
    pub id: String,
    pub ring: usize,
    pub color: String,
    pub path: String,
    /// Entry ids in this segment.
    pub entries: Vec<u32>,
}

/// A blip ready to draw
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutput {
    pub id: u32,
    pub id_text: String,
    pub name: String,
    pub link: String,
    pub sector: usize,
    pub ring: usize,
    pub state_id: i64,
    pub moved: i32,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub ring_opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moved_path: Option<String>,
}

/// Legend entry for a blip state, with its palette index.
#[derive(Debug, Clone, Serialize)]
pub struct StateOutput {
    pub index: usize,
    pub name: String,
    pub color: String,
}

/// Error information for the host page
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// "malformed", "configuration" or "numeric_degeneracy".
    pub kind: String,
    pub message: String,
}

impl From<&ConfigError> for ErrorInfo {
    fn from(e: &ConfigError) -> Self {
        ErrorInfo {
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

/// The combined output sent to the page
#[derive(Debug, Clone, Serialize, Default)]
pub struct RadarOutput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub diameter: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_box: Option<ViewBox>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blip_style: Option<BlipStyle>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<RingOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sectors: Vec<SectorOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<EntryOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry_states: Vec<StateOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entry_movement: Vec<MovementInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl RadarOutput {
    pub fn from_error(e: &ConfigError) -> Self {
        RadarOutput {
            error: Some(ErrorInfo::from(e)),
            ..Default::default()
        }
    }

    pub fn from_model(model: &RadarModel) -> Self {
        let outermost = model.rings.last().map(|r| r.outer_radius).unwrap_or(model.radius);

        let rings = model.rings.iter().map(|r| RingOutput {
            index: r.index.0,
            name: r.name.clone(),
            color: r.color.clone(),
            inner_radius: r.inner_radius,
            outer_radius: r.outer_radius,
        }).collect();

        let sectors = model.sectors.iter().map(|s| SectorOutput {
            index: s.index.0,
            id: s.id_text.clone(),
            name: s.name.clone(),
            start_angle: s.start_angle,
            end_angle: s.end_angle,
            name_path: model.show_sector_names.then(|| sector_name_path(s, outermost)),
            segments: s.segments.iter().map(|&sid| {
                let seg = model.segment(sid);
                SegmentOutput {
                    id: seg.id_text.clone(),
                    ring: seg.ring.0,
                    color: seg.color.clone(),
                    path: segment_path(seg),
                    entries: seg.entries.iter().map(|&i| model.entries[i].id.0).collect(),
                }
            }).collect(),
        }).collect();

        let entries = model.entries.iter().map(|e| EntryOutput {
            id: e.id.0,
            id_text: e.id_text.clone(),
            name: e.name.clone(),
            link: e.link.clone(),
            sector: e.sector.0,
            ring: e.ring.0,
            state_id: e.state_id,
            moved: e.moved,
            x: e.position.x,
            y: e.position.y,
            color: model.entry_color(e).to_string(),
            ring_opacity: model.entry_ring_opacity(e),
            moved_path: moved_indicator_path(model, e),
        }).collect();

        let entry_states = model.entry_states.iter().enumerate().map(|(index, s): (usize, &NamedColor)| {
            StateOutput { index, name: s.name.clone(), color: s.color.clone() }
        }).collect();

        RadarOutput {
            id: model.id.clone(),
            name: model.show_name.then(|| model.name.clone()),
            diameter: model.diameter,
            view_box: Some(view_box(model, None)),
            blip_style: Some(model.blip_style),
            rings,
            sectors,
            entries,
            entry_states,
            entry_movement: model.entry_movement.clone(),
            error: None,
        }
    }
}

/// Per-frame position update: `(id, x, y)` for every entry.
#[derive(Debug, Clone, Serialize)]
pub struct PositionOutput {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

pub fn positions(model: &RadarModel) -> Vec<PositionOutput> {
    model.entries.iter().map(|e| {
        let PointF { x, y } = e.position;
        PositionOutput { id: e.id.0, x, y }
    }).collect()
}
