use serde::Serialize;

use crate::layout::geometry::PointF;
use super::color::SectorPalette;
use super::input::{MovementInput, NamedColor};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RingId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SectorId(pub usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SegmentId(pub usize);

/// Display number of a blip. Starts at 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryId(pub u32);

#[derive(Debug, Clone, Serialize)]
pub struct Ring {
    pub index: RingId,
    pub name: String,
    pub color: String,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub blip_min_radius: f64,
    pub blip_max_radius: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sector {
    pub index: SectorId,
    pub name: String,
    pub color: String,
    pub id_text: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub palette: SectorPalette,
    /// One per ring, innermost first.
    pub segments: Vec<SegmentId>,
}

/// One sector × ring cell. Carries every bound the placement functions need,
/// so `random_init` and `clip` only ever look at the segment itself.
#[derive(Debug, Clone, Serialize)]
pub struct Segment {
    pub sid: SegmentId,
    pub sector: SectorId,
    pub ring: RingId,
    pub id_text: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub blip_min_radius: f64,
    pub blip_max_radius: f64,
    /// Half a blip's size plus padding; drives the angular inset.
    pub blip_half_size: f64,
    /// Resolved `rgb(...)` fill for this cell.
    pub color: String,
    /// Indices into `RadarModel::entries`.
    pub entries: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    pub id: EntryId,
    pub id_text: String,
    pub name: String,
    pub link: String,
    pub sector: SectorId,
    pub ring: RingId,
    pub segment: SegmentId,
    pub state_id: i64,
    pub moved: i32,
    /// Relative to the radar center. The only field the layout mutates.
    pub position: PointF,
}

/// Derived blip drawing sizes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BlipStyle {
    pub size: f64,
    pub font_size: f64,
    pub radius: f64,
    pub stroke_width: f64,
    pub outer_circle_radius: f64,
    pub inner_circle_radius: f64,
}

impl BlipStyle {
    pub fn from_size(size: f64) -> Self {
        let radius = size * 0.5;
        let stroke_width = radius * 0.2;
        let outer_circle_radius = radius - stroke_width * 0.5;
        Self {
            size,
            font_size: size * 0.33,
            radius,
            stroke_width,
            outer_circle_radius,
            inner_circle_radius: outer_circle_radius - stroke_width,
        }
    }
}

/// Opacity of a moved blip's outer ring.
pub const MOVED_RING_OPACITY: f64 = 0.25;

/// The fully resolved radar. Built once by `build_radar`; afterwards only
/// entry positions change.
#[derive(Debug, Clone, Serialize)]
pub struct RadarModel {
    pub id: String,
    pub name: String,
    pub show_name: bool,
    pub show_sector_names: bool,
    pub diameter: f64,
    pub radius: f64,
    pub ring_thickness: f64,
    pub sector_span: f64,
    pub blip_half_size: f64,
    /// Footprint radius used by collision avoidance.
    pub collision_radius: f64,
    pub default_blip_color: String,
    pub blip_style: BlipStyle,
    pub seed: u64,
    pub rings: Vec<Ring>,
    pub sectors: Vec<Sector>,
    /// Sector-major: `sector * rings.len() + ring`.
    pub segments: Vec<Segment>,
    /// In id order.
    pub entries: Vec<Entry>,
    pub entry_states: Vec<NamedColor>,
    pub entry_movement: Vec<MovementInput>,
}

impl RadarModel {
    pub fn segment_id(&self, sector: SectorId, ring: RingId) -> SegmentId {
        SegmentId(sector.0 * self.rings.len() + ring.0)
    }

    pub fn segment(&self, sid: SegmentId) -> &Segment {
        &self.segments[sid.0]
    }

    pub fn segment_of(&self, entry: &Entry) -> &Segment {
        self.segment(entry.segment)
    }

    pub fn entry_by_id(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// State color, or the default blip color for an unknown state.
    pub fn entry_color(&self, entry: &Entry) -> &str {
        usize::try_from(entry.state_id)
            .ok()
            .and_then(|i| self.entry_states.get(i))
            .map(|s| s.color.as_str())
            .unwrap_or(self.default_blip_color.as_str())
    }

    pub fn entry_ring_opacity(&self, entry: &Entry) -> f64 {
        if entry.moved != 0 { MOVED_RING_OPACITY } else { 1.0 }
    }

    pub fn entries_in_state(&self, state_id: i64) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.state_id == state_id)
    }

    pub fn positions(&self) -> Vec<PointF> {
        self.entries.iter().map(|e| e.position).collect()
    }
}
