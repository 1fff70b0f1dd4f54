use serde::{Deserialize, Serialize};

use crate::layout::random::DEFAULT_SEED;

/// The document the host page hands over: `{ config, structure, entries }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RadarInput {
    pub config: RadarConfig,
    pub structure: StructureInput,
    pub entries: Vec<EntryInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RadarConfig {
    pub radar: RadarSettings,
    pub blip: BlipSettings,
    pub sector: SectorSettings,
    pub segment: SegmentSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RadarSettings {
    pub id: String,
    pub name: String,
    pub show_name: bool,
    /// Diameter of the rendered radar in SVG units.
    pub render_resolution: f64,
    pub default_color: String,
    /// Seed for blip placement.
    pub seed: u64,
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            id: "radar".to_string(),
            name: String::new(),
            show_name: true,
            render_resolution: 800.0,
            default_color: "#7d7d7d".to_string(),
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlipSettings {
    /// Rendered diameter of a blip.
    pub size: f64,
    /// Extra space kept between colliding blips.
    pub margin: f64,
    /// Extra space kept between a blip and its segment border.
    pub padding: f64,
    pub default_color: String,
}

impl Default for BlipSettings {
    fn default() -> Self {
        Self {
            size: 16.0,
            margin: 2.0,
            padding: 2.0,
            default_color: "#4a4a4a".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectorSettings {
    pub use_color: bool,
    pub show_name: bool,
}

impl Default for SectorSettings {
    fn default() -> Self {
        Self {
            use_color: true,
            show_name: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmentSettings {
    pub color_gradient: bool,
    /// Lightness multiplier for the outermost ring of a gradient.
    pub color_gradient_limit: f64,
}

impl Default for SegmentSettings {
    fn default() -> Self {
        Self {
            color_gradient: false,
            color_gradient_limit: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructureInput {
    pub rings: Vec<NamedColor>,
    pub sectors: Vec<NamedColor>,
    pub entry_states: Vec<NamedColor>,
    pub entry_movement: Vec<MovementInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NamedColor {
    pub name: String,
    pub color: String,
}

/// Legend record only; geometry ignores it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementInput {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EntryInput {
    pub name: String,
    pub link: String,
    #[serde(rename = "sectorID")]
    pub sector_id: i64,
    #[serde(rename = "ringID")]
    pub ring_id: i64,
    #[serde(rename = "stateID")]
    pub state_id: i64,
    /// > 0 moved outwards, < 0 moved inwards, 0 unchanged.
    pub moved: i32,
}
