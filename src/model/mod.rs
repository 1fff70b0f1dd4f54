mod build;
mod color;
mod input;
mod types;

pub use build::{build_radar, build_radar_from_json, first_ring_blip_min_radius, ConfigError};
pub use color::{Rgb, SectorPalette};
pub use input::*;
pub use types::*;
