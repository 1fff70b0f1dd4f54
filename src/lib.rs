pub mod layout;
pub mod model;
pub mod output;
mod wasm;

pub use layout::{clip, random_init, CollisionConfig, CollisionSimulation, PointF, RandomSource, TickStatus};
pub use model::{build_radar, build_radar_from_json, ConfigError, RadarInput, RadarModel};
pub use output::RadarOutput;
