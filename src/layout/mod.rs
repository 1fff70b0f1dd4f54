// Placement and relaxation of blips.
//
// Submodules:
// - random: seeded random source
// - geometry: polar/cartesian conversion and clamping
// - bounds: per-segment random start points and clipping
// - spatial_grid: neighbour lookup for collision checks
// - collision: the tick-driven collision-avoidance simulation
// - arcs: SVG path data and view framing

pub mod arcs;
pub mod bounds;
pub mod collision;
pub mod geometry;
pub mod random;
mod spatial_grid;

pub use bounds::{clip, random_init};
pub use collision::{CollisionConfig, CollisionSimulation, TickStatus};
pub use geometry::{PointF, Polar};
pub use random::RandomSource;
