// Collision-avoidance relaxation for blips.
//
// A small velocity-based simulation over every blip of the radar at once:
// - overlapping footprints push each other apart (weak, so motion is smooth)
// - velocities decay every tick and positions integrate from them
// - every blip is clipped back into its own segment after every tick
// - a cooling factor (alpha) bounds the run; the run also ends early once no
//   blip moves noticeably
//
// The host drives it one `tick` at a time, so a UI can render between ticks.
// After any completed tick every blip is inside its segment.

use serde::Serialize;

use crate::model::RadarModel;
use super::bounds::clip;
use super::geometry::PointF;
use super::random::RandomSource;
use super::spatial_grid::SpatialGrid;

#[derive(Debug, Clone)]
pub struct CollisionConfig {
    /// Fraction of the overlap resolved per tick.
    pub strength: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// The run stops when alpha falls below this.
    pub alpha_min: f64,
    pub alpha_decay: f64,
    pub alpha_target: f64,
    /// The run stops when no blip moved further than this in a tick.
    pub movement_epsilon: f64,
    /// Tick budget for hosts that relax in one go.
    pub max_ticks: usize,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        let alpha_min: f64 = 0.001;
        Self {
            strength: 0.15,
            velocity_decay: 0.4,
            alpha_min,
            // Reaches alpha_min from 1.0 in 300 ticks.
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            alpha_target: 0.0,
            movement_epsilon: 1e-3,
            max_ticks: 300,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum TickStatus {
    Running,
    Settled,
}

#[derive(Debug, Clone)]
pub struct CollisionSimulation {
    cfg: CollisionConfig,
    velocities: Vec<PointF>,
    alpha: f64,
    ticks: usize,
    settled: bool,
    /// Breaks ties between blips sitting exactly on top of each other.
    rng: RandomSource,
    grid: SpatialGrid,
}

impl CollisionSimulation {
    pub fn new(model: &RadarModel, cfg: CollisionConfig) -> Self {
        Self {
            cfg,
            velocities: vec![PointF::ORIGIN; model.entries.len()],
            alpha: 1.0,
            ticks: 0,
            settled: model.entries.is_empty(),
            rng: RandomSource::new(model.seed.wrapping_add(1)),
            grid: SpatialGrid::new(model.collision_radius * 2.0),
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.cfg
    }

    /// Advance one step: repel, integrate, clip.
    pub fn tick(&mut self, model: &mut RadarModel) -> TickStatus {
        if self.settled {
            return TickStatus::Settled;
        }

        self.alpha += (self.cfg.alpha_target - self.alpha) * self.cfg.alpha_decay;
        self.apply_collisions(model);

        let keep = 1.0 - self.cfg.velocity_decay;
        let segments = &model.segments;
        let mut max_moved: f64 = 0.0;
        for (entry, v) in model.entries.iter_mut().zip(self.velocities.iter_mut()) {
            v.x *= keep;
            v.y *= keep;
            let before = entry.position;
            let moved = PointF::new(before.x + v.x, before.y + v.y);
            entry.position = clip(&segments[entry.segment.0], moved);
            max_moved = max_moved.max((entry.position.x - before.x).hypot(entry.position.y - before.y));
        }

        self.ticks += 1;
        tracing::trace!(tick = self.ticks, alpha = self.alpha, max_moved, "collision tick");

        if self.alpha < self.cfg.alpha_min || max_moved < self.cfg.movement_epsilon {
            self.settled = true;
            tracing::debug!(ticks = self.ticks, alpha = self.alpha, "collision layout settled");
            return TickStatus::Settled;
        }
        TickStatus::Running
    }

    /// Tick until settled or `max_ticks` ticks have run. Returns the ticks run.
    pub fn run(&mut self, model: &mut RadarModel, max_ticks: usize) -> usize {
        let start = self.ticks;
        while self.ticks - start < max_ticks {
            if self.tick(model) == TickStatus::Settled {
                break;
            }
        }
        self.ticks - start
    }

    /// Pairwise repulsion between overlapping footprints, written into the
    /// velocities. Positions are read as `position + velocity`.
    fn apply_collisions(&mut self, model: &RadarModel) {
        let radius = model.collision_radius;
        if radius <= 0.0 {
            return;
        }
        let diameter = radius * 2.0;
        let predicted = |i: usize, velocities: &[PointF]| {
            let p = model.entries[i].position;
            PointF::new(p.x + velocities[i].x, p.y + velocities[i].y)
        };

        self.grid.clear();
        for i in 0..model.entries.len() {
            self.grid.insert(i, predicted(i, &self.velocities));
        }

        for i in 0..model.entries.len() {
            let pi = predicted(i, &self.velocities);
            for j in self.grid.query(pi) {
                if j <= i {
                    continue;
                }
                let pj = predicted(j, &self.velocities);
                let mut dx = pi.x - pj.x;
                let mut dy = pi.y - pj.y;
                let mut l = dx * dx + dy * dy;
                if l >= diameter * diameter {
                    continue;
                }
                if dx == 0.0 {
                    dx = self.jiggle();
                    l += dx * dx;
                }
                if dy == 0.0 {
                    dy = self.jiggle();
                    l += dy * dy;
                }
                let d = l.sqrt();
                let k = (diameter - d) / d * self.cfg.strength;
                dx *= k;
                dy *= k;
                // Equal footprints: the push is shared evenly.
                self.velocities[i].x += dx * 0.5;
                self.velocities[i].y += dy * 0.5;
                self.velocities[j].x -= dx * 0.5;
                self.velocities[j].y -= dy * 0.5;
            }
        }
    }

    fn jiggle(&mut self) -> f64 {
        (self.rng.next_uniform() - 0.5) * 1e-6
    }
}

/// Sum of pairwise footprint overlaps; zero when no blips touch.
pub fn total_overlap(model: &RadarModel) -> f64 {
    let diameter = model.collision_radius * 2.0;
    let mut total = 0.0;
    for (i, a) in model.entries.iter().enumerate() {
        for b in &model.entries[i + 1..] {
            let d = (a.position.x - b.position.x).hypot(a.position.y - b.position.y);
            if d < diameter {
                total += diameter - d;
            }
        }
    }
    total
}
