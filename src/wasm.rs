//! WASM bindings for the radar-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.

use serde::Serialize;
use serde_json::to_string;
use wasm_bindgen::prelude::*;

use crate::layout::arcs::{view_box, LayoutMode};
use crate::layout::{CollisionConfig, CollisionSimulation, TickStatus};
use crate::model::{build_radar_from_json, RadarModel, SectorId};
use crate::output::{positions, RadarOutput};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

const SERIALIZE_ERROR: &str =
    "{\"error\": {\"kind\": \"internal\", \"message\": \"Serialization error\"}}";

fn to_json<T: Serialize>(value: &T) -> String {
    to_string(value).unwrap_or_else(|_| SERIALIZE_ERROR.to_string())
}

/// Build a radar, relax it within the default tick budget and return the
/// full output JSON. Errors come back as `{ "error": { kind, message } }`.
#[wasm_bindgen]
pub fn compile_radar(input: &str) -> String {
    let mut model = match build_radar_from_json(input) {
        Ok(model) => model,
        Err(e) => {
            console_error(&format!("Error building radar: {}", e));
            return to_json(&RadarOutput::from_error(&e));
        }
    };
    let cfg = CollisionConfig::default();
    let budget = cfg.max_ticks;
    CollisionSimulation::new(&model, cfg).run(&mut model, budget);
    to_json(&RadarOutput::from_model(&model))
}

/// A live radar whose layout the page advances tick by tick, e.g. from
/// `requestAnimationFrame`. Read positions between ticks only.
#[wasm_bindgen]
pub struct RadarHandle {
    model: RadarModel,
    simulation: CollisionSimulation,
}

#[wasm_bindgen]
impl RadarHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(input: &str) -> Result<RadarHandle, JsValue> {
        match build_radar_from_json(input) {
            Ok(model) => {
                let simulation = CollisionSimulation::new(&model, CollisionConfig::default());
                Ok(RadarHandle { model, simulation })
            }
            Err(e) => {
                console_error(&format!("Error building radar: {}", e));
                Err(JsValue::from_str(&to_json(&RadarOutput::from_error(&e))))
            }
        }
    }

    /// One relaxation tick. Returns `false` once the layout has settled.
    pub fn tick(&mut self) -> bool {
        self.simulation.tick(&mut self.model) == TickStatus::Running
    }

    /// Tick until settled or `budget_ms` of wall-clock time is spent.
    /// Returns `false` once the layout has settled.
    pub fn run_for(&mut self, budget_ms: f64) -> bool {
        let Some(performance) = web_sys::window().and_then(|w| w.performance()) else {
            return self.tick();
        };
        let start = performance.now();
        while !self.simulation.is_settled() && performance.now() - start < budget_ms {
            self.simulation.tick(&mut self.model);
        }
        !self.simulation.is_settled()
    }

    pub fn is_settled(&self) -> bool {
        self.simulation.is_settled()
    }

    /// `[{ id, x, y }]` for every entry.
    pub fn positions(&self) -> String {
        to_json(&positions(&self.model))
    }

    pub fn output(&self) -> String {
        to_json(&RadarOutput::from_model(&self.model))
    }

    /// `viewBox` attribute for one sector, or the whole radar for a negative
    /// or unknown index.
    pub fn view_box(&self, sector: i32) -> String {
        let focus = usize::try_from(sector)
            .ok()
            .filter(|&s| s < self.model.sectors.len())
            .map(SectorId);
        view_box(&self.model, focus).to_attr()
    }

    pub fn is_mobile(&self, container_width: f64) -> bool {
        LayoutMode::for_width(container_width, self.model.diameter) == LayoutMode::Mobile
    }
}
