//! Browser bindings
//!
//! A thin wasm-bindgen wrapper: JavaScript owns the canvas and keyboard,
//! feeds held controls per slot, advances the match with frame time, and
//! reads back a JSON snapshot to draw.

use wasm_bindgen::prelude::*;

use crate::consts::*;
use crate::sim::{Control, MatchState, TickInput, tick};
use crate::tuning::MatchConfig;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Brawl Sim (web) ready");
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One running match driven from JavaScript
#[wasm_bindgen]
pub struct WebMatch {
    state: MatchState,
    input: TickInput,
    accumulator: f32,
}

#[wasm_bindgen]
impl WebMatch {
    /// Create a match from a JSON `MatchConfig` (empty string for defaults)
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WebMatch, JsValue> {
        let config = if config_json.trim().is_empty() {
            MatchConfig::default()
        } else {
            MatchConfig::from_json(config_json).map_err(js_error)?
        };
        let state = MatchState::new(config).map_err(js_error)?;
        Ok(WebMatch {
            state,
            input: TickInput::default(),
            accumulator: 0.0,
        })
    }

    /// Hold or release a named control ("left", "jump", ...) for a slot
    pub fn set_control(&mut self, slot: usize, control: &str, active: bool) -> Result<(), JsValue> {
        let control = Control::from_name(control)
            .ok_or_else(|| js_error(format!("unknown control: {control}")))?;
        let controls = self
            .input
            .players
            .get_mut(slot)
            .ok_or_else(|| js_error(format!("no player slot {slot}")))?;
        controls.set(control, active);
        Ok(())
    }

    /// Advance by frame time in seconds using fixed substeps
    pub fn tick(&mut self, frame_dt: f32) -> Result<u32, JsValue> {
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            if let Err(err) = tick(&mut self.state, &self.input, SIM_DT) {
                log::error!("Tick aborted: {}", err);
                return Err(js_error(err));
            }
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        Ok(substeps)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.snapshot()).map_err(js_error)
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.drain_events()).map_err(js_error)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase == crate::sim::MatchPhase::GameOver
    }
}
