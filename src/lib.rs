// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Architecture Duel Arena

pub mod types;
pub mod threshold;
pub mod traffic;
pub mod capacity;
pub mod tick;
pub mod autoscale;
pub mod metrics;
pub mod postmortem;
pub mod scoring;
pub mod simulation;

// Match lifecycle and job processing
pub mod validation;
pub mod lifecycle;
pub mod store;
pub mod job;

pub use types::*;
pub use traffic::build_timeline;
pub use simulation::{run_match_simulation, MatchResult, PlayerResult, Winner};
pub use lifecycle::{Match, MatchId, MatchMode, MatchState, Player};
pub use job::{JobError, JobOutcome, JobProcessor, SkipReason};
pub use validation::ValidationError;

use serde::Serialize;
use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // plain objects and nulls, matching the JSON wire form
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn invalid(err: ValidationError) -> JsValue {
    JsError::new(&err.to_string()).into()
}

/// Simulate a match between two architectures. Rejects invalid designs.
#[wasm_bindgen(js_name = runMatch)]
pub fn run_match(a: JsValue, b: JsValue, profile: JsValue) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let a: Architecture = serde_wasm_bindgen::from_value(a)?;
    let b: Architecture = serde_wasm_bindgen::from_value(b)?;
    let profile: TrafficProfile = serde_wasm_bindgen::from_value(profile)?;

    validation::validate_architecture(&a).map_err(invalid)?;
    validation::validate_architecture(&b).map_err(invalid)?;
    validation::validate_profile(&profile).map_err(invalid)?;

    to_js(&run_match_simulation(&a, &b, &profile))
}

#[wasm_bindgen(js_name = buildTimeline)]
pub fn build_timeline_js(profile: JsValue) -> Result<Vec<u32>, JsValue> {
    install_panic_hook();

    let profile: TrafficProfile = serde_wasm_bindgen::from_value(profile)?;
    validation::validate_profile(&profile).map_err(invalid)?;
    Ok(build_timeline(&profile))
}
