//! AdaFit WASM Module
//!
//! Runs the recommendation engine and nutrition math in the browser.
//! Structured results cross the boundary as JSON strings.

use adafit_shared::models::DietType;
use adafit_shared::nutrition::{effective_diet_type, meal_suggestion as lookup_suggestion};
use adafit_shared::{builder_workout_for, MacroRatios, WorkoutPlanRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn derive_plan_json(request_json: &str, seed: u64) -> Result<String, String> {
    let request: WorkoutPlanRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request: {}", e))?;
    let context = request.into_context().map_err(|e| e.to_string())?;
    let mut rng = StdRng::seed_from_u64(seed);
    to_json(&adafit_shared::derive_plan(&context, &mut rng))
}

/// Derive a recommendation bundle from a `WorkoutPlanRequest` JSON string.
///
/// The same seed always yields the same bundle.
#[wasm_bindgen]
pub fn derive_plan(request_json: &str, seed: u64) -> Result<String, JsError> {
    derive_plan_json(request_json, seed).map_err(|e| JsError::new(&e))
}

/// Gram targets as `{"proteinG","carbsG","fatsG"}` JSON
#[wasm_bindgen]
pub fn derive_macros(calorie_target: u32, p: u32, c: u32, f: u32) -> Result<String, JsError> {
    to_json(&adafit_shared::derive_macros(
        calorie_target,
        MacroRatios::new(p, c, f),
    ))
    .map_err(|e| JsError::new(&e))
}

/// Rescaled split as `{"p","c","f"}` JSON
#[wasm_bindgen]
pub fn normalize_ratios(p: u32, c: u32, f: u32) -> Result<String, JsError> {
    to_json(&adafit_shared::normalize(MacroRatios::new(p, c, f))).map_err(|e| JsError::new(&e))
}

/// Meal suggestion for a diet, split and slot name.
///
/// Unknown diet types fall back to balanced.
#[wasm_bindgen]
pub fn meal_suggestion(diet_type: &str, p: u32, c: u32, f: u32, slot: &str) -> String {
    let diet: DietType = diet_type.parse().unwrap_or_default();
    let effective = effective_diet_type(diet, MacroRatios::new(p, c, f));
    lookup_suggestion(effective, slot).to_string()
}

/// `light`, `moderate` or `intense`
#[wasm_bindgen]
pub fn classify_intensity(stress_level: u8, energy_level: u8, sleep_hours: f64) -> String {
    adafit_shared::classify_intensity(stress_level, energy_level, sleep_hours)
        .as_str()
        .to_string()
}

fn builder_workout_json(location: &str, equipment: &str) -> Result<String, String> {
    to_json(builder_workout_for(location.parse().ok(), equipment.parse().ok()))
}

/// Workout builder session for a location (`gym`, `home`) and equipment
/// choice. Empty or unknown values count as skipped.
#[wasm_bindgen]
pub fn builder_workout(location: &str, equipment: &str) -> Result<String, JsError> {
    builder_workout_json(location, equipment).map_err(|e| JsError::new(&e))
}
