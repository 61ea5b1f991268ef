//! Nutrition service - macro math and the daily menu over the stored profile

use crate::error::ApiError;
use crate::state::AppState;
use adafit_shared::validation::validate_calorie_target;
use adafit_shared::{derive_macros, MacroGrams, MacroRatios, NutritionPlan, ProfileSection};
use serde_json::json;
use tracing::info;

/// Nutrition service
pub struct NutritionService;

impl NutritionService {
    /// Plan for the stored preferences, optionally with an explicit split.
    pub async fn plan(state: &AppState, ratios: Option<MacroRatios>) -> NutritionPlan {
        let profiles = state.profiles.lock().await;
        NutritionPlan::for_preferences(&profiles.profile().nutrition_preferences, ratios)
    }

    /// Gram targets for an arbitrary calorie budget.
    pub fn macros(calorie_target: u32, ratios: MacroRatios) -> Result<MacroGrams, ApiError> {
        validate_calorie_target(calorie_target)
            .map_err(|msg| ApiError::validation("calorieTarget", msg))?;
        Ok(derive_macros(calorie_target, ratios))
    }

    /// Store a new daily calorie target and return the refreshed plan.
    pub async fn set_calorie_target(
        state: &AppState,
        calorie_target: u32,
    ) -> Result<NutritionPlan, ApiError> {
        validate_calorie_target(calorie_target)
            .map_err(|msg| ApiError::validation("calorieTarget", msg))?;

        let mut profiles = state.profiles.lock().await;
        let profile = profiles.update_section(
            ProfileSection::NutritionPreferences,
            json!({ "calorieTarget": calorie_target }),
        )?;
        info!(calorie_target, "Updated calorie target");
        Ok(NutritionPlan::for_preferences(
            &profile.nutrition_preferences,
            None,
        ))
    }
}
