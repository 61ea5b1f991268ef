//! API request and response types

use crate::chat::ChatIntent;
use crate::context::WorkoutContext;
use crate::errors::InvalidContextError;
use crate::models::UserProfile;
use crate::nutrition::{MacroRatios, NutritionPlan};
use crate::recommendation::RecommendationBundle;
use crate::templates::{EquipmentChoice, TrainingLocation};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Workout Plan
// ============================================================================

/// Workout plan request, as the daily check-in form submits it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub stress_level: u8,
    pub energy_level: u8,
    pub sleep_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutPlanRequest {
    /// Validate and convert into the engine's input.
    ///
    /// Blank notes are dropped.
    pub fn into_context(self) -> Result<WorkoutContext, InvalidContextError> {
        let mut context = WorkoutContext::new(self.stress_level, self.energy_level, self.sleep_hours);
        if let Some(notes) = self.notes.filter(|n| !n.trim().is_empty()) {
            context = context.with_notes(notes);
        }
        context.validate()?;
        Ok(context)
    }
}

/// Workout builder selection; either step may be skipped
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutBuilderRequest {
    #[serde(default)]
    pub location: Option<TrainingLocation>,
    #[serde(default)]
    pub equipment: Option<EquipmentChoice>,
}

// ============================================================================
// Auth
// ============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
}

// ============================================================================
// Nutrition
// ============================================================================

/// Macro grams request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacrosRequest {
    pub calorie_target: u32,
    #[serde(flatten)]
    pub ratios: MacroRatios,
}

/// Calorie target update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieTargetRequest {
    pub calorie_target: u32,
}

/// Optional ratio override for the nutrition plan, `?p=&c=&f=`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatiosQuery {
    pub p: Option<u32>,
    pub c: Option<u32>,
    pub f: Option<u32>,
}

impl RatiosQuery {
    /// All three components, or none.
    pub fn ratios(&self) -> Option<MacroRatios> {
        match (self.p, self.c, self.f) {
            (Some(p), Some(c), Some(f)) => Some(MacroRatios::new(p, c, f)),
            _ => None,
        }
    }
}

// ============================================================================
// Coach Chat
// ============================================================================

/// Chat message from the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat reply returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    pub intent: ChatIntent,
    pub profile_updated: bool,
    /// Second message shown once a profile change has been applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_plan: Option<RecommendationBundle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_plan: Option<NutritionPlan>,
}

/// Request sent to the remote coaching agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub user_id: String,
    pub message: String,
    pub context: AgentContext,
}

/// Context forwarded with every agent request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentContext {
    pub profile: UserProfile,
    pub intent: ChatIntent,
}

/// Remote agent reply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AgentData>,
}

/// Optional payloads; only their presence matters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_plan: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<serde_json::Value>,
}

impl AgentResponse {
    pub fn requests_workout_plan(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.workout_plan.is_some())
    }

    pub fn requests_meal_plan(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.meal_plan.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workout_request_from_camel_case() {
        let request: WorkoutPlanRequest = serde_json::from_value(json!({
            "userId": "u1",
            "stressLevel": 8,
            "energyLevel": 2,
            "sleepHours": 4,
            "notes": "old knee injury"
        }))
        .unwrap();
        let context = request.into_context().unwrap();
        assert_eq!(context.stress_level, 8);
        assert_eq!(context.sleep_hours, 4.0);
        assert_eq!(context.notes.as_deref(), Some("old knee injury"));
    }

    #[test]
    fn test_blank_notes_dropped() {
        let request = WorkoutPlanRequest {
            user_id: None,
            stress_level: 2,
            energy_level: 9,
            sleep_hours: 8.0,
            notes: Some("   ".to_string()),
        };
        assert!(request.into_context().unwrap().notes.is_none());
    }

    #[test]
    fn test_out_of_range_request_names_field() {
        let request = WorkoutPlanRequest {
            user_id: None,
            stress_level: 5,
            energy_level: 11,
            sleep_hours: 7.0,
            notes: None,
        };
        assert_eq!(request.into_context().unwrap_err().field, "energyLevel");
    }

    #[test]
    fn test_ratios_query_requires_all_parts() {
        let partial = RatiosQuery {
            p: Some(30),
            c: Some(40),
            f: None,
        };
        assert!(partial.ratios().is_none());
        let full = RatiosQuery {
            f: Some(30),
            ..partial
        };
        assert_eq!(full.ratios(), Some(MacroRatios::new(30, 40, 30)));
    }

    #[test]
    fn test_macros_request_flattens_ratios() {
        let request: MacrosRequest =
            serde_json::from_value(json!({ "calorieTarget": 2000, "p": 30, "c": 40, "f": 30 }))
                .unwrap();
        assert_eq!(request.ratios, MacroRatios::new(30, 40, 30));
    }

    #[test]
    fn test_agent_response_triggers() {
        let response: AgentResponse = serde_json::from_value(json!({
            "response": "Here is a new plan",
            "data": { "workout_plan": { "name": "anything" } }
        }))
        .unwrap();
        assert!(response.requests_workout_plan());
        assert!(!response.requests_meal_plan());

        let bare: AgentResponse = serde_json::from_value(json!({ "response": "ok" })).unwrap();
        assert!(!bare.requests_workout_plan());
        assert!(bare.actions.is_none());
    }

    #[test]
    fn test_agent_request_wire_shape() {
        let request = AgentRequest {
            user_id: "u1".to_string(),
            message: "my knee hurts".to_string(),
            context: AgentContext {
                profile: UserProfile::default(),
                intent: ChatIntent::classify("my knee hurts"),
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["context"]["intent"]["kind"], "report_injury");
        assert!(value["context"]["profile"]["basicInfo"].is_object());
    }

    #[test]
    fn test_builder_request_steps_optional() {
        let request: WorkoutBuilderRequest =
            serde_json::from_value(json!({ "location": "home", "equipment": "full_gym" })).unwrap();
        assert_eq!(request.location, Some(TrainingLocation::Home));
        assert_eq!(request.equipment, Some(EquipmentChoice::FullGym));

        let empty: WorkoutBuilderRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.location.is_none() && empty.equipment.is_none());
    }
}
