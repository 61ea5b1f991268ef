//! Workout plan generation
//!
//! Without a remote agent the plan is derived locally after an artificial
//! delay that mimics the network round trip.

use crate::error::ApiError;
use crate::state::AppState;
use adafit_shared::{
    builder_workout_for, derive_plan, BuilderWorkout, RecommendationBundle, WorkoutBuilderRequest,
    WorkoutPlanRequest,
};
use std::time::Duration;
use tracing::{info, instrument};

/// Workout plan service
pub struct RecommendationService;

impl RecommendationService {
    /// Validate a check-in and produce its recommendation bundle.
    #[instrument(skip(state, request))]
    pub async fn generate(
        state: &AppState,
        request: WorkoutPlanRequest,
    ) -> Result<RecommendationBundle, ApiError> {
        let context = request.clone().into_context()?;
        *state.last_checkin.lock().await = Some(context.clone());

        if let Some(agent) = state.agent() {
            info!("Requesting workout plan from agent");
            return Ok(agent.workout_plan(&request).await?);
        }

        simulate_latency(state).await;

        let bundle = derive_plan(&context, &mut rand::thread_rng());
        info!(
            intensity = %bundle.context_analysis.recommended_intensity,
            feasibility = bundle.context_analysis.feasibility_score,
            plan = %bundle.workout_plan.name,
            "Generated workout plan"
        );
        Ok(bundle)
    }

    /// Pick a workout builder session for a location and equipment choice.
    #[instrument(skip(state))]
    pub async fn build_workout(state: &AppState, request: WorkoutBuilderRequest) -> BuilderWorkout {
        simulate_latency(state).await;

        let workout = *builder_workout_for(request.location, request.equipment);
        info!(title = workout.title, "Built workout");
        workout
    }
}

async fn simulate_latency(state: &AppState) {
    let delay = state.config().agent.mock_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
}
