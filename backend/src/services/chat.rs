//! Coach chat
//!
//! Locally, messages are matched against a few known intents and any
//! implied profile change is applied straight away. With a remote agent
//! configured the message is forwarded instead.

use crate::error::ApiError;
use crate::services::agent::AgentClient;
use crate::state::AppState;
use adafit_shared::chat::PROFILE_UPDATED_REPLY;
use adafit_shared::{
    derive_plan, AgentContext, AgentRequest, ChatIntent, ChatResponse, NutritionPlan, User,
};
use tracing::{debug, info, instrument};

/// Chat service
pub struct ChatService;

impl ChatService {
    #[instrument(skip(state, user, message), fields(user_id = %user.id))]
    pub async fn handle(
        state: &AppState,
        user: &User,
        message: &str,
    ) -> Result<ChatResponse, ApiError> {
        if message.trim().is_empty() {
            return Err(ApiError::validation("message", "Message cannot be empty"));
        }
        let intent = ChatIntent::classify(message);
        debug!(intent = ?intent, "Classified chat message");

        if let Some(agent) = state.agent() {
            return Self::forward(state, agent, user, message, intent).await;
        }

        let mut profiles = state.profiles.lock().await;
        let mut actions = Vec::new();
        let updated = match intent.apply_to(profiles.profile()) {
            Some(profile) => {
                profiles.set(profile)?;
                if let Some(section) = intent.target_section() {
                    actions.push(section.key().to_string());
                }
                info!(actions = ?actions, "Applied profile change from chat");
                true
            }
            None => false,
        };

        Ok(ChatResponse {
            reply: intent.reply().to_string(),
            profile_updated: updated,
            follow_up: updated.then(|| PROFILE_UPDATED_REPLY.to_string()),
            actions,
            intent,
            workout_plan: None,
            nutrition_plan: None,
        })
    }

    /// Send the message to the remote agent; plan payloads in its reply
    /// only trigger a local re-derivation.
    async fn forward(
        state: &AppState,
        agent: &AgentClient,
        user: &User,
        message: &str,
        intent: ChatIntent,
    ) -> Result<ChatResponse, ApiError> {
        let profile = state.profiles.lock().await.profile().clone();
        let request = AgentRequest {
            user_id: user.id.clone(),
            message: message.to_string(),
            context: AgentContext {
                profile: profile.clone(),
                intent: intent.clone(),
            },
        };
        let response = agent.chat(&request).await?;

        let workout_plan = if response.requests_workout_plan() {
            let checkin = state.last_checkin.lock().await.clone();
            checkin.map(|context| derive_plan(&context, &mut rand::thread_rng()))
        } else {
            None
        };
        let nutrition_plan = response
            .requests_meal_plan()
            .then(|| NutritionPlan::for_preferences(&profile.nutrition_preferences, None));

        Ok(ChatResponse {
            reply: response.response,
            intent,
            profile_updated: false,
            follow_up: None,
            actions: response.actions.unwrap_or_default(),
            workout_plan,
            nutrition_plan,
        })
    }
}
