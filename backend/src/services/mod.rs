//! Business logic services
//!
//! Services encapsulate business logic and coordinate between the stores,
//! the derivation engine and the remote agent.

pub mod agent;
pub mod chat;
pub mod nutrition;
pub mod recommendation;

pub use agent::{AgentClient, AgentError};
pub use chat::ChatService;
pub use nutrition::NutritionService;
pub use recommendation::RecommendationService;
