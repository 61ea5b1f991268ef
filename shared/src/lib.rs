//! AdaFit Shared Library
//!
//! Profile models, the workout/diet derivation engine and the nutrition
//! calculations shared by the backend and WASM modules.

pub mod chat;
pub mod completeness;
pub mod context;
pub mod errors;
pub mod models;
pub mod nutrition;
pub mod recommendation;
pub mod templates;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use chat::ChatIntent;
pub use completeness::profile_completeness;
pub use context::{assess, classify_intensity, ContextAssessment, Intensity, WorkoutContext};
pub use errors::*;
pub use models::{ProfileSection, Session, User, UserProfile, UserUpdate};
pub use nutrition::{derive_macros, normalize, MacroGrams, MacroRatios, NutritionPlan};
pub use recommendation::{derive_plan, RecommendationBundle};
pub use templates::{builder_workout_for, BuilderWorkout, EquipmentChoice, TrainingLocation};
pub use types::*;
