//! Recommendation bundle derivation
//!
//! [`derive_plan`] turns a [`WorkoutContext`] into a full
//! [`RecommendationBundle`]. The deterministic core lives in
//! [`crate::context::assess`]; the handful of cosmetic fields that vary
//! between calls (confidence, streak, consistency, weekly frequency) are
//! drawn from the caller's random source in a separate flavor step, so a
//! seeded RNG makes the whole derivation reproducible.

use crate::context::{assess, ContextAssessment, Intensity, WorkoutContext};
use crate::models::TimeOfDay;
use crate::templates::{diet_for, workout_for, DietTemplate, WorkoutTemplate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Full output of one derivation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationBundle {
    pub context_analysis: ContextAnalysis,
    pub workout_plan: WorkoutPlan,
    pub diet_recommendation: DietRecommendation,
    pub habit_status: HabitStatus,
    pub motivation: Motivation,
    pub reasoning_trail: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextAnalysis {
    pub feasibility_score: f64,
    pub recommended_intensity: Intensity,
    pub best_time: TimeOfDay,
    pub risk_factors: Vec<String>,
    pub reasoning: String,
    /// 0.70-0.95
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration_minutes: u32,
    /// Display label: Low, Moderate or High
    pub intensity: String,
    pub instructions: Vec<String>,
    pub success_likelihood: u8,
}

impl From<&WorkoutTemplate> for WorkoutPlan {
    fn from(template: &WorkoutTemplate) -> Self {
        Self {
            name: template.name.to_string(),
            kind: template.kind.to_string(),
            duration_minutes: template.duration_minutes,
            intensity: template.intensity_label.to_string(),
            instructions: template.instructions.iter().map(|s| s.to_string()).collect(),
            success_likelihood: template.success_likelihood,
        }
    }
}

/// Macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: u32,
    pub carbs: u32,
    pub fats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietRecommendation {
    pub meal_type: String,
    pub description: String,
    pub calories: u32,
    pub macros: Macros,
    pub suggestions: Vec<String>,
}

impl From<&DietTemplate> for DietRecommendation {
    fn from(template: &DietTemplate) -> Self {
        Self {
            meal_type: template.meal_type.to_string(),
            description: template.description.to_string(),
            calories: template.calories,
            macros: Macros {
                protein: template.protein_g,
                carbs: template.carbs_g,
                fats: template.fats_g,
            },
            suggestions: template.suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStatus {
    pub current_streak: u32,
    /// Percent
    pub consistency: u32,
    pub patterns: HabitPatterns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitPatterns {
    pub preferred_time: TimeOfDay,
    pub average_session_length: u32,
    pub weekly_frequency: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotivationType {
    Encouragement,
    Supportive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Energetic,
    Gentle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motivation {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: MotivationType,
    pub tone: Tone,
}

const ENCOURAGEMENT_MESSAGE: &str = "You're in great shape today! Channel that energy into your workout and remember: every rep brings you closer to your goals. You've got this!";
const SUPPORTIVE_MESSAGE: &str = "Recovery is just as important as the workout itself. Listen to your body today, and know that taking it easy when needed is a sign of wisdom, not weakness. Tomorrow is another opportunity to push harder.";

impl Motivation {
    fn for_assessment(assessment: &ContextAssessment) -> Self {
        if assessment.is_well_prepared() {
            Self {
                message: ENCOURAGEMENT_MESSAGE.to_string(),
                kind: MotivationType::Encouragement,
                tone: Tone::Energetic,
            }
        } else {
            Self {
                message: SUPPORTIVE_MESSAGE.to_string(),
                kind: MotivationType::Supportive,
                tone: Tone::Gentle,
            }
        }
    }
}

/// Cosmetic values that vary between otherwise identical derivations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flavor {
    pub confidence: f64,
    pub current_streak: u32,
    pub consistency: u32,
    pub weekly_frequency: u32,
}

impl Flavor {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let confidence: f64 = 0.7 + rng.gen_range(0.0..0.25);
        Self {
            confidence: (confidence * 100.0).round() / 100.0,
            current_streak: 7 + rng.gen_range(0..10),
            consistency: 72 + rng.gen_range(0..20),
            weekly_frequency: 4 + rng.gen_range(0..2),
        }
    }
}

/// Derive a full recommendation bundle.
///
/// Never rejects input: validate with [`WorkoutContext::validate`] first if
/// the values come from an untrusted source.
pub fn derive_plan<R: Rng>(context: &WorkoutContext, rng: &mut R) -> RecommendationBundle {
    let assessment = assess(context);
    let flavor = Flavor::sample(rng);
    build_bundle(context, assessment, flavor)
}

/// Assemble a bundle from an assessment and pre-sampled flavor values.
pub fn build_bundle(
    context: &WorkoutContext,
    assessment: ContextAssessment,
    flavor: Flavor,
) -> RecommendationBundle {
    let workout = workout_for(assessment.intensity);
    let diet = diet_for(assessment.intensity);

    let reasoning = reasoning_text(context, &assessment);
    let reasoning_trail = reasoning_trail(context, &assessment, workout);
    let motivation = Motivation::for_assessment(&assessment);

    RecommendationBundle {
        habit_status: HabitStatus {
            current_streak: flavor.current_streak,
            consistency: flavor.consistency,
            patterns: HabitPatterns {
                preferred_time: assessment.best_time,
                average_session_length: workout.duration_minutes,
                weekly_frequency: flavor.weekly_frequency,
            },
        },
        context_analysis: ContextAnalysis {
            feasibility_score: assessment.feasibility_score,
            recommended_intensity: assessment.intensity,
            best_time: assessment.best_time,
            risk_factors: assessment.risk_factors,
            reasoning,
            confidence: flavor.confidence,
        },
        workout_plan: WorkoutPlan::from(workout),
        diet_recommendation: DietRecommendation::from(diet),
        motivation,
        reasoning_trail,
    }
}

fn reasoning_text(context: &WorkoutContext, assessment: &ContextAssessment) -> String {
    let outlook = if assessment.is_well_prepared() {
        "Your body is well-prepared for exercise today."
    } else {
        "Consider taking it easier today and focusing on recovery."
    };
    format!(
        "Based on your stress level of {}/10, energy at {}/10, and {} hours of sleep, a {} intensity workout is recommended. {}",
        context.stress_level, context.energy_level, context.sleep_hours, assessment.intensity, outlook
    )
}

fn reasoning_trail(
    context: &WorkoutContext,
    assessment: &ContextAssessment,
    workout: &WorkoutTemplate,
) -> Vec<String> {
    vec![
        format!("Analyzed stress level: {}/10", context.stress_level),
        format!("Evaluated energy level: {}/10", context.energy_level),
        format!("Considered sleep duration: {} hours", context.sleep_hours),
        format!("Calculated feasibility score: {}/10", assessment.feasibility_score),
        format!("Determined optimal intensity: {}", assessment.intensity),
        format!("Selected workout: {}", workout.name),
        "Generated personalized recommendations".to_string(),
    ]
}
