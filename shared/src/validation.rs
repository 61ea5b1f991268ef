//! Input validation functions
//!
//! The derivation engine trusts its input; these checks run at the
//! boundaries where user-entered values arrive.

use crate::models::{ProfileSection, UserProfile};
use crate::nutrition::CALORIE_TARGET_RANGE;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| format!("Invalid email pattern: {}", e))?;
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.len() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

/// Validate daily calorie target (kcal)
pub fn validate_calorie_target(calories: u32) -> Result<(), String> {
    let (min, max) = CALORIE_TARGET_RANGE;
    if calories < min {
        return Err(format!("Calorie target must be at least {} kcal", min));
    }
    if calories > max {
        return Err(format!("Calorie target must be at most {} kcal", max));
    }
    Ok(())
}

fn validate_positive(value: f64, what: &str) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", what));
    }
    if value <= 0.0 {
        return Err(format!("{} must be greater than zero", what));
    }
    Ok(())
}

/// Check the numeric invariants of a whole profile.
///
/// Returns the first violation found, section by section.
pub fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    ProfileSection::ALL
        .into_iter()
        .try_for_each(|section| validate_section(profile, section))
}

/// Check the numeric invariants of one profile section.
pub fn validate_section(profile: &UserProfile, section: ProfileSection) -> Result<(), ValidationError> {
    match section {
        ProfileSection::BasicInfo => {
            let basic = &profile.basic_info;
            if basic.age == 0 {
                return Err(ValidationError::new("age", "Age must be greater than zero"));
            }
            validate_positive(basic.height, "Height")
                .map_err(|m| ValidationError::new("height", &m))?;
            validate_positive(basic.weight, "Weight")
                .map_err(|m| ValidationError::new("weight", &m))
        }
        ProfileSection::FitnessProfile => {
            let fitness = &profile.fitness_profile;
            validate_positive(fitness.target_weight, "Target weight")
                .map_err(|m| ValidationError::new("targetWeight", &m))?;
            if !(1..=7).contains(&fitness.weekly_workout_days) {
                return Err(ValidationError::new(
                    "weeklyWorkoutDays",
                    "Workout days must be between 1 and 7",
                ));
            }
            if fitness.session_duration == 0 {
                return Err(ValidationError::new(
                    "sessionDuration",
                    "Session duration must be greater than zero",
                ));
            }
            Ok(())
        }
        ProfileSection::HealthConstraints => {
            match profile
                .health_constraints
                .injuries
                .iter()
                .find(|injury| !(1..=10).contains(&injury.severity))
            {
                Some(injury) => Err(ValidationError::new(
                    "injuries",
                    &format!("Severity for {} must be between 1 and 10", injury.location),
                )),
                None => Ok(()),
            }
        }
        ProfileSection::NutritionPreferences => {
            validate_calorie_target(profile.nutrition_preferences.calorie_target)
                .map_err(|m| ValidationError::new("calorieTarget", &m))
        }
        ProfileSection::Equipment
        | ProfileSection::SchedulePreferences
        | ProfileSection::CompletedWizard => Ok(()),
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map wire field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "stressLevel" => "Stress Level",
        "energyLevel" => "Energy Level",
        "sleepHours" => "Sleep",
        "age" => "Age",
        "height" => "Height",
        "weight" => "Current Weight",
        "targetWeight" => "Target Weight",
        "weeklyWorkoutDays" => "Workout Days per Week",
        "sessionDuration" => "Session Duration",
        "injuries" => "Injuries",
        "calorieTarget" => "Daily Calorie Target",
        "mealsPerDay" => "Meals per Day",
        "name" => "Name",
        "email" => "Email",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
