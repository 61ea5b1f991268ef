//! Profile completeness score shown on the profile dashboard

use crate::models::{User, UserProfile};

const REQUIRED_POINTS: u32 = 8;
const OPTIONAL_POINTS: u32 = 5;
const SCHEDULE_POINTS: u32 = 8;
const EQUIPMENT_POINTS: u32 = 7;
const NO_INJURY_POINTS: u32 = 7;

/// Score how complete a profile is, 0-100.
///
/// Required facts (name, age, goal, experience, diet) are worth 8 points
/// each; optional body stats 5 each; schedule, weights equipment and an
/// injury-free record add the rest. A fully filled profile tops out at 82.
pub fn profile_completeness(profile: &UserProfile, user: Option<&User>) -> u32 {
    let basic = &profile.basic_info;
    let mut score = 0;

    // enum-valued fields always carry a value
    if user.is_some_and(|u| !u.name.is_empty()) {
        score += REQUIRED_POINTS;
    }
    if basic.age > 0 {
        score += REQUIRED_POINTS;
    }
    score += REQUIRED_POINTS; // primary goal
    score += REQUIRED_POINTS; // experience level
    score += REQUIRED_POINTS; // diet type

    if basic.gender != "Not specified" {
        score += OPTIONAL_POINTS;
    }
    if basic.height > 0.0 {
        score += OPTIONAL_POINTS;
    }
    if basic.weight > 0.0 {
        score += OPTIONAL_POINTS;
    }
    if profile.fitness_profile.target_weight > 0.0 {
        score += OPTIONAL_POINTS;
    }

    score += SCHEDULE_POINTS;
    if profile.equipment.dumbbells || profile.equipment.barbell {
        score += EQUIPMENT_POINTS;
    }
    if profile.health_constraints.injuries.is_empty() {
        score += NO_INJURY_POINTS;
    }

    score.min(100)
}
