//! Coach chat intents
//!
//! Free-text messages are classified into a small set of known intents,
//! each with a fixed reply and, where relevant, a profile change. Anything
//! unrecognised is carried as [`ChatIntent::FreeText`].

use crate::models::{Injury, ProfileSection, UserProfile};
use serde::{Deserialize, Serialize};

/// Severity recorded for injuries reported through chat
pub const REPORTED_INJURY_SEVERITY: u8 = 5;

pub const GREETING: &str = "Hi! I'm Ada. I can help optimize your profile. Try saying 'I have bad knees' or 'Switch to Vegan'.";
pub const PROFILE_UPDATED_REPLY: &str = "I've updated your profile settings.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatIntent {
    ReportInjury { location: String },
    AddDietaryRestriction { restriction: String },
    Confirm,
    FreeText { text: String },
}

impl ChatIntent {
    /// Classify a message by keyword; the first matching rule wins.
    pub fn classify(message: &str) -> Self {
        let text = message.to_lowercase();
        if text.contains("knee") {
            ChatIntent::ReportInjury {
                location: "Knee".to_string(),
            }
        } else if text.contains("vegan") {
            ChatIntent::AddDietaryRestriction {
                restriction: "Vegan".to_string(),
            }
        } else if text.contains("yes") || text.contains("confirm") {
            ChatIntent::Confirm
        } else {
            ChatIntent::FreeText {
                text: message.to_string(),
            }
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            ChatIntent::ReportInjury { .. } => {
                "I see you mentioned a knee issue. I can update your profile to exclude high-impact jumping exercises. Should I do that?"
            }
            ChatIntent::AddDietaryRestriction { .. } => {
                "Going plant-based? I can set your nutrition preference to Vegan. Confirm?"
            }
            ChatIntent::Confirm => "Great! Profile updated.",
            ChatIntent::FreeText { .. } => {
                "I'm analyzing your profile. Want me to adjust your calorie target for faster weight loss?"
            }
        }
    }

    pub fn changes_profile(&self) -> bool {
        self.target_section().is_some()
    }

    /// Profile section this intent writes to, if any
    pub fn target_section(&self) -> Option<ProfileSection> {
        match self {
            ChatIntent::ReportInjury { .. } => Some(ProfileSection::HealthConstraints),
            ChatIntent::AddDietaryRestriction { .. } => Some(ProfileSection::NutritionPreferences),
            ChatIntent::Confirm | ChatIntent::FreeText { .. } => None,
        }
    }

    /// Profile after applying this intent, or `None` when it changes nothing.
    ///
    /// Repeating an intent does not duplicate the entry.
    pub fn apply_to(&self, profile: &UserProfile) -> Option<UserProfile> {
        let mut updated = profile.clone();
        match self {
            ChatIntent::ReportInjury { location } => {
                let injuries = &mut updated.health_constraints.injuries;
                if injuries.iter().any(|injury| &injury.location == location) {
                    return None;
                }
                injuries.push(Injury {
                    location: location.clone(),
                    severity: REPORTED_INJURY_SEVERITY,
                });
            }
            ChatIntent::AddDietaryRestriction { restriction } => {
                let restrictions = &mut updated.nutrition_preferences.dietary_restrictions;
                if restrictions.contains(restriction) {
                    return None;
                }
                restrictions.push(restriction.clone());
            }
            ChatIntent::Confirm | ChatIntent::FreeText { .. } => return None,
        }
        Some(updated)
    }
}
