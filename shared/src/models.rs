//! Data models for the AdaFit coaching application
//!
//! Field names serialize in camelCase so persisted records and JSON payloads
//! stay compatible with the existing browser front-end.

use crate::errors::PatchError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

// ============================================================================
// Profile Enums
// ============================================================================

/// Training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// Primary fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    #[default]
    LoseWeight,
    GainMuscle,
    Endurance,
    Flexibility,
}

/// Preferred recovery style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryFocus {
    Active,
    Passive,
    #[default]
    None,
}

/// Stored diet type preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    #[default]
    Balanced,
    LowCarb,
    Keto,
    Vegetarian,
    Vegan,
    Paleo,
}

impl DietType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DietType::Balanced => "balanced",
            DietType::LowCarb => "low_carb",
            DietType::Keto => "keto",
            DietType::Vegetarian => "vegetarian",
            DietType::Vegan => "vegan",
            DietType::Paleo => "paleo",
        }
    }
}

impl std::str::FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" => Ok(DietType::Balanced),
            "low_carb" => Ok(DietType::LowCarb),
            "keto" => Ok(DietType::Keto),
            "vegetarian" => Ok(DietType::Vegetarian),
            "vegan" => Ok(DietType::Vegan),
            "paleo" => Ok(DietType::Paleo),
            _ => Err(format!("Unknown diet type: {}", s)),
        }
    }
}

/// Protein intake preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProteinPreference {
    Low,
    #[default]
    Moderate,
    High,
}

/// Time of day, used both for schedule preferences and recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    #[default]
    Evening,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Profile Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub age: u32,
    pub gender: String,
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Empty when not given
    #[serde(default)]
    pub phone_number: String,
    /// URL or data-URI; empty when not given
    #[serde(default)]
    pub avatar_url: String,
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self {
            age: 30,
            gender: "Not specified".to_string(),
            height: 170.0,
            weight: 70.0,
            phone_number: String::new(),
            avatar_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessProfile {
    pub experience_level: ExperienceLevel,
    pub primary_goal: PrimaryGoal,
    /// Target weight in kilograms
    pub target_weight: f64,
    pub weekly_workout_days: u8,
    /// Session length in minutes
    pub session_duration: u32,
}

impl Default for FitnessProfile {
    fn default() -> Self {
        Self {
            experience_level: ExperienceLevel::Beginner,
            primary_goal: PrimaryGoal::LoseWeight,
            target_weight: 65.0,
            weekly_workout_days: 3,
            session_duration: 45,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub bodyweight: bool,
    pub dumbbells: bool,
    pub barbell: bool,
    pub cardio: bool,
    pub yoga_mat: bool,
    pub running_shoes: bool,
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            bodyweight: true,
            dumbbells: false,
            barbell: false,
            cardio: false,
            yoga_mat: false,
            running_shoes: false,
        }
    }
}

/// A reported injury; severity runs 1-10
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injury {
    pub location: String,
    pub severity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthConstraints {
    pub injuries: Vec<Injury>,
    pub conditions: Vec<String>,
    pub recovery_focus: RecoveryFocus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPreferences {
    pub dietary_restrictions: Vec<String>,
    pub diet_type: DietType,
    pub calorie_target: u32,
    pub meals_per_day: u32,
    pub protein_preference: ProteinPreference,
}

impl Default for NutritionPreferences {
    fn default() -> Self {
        Self {
            dietary_restrictions: Vec::new(),
            diet_type: DietType::Balanced,
            calorie_target: 2000,
            meals_per_day: 3,
            protein_preference: ProteinPreference::Moderate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePreferences {
    pub preferred_time: TimeOfDay,
    pub rest_days: Vec<String>,
}

impl Default for SchedulePreferences {
    fn default() -> Self {
        Self {
            preferred_time: TimeOfDay::Evening,
            rest_days: vec!["Sunday".to_string()],
        }
    }
}

// ============================================================================
// User Profile
// ============================================================================

/// Durable user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub basic_info: BasicInfo,
    pub fitness_profile: FitnessProfile,
    pub equipment: Equipment,
    pub health_constraints: HealthConstraints,
    pub nutrition_preferences: NutritionPreferences,
    pub schedule_preferences: SchedulePreferences,
    pub completed_wizard: bool,
}

/// A persisted profile after [`UserProfile::recover`]
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredProfile {
    pub profile: UserProfile,
    /// Sections replaced by their defaults
    pub discarded: Vec<ProfileSection>,
}

/// Top-level profile sections addressable by partial updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileSection {
    BasicInfo,
    FitnessProfile,
    Equipment,
    HealthConstraints,
    NutritionPreferences,
    SchedulePreferences,
    CompletedWizard,
}

impl ProfileSection {
    pub const ALL: [ProfileSection; 7] = [
        ProfileSection::BasicInfo,
        ProfileSection::FitnessProfile,
        ProfileSection::Equipment,
        ProfileSection::HealthConstraints,
        ProfileSection::NutritionPreferences,
        ProfileSection::SchedulePreferences,
        ProfileSection::CompletedWizard,
    ];

    /// Key of this section in the serialized profile
    pub fn key(&self) -> &'static str {
        match self {
            ProfileSection::BasicInfo => "basicInfo",
            ProfileSection::FitnessProfile => "fitnessProfile",
            ProfileSection::Equipment => "equipment",
            ProfileSection::HealthConstraints => "healthConstraints",
            ProfileSection::NutritionPreferences => "nutritionPreferences",
            ProfileSection::SchedulePreferences => "schedulePreferences",
            ProfileSection::CompletedWizard => "completedWizard",
        }
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ProfileSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileSection::ALL
            .into_iter()
            .find(|section| section.key() == s)
            .ok_or_else(|| format!("Unknown profile section: {}", s))
    }
}

impl UserProfile {
    /// Build a profile from a persisted record, backfilling anything missing
    /// from the defaults.
    ///
    /// Each section is merged key by key over its default so records written
    /// by older versions stay loadable. A section that still does not fit the
    /// schema falls back to its default and is listed in
    /// [`RecoveredProfile::discarded`]; the other sections are kept.
    pub fn recover(stored: Value) -> Result<RecoveredProfile, PatchError> {
        let Value::Object(mut stored) = stored else {
            return Err(PatchError::NotAnObject("profile".to_string()));
        };
        let mut recovered = RecoveredProfile {
            profile: UserProfile::default(),
            discarded: Vec::new(),
        };

        for section in ProfileSection::ALL {
            let Some(value) = stored.remove(section.key()) else {
                continue;
            };
            match recovered.profile.with_section_patch(section, value) {
                Ok(profile) => recovered.profile = profile,
                Err(_) => recovered.discarded.push(section),
            }
        }

        Ok(recovered)
    }

    /// Put one section back to its default.
    pub fn reset_section(&mut self, section: ProfileSection) {
        match section {
            ProfileSection::BasicInfo => self.basic_info = BasicInfo::default(),
            ProfileSection::FitnessProfile => self.fitness_profile = FitnessProfile::default(),
            ProfileSection::Equipment => self.equipment = Equipment::default(),
            ProfileSection::HealthConstraints => {
                self.health_constraints = HealthConstraints::default()
            }
            ProfileSection::NutritionPreferences => {
                self.nutrition_preferences = NutritionPreferences::default()
            }
            ProfileSection::SchedulePreferences => {
                self.schedule_preferences = SchedulePreferences::default()
            }
            ProfileSection::CompletedWizard => self.completed_wizard = false,
        }
    }

    /// Shallow-merge `patch` into one section, returning the updated profile.
    ///
    /// Object sections take the patch's keys over their current values;
    /// scalar sections (`completedWizard`) are replaced wholesale.
    pub fn with_section_patch(&self, section: ProfileSection, patch: Value) -> Result<Self, PatchError> {
        let mut current = to_object(self)?;
        let key = section.key();

        match current.get_mut(key) {
            Some(Value::Object(existing)) => {
                let Value::Object(fields) = patch else {
                    return Err(PatchError::NotAnObject(key.to_string()));
                };
                existing.extend(fields);
            }
            _ => {
                current.insert(key.to_string(), patch);
            }
        }

        Ok(serde_json::from_value(Value::Object(current))?)
    }

    /// Top-level shallow merge: each key present in `partial` replaces the
    /// whole corresponding section.
    pub fn with_patch(&self, partial: Value) -> Result<Self, PatchError> {
        let Value::Object(fields) = partial else {
            return Err(PatchError::NotAnObject("profile".to_string()));
        };
        let mut current = to_object(self)?;
        current.extend(fields);
        Ok(serde_json::from_value(Value::Object(current))?)
    }
}

fn to_object(profile: &UserProfile) -> Result<Map<String, Value>, PatchError> {
    match serde_json::to_value(profile)? {
        Value::Object(map) => Ok(map),
        _ => Err(PatchError::NotAnObject("profile".to_string())),
    }
}

// ============================================================================
// Session
// ============================================================================

/// Logged-in identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Partial update for [`User`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn apply(&mut self, update: UserUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
    }
}

/// Authentication state.
///
/// `user` is present exactly when the session is authenticated; records
/// that break this are rejected on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    is_authenticated: bool,
    user: Option<User>,
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        match (record.is_authenticated, record.user) {
            (true, Some(user)) => Ok(Session::authenticated(user)),
            (false, None) => Ok(Session::anonymous()),
            (true, None) => Err("authenticated session without a user".to_string()),
            (false, Some(_)) => Err("anonymous session carrying a user".to_string()),
        }
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        SessionRecord {
            is_authenticated: session.user.is_some(),
            user: session.user,
        }
    }
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_mut(&mut self) -> Option<&mut User> {
        self.user.as_mut()
    }
}
