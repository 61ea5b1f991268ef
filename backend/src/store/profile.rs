//! Persisted user profile

use super::{KeyValueStore, StoreError};
use adafit_shared::validation::{validate_profile, validate_section, ValidationError};
use adafit_shared::{PatchError, ProfileSection, UserProfile};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why a profile mutation did not go through
#[derive(Error, Debug)]
pub enum ProfileUpdateError {
    /// The patch does not fit the schema; nothing changed
    #[error(transparent)]
    Patch(#[from] PatchError),

    /// The patched profile breaks a field constraint; nothing changed
    #[error("{}", .0.user_message())]
    Invalid(ValidationError),

    /// The change was applied in memory but could not be persisted
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Single-writer profile store
///
/// Holds the current profile in memory and writes the full record back to
/// the backend after every mutation.
pub struct ProfileStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    profile: UserProfile,
}

impl ProfileStore {
    /// Open the store, loading whatever is persisted under `key`.
    pub fn open(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let profile = Self::load(backend.as_ref(), &key);
        Self {
            backend,
            key,
            profile,
        }
    }

    /// Read the persisted profile merged over defaults.
    ///
    /// Never fails: a missing or unreadable record yields the defaults. A
    /// section that does not fit the schema or breaks a field constraint is
    /// replaced by its default and the rest of the record is kept, so the
    /// loaded profile always passes validation.
    pub fn load(backend: &dyn KeyValueStore, key: &str) -> UserProfile {
        let raw = match backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserProfile::default(),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read profile, using defaults");
                return UserProfile::default();
            }
        };

        let recovered = serde_json::from_str::<Value>(&raw)
            .map_err(PatchError::from)
            .and_then(UserProfile::recover);

        let recovered = match recovered {
            Ok(recovered) => recovered,
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding malformed profile record");
                return UserProfile::default();
            }
        };
        for section in &recovered.discarded {
            warn!(key = %key, section = %section, "Discarding malformed profile section");
        }

        let mut profile = recovered.profile;
        for section in ProfileSection::ALL {
            if let Err(e) = validate_section(&profile, section) {
                warn!(
                    key = %key,
                    section = %section,
                    field = %e.field,
                    "Resetting out-of-range profile section"
                );
                profile.reset_section(section);
            }
        }
        profile
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Shallow-merge `patch` into one section.
    pub fn update_section(
        &mut self,
        section: ProfileSection,
        patch: Value,
    ) -> Result<&UserProfile, ProfileUpdateError> {
        let updated = self.profile.with_section_patch(section, patch)?;
        debug!(section = %section, "Updating profile section");
        self.commit(updated)
    }

    /// Top-level shallow merge over the whole profile.
    pub fn replace(&mut self, partial: Value) -> Result<&UserProfile, ProfileUpdateError> {
        let updated = self.profile.with_patch(partial)?;
        self.commit(updated)
    }

    /// Store an already-built profile, e.g. one produced by a chat action.
    pub fn set(&mut self, profile: UserProfile) -> Result<&UserProfile, ProfileUpdateError> {
        self.commit(profile)
    }

    pub fn complete_wizard(&mut self) -> Result<&UserProfile, ProfileUpdateError> {
        let mut updated = self.profile.clone();
        updated.completed_wizard = true;
        self.commit(updated)
    }

    /// Restore defaults.
    pub fn reset(&mut self) -> Result<&UserProfile, ProfileUpdateError> {
        self.commit(UserProfile::default())
    }

    fn commit(&mut self, updated: UserProfile) -> Result<&UserProfile, ProfileUpdateError> {
        validate_profile(&updated).map_err(ProfileUpdateError::Invalid)?;
        self.profile = updated;
        self.save()?;
        Ok(&self.profile)
    }

    /// Write the current profile to the backend.
    pub fn save(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&self.profile).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.backend.set(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use adafit_shared::models::{DietType, HealthConstraints, Injury};
    use serde_json::json;

    const KEY: &str = "adafit_profile";

    fn backend() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    /// Backend whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }
        fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            })
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_backend_loads_defaults() {
        let store = ProfileStore::open(backend(), KEY);
        assert_eq!(store.profile(), &UserProfile::default());
    }

    #[test]
    fn test_malformed_record_falls_back_to_defaults() {
        let backend = backend();
        backend.set(KEY, "{not json").unwrap();
        let store = ProfileStore::open(backend.clone(), KEY);
        assert_eq!(store.profile(), &UserProfile::default());

        backend.set(KEY, "[1, 2]").unwrap();
        assert_eq!(ProfileStore::load(backend.as_ref(), KEY), UserProfile::default());
    }

    #[test]
    fn test_malformed_section_keeps_the_rest() {
        let backend = backend();
        backend
            .set(
                KEY,
                r#"{"basicInfo": {"age": null}, "equipment": {"barbell": true}, "completedWizard": true}"#,
            )
            .unwrap();

        let profile = ProfileStore::load(backend.as_ref(), KEY);

        assert_eq!(profile.basic_info.age, 30);
        assert!(profile.equipment.barbell);
        assert!(profile.completed_wizard);
    }

    #[test]
    fn test_out_of_range_record_does_not_block_other_updates() {
        let backend = backend();
        backend
            .set(
                KEY,
                r#"{"nutritionPreferences": {"calorieTarget": 1000, "dietType": "keto"}, "basicInfo": {"age": 44}}"#,
            )
            .unwrap();
        let mut store = ProfileStore::open(backend.clone(), KEY);
        assert_eq!(store.profile().nutrition_preferences.calorie_target, 2000);
        assert_eq!(store.profile().nutrition_preferences.diet_type, DietType::Balanced);
        assert_eq!(store.profile().basic_info.age, 44);

        store
            .update_section(ProfileSection::Equipment, json!({ "dumbbells": true }))
            .unwrap();

        let mut injured = store.profile().clone();
        injured.health_constraints.injuries.push(Injury {
            location: "Knee".to_string(),
            severity: 5,
        });
        store.set(injured).unwrap();

        let persisted = ProfileStore::load(backend.as_ref(), KEY);
        assert!(persisted.equipment.dumbbells);
        assert_eq!(persisted.health_constraints.injuries.len(), 1);
        assert_eq!(persisted.basic_info.age, 44);
    }

    #[test]
    fn test_missing_section_backfilled() {
        let backend = backend();
        backend
            .set(KEY, r#"{"basicInfo": {"age": 52, "gender": "male"}}"#)
            .unwrap();
        let profile = ProfileStore::load(backend.as_ref(), KEY);
        assert_eq!(profile.basic_info.age, 52);
        assert_eq!(profile.basic_info.height, 170.0);
        assert_eq!(profile.health_constraints, HealthConstraints::default());
    }

    #[test]
    fn test_save_load_is_idempotent() {
        let backend = backend();
        let mut store = ProfileStore::open(backend.clone(), KEY);
        store
            .update_section(ProfileSection::BasicInfo, json!({ "age": 41 }))
            .unwrap();
        let first = backend.get(KEY).unwrap();

        let reopened = ProfileStore::open(backend.clone(), KEY);
        reopened.save().unwrap();
        assert_eq!(backend.get(KEY).unwrap(), first);
        assert_eq!(reopened.profile(), store.profile());
    }

    #[test]
    fn test_update_section_persists() {
        let backend = backend();
        let mut store = ProfileStore::open(backend.clone(), KEY);
        store
            .update_section(
                ProfileSection::NutritionPreferences,
                json!({ "dietType": "keto", "calorieTarget": 1800 }),
            )
            .unwrap();

        let persisted = ProfileStore::load(backend.as_ref(), KEY);
        assert_eq!(persisted.nutrition_preferences.diet_type, DietType::Keto);
        assert_eq!(persisted.nutrition_preferences.calorie_target, 1800);
        assert_eq!(persisted.nutrition_preferences.meals_per_day, 3);
    }

    #[test]
    fn test_bad_patch_leaves_state_unchanged() {
        let backend = backend();
        let mut store = ProfileStore::open(backend.clone(), KEY);
        let err = store
            .update_section(ProfileSection::BasicInfo, json!({ "age": "forty" }))
            .unwrap_err();
        assert!(matches!(err, ProfileUpdateError::Patch(_)));
        assert_eq!(store.profile(), &UserProfile::default());
        assert_eq!(backend.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_constraint_violation_rejected() {
        let mut store = ProfileStore::open(backend(), KEY);
        let err = store
            .update_section(ProfileSection::NutritionPreferences, json!({ "calorieTarget": 500 }))
            .unwrap_err();
        assert!(matches!(err, ProfileUpdateError::Invalid(ref v) if v.field == "calorieTarget"));
        assert_eq!(store.profile().nutrition_preferences.calorie_target, 2000);
    }

    #[test]
    fn test_completed_wizard_section_replaced() {
        let mut store = ProfileStore::open(backend(), KEY);
        store
            .update_section(ProfileSection::CompletedWizard, json!(true))
            .unwrap();
        assert!(store.profile().completed_wizard);
    }

    #[test]
    fn test_replace_is_top_level() {
        let mut store = ProfileStore::open(backend(), KEY);
        store
            .replace(json!({ "equipment": { "bodyweight": false, "dumbbells": true, "barbell": false,
                "cardio": false, "yogaMat": true, "runningShoes": false } }))
            .unwrap();
        assert!(store.profile().equipment.dumbbells);
        assert!(!store.profile().equipment.bodyweight);
    }

    #[test]
    fn test_complete_wizard_then_reset() {
        let backend = backend();
        let mut store = ProfileStore::open(backend.clone(), KEY);
        store.complete_wizard().unwrap();
        assert!(ProfileStore::load(backend.as_ref(), KEY).completed_wizard);

        store.reset().unwrap();
        assert_eq!(store.profile(), &UserProfile::default());
        assert!(!ProfileStore::load(backend.as_ref(), KEY).completed_wizard);
    }

    #[test]
    fn test_write_failure_keeps_mutation_in_memory() {
        let mut store = ProfileStore::open(Arc::new(ReadOnlyStore), KEY);
        let err = store.complete_wizard().unwrap_err();
        assert!(matches!(err, ProfileUpdateError::Store(_)));
        assert!(store.profile().completed_wizard);
    }
}
