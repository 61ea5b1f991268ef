//! Workout context assessment
//!
//! Maps self-reported stress, energy and sleep to an intensity tier, a
//! feasibility score, a best time of day and a list of risk factors. Every
//! function here is pure and deterministic.

use crate::errors::InvalidContextError;
use crate::models::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const STRESS_RANGE: (u8, u8) = (1, 10);
pub const ENERGY_RANGE: (u8, u8) = (1, 10);
pub const SLEEP_RANGE: (f64, f64) = (3.0, 12.0);
/// Sleep is reported in half-hour steps
pub const SLEEP_STEP: f64 = 0.5;

/// Self-reported state for one derivation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutContext {
    pub stress_level: u8,
    pub energy_level: u8,
    pub sleep_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkoutContext {
    pub fn new(stress_level: u8, energy_level: u8, sleep_hours: f64) -> Self {
        Self {
            stress_level,
            energy_level,
            sleep_hours,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Reject out-of-range fields, naming the first offender.
    pub fn validate(&self) -> Result<(), InvalidContextError> {
        let (min, max) = STRESS_RANGE;
        if !(min..=max).contains(&self.stress_level) {
            return Err(InvalidContextError::new(
                "stressLevel",
                format!("must be between {} and {}", min, max),
            ));
        }

        let (min, max) = ENERGY_RANGE;
        if !(min..=max).contains(&self.energy_level) {
            return Err(InvalidContextError::new(
                "energyLevel",
                format!("must be between {} and {}", min, max),
            ));
        }

        let (min, max) = SLEEP_RANGE;
        if self.sleep_hours.is_nan() || self.sleep_hours.is_infinite() {
            return Err(InvalidContextError::new("sleepHours", "must be a valid number"));
        }
        if self.sleep_hours < min || self.sleep_hours > max {
            return Err(InvalidContextError::new(
                "sleepHours",
                format!("must be between {} and {}", min, max),
            ));
        }
        if (self.sleep_hours / SLEEP_STEP).fract() != 0.0 {
            return Err(InvalidContextError::new(
                "sleepHours",
                "must be in half-hour steps",
            ));
        }

        Ok(())
    }

    fn mentions_injury(&self) -> bool {
        self.notes
            .as_deref()
            .is_some_and(|notes| notes.to_lowercase().contains("injury"))
    }
}

/// Workout intensity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Intense,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Light => "light",
            Intensity::Moderate => "moderate",
            Intensity::Intense => "intense",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify intensity; the light rule wins over the intense rule.
pub fn classify_intensity(stress_level: u8, energy_level: u8, sleep_hours: f64) -> Intensity {
    if stress_level >= 7 || energy_level <= 3 || sleep_hours < 5.0 {
        Intensity::Light
    } else if stress_level <= 3 && energy_level >= 7 && sleep_hours >= 7.0 {
        Intensity::Intense
    } else {
        Intensity::Moderate
    }
}

/// Readiness on a 0-10 scale, rounded to one decimal
pub fn feasibility_score(stress_level: u8, energy_level: u8, sleep_hours: f64) -> f64 {
    let stress = f64::from(stress_level);
    let energy = f64::from(energy_level);
    let raw = (10.0 - stress) * 0.3 + energy * 0.4 + (sleep_hours / 12.0) * 10.0 * 0.3;
    (raw * 10.0).round() / 10.0
}

pub fn best_time(stress_level: u8, energy_level: u8, sleep_hours: f64) -> TimeOfDay {
    if energy_level >= 7 && sleep_hours >= 7.0 {
        TimeOfDay::Morning
    } else if stress_level >= 7 {
        TimeOfDay::Evening
    } else {
        TimeOfDay::Afternoon
    }
}

pub const RISK_SLEEP_DEFICIT: &str = "Sleep deficit may affect recovery";
pub const RISK_HIGH_STRESS: &str = "High stress increases injury risk";
pub const RISK_LOW_ENERGY: &str = "Low energy may limit performance";
pub const RISK_NOTED_INJURY: &str = "Noted injury requires modified movements";

pub fn risk_factors(context: &WorkoutContext) -> Vec<String> {
    let mut risks = Vec::new();
    if context.sleep_hours < 6.0 {
        risks.push(RISK_SLEEP_DEFICIT.to_string());
    }
    if context.stress_level >= 7 {
        risks.push(RISK_HIGH_STRESS.to_string());
    }
    if context.energy_level <= 3 {
        risks.push(RISK_LOW_ENERGY.to_string());
    }
    if context.mentions_injury() {
        risks.push(RISK_NOTED_INJURY.to_string());
    }
    risks
}

/// Deterministic part of a derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextAssessment {
    pub intensity: Intensity,
    pub feasibility_score: f64,
    pub best_time: TimeOfDay,
    pub risk_factors: Vec<String>,
}

impl ContextAssessment {
    pub fn is_well_prepared(&self) -> bool {
        self.feasibility_score >= 7.0
    }
}

pub fn assess(context: &WorkoutContext) -> ContextAssessment {
    let WorkoutContext {
        stress_level,
        energy_level,
        sleep_hours,
        ..
    } = *context;

    ContextAssessment {
        intensity: classify_intensity(stress_level, energy_level, sleep_hours),
        feasibility_score: feasibility_score(stress_level, energy_level, sleep_hours),
        best_time: best_time(stress_level, energy_level, sleep_hours),
        risk_factors: risk_factors(context),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(7, 8, 8.0, Intensity::Light)]
    #[case(5, 3, 8.0, Intensity::Light)]
    #[case(5, 5, 4.5, Intensity::Light)]
    #[case(3, 7, 7.0, Intensity::Intense)]
    #[case(1, 10, 12.0, Intensity::Intense)]
    #[case(6, 7, 7.0, Intensity::Moderate)]
    #[case(6, 6, 6.0, Intensity::Moderate)]
    #[case(3, 7, 6.5, Intensity::Moderate)]
    #[case(6, 4, 5.0, Intensity::Moderate)]
    fn test_intensity_boundaries(
        #[case] stress: u8,
        #[case] energy: u8,
        #[case] sleep: f64,
        #[case] expected: Intensity,
    ) {
        assert_eq!(classify_intensity(stress, energy, sleep), expected);
    }

    #[test]
    fn test_feasibility_score_rounding() {
        // 1.5 + 2.0 + 1.5
        assert_eq!(feasibility_score(5, 5, 6.0), 5.0);
        // 1.2 + 2.8 + 1.625 = 5.625
        assert_eq!(feasibility_score(6, 7, 6.5), 5.6);
        // 2.4 + 3.6 + 2.0 = 8.0
        assert_eq!(feasibility_score(2, 9, 8.0), 8.0);
        // 0.6 + 0.8 + 1.0 = 2.4
        assert_eq!(feasibility_score(8, 2, 4.0), 2.4);
    }

    #[rstest]
    #[case(8, 8, 8.0, TimeOfDay::Morning)]
    #[case(8, 6, 8.0, TimeOfDay::Evening)]
    #[case(7, 7, 6.5, TimeOfDay::Evening)]
    #[case(4, 6, 8.0, TimeOfDay::Afternoon)]
    fn test_best_time(
        #[case] stress: u8,
        #[case] energy: u8,
        #[case] sleep: f64,
        #[case] expected: TimeOfDay,
    ) {
        assert_eq!(best_time(stress, energy, sleep), expected);
    }

    #[test]
    fn test_all_risk_factors_in_order() {
        let context = WorkoutContext::new(8, 2, 4.0).with_notes("Old knee INJURY flaring up");
        assert_eq!(
            risk_factors(&context),
            vec![
                RISK_SLEEP_DEFICIT,
                RISK_HIGH_STRESS,
                RISK_LOW_ENERGY,
                RISK_NOTED_INJURY
            ]
        );
    }

    #[test]
    fn test_no_risk_factors_for_rested_user() {
        let context = WorkoutContext::new(2, 9, 8.0).with_notes("");
        assert!(risk_factors(&context).is_empty());
    }

    #[test]
    fn test_validate_names_offending_field() {
        assert!(WorkoutContext::new(5, 5, 7.5).validate().is_ok());
        assert_eq!(
            WorkoutContext::new(0, 5, 7.0).validate().unwrap_err().field,
            "stressLevel"
        );
        assert_eq!(
            WorkoutContext::new(5, 11, 7.0).validate().unwrap_err().field,
            "energyLevel"
        );
        assert_eq!(
            WorkoutContext::new(5, 5, 2.5).validate().unwrap_err().field,
            "sleepHours"
        );
        assert_eq!(
            WorkoutContext::new(5, 5, 7.25).validate().unwrap_err().field,
            "sleepHours"
        );
        assert!(WorkoutContext::new(5, 5, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_context_deserializes_without_notes() {
        let context: WorkoutContext =
            serde_json::from_str(r#"{"stressLevel":4,"energyLevel":6,"sleepHours":7.5}"#).unwrap();
        assert_eq!(context, WorkoutContext::new(4, 6, 7.5));
    }

    fn sleep_strategy() -> impl Strategy<Value = f64> {
        (6u8..=24).prop_map(|half_hours| f64::from(half_hours) * SLEEP_STEP)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: classification follows the first-match rule exactly
        #[test]
        fn prop_intensity_matches_rule(
            stress in 1u8..=10,
            energy in 1u8..=10,
            sleep in sleep_strategy()
        ) {
            let expected = if stress >= 7 || energy <= 3 || sleep < 5.0 {
                Intensity::Light
            } else if stress <= 3 && energy >= 7 && sleep >= 7.0 {
                Intensity::Intense
            } else {
                Intensity::Moderate
            };
            prop_assert_eq!(classify_intensity(stress, energy, sleep), expected);
        }

        /// Property: more energy never lowers feasibility
        #[test]
        fn prop_feasibility_non_decreasing_in_energy(
            stress in 1u8..=10,
            energy in 1u8..10,
            sleep in sleep_strategy()
        ) {
            prop_assert!(
                feasibility_score(stress, energy + 1, sleep) >= feasibility_score(stress, energy, sleep)
            );
        }

        /// Property: more sleep never lowers feasibility
        #[test]
        fn prop_feasibility_non_decreasing_in_sleep(
            stress in 1u8..=10,
            energy in 1u8..=10,
            half_hours in 6u8..24
        ) {
            let sleep = f64::from(half_hours) * SLEEP_STEP;
            prop_assert!(
                feasibility_score(stress, energy, sleep + SLEEP_STEP) >= feasibility_score(stress, energy, sleep)
            );
        }

        /// Property: more stress never raises feasibility
        #[test]
        fn prop_feasibility_non_increasing_in_stress(
            stress in 1u8..10,
            energy in 1u8..=10,
            sleep in sleep_strategy()
        ) {
            prop_assert!(
                feasibility_score(stress + 1, energy, sleep) <= feasibility_score(stress, energy, sleep)
            );
        }

        /// Property: feasibility stays on the 0-10 scale
        #[test]
        fn prop_feasibility_in_range(
            stress in 1u8..=10,
            energy in 1u8..=10,
            sleep in sleep_strategy()
        ) {
            let score = feasibility_score(stress, energy, sleep);
            prop_assert!((0.0..=10.0).contains(&score));
        }
    }
}
