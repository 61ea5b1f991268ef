//! Macro and meal-suggestion derivation
//!
//! Grams are derived from a calorie target and percentage split using the
//! standard 4/4/9 kcal-per-gram constants. Ratios are not forced to sum to
//! 100; [`MacroRatios::is_balanced`] and [`normalize`] let the caller
//! surface and fix an off-total split.

use crate::models::{DietType, NutritionPreferences};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

pub const CALORIE_TARGET_RANGE: (u32, u32) = (1200, 4000);

/// Placeholder returned when no suggestion exists for a meal slot
pub const FALLBACK_SUGGESTION: &str = "Healthy Choice";

// ============================================================================
// Ratios and Grams
// ============================================================================

/// Percentage split between protein, carbs and fat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub p: u32,
    pub c: u32,
    pub f: u32,
}

impl MacroRatios {
    pub const fn new(p: u32, c: u32, f: u32) -> Self {
        Self { p, c, f }
    }

    pub fn total(&self) -> u32 {
        self.p + self.c + self.f
    }

    /// Whether the split adds up to exactly 100%
    pub fn is_balanced(&self) -> bool {
        self.total() == 100
    }

    /// Starting split for a stored diet type
    pub fn for_diet(diet_type: DietType) -> Self {
        match diet_type {
            DietType::Keto => Self::new(25, 5, 70),
            DietType::LowCarb => Self::new(40, 20, 40),
            DietType::Paleo => Self::new(35, 30, 35),
            DietType::Balanced | DietType::Vegetarian | DietType::Vegan => Self::new(30, 40, 30),
        }
    }
}

/// Daily macro targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroGrams {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fats_g: u32,
}

fn grams(calorie_target: u32, percent: u32, kcal_per_gram: f64) -> u32 {
    let kcal = f64::from(calorie_target) * (f64::from(percent) / 100.0);
    (kcal / kcal_per_gram).round() as u32
}

pub fn derive_macros(calorie_target: u32, ratios: MacroRatios) -> MacroGrams {
    MacroGrams {
        protein_g: grams(calorie_target, ratios.p, KCAL_PER_GRAM_PROTEIN),
        carbs_g: grams(calorie_target, ratios.c, KCAL_PER_GRAM_CARBS),
        fats_g: grams(calorie_target, ratios.f, KCAL_PER_GRAM_FAT),
    }
}

/// Rescale a split to sum to roughly 100. A zero split is returned as is.
pub fn normalize(ratios: MacroRatios) -> MacroRatios {
    let sum = ratios.total();
    if sum == 0 {
        return ratios;
    }
    let scale = |component: u32| (f64::from(component) / f64::from(sum) * 100.0).round() as u32;
    MacroRatios::new(scale(ratios.p), scale(ratios.c), scale(ratios.f))
}

// ============================================================================
// Meal Suggestions
// ============================================================================

/// Diet row used for meal-suggestion lookup.
///
/// Extends [`DietType`] with the two macro-driven overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveDietType {
    Balanced,
    LowCarb,
    Keto,
    Vegetarian,
    Vegan,
    Paleo,
    HighCarb,
    HighProtein,
}

impl From<DietType> for EffectiveDietType {
    fn from(diet_type: DietType) -> Self {
        match diet_type {
            DietType::Balanced => EffectiveDietType::Balanced,
            DietType::LowCarb => EffectiveDietType::LowCarb,
            DietType::Keto => EffectiveDietType::Keto,
            DietType::Vegetarian => EffectiveDietType::Vegetarian,
            DietType::Vegan => EffectiveDietType::Vegan,
            DietType::Paleo => EffectiveDietType::Paleo,
        }
    }
}

/// Override the stored diet type when the split is extreme.
///
/// Checks run fat, then carbs, then protein; when several thresholds are
/// crossed the last one wins.
pub fn effective_diet_type(diet_type: DietType, ratios: MacroRatios) -> EffectiveDietType {
    let mut effective = EffectiveDietType::from(diet_type);
    if ratios.f > 50 {
        effective = EffectiveDietType::Keto;
    }
    if ratios.c > 50 {
        effective = EffectiveDietType::HighCarb;
    }
    if ratios.p > 40 {
        effective = EffectiveDietType::HighProtein;
    }
    effective
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Breakfast" => Ok(MealSlot::Breakfast),
            "Lunch" => Ok(MealSlot::Lunch),
            "Dinner" => Ok(MealSlot::Dinner),
            "Snack" => Ok(MealSlot::Snack),
            _ => Err(format!("Unknown meal slot: {}", s)),
        }
    }
}

type MealRow = [(MealSlot, &'static str); 4];

const KETO_MEALS: MealRow = [
    (MealSlot::Breakfast, "Avocado & Bacon Omelet"),
    (MealSlot::Lunch, "Grilled Salmon with Asparagus"),
    (MealSlot::Dinner, "Ribeye Steak with Buttered Broccoli"),
    (MealSlot::Snack, "Macadamia Nuts & Cheese"),
];

const VEGAN_MEALS: MealRow = [
    (MealSlot::Breakfast, "Overnight Oats with Chia Seeds"),
    (MealSlot::Lunch, "Quinoa Bowl with Roasted Chickpeas"),
    (MealSlot::Dinner, "Lentil Curry with Spinach"),
    (MealSlot::Snack, "Apple Slices with Almond Butter"),
];

const BALANCED_MEALS: MealRow = [
    (MealSlot::Breakfast, "Greek Yogurt with Berries & Granola"),
    (MealSlot::Lunch, "Chicken Wrap with Mixed Greens"),
    (MealSlot::Dinner, "Turkey Meatballs with Whole Wheat Pasta"),
    (MealSlot::Snack, "Protein Shake & Banana"),
];

const LOW_CARB_MEALS: MealRow = [
    (MealSlot::Breakfast, "Scrambled Eggs with Spinach"),
    (MealSlot::Lunch, "Tuna Salad Lettuce Wraps"),
    (MealSlot::Dinner, "Zucchini Noodles with Pesto Chicken"),
    (MealSlot::Snack, "Hard Boiled Eggs"),
];

const HIGH_PROTEIN_MEALS: MealRow = [
    (MealSlot::Breakfast, "Egg White Frittata with Turkey"),
    (MealSlot::Lunch, "Grilled Chicken Breast with Quinoa"),
    (MealSlot::Dinner, "Lean Beef Stir-Fry"),
    (MealSlot::Snack, "Cottage Cheese & Pineapple"),
];

const HIGH_CARB_MEALS: MealRow = [
    (MealSlot::Breakfast, "Oatmeal with Banana & Honey"),
    (MealSlot::Lunch, "Pasta Primavera"),
    (MealSlot::Dinner, "Baked Potato with Beans"),
    (MealSlot::Snack, "Energy Bar & Fruit"),
];

fn meal_row(diet: EffectiveDietType) -> Option<&'static MealRow> {
    match diet {
        EffectiveDietType::Keto => Some(&KETO_MEALS),
        EffectiveDietType::Vegan => Some(&VEGAN_MEALS),
        EffectiveDietType::Balanced => Some(&BALANCED_MEALS),
        EffectiveDietType::LowCarb => Some(&LOW_CARB_MEALS),
        EffectiveDietType::HighProtein => Some(&HIGH_PROTEIN_MEALS),
        EffectiveDietType::HighCarb => Some(&HIGH_CARB_MEALS),
        EffectiveDietType::Vegetarian | EffectiveDietType::Paleo => None,
    }
}

/// Look up a suggestion by diet row and slot name.
///
/// Diets without a row use the balanced row; an unknown slot name yields
/// [`FALLBACK_SUGGESTION`].
pub fn meal_suggestion(diet: EffectiveDietType, slot: &str) -> &'static str {
    let row = meal_row(diet).unwrap_or(&BALANCED_MEALS);
    slot.parse::<MealSlot>()
        .ok()
        .and_then(|slot| row.iter().find(|(s, _)| *s == slot))
        .map(|(_, suggestion)| *suggestion)
        .unwrap_or(FALLBACK_SUGGESTION)
}

// ============================================================================
// Daily Menu and Plan
// ============================================================================

const MENU_ORDER: [MealSlot; 4] = [
    MealSlot::Breakfast,
    MealSlot::Lunch,
    MealSlot::Snack,
    MealSlot::Dinner,
];

/// Slots for a day with `meals_per_day` meals, capped at four.
///
/// A three-meal day ends on dinner rather than a snack.
pub fn menu_slots(meals_per_day: u32) -> Vec<MealSlot> {
    let count = (meals_per_day as usize).min(MENU_ORDER.len());
    MENU_ORDER
        .iter()
        .take(count)
        .enumerate()
        .map(|(index, slot)| {
            if meals_per_day == 3 && index == 2 {
                MealSlot::Dinner
            } else {
                *slot
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub slot: MealSlot,
    pub approx_calories: u32,
    pub suggestion: String,
}

pub fn daily_menu(
    diet_type: DietType,
    ratios: MacroRatios,
    calorie_target: u32,
    meals_per_day: u32,
) -> Vec<MenuItem> {
    if meals_per_day == 0 {
        return Vec::new();
    }
    let effective = effective_diet_type(diet_type, ratios);
    let per_meal = (f64::from(calorie_target) / f64::from(meals_per_day)).round() as u32;

    menu_slots(meals_per_day)
        .into_iter()
        .map(|slot| MenuItem {
            slot,
            approx_calories: per_meal,
            suggestion: meal_suggestion(effective, slot.as_str()).to_string(),
        })
        .collect()
}

/// Everything the nutrition view shows for one profile and split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlan {
    pub diet_type: DietType,
    pub effective_diet_type: EffectiveDietType,
    pub calorie_target: u32,
    pub ratios: MacroRatios,
    pub ratios_total: u32,
    pub ratios_balanced: bool,
    pub macros: MacroGrams,
    pub menu: Vec<MenuItem>,
}

impl NutritionPlan {
    /// Build a plan; `ratios` defaults to the diet type's starting split.
    pub fn for_preferences(prefs: &NutritionPreferences, ratios: Option<MacroRatios>) -> Self {
        let ratios = ratios.unwrap_or_else(|| MacroRatios::for_diet(prefs.diet_type));
        Self {
            diet_type: prefs.diet_type,
            effective_diet_type: effective_diet_type(prefs.diet_type, ratios),
            calorie_target: prefs.calorie_target,
            ratios,
            ratios_total: ratios.total(),
            ratios_balanced: ratios.is_balanced(),
            macros: derive_macros(prefs.calorie_target, ratios),
            menu: daily_menu(prefs.diet_type, ratios, prefs.calorie_target, prefs.meals_per_day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_derive_macros_exact_rounding() {
        let grams = derive_macros(2000, MacroRatios::new(30, 40, 30));
        assert_eq!(
            grams,
            MacroGrams {
                protein_g: 150,
                carbs_g: 200,
                fats_g: 67
            }
        );
    }

    #[test]
    fn test_derive_macros_keto() {
        let grams = derive_macros(1800, MacroRatios::for_diet(DietType::Keto));
        // 450/4, 90/4, 1260/9
        assert_eq!(grams.protein_g, 113);
        assert_eq!(grams.carbs_g, 23);
        assert_eq!(grams.fats_g, 140);
    }

    #[test]
    fn test_normalize_even_split() {
        let normalized = normalize(MacroRatios::new(20, 20, 20));
        assert_eq!(normalized, MacroRatios::new(33, 33, 33));
    }

    #[test]
    fn test_normalize_zero_is_noop() {
        let zero = MacroRatios::new(0, 0, 0);
        assert_eq!(normalize(zero), zero);
    }

    #[test]
    fn test_balance_flag() {
        assert!(MacroRatios::new(30, 40, 30).is_balanced());
        assert!(!MacroRatios::new(30, 40, 40).is_balanced());
        assert_eq!(MacroRatios::new(30, 40, 40).total(), 110);
    }

    #[rstest]
    #[case(DietType::Balanced, MacroRatios::new(30, 40, 30), EffectiveDietType::Balanced)]
    #[case(DietType::Paleo, MacroRatios::new(35, 30, 35), EffectiveDietType::Paleo)]
    #[case(DietType::Balanced, MacroRatios::new(25, 5, 70), EffectiveDietType::Keto)]
    #[case(DietType::Keto, MacroRatios::new(20, 60, 20), EffectiveDietType::HighCarb)]
    #[case(DietType::Vegan, MacroRatios::new(45, 35, 20), EffectiveDietType::HighProtein)]
    // fat and protein both extreme: protein is checked last
    #[case(DietType::Balanced, MacroRatios::new(45, 0, 55), EffectiveDietType::HighProtein)]
    fn test_effective_diet_type(
        #[case] diet: DietType,
        #[case] ratios: MacroRatios,
        #[case] expected: EffectiveDietType,
    ) {
        assert_eq!(effective_diet_type(diet, ratios), expected);
    }

    #[test]
    fn test_meal_suggestion_lookup() {
        assert_eq!(
            meal_suggestion(EffectiveDietType::Keto, "Breakfast"),
            "Avocado & Bacon Omelet"
        );
        assert_eq!(meal_suggestion(EffectiveDietType::HighCarb, "Lunch"), "Pasta Primavera");
    }

    #[test]
    fn test_meal_suggestion_falls_back_to_balanced_row() {
        assert_eq!(
            meal_suggestion(EffectiveDietType::Vegetarian, "Dinner"),
            "Turkey Meatballs with Whole Wheat Pasta"
        );
    }

    #[test]
    fn test_meal_suggestion_unknown_slot() {
        assert_eq!(meal_suggestion(EffectiveDietType::Vegan, "Brunch"), FALLBACK_SUGGESTION);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![MealSlot::Breakfast])]
    #[case(2, vec![MealSlot::Breakfast, MealSlot::Lunch])]
    #[case(3, vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner])]
    #[case(4, vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Snack, MealSlot::Dinner])]
    #[case(6, vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Snack, MealSlot::Dinner])]
    fn test_menu_slots(#[case] meals: u32, #[case] expected: Vec<MealSlot>) {
        assert_eq!(menu_slots(meals), expected);
    }

    #[test]
    fn test_daily_menu_splits_calories() {
        let menu = daily_menu(DietType::Vegan, MacroRatios::new(30, 40, 30), 2000, 3);
        assert_eq!(menu.len(), 3);
        assert!(menu.iter().all(|item| item.approx_calories == 667));
        assert_eq!(menu[2].slot, MealSlot::Dinner);
        assert_eq!(menu[2].suggestion, "Lentil Curry with Spinach");
    }

    #[test]
    fn test_daily_menu_zero_meals() {
        assert!(daily_menu(DietType::Balanced, MacroRatios::new(30, 40, 30), 2000, 0).is_empty());
    }

    #[test]
    fn test_nutrition_plan_defaults_to_diet_split() {
        let prefs = NutritionPreferences {
            diet_type: DietType::LowCarb,
            ..Default::default()
        };
        let plan = NutritionPlan::for_preferences(&prefs, None);
        assert_eq!(plan.ratios, MacroRatios::new(40, 20, 40));
        assert!(plan.ratios_balanced);
        assert_eq!(plan.effective_diet_type, EffectiveDietType::LowCarb);
        assert_eq!(plan.macros.protein_g, 200);
        assert_eq!(plan.menu.len(), 3);
    }

    #[test]
    fn test_nutrition_plan_flags_off_total_split() {
        let plan = NutritionPlan::for_preferences(
            &NutritionPreferences::default(),
            Some(MacroRatios::new(50, 30, 30)),
        );
        assert_eq!(plan.ratios_total, 110);
        assert!(!plan.ratios_balanced);
        assert_eq!(plan.effective_diet_type, EffectiveDietType::HighProtein);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: normalizing a non-zero split lands within rounding of 100
        #[test]
        fn prop_normalize_sums_near_100(p in 0u32..200, c in 0u32..200, f in 1u32..200) {
            let total = normalize(MacroRatios::new(p, c, f)).total();
            prop_assert!((98..=102).contains(&total), "total was {}", total);
        }

        /// Property: more calories never means fewer grams
        #[test]
        fn prop_macros_monotonic_in_calories(kcal in 1200u32..4000, p in 0u32..=100) {
            let ratios = MacroRatios::new(p, 100 - p, 0);
            let lower = derive_macros(kcal, ratios);
            let higher = derive_macros(kcal + 1, ratios);
            prop_assert!(higher.protein_g >= lower.protein_g);
            prop_assert!(higher.carbs_g >= lower.carbs_g);
        }
    }
}
