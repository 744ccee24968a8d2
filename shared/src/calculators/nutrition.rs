//! Nutrition calculators
//!
//! Macronutrient grams from a calorie budget, and daily water intake.

use crate::errors::InvalidInputError;
use crate::registry::FormulaDefinition;
use crate::types::ActivityLevel;
use crate::units::{round_to, round_to_whole, ML_PER_US_CUP};
use crate::validation::{require_percentage, validate_calories, validate_weight};
use serde::{Deserialize, Serialize};

// ============================================================================
// Macronutrient Intake
// ============================================================================

/// Energy-yielding nutrient with its Atwater factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macronutrient {
    Carbohydrate,
    Protein,
    Fat,
}

impl Macronutrient {
    /// kcal per gram
    pub fn calories_per_gram(&self) -> f64 {
        match self {
            Macronutrient::Carbohydrate => 4.0,
            Macronutrient::Protein => 4.0,
            Macronutrient::Fat => 9.0,
        }
    }

    fn percent_message(&self) -> &'static str {
        match self {
            Macronutrient::Carbohydrate => "Carb percentage must be greater than 0 and at most 100",
            Macronutrient::Protein => {
                "Protein percentage must be greater than 0 and at most 100"
            }
            Macronutrient::Fat => "Fat percentage must be greater than 0 and at most 100",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroIntakeInput {
    /// Daily calorie budget
    pub total_calories: f64,
    /// Share of the budget for this nutrient, in (0, 100]
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroIntakeResult {
    pub nutrient: Macronutrient,
    pub total_calories: f64,
    /// Passed through unrounded
    pub percent: f64,
    /// kcal from this nutrient, whole number
    pub calories: u32,
    /// Grams, whole number, derived from the rounded calories
    pub grams: u32,
}

/// Split a calorie budget into grams of one macronutrient
///
/// calories = total × percent / 100; grams = calories / kcal-per-gram
pub fn calculate_macro_intake(
    nutrient: Macronutrient,
    total_calories: f64,
    percent: f64,
) -> Result<MacroIntakeResult, InvalidInputError> {
    validate_calories("total_calories", total_calories)?;
    require_percentage("percent", percent, nutrient.percent_message())?;

    let calories = round_to_whole(total_calories * percent / 100.0);
    let grams = round_to_whole(calories as f64 / nutrient.calories_per_gram());

    Ok(MacroIntakeResult {
        nutrient,
        total_calories,
        percent,
        calories,
        grams,
    })
}

/// Carbohydrate grams at 4 kcal/g
pub fn calculate_carb_intake(
    total_calories: f64,
    percent: f64,
) -> Result<MacroIntakeResult, InvalidInputError> {
    calculate_macro_intake(Macronutrient::Carbohydrate, total_calories, percent)
}

/// Fat grams at 9 kcal/g
pub fn calculate_fat_intake(
    total_calories: f64,
    percent: f64,
) -> Result<MacroIntakeResult, InvalidInputError> {
    calculate_macro_intake(Macronutrient::Fat, total_calories, percent)
}

/// Protein grams at 4 kcal/g
pub fn calculate_protein_intake(
    total_calories: f64,
    percent: f64,
) -> Result<MacroIntakeResult, InvalidInputError> {
    calculate_macro_intake(Macronutrient::Protein, total_calories, percent)
}

calculator!(
    CarbIntakeCalculator, "carb-intake", MacroIntakeInput => MacroIntakeResult,
    |input| calculate_carb_intake(input.total_calories, input.percent)
);

calculator!(
    FatIntakeCalculator, "fat-intake", MacroIntakeInput => MacroIntakeResult,
    |input| calculate_fat_intake(input.total_calories, input.percent)
);

calculator!(
    ProteinIntakeCalculator, "protein-intake", MacroIntakeInput => MacroIntakeResult,
    |input| calculate_protein_intake(input.total_calories, input.percent)
);

// ============================================================================
// Water Intake
// ============================================================================

/// Baseline hydration: ml per kg of body weight
pub const WATER_ML_PER_KG: f64 = 33.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterIntakeInput {
    pub weight_kg: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterIntakeResult {
    pub ml: u32,
    /// Two decimal places
    pub liters: f64,
    /// US cups, one decimal place
    pub cups: f64,
    pub activity_label: &'static str,
    pub activity_multiplier: f64,
}

/// Recommended daily water intake
///
/// ml = kg × 33 × activity water multiplier
pub fn calculate_water_intake(
    input: &WaterIntakeInput,
) -> Result<WaterIntakeResult, InvalidInputError> {
    validate_weight(input.weight_kg)?;

    let level = input.activity_level.definition();
    let ml = round_to_whole(input.weight_kg * WATER_ML_PER_KG * level.water_multiplier);

    Ok(WaterIntakeResult {
        ml,
        liters: round_to(ml as f64 / 1000.0, 2),
        cups: round_to(ml as f64 / ML_PER_US_CUP, 1),
        activity_label: level.label(),
        activity_multiplier: level.water_multiplier,
    })
}

calculator!(
    WaterIntakeCalculator, "water-intake", WaterIntakeInput => WaterIntakeResult,
    |input| calculate_water_intake(input)
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::Calculator;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // Macronutrient Tests
    // =========================================================================

    #[test]
    fn test_carb_intake_half_of_2000() {
        let result = calculate_carb_intake(2000.0, 50.0).unwrap();
        assert_eq!(result.calories, 1000);
        assert_eq!(result.grams, 250);
        assert_eq!(result.nutrient, Macronutrient::Carbohydrate);
    }

    #[test]
    fn test_fat_intake_thirty_percent_of_2000() {
        let result = calculate_fat_intake(2000.0, 30.0).unwrap();
        assert_eq!(result.calories, 600);
        // 600 / 9 = 66.67
        assert_eq!(result.grams, 67);
    }

    #[test]
    fn test_protein_intake() {
        let result = calculate_protein_intake(2500.0, 25.0).unwrap();
        assert_eq!(result.calories, 625);
        // 156.25
        assert_eq!(result.grams, 156);
    }

    #[test]
    fn test_percent_passes_through_unrounded() {
        let result = calculate_carb_intake(1800.0, 45.5).unwrap();
        assert_eq!(result.percent, 45.5);
        assert_eq!(result.calories, 819);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(100.5)]
    #[case(f64::NAN)]
    fn test_percent_out_of_range_rejected(#[case] percent: f64) {
        let err = calculate_carb_intake(2000.0, percent).unwrap_err();
        assert_eq!(err.field, "percent");
    }

    #[test]
    fn test_percent_of_one_hundred_accepted() {
        let result = calculate_fat_intake(1800.0, 100.0).unwrap();
        assert_eq!(result.calories, 1800);
        assert_eq!(result.grams, 200);
    }

    #[test]
    fn test_zero_calories_rejected() {
        let err = calculate_fat_intake(0.0, 30.0).unwrap_err();
        assert_eq!(err.message, "Total calories must be greater than 0");
    }

    #[test]
    fn test_calorie_budget_upper_bound() {
        let result = calculate_carb_intake(50_000.0, 100.0).unwrap();
        assert_eq!(result.calories, 50_000);
        assert_eq!(result.grams, 12_500);

        let err = calculate_carb_intake(50_000.1, 50.0).unwrap_err();
        assert_eq!(err.field, "total_calories");
        assert_eq!(err.message, "Calorie value unreasonably high");
        assert!(calculate_carb_intake(1e10, 50.0).is_err());
    }

    #[test]
    fn test_calculators_pick_their_nutrient() {
        let input = MacroIntakeInput {
            total_calories: 2000.0,
            percent: 30.0,
        };
        assert_eq!(CarbIntakeCalculator::compute(&input).unwrap().grams, 150);
        assert_eq!(ProteinIntakeCalculator::compute(&input).unwrap().grams, 150);
        assert_eq!(FatIntakeCalculator::compute(&input).unwrap().grams, 67);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// calories = round(total × pct / 100) and grams = round(calories / kcal-per-gram)
        #[test]
        fn prop_macro_rounding(calories in 1.0f64..10000.0, percent in 0.01f64..=100.0) {
            for nutrient in [Macronutrient::Carbohydrate, Macronutrient::Protein, Macronutrient::Fat] {
                let result = calculate_macro_intake(nutrient, calories, percent).unwrap();
                let expected_calories = (calories * percent / 100.0).round();
                prop_assert_eq!(result.calories as f64, expected_calories);
                let expected_grams = (result.calories as f64 / nutrient.calories_per_gram()).round();
                prop_assert_eq!(result.grams as f64, expected_grams);
            }
        }

        /// Identical inputs yield identical results
        #[test]
        fn prop_macro_idempotent(calories in 1.0f64..10000.0, percent in 0.01f64..=100.0) {
            let first = calculate_fat_intake(calories, percent).unwrap();
            let second = calculate_fat_intake(calories, percent).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    // =========================================================================
    // Water Intake Tests
    // =========================================================================

    #[test]
    fn test_hydration_calculation() {
        let result = calculate_water_intake(&WaterIntakeInput {
            weight_kg: 70.0,
            activity_level: ActivityLevel::Sedentary,
        })
        .unwrap();
        assert_eq!(result.ml, 2310);
        assert_eq!(result.liters, 2.31);
        assert_eq!(result.cups, 9.8);

        let result = calculate_water_intake(&WaterIntakeInput {
            weight_kg: 70.0,
            activity_level: ActivityLevel::VeryActive,
        })
        .unwrap();
        assert_eq!(result.ml, 3003);
        assert_eq!(result.activity_label, "Very Active");
    }

    #[test]
    fn test_water_intake_rejects_weight_above_max() {
        let err = calculate_water_intake(&WaterIntakeInput {
            weight_kg: 1e9,
            activity_level: ActivityLevel::Sedentary,
        })
        .unwrap_err();
        assert_eq!(err.field, "weight_kg");
        assert_eq!(err.message, "Weight must be at most 500 kg");

        let heaviest = calculate_water_intake(&WaterIntakeInput {
            weight_kg: 500.0,
            activity_level: ActivityLevel::VeryActive,
        })
        .unwrap();
        assert!(heaviest.ml < u32::MAX);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: More active = more water needed
        #[test]
        fn prop_activity_increases_water(weight in 50.0f64..100.0) {
            let sedentary = calculate_water_intake(&WaterIntakeInput {
                weight_kg: weight,
                activity_level: ActivityLevel::Sedentary,
            }).unwrap();
            let active = calculate_water_intake(&WaterIntakeInput {
                weight_kg: weight,
                activity_level: ActivityLevel::VeryActive,
            }).unwrap();
            prop_assert!(active.ml > sedentary.ml);
        }
    }
}
