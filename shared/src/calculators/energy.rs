//! Energy expenditure calculators
//!
//! BMR by Mifflin-St Jeor, Harris-Benedict or Katch-McArdle, TDEE-based
//! calorie targets, and MET-based calories burned.

use crate::errors::InvalidInputError;
use crate::registry::{FormulaDefinition, LINEAR_BMR_FORMULAS, MET_ACTIVITIES};
use crate::types::{ActivityLevel, BiologicalSex};
use crate::units::{round_to, round_to_whole};
use crate::validation::{
    require_in_range, require_percentage, validate_age, validate_duration_minutes,
    validate_height_weight, validate_weight,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// BMR
// ============================================================================

/// BMR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BmrFormula {
    /// Mifflin-St Jeor (most accurate for most people)
    #[default]
    MifflinStJeor,
    /// Harris-Benedict, Roza & Shizgal revision
    HarrisBenedict,
    /// Katch-McArdle (requires body fat %)
    #[serde(rename = "katch_mcardle")]
    KatchMcArdle,
}

impl BmrFormula {
    /// Registry id of the linear formulas; Katch-McArdle is not linear in
    /// weight/height/age and lives outside the table.
    fn registry_id(&self) -> Option<&'static str> {
        match self {
            BmrFormula::MifflinStJeor => Some("mifflin_st_jeor"),
            BmrFormula::HarrisBenedict => Some("harris_benedict"),
            BmrFormula::KatchMcArdle => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.registry_id() {
            Some(id) => LINEAR_BMR_FORMULAS.require(id).label(),
            None => "Katch-McArdle (1996)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: BiologicalSex,
    #[serde(default)]
    pub formula: BmrFormula,
    /// Only used by Katch-McArdle
    #[serde(default)]
    pub body_fat_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmrResult {
    /// kcal/day, whole number
    pub bmr_kcal: u32,
    pub formula: BmrFormula,
    pub formula_label: &'static str,
}

fn validate_bmr_input(input: &BmrInput) -> Result<(), InvalidInputError> {
    validate_height_weight(input.height_cm, input.weight_kg)?;
    validate_age(input.age_years)?;
    match (input.formula, input.body_fat_percent) {
        (BmrFormula::KatchMcArdle, None) => Err(InvalidInputError::new(
            "body_fat_percent",
            "Body fat percentage is required for Katch-McArdle",
        )),
        (_, Some(body_fat)) => require_percentage(
            "body_fat_percent",
            body_fat,
            "Body fat percentage must be greater than 0 and at most 100",
        ),
        _ => Ok(()),
    }
}

/// Unrounded BMR of a validated input
fn raw_bmr(input: &BmrInput) -> f64 {
    match input.formula.registry_id() {
        Some(id) => LINEAR_BMR_FORMULAS
            .require(id)
            .coefficients(input.sex)
            .evaluate(input.weight_kg, input.height_cm, input.age_years),
        None => {
            // BMR = 370 + 21.6 × LBM(kg)
            let body_fat = input.body_fat_percent.unwrap_or_default();
            let lean_body_mass = input.weight_kg * (1.0 - body_fat / 100.0);
            370.0 + 21.6 * lean_body_mass
        }
    }
}

/// Calculate Basal Metabolic Rate
///
/// Mifflin-St Jeor, men: 10 × kg + 6.25 × cm − 5 × age + 5 (women: −161)
pub fn calculate_bmr(input: &BmrInput) -> Result<BmrResult, InvalidInputError> {
    validate_bmr_input(input)?;

    Ok(BmrResult {
        bmr_kcal: round_to_whole(raw_bmr(input)),
        formula: input.formula,
        formula_label: input.formula.label(),
    })
}

calculator!(
    BmrCalculator, "bmr", BmrInput => BmrResult,
    |input| calculate_bmr(input)
);

// ============================================================================
// Calorie Needs (TDEE)
// ============================================================================

/// Weight-loss targets are never set below this intake
pub const MIN_SAFE_CALORIES: f64 = 1200.0;

/// Daily deficit for ~0.5 kg/week
const STANDARD_ADJUSTMENT_KCAL: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieNeedsInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: u32,
    pub sex: BiologicalSex,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub formula: BmrFormula,
    #[serde(default)]
    pub body_fat_percent: Option<f64>,
}

impl CalorieNeedsInput {
    fn bmr_input(&self) -> BmrInput {
        BmrInput {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age_years,
            sex: self.sex,
            formula: self.formula,
            body_fat_percent: self.body_fat_percent,
        }
    }
}

/// TDEE with daily intake targets, all kcal/day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieNeedsResult {
    pub bmr_kcal: u32,
    pub tdee_kcal: u32,
    pub activity_level: ActivityLevel,
    pub activity_multiplier: f64,
    pub maintenance_kcal: u32,
    /// ~0.25 kg/week loss
    pub mild_loss_kcal: u32,
    /// ~0.5 kg/week loss
    pub loss_kcal: u32,
    /// ~0.5 kg/week gain
    pub gain_kcal: u32,
    pub formula_label: &'static str,
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_calorie_needs(
    input: &CalorieNeedsInput,
) -> Result<CalorieNeedsResult, InvalidInputError> {
    let bmr_input = input.bmr_input();
    validate_bmr_input(&bmr_input)?;

    let bmr = raw_bmr(&bmr_input);
    let multiplier = input.activity_level.multiplier();
    let tdee = bmr * multiplier;
    let loss_target = |deficit: f64| round_to_whole((tdee - deficit).max(MIN_SAFE_CALORIES));

    Ok(CalorieNeedsResult {
        bmr_kcal: round_to_whole(bmr),
        tdee_kcal: round_to_whole(tdee),
        activity_level: input.activity_level,
        activity_multiplier: multiplier,
        maintenance_kcal: round_to_whole(tdee),
        mild_loss_kcal: loss_target(STANDARD_ADJUSTMENT_KCAL / 2.0),
        loss_kcal: loss_target(STANDARD_ADJUSTMENT_KCAL),
        gain_kcal: round_to_whole(tdee + STANDARD_ADJUSTMENT_KCAL),
        formula_label: input.formula.label(),
    })
}

calculator!(
    CalorieNeedsCalculator, "calorie-needs", CalorieNeedsInput => CalorieNeedsResult,
    |input| calculate_calorie_needs(input)
);

// ============================================================================
// Calories Burned (MET)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloriesBurnedInput {
    pub weight_kg: f64,
    pub duration_minutes: f64,
    /// MET registry id, e.g. "running"
    #[serde(default)]
    pub activity: Option<String>,
    /// Explicit MET value, used when no activity is given
    #[serde(default)]
    pub met: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaloriesBurnedResult {
    pub calories_kcal: u32,
    pub met: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_label: Option<&'static str>,
    /// kcal per minute, one decimal place
    pub kcal_per_minute: f64,
}

/// kcal = MET × 3.5 × kg / 200 × minutes
pub fn calculate_calories_burned(
    input: &CaloriesBurnedInput,
) -> Result<CaloriesBurnedResult, InvalidInputError> {
    validate_weight(input.weight_kg)?;
    validate_duration_minutes(input.duration_minutes)?;

    let (met, activity_label) = match (&input.activity, input.met) {
        (Some(id), _) => {
            let activity = MET_ACTIVITIES.lookup("activity", id)?;
            (activity.met, Some(activity.label()))
        }
        (None, Some(met)) => {
            require_in_range("met", met, 1.0, 25.0, "MET must be between 1 and 25")?;
            (met, None)
        }
        (None, None) => {
            return Err(InvalidInputError::new(
                "activity",
                "Either an activity or a MET value is required",
            ))
        }
    };

    let per_minute = met * 3.5 * input.weight_kg / 200.0;
    Ok(CaloriesBurnedResult {
        calories_kcal: round_to_whole(per_minute * input.duration_minutes),
        met,
        activity_label,
        kcal_per_minute: round_to(per_minute, 1),
    })
}

calculator!(
    CaloriesBurnedCalculator, "calories-burned", CaloriesBurnedInput => CaloriesBurnedResult,
    |input| calculate_calories_burned(input)
);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn bmr_input(formula: BmrFormula, sex: BiologicalSex) -> BmrInput {
        BmrInput {
            weight_kg: 80.0,
            height_cm: 180.0,
            age_years: 30,
            sex,
            formula,
            body_fat_percent: None,
        }
    }

    // =========================================================================
    // BMR Tests
    // =========================================================================

    #[rstest]
    #[case(BmrFormula::MifflinStJeor, BiologicalSex::Male, 1780)]
    #[case(BmrFormula::MifflinStJeor, BiologicalSex::Female, 1614)]
    #[case(BmrFormula::HarrisBenedict, BiologicalSex::Male, 1854)]
    #[case(BmrFormula::HarrisBenedict, BiologicalSex::Female, 1615)]
    fn test_linear_bmr(#[case] formula: BmrFormula, #[case] sex: BiologicalSex, #[case] expected: u32) {
        let result = calculate_bmr(&bmr_input(formula, sex)).unwrap();
        assert_eq!(result.bmr_kcal, expected);
        assert_eq!(result.formula, formula);
    }

    #[test]
    fn test_katch_mcardle_requires_body_fat() {
        let mut input = bmr_input(BmrFormula::KatchMcArdle, BiologicalSex::Male);
        let err = calculate_bmr(&input).unwrap_err();
        assert_eq!(err.field, "body_fat_percent");

        input.body_fat_percent = Some(20.0);
        // 370 + 21.6 × 64
        assert_eq!(calculate_bmr(&input).unwrap().bmr_kcal, 1752);
    }

    #[test]
    fn test_bmr_rejects_out_of_range_age() {
        let mut input = bmr_input(BmrFormula::MifflinStJeor, BiologicalSex::Male);
        input.age_years = 0;
        assert_eq!(calculate_bmr(&input).unwrap_err().field, "age_years");
    }

    #[test]
    fn test_bmr_formula_labels() {
        assert_eq!(BmrFormula::MifflinStJeor.label(), "Mifflin-St Jeor (1990)");
        assert_eq!(BmrFormula::KatchMcArdle.label(), "Katch-McArdle (1996)");
    }

    #[rstest]
    #[case(BmrFormula::MifflinStJeor, "mifflin_st_jeor")]
    #[case(BmrFormula::HarrisBenedict, "harris_benedict")]
    #[case(BmrFormula::KatchMcArdle, "katch_mcardle")]
    fn test_bmr_formula_wire_names(#[case] formula: BmrFormula, #[case] name: &str) {
        assert_eq!(serde_json::to_value(formula).unwrap(), name);
        let parsed: BmrFormula = serde_json::from_value(serde_json::json!(name)).unwrap();
        assert_eq!(parsed, formula);
    }

    // =========================================================================
    // Calorie Needs Tests
    // =========================================================================

    #[test]
    fn test_calorie_needs() {
        let input = CalorieNeedsInput {
            weight_kg: 80.0,
            height_cm: 180.0,
            age_years: 30,
            sex: BiologicalSex::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            formula: BmrFormula::MifflinStJeor,
            body_fat_percent: None,
        };
        let result = calculate_calorie_needs(&input).unwrap();

        // 1780 × 1.55 = 2759
        assert_eq!(result.bmr_kcal, 1780);
        assert_eq!(result.tdee_kcal, 2759);
        assert_eq!(result.maintenance_kcal, 2759);
        assert_eq!(result.mild_loss_kcal, 2509);
        assert_eq!(result.loss_kcal, 2259);
        assert_eq!(result.gain_kcal, 3259);
        assert_eq!(result.activity_multiplier, 1.55);
    }

    #[test]
    fn test_loss_target_never_below_floor() {
        let input = CalorieNeedsInput {
            weight_kg: 45.0,
            height_cm: 150.0,
            age_years: 70,
            sex: BiologicalSex::Female,
            activity_level: ActivityLevel::Sedentary,
            formula: BmrFormula::MifflinStJeor,
            body_fat_percent: None,
        };
        let result = calculate_calorie_needs(&input).unwrap();
        assert_eq!(result.loss_kcal, 1200);
        assert!(result.tdee_kcal < 1700);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: TDEE > BMR (activity multiplier > 1)
        #[test]
        fn prop_tdee_greater_than_bmr(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20u32..60
        ) {
            let input = CalorieNeedsInput {
                weight_kg: weight,
                height_cm: height,
                age_years: age,
                sex: BiologicalSex::Male,
                activity_level: ActivityLevel::ModeratelyActive,
                formula: BmrFormula::MifflinStJeor,
                body_fat_percent: None,
            };
            let result = calculate_calorie_needs(&input).unwrap();
            prop_assert!(result.tdee_kcal > result.bmr_kcal);
        }

        /// Property: Male BMR > Female BMR (same stats)
        #[test]
        fn prop_male_bmr_higher(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20u32..60
        ) {
            let mut input = bmr_input(BmrFormula::MifflinStJeor, BiologicalSex::Male);
            input.weight_kg = weight;
            input.height_cm = height;
            input.age_years = age;
            let male = calculate_bmr(&input).unwrap().bmr_kcal;
            input.sex = BiologicalSex::Female;
            let female = calculate_bmr(&input).unwrap().bmr_kcal;
            prop_assert!(male > female);
        }
    }

    // =========================================================================
    // Calories Burned Tests
    // =========================================================================

    #[test]
    fn test_calories_burned_from_registry_activity() {
        let input = CaloriesBurnedInput {
            weight_kg: 70.0,
            duration_minutes: 30.0,
            activity: Some("running".to_string()),
            met: None,
        };
        let result = calculate_calories_burned(&input).unwrap();
        // 9.8 × 3.5 × 70 / 200 × 30 = 360.15
        assert_eq!(result.calories_kcal, 360);
        assert_eq!(result.activity_label, Some("Running, 6 mph"));
        assert_eq!(result.kcal_per_minute, 12.0);
    }

    #[test]
    fn test_calories_burned_from_explicit_met() {
        let input = CaloriesBurnedInput {
            weight_kg: 80.0,
            duration_minutes: 60.0,
            activity: None,
            met: Some(5.0),
        };
        assert_eq!(calculate_calories_burned(&input).unwrap().calories_kcal, 420);
    }

    #[test]
    fn test_calories_burned_unknown_activity() {
        let input = CaloriesBurnedInput {
            weight_kg: 80.0,
            duration_minutes: 60.0,
            activity: Some("underwater_chess".to_string()),
            met: None,
        };
        assert_eq!(calculate_calories_burned(&input).unwrap_err().field, "activity");

        let input = CaloriesBurnedInput {
            activity: None,
            ..input
        };
        assert!(calculate_calories_burned(&input).is_err());
    }

    #[test]
    fn test_calories_burned_magnitude_bounds() {
        // Heaviest weight, hardest MET and a full day stay well inside u32
        let input = CaloriesBurnedInput {
            weight_kg: 500.0,
            duration_minutes: 1440.0,
            activity: None,
            met: Some(25.0),
        };
        assert_eq!(calculate_calories_burned(&input).unwrap().calories_kcal, 315_000);

        let too_long = CaloriesBurnedInput {
            duration_minutes: 1e12,
            ..input.clone()
        };
        assert_eq!(
            calculate_calories_burned(&too_long).unwrap_err().field,
            "duration_minutes"
        );
        let too_heavy = CaloriesBurnedInput {
            weight_kg: 1e10,
            ..input
        };
        assert_eq!(calculate_calories_burned(&too_heavy).unwrap_err().field, "weight_kg");
    }
}
