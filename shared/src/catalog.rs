//! Calculator catalog
//!
//! The list of calculators the site offers, and a JSON entry point that runs
//! any of them by slug. The HTTP API and the WASM bindings both go through
//! [`evaluate`].

use crate::calculators::*;
use crate::errors::CatalogError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Grouping used for navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorCategory {
    BodyComposition,
    Energy,
    Nutrition,
    Cardio,
    Reproductive,
}

type Evaluator = fn(Value) -> Result<Value, CatalogError>;

/// One catalog entry
#[derive(Clone, Copy, Serialize)]
pub struct CalculatorInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub category: CalculatorCategory,
    pub description: &'static str,
    /// Selectable formula ids, empty when there is no choice
    pub formulas: &'static [&'static str],
    #[serde(skip)]
    evaluate: Evaluator,
}

impl CalculatorInfo {
    /// Run this calculator on a JSON input
    pub fn evaluate(&self, input: Value) -> Result<Value, CatalogError> {
        (self.evaluate)(input)
    }
}

impl fmt::Debug for CalculatorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorInfo")
            .field("slug", &self.slug)
            .field("category", &self.category)
            .finish()
    }
}

fn run<C: Calculator>(input: Value) -> Result<Value, CatalogError> {
    let input: C::Input = serde_json::from_value(input).map_err(CatalogError::MalformedInput)?;
    let output = C::compute(&input)?;
    serde_json::to_value(output).map_err(CatalogError::EncodeOutput)
}

/// Every calculator, in display order
pub static CALCULATORS: &[CalculatorInfo] = &[
    CalculatorInfo {
        slug: BmiCalculator::SLUG,
        name: "BMI Calculator",
        category: CalculatorCategory::BodyComposition,
        description: "Body mass index, its WHO category and the healthy weight range for your height",
        formulas: &[],
        evaluate: run::<BmiCalculator>,
    },
    CalculatorInfo {
        slug: BodySurfaceAreaCalculator::SLUG,
        name: "Body Surface Area Calculator",
        category: CalculatorCategory::BodyComposition,
        description: "Body surface area in square meters",
        formulas: &["mosteller", "du_bois", "haycock"],
        evaluate: run::<BodySurfaceAreaCalculator>,
    },
    CalculatorInfo {
        slug: BodyFatCalculator::SLUG,
        name: "Body Fat Calculator",
        category: CalculatorCategory::BodyComposition,
        description: "Body fat percentage from tape measurements (US Navy method)",
        formulas: &[],
        evaluate: run::<BodyFatCalculator>,
    },
    CalculatorInfo {
        slug: LeanBodyMassCalculator::SLUG,
        name: "Lean Body Mass Calculator",
        category: CalculatorCategory::BodyComposition,
        description: "Lean body mass by the Boer formula",
        formulas: &[],
        evaluate: run::<LeanBodyMassCalculator>,
    },
    CalculatorInfo {
        slug: IdealWeightCalculator::SLUG,
        name: "Ideal Weight Calculator",
        category: CalculatorCategory::BodyComposition,
        description: "Ideal body weight by four published formulas with their average and range",
        formulas: &["devine", "robinson", "miller", "hamwi"],
        evaluate: run::<IdealWeightCalculator>,
    },
    CalculatorInfo {
        slug: BmrCalculator::SLUG,
        name: "BMR Calculator",
        category: CalculatorCategory::Energy,
        description: "Calories burned at complete rest",
        formulas: &["mifflin_st_jeor", "harris_benedict", "katch_mcardle"],
        evaluate: run::<BmrCalculator>,
    },
    CalculatorInfo {
        slug: CalorieNeedsCalculator::SLUG,
        name: "Calorie Calculator",
        category: CalculatorCategory::Energy,
        description: "Daily calories to maintain, lose or gain weight",
        formulas: &["mifflin_st_jeor", "harris_benedict", "katch_mcardle"],
        evaluate: run::<CalorieNeedsCalculator>,
    },
    CalculatorInfo {
        slug: CaloriesBurnedCalculator::SLUG,
        name: "Calories Burned Calculator",
        category: CalculatorCategory::Energy,
        description: "Calories burned during an activity from its MET value",
        formulas: &[],
        evaluate: run::<CaloriesBurnedCalculator>,
    },
    CalculatorInfo {
        slug: CarbIntakeCalculator::SLUG,
        name: "Carb Intake Calculator",
        category: CalculatorCategory::Nutrition,
        description: "Grams of carbohydrate for a share of your daily calories",
        formulas: &[],
        evaluate: run::<CarbIntakeCalculator>,
    },
    CalculatorInfo {
        slug: FatIntakeCalculator::SLUG,
        name: "Fat Intake Calculator",
        category: CalculatorCategory::Nutrition,
        description: "Grams of fat for a share of your daily calories",
        formulas: &[],
        evaluate: run::<FatIntakeCalculator>,
    },
    CalculatorInfo {
        slug: ProteinIntakeCalculator::SLUG,
        name: "Protein Intake Calculator",
        category: CalculatorCategory::Nutrition,
        description: "Grams of protein for a share of your daily calories",
        formulas: &[],
        evaluate: run::<ProteinIntakeCalculator>,
    },
    CalculatorInfo {
        slug: WaterIntakeCalculator::SLUG,
        name: "Water Intake Calculator",
        category: CalculatorCategory::Nutrition,
        description: "Daily water intake for your weight and activity level",
        formulas: &[],
        evaluate: run::<WaterIntakeCalculator>,
    },
    CalculatorInfo {
        slug: HeartRateZonesCalculator::SLUG,
        name: "Heart Rate Zone Calculator",
        category: CalculatorCategory::Cardio,
        description: "Five training zones by percent of max or the Karvonen method",
        formulas: &["percent_of_max", "karvonen"],
        evaluate: run::<HeartRateZonesCalculator>,
    },
    CalculatorInfo {
        slug: Vo2MaxCalculator::SLUG,
        name: "VO2 Max Calculator",
        category: CalculatorCategory::Cardio,
        description: "VO2 max from the Rockport walk or the Cooper run",
        formulas: &["rockport", "cooper"],
        evaluate: run::<Vo2MaxCalculator>,
    },
    CalculatorInfo {
        slug: OvulationCalculator::SLUG,
        name: "Ovulation Calculator",
        category: CalculatorCategory::Reproductive,
        description: "Ovulation day, fertile window and next period",
        formulas: &[],
        evaluate: run::<OvulationCalculator>,
    },
    CalculatorInfo {
        slug: DueDateCalculator::SLUG,
        name: "Due Date Calculator",
        category: CalculatorCategory::Reproductive,
        description: "Estimated due date and gestational age by Naegele's rule",
        formulas: &[],
        evaluate: run::<DueDateCalculator>,
    },
];

/// Look up a catalog entry by slug
pub fn find(slug: &str) -> Option<&'static CalculatorInfo> {
    CALCULATORS.iter().find(|info| info.slug == slug)
}

/// Run the calculator named by `slug` on a JSON input
pub fn evaluate(slug: &str, input: Value) -> Result<Value, CatalogError> {
    find(slug)
        .ok_or_else(|| CatalogError::UnknownCalculator(slug.to_string()))?
        .evaluate(input)
}
