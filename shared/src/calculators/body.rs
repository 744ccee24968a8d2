//! Body composition calculators
//!
//! BMI, body surface area, US Navy body fat, Boer lean body mass and the
//! multi-formula ideal weight.

use crate::errors::InvalidInputError;
use crate::registry::{FormulaDefinition, IDEAL_WEIGHT_FORMULAS};
use crate::types::BiologicalSex;
use crate::units::{round_to, DualWeight, HeightUnit};
use crate::validation::{
    validate_circumference, validate_height, validate_height_weight, validate_weight,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    SeverelyUnderweight,
    Underweight,
    Normal,
    Overweight,
    ObeseClass1,
    ObeseClass2,
    ObeseClass3,
}

impl BmiCategory {
    /// Classify a BMI value
    pub fn classify(bmi: f64) -> Self {
        if bmi < 16.0 {
            BmiCategory::SeverelyUnderweight
        } else if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else if bmi < 35.0 {
            BmiCategory::ObeseClass1
        } else if bmi < 40.0 {
            BmiCategory::ObeseClass2
        } else {
            BmiCategory::ObeseClass3
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::SeverelyUnderweight => "Severely Underweight",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal/Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClass1 => "Obese (Class I)",
            BmiCategory::ObeseClass2 => "Obese (Class II)",
            BmiCategory::ObeseClass3 => "Obese (Class III)",
        }
    }
}

/// Lower and upper BMI of the normal range
pub const HEALTHY_BMI_RANGE: (f64, f64) = (18.5, 25.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiResult {
    /// kg/m², one decimal place
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: &'static str,
    pub healthy_weight_min: DualWeight,
    pub healthy_weight_max: DualWeight,
    /// Negative = under the healthy range, positive = over, 0 = in range
    pub distance_from_healthy_kg: f64,
}

/// Calculate BMI, its category and the healthy weight range for the height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> Result<BmiResult, InvalidInputError> {
    validate_height_weight(height_cm, weight_kg)?;

    let height_m = HeightUnit::Meters.from_cm(height_cm);
    let height_m_sq = height_m * height_m;
    let bmi = round_to(weight_kg / height_m_sq, 1);
    let category = BmiCategory::classify(bmi);

    let min_kg = HEALTHY_BMI_RANGE.0 * height_m_sq;
    let max_kg = HEALTHY_BMI_RANGE.1 * height_m_sq;
    let distance = if weight_kg < min_kg {
        weight_kg - min_kg
    } else if weight_kg > max_kg {
        weight_kg - max_kg
    } else {
        0.0
    };

    Ok(BmiResult {
        bmi,
        category,
        category_label: category.description(),
        healthy_weight_min: DualWeight::from_kg(min_kg),
        healthy_weight_max: DualWeight::from_kg(max_kg),
        distance_from_healthy_kg: round_to(distance, 1),
    })
}

calculator!(
    BmiCalculator, "bmi", BmiInput => BmiResult,
    |input| calculate_bmi(input.height_cm, input.weight_kg)
);

// ============================================================================
// Body Surface Area
// ============================================================================

/// Body surface area equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BsaFormula {
    /// sqrt(cm × kg / 3600)
    #[default]
    Mosteller,
    /// 0.007184 × kg^0.425 × cm^0.725
    DuBois,
    /// 0.024265 × kg^0.5378 × cm^0.3964
    Haycock,
}

impl BsaFormula {
    pub fn label(&self) -> &'static str {
        match self {
            BsaFormula::Mosteller => "Mosteller (1987)",
            BsaFormula::DuBois => "Du Bois (1916)",
            BsaFormula::Haycock => "Haycock (1978)",
        }
    }

    /// Unrounded BSA in m²
    fn evaluate(&self, height_cm: f64, weight_kg: f64) -> f64 {
        match self {
            BsaFormula::Mosteller => ((height_cm * weight_kg) / 3600.0).sqrt(),
            BsaFormula::DuBois => 0.007184 * weight_kg.powf(0.425) * height_cm.powf(0.725),
            BsaFormula::Haycock => 0.024265 * weight_kg.powf(0.5378) * height_cm.powf(0.3964),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySurfaceAreaInput {
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default)]
    pub formula: BsaFormula,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySurfaceAreaResult {
    /// m², two decimal places
    pub bsa_m2: f64,
    pub formula: BsaFormula,
    pub formula_label: &'static str,
}

/// Mosteller body surface area in m², rounded to two decimals
pub fn calculate_body_surface_area(height_cm: f64, weight_kg: f64) -> Result<f64, InvalidInputError> {
    let result = calculate_body_surface_area_with(&BodySurfaceAreaInput {
        height_cm,
        weight_kg,
        formula: BsaFormula::Mosteller,
    })?;
    Ok(result.bsa_m2)
}

/// Body surface area with an explicit formula
pub fn calculate_body_surface_area_with(
    input: &BodySurfaceAreaInput,
) -> Result<BodySurfaceAreaResult, InvalidInputError> {
    validate_height_weight(input.height_cm, input.weight_kg)?;

    Ok(BodySurfaceAreaResult {
        bsa_m2: round_to(input.formula.evaluate(input.height_cm, input.weight_kg), 2),
        formula: input.formula,
        formula_label: input.formula.label(),
    })
}

calculator!(
    BodySurfaceAreaCalculator, "body-surface-area", BodySurfaceAreaInput => BodySurfaceAreaResult,
    |input| calculate_body_surface_area_with(input)
);

// ============================================================================
// Body Fat (US Navy)
// ============================================================================

/// Body fat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    Essential,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    /// Classify body fat percentage (American Council on Exercise bands)
    pub fn classify(body_fat_percent: f64, sex: BiologicalSex) -> Self {
        let bounds = match sex {
            BiologicalSex::Male => [6.0, 14.0, 18.0, 25.0],
            BiologicalSex::Female => [14.0, 21.0, 25.0, 32.0],
        };
        if body_fat_percent < bounds[0] {
            BodyFatCategory::Essential
        } else if body_fat_percent < bounds[1] {
            BodyFatCategory::Athletic
        } else if body_fat_percent < bounds[2] {
            BodyFatCategory::Fitness
        } else if body_fat_percent < bounds[3] {
            BodyFatCategory::Average
        } else {
            BodyFatCategory::Obese
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyFatInput {
    pub sex: BiologicalSex,
    pub height_cm: f64,
    pub waist_cm: f64,
    pub neck_cm: f64,
    /// Required for women
    #[serde(default)]
    pub hip_cm: Option<f64>,
    /// When present, fat and lean mass are reported too
    #[serde(default)]
    pub weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyFatResult {
    /// One decimal place
    pub body_fat_percent: f64,
    pub category: BodyFatCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_mass: Option<DualWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lean_mass: Option<DualWeight>,
}

/// US Navy circumference method (Hodgdon & Beckett), metric form
///
/// Men: 495 / (1.0324 − 0.19077·log10(waist − neck) + 0.15456·log10(height)) − 450
/// Women: 495 / (1.29579 − 0.35004·log10(waist + hip − neck) + 0.22100·log10(height)) − 450
pub fn calculate_body_fat(input: &BodyFatInput) -> Result<BodyFatResult, InvalidInputError> {
    validate_height(input.height_cm)?;
    validate_circumference("waist_cm", input.waist_cm, "Waist must be greater than 0")?;
    validate_circumference("neck_cm", input.neck_cm, "Neck must be greater than 0")?;
    if let Some(weight_kg) = input.weight_kg {
        validate_weight(weight_kg)?;
    }

    let log_height = input.height_cm.log10();
    let raw = match input.sex {
        BiologicalSex::Male => {
            if input.waist_cm <= input.neck_cm {
                return Err(InvalidInputError::new(
                    "waist_cm",
                    "Waist must be greater than neck",
                ));
            }
            let denominator = 1.0324 - 0.19077 * (input.waist_cm - input.neck_cm).log10()
                + 0.15456 * log_height;
            495.0 / denominator - 450.0
        }
        BiologicalSex::Female => {
            let hip_cm = input
                .hip_cm
                .ok_or(InvalidInputError::new("hip_cm", "Hip measurement is required for women"))?;
            validate_circumference("hip_cm", hip_cm, "Hip must be greater than 0")?;
            if input.waist_cm + hip_cm <= input.neck_cm {
                return Err(InvalidInputError::new(
                    "waist_cm",
                    "Waist plus hip must be greater than neck",
                ));
            }
            let denominator = 1.29579 - 0.35004 * (input.waist_cm + hip_cm - input.neck_cm).log10()
                + 0.22100 * log_height;
            495.0 / denominator - 450.0
        }
    };

    let percent = raw.clamp(0.0, 100.0);
    let (fat_mass, lean_mass) = match input.weight_kg {
        Some(weight_kg) => {
            let fat_kg = weight_kg * percent / 100.0;
            (
                Some(DualWeight::from_kg(fat_kg)),
                Some(DualWeight::from_kg(weight_kg - fat_kg)),
            )
        }
        None => (None, None),
    };

    let body_fat_percent = round_to(percent, 1);
    Ok(BodyFatResult {
        body_fat_percent,
        category: BodyFatCategory::classify(body_fat_percent, input.sex),
        fat_mass,
        lean_mass,
    })
}

calculator!(
    BodyFatCalculator, "body-fat", BodyFatInput => BodyFatResult,
    |input| calculate_body_fat(input)
);

// ============================================================================
// Lean Body Mass (Boer)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeanBodyMassInput {
    pub sex: BiologicalSex,
    pub height_cm: f64,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeanBodyMassResult {
    pub lean_body_mass: DualWeight,
    /// Share of weight that is not lean mass, one decimal place
    pub body_fat_percent: f64,
}

/// Boer (1984)
///
/// Men: 0.407·kg + 0.267·cm − 19.2
/// Women: 0.252·kg + 0.473·cm − 48.3
pub fn calculate_lean_body_mass(
    input: &LeanBodyMassInput,
) -> Result<LeanBodyMassResult, InvalidInputError> {
    validate_height_weight(input.height_cm, input.weight_kg)?;

    let lbm = match input.sex {
        BiologicalSex::Male => 0.407 * input.weight_kg + 0.267 * input.height_cm - 19.2,
        BiologicalSex::Female => 0.252 * input.weight_kg + 0.473 * input.height_cm - 48.3,
    }
    .clamp(0.0, input.weight_kg);

    Ok(LeanBodyMassResult {
        lean_body_mass: DualWeight::from_kg(lbm),
        body_fat_percent: round_to((input.weight_kg - lbm) / input.weight_kg * 100.0, 1),
    })
}

calculator!(
    LeanBodyMassCalculator, "lean-body-mass", LeanBodyMassInput => LeanBodyMassResult,
    |input| calculate_lean_body_mass(input)
);

// ============================================================================
// Ideal Weight
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealWeightInput {
    pub height_cm: f64,
    pub sex: BiologicalSex,
}

/// One formula's estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaWeight {
    pub id: &'static str,
    pub label: &'static str,
    pub weight: DualWeight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealWeightResult {
    /// In registry order
    pub formulas: Vec<FormulaWeight>,
    pub average: DualWeight,
    pub range_min: DualWeight,
    pub range_max: DualWeight,
}

/// Ideal body weight across every registered formula
///
/// Each formula is `base + per_inch × (height_in − 60)`. Heights short enough
/// to drive any estimate to zero or below are rejected.
pub fn calculate_ideal_weight(
    height_cm: f64,
    sex: BiologicalSex,
) -> Result<IdealWeightResult, InvalidInputError> {
    validate_height(height_cm)?;

    let inches_over_5ft = HeightUnit::Inches.from_cm(height_cm) - 60.0;
    let estimates: Vec<(&'static str, &'static str, f64)> = IDEAL_WEIGHT_FORMULAS
        .iter()
        .map(|formula| {
            let (base, per_inch) = formula.coefficients(sex);
            (formula.id(), formula.label(), base + per_inch * inches_over_5ft)
        })
        .collect();
    if estimates.iter().any(|(_, _, kg)| *kg <= 0.0) {
        return Err(InvalidInputError::new(
            "height_cm",
            "Height is too short for the ideal weight formulas",
        ));
    }

    let count = estimates.len() as f64;
    let average = estimates.iter().map(|(_, _, kg)| kg).sum::<f64>() / count;
    let min = estimates.iter().map(|(_, _, kg)| *kg).fold(f64::INFINITY, f64::min);
    let max = estimates.iter().map(|(_, _, kg)| *kg).fold(f64::NEG_INFINITY, f64::max);

    Ok(IdealWeightResult {
        formulas: estimates
            .into_iter()
            .map(|(id, label, kg)| FormulaWeight {
                id,
                label,
                weight: DualWeight::from_kg(kg),
            })
            .collect(),
        average: DualWeight::from_kg(average),
        range_min: DualWeight::from_kg(min),
        range_max: DualWeight::from_kg(max),
    })
}

calculator!(
    IdealWeightCalculator, "ideal-weight", IdealWeightInput => IdealWeightResult,
    |input| calculate_ideal_weight(input.height_cm, input.sex)
);
