//! Cardiorespiratory calculators
//!
//! Heart-rate training zones (percent of max or Karvonen) and VO2 max
//! estimates from field tests.

use crate::errors::InvalidInputError;
use crate::registry::{FormulaDefinition, HEART_RATE_ZONES};
use crate::types::BiologicalSex;
use crate::units::{round_to, round_to_whole, WeightUnit};
use crate::validation::{
    require_in_range, require_positive, validate_age, validate_heart_rate, validate_weight,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Heart Rate Zones
// ============================================================================

/// Age-based estimate of maximum heart rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaxHeartRateFormula {
    /// 220 − age
    #[default]
    Fox,
    /// 208 − 0.7 × age
    Tanaka,
    /// 207 − 0.7 × age
    Gellish,
}

impl MaxHeartRateFormula {
    pub fn estimate(&self, age_years: u32) -> f64 {
        let age = age_years as f64;
        match self {
            MaxHeartRateFormula::Fox => 220.0 - age,
            MaxHeartRateFormula::Tanaka => 208.0 - 0.7 * age,
            MaxHeartRateFormula::Gellish => 207.0 - 0.7 * age,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaxHeartRateFormula::Fox => "Fox (220 - age)",
            MaxHeartRateFormula::Tanaka => "Tanaka (208 - 0.7 x age)",
            MaxHeartRateFormula::Gellish => "Gellish (207 - 0.7 x age)",
        }
    }
}

/// How zone percentages map to beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneMethod {
    /// max × pct
    #[default]
    PercentOfMax,
    /// resting + (max − resting) × pct
    Karvonen,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HeartRateZonesInput {
    /// Used to estimate max heart rate when it is not given directly
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub max_heart_rate: Option<u32>,
    /// Required for Karvonen
    #[serde(default)]
    pub resting_heart_rate: Option<u32>,
    #[serde(default)]
    pub method: ZoneMethod,
    #[serde(default)]
    pub max_heart_rate_formula: MaxHeartRateFormula,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRateZone {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub min_percent: f64,
    pub max_percent: f64,
    pub min_bpm: u32,
    pub max_bpm: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRateZonesResult {
    pub max_heart_rate: u32,
    /// Formula label, or "measured" when max heart rate was supplied
    pub max_heart_rate_source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<u32>,
    pub method: ZoneMethod,
    /// Ascending by percent
    pub zones: Vec<HeartRateZone>,
}

fn resolve_max_heart_rate(input: &HeartRateZonesInput) -> Result<(u32, &'static str), InvalidInputError> {
    match (input.max_heart_rate, input.age_years) {
        (Some(max), _) => {
            validate_heart_rate("max_heart_rate", max)?;
            Ok((max, "measured"))
        }
        (None, Some(age)) => {
            validate_age(age)?;
            let formula = input.max_heart_rate_formula;
            Ok((round_to_whole(formula.estimate(age)), formula.label()))
        }
        (None, None) => Err(InvalidInputError::new(
            "age_years",
            "Age or maximum heart rate is required",
        )),
    }
}

/// Compute the five training zones
///
/// Karvonen: resting + (max − resting) × pct / 100; otherwise max × pct / 100.
pub fn calculate_heart_rate_zones(
    input: &HeartRateZonesInput,
) -> Result<HeartRateZonesResult, InvalidInputError> {
    let (max_hr, source) = resolve_max_heart_rate(input)?;

    // Resting rate only feeds Karvonen; percent of max ignores it
    let (floor, reserve, resting_heart_rate) = match (input.method, input.resting_heart_rate) {
        (ZoneMethod::Karvonen, Some(resting)) => {
            validate_heart_rate("resting_heart_rate", resting)?;
            if resting >= max_hr {
                return Err(InvalidInputError::new(
                    "resting_heart_rate",
                    "Resting heart rate must be below maximum heart rate",
                ));
            }
            (resting as f64, (max_hr - resting) as f64, Some(resting))
        }
        (ZoneMethod::Karvonen, None) => {
            return Err(InvalidInputError::new(
                "resting_heart_rate",
                "Resting heart rate is required for the Karvonen method",
            ))
        }
        (ZoneMethod::PercentOfMax, _) => (0.0, max_hr as f64, None),
    };
    let bpm_at = |percent: f64| round_to_whole(floor + reserve * percent / 100.0);

    let zones = HEART_RATE_ZONES
        .iter()
        .map(|band| HeartRateZone {
            id: band.id(),
            label: band.label(),
            description: band.description,
            min_percent: band.min_percent,
            max_percent: band.max_percent,
            min_bpm: bpm_at(band.min_percent),
            max_bpm: bpm_at(band.max_percent),
        })
        .collect();

    Ok(HeartRateZonesResult {
        max_heart_rate: max_hr,
        max_heart_rate_source: source,
        resting_heart_rate,
        method: input.method,
        zones,
    })
}

calculator!(
    HeartRateZonesCalculator, "heart-rate-zones", HeartRateZonesInput => HeartRateZonesResult,
    |input| calculate_heart_rate_zones(input)
);

// ============================================================================
// VO2 Max
// ============================================================================

/// Field test the estimate is based on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum Vo2MaxInput {
    /// Rockport one-mile walk (Kline et al., 1987)
    Rockport {
        age_years: u32,
        sex: BiologicalSex,
        weight_kg: f64,
        /// Time to walk one mile
        walk_time_minutes: f64,
        /// Heart rate at the end of the walk
        heart_rate_bpm: u32,
    },
    /// Cooper 12-minute run (Cooper, 1968)
    Cooper { distance_m: f64 },
}

/// Fitness classification based on VO2max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    /// VO2max < 35
    Poor,
    /// 35-45
    Fair,
    /// 45-55
    Good,
    /// 55-65
    Excellent,
    /// > 65
    Superior,
}

impl FitnessLevel {
    pub fn classify(vo2_max: f64) -> Self {
        if vo2_max < 35.0 {
            FitnessLevel::Poor
        } else if vo2_max < 45.0 {
            FitnessLevel::Fair
        } else if vo2_max < 55.0 {
            FitnessLevel::Good
        } else if vo2_max < 65.0 {
            FitnessLevel::Excellent
        } else {
            FitnessLevel::Superior
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vo2MaxResult {
    /// ml/kg/min, one decimal place
    pub vo2_max: f64,
    pub fitness_level: FitnessLevel,
    pub test_label: &'static str,
}

/// Rockport regression, weight in pounds:
/// 132.853 − 0.0769·lb − 0.3877·age + 6.315·sex − 3.2649·min − 0.1565·bpm
fn rockport(
    age_years: u32,
    sex: BiologicalSex,
    weight_kg: f64,
    walk_time_minutes: f64,
    heart_rate_bpm: u32,
) -> f64 {
    let sex_factor = match sex {
        BiologicalSex::Male => 1.0,
        BiologicalSex::Female => 0.0,
    };
    132.853 - 0.0769 * WeightUnit::Lb.from_kg(weight_kg) - 0.3877 * age_years as f64
        + 6.315 * sex_factor
        - 3.2649 * walk_time_minutes
        - 0.1565 * heart_rate_bpm as f64
}

/// Estimate VO2 max from a field test
pub fn calculate_vo2_max(input: &Vo2MaxInput) -> Result<Vo2MaxResult, InvalidInputError> {
    let (raw, test_label) = match *input {
        Vo2MaxInput::Rockport {
            age_years,
            sex,
            weight_kg,
            walk_time_minutes,
            heart_rate_bpm,
        } => {
            validate_age(age_years)?;
            validate_weight(weight_kg)?;
            require_positive(
                "walk_time_minutes",
                walk_time_minutes,
                "Walk time must be greater than 0",
            )?;
            validate_heart_rate("heart_rate_bpm", heart_rate_bpm)?;
            (
                rockport(age_years, sex, weight_kg, walk_time_minutes, heart_rate_bpm),
                "Rockport 1-mile walk",
            )
        }
        Vo2MaxInput::Cooper { distance_m } => {
            require_in_range(
                "distance_m",
                distance_m,
                505.0,
                6000.0,
                "Distance must be between 505 and 6000 meters",
            )?;
            ((distance_m - 504.9) / 44.73, "Cooper 12-minute run")
        }
    };

    let vo2_max = round_to(raw.max(0.0), 1);
    Ok(Vo2MaxResult {
        vo2_max,
        fitness_level: FitnessLevel::classify(vo2_max),
        test_label,
    })
}

calculator!(
    Vo2MaxCalculator, "vo2-max", Vo2MaxInput => Vo2MaxResult,
    |input| calculate_vo2_max(input)
);
