//! Formula registry
//!
//! Static tables of published formulas and their coefficients. Each table is
//! wrapped in a [`FormulaRegistry`] that is built on first use, checks that
//! ids are unique, and is read-only afterwards.

use crate::errors::InvalidInputError;
use crate::types::BiologicalSex;
use once_cell::sync::Lazy;
use serde::Serialize;

/// A named, immutable record of coefficients for one formula variant
pub trait FormulaDefinition: Send + Sync + 'static {
    /// Stable key, unique within its registry
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

/// Read-only lookup over a static formula table
#[derive(Debug)]
pub struct FormulaRegistry<T: 'static> {
    name: &'static str,
    entries: &'static [T],
}

impl<T: FormulaDefinition> FormulaRegistry<T> {
    /// Wrap a static table.
    ///
    /// # Panics
    /// If two entries share an id.
    pub fn new(name: &'static str, entries: &'static [T]) -> Self {
        for (i, entry) in entries.iter().enumerate() {
            assert!(
                entries[..i].iter().all(|earlier| earlier.id() != entry.id()),
                "duplicate formula id `{}` in {} registry",
                entry.id(),
                name
            );
        }
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, id: &str) -> Option<&'static T> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Look up an id known at build time.
    ///
    /// # Panics
    /// If the id is not in the table; that is a programming error.
    pub fn require(&self, id: &str) -> &'static T {
        match self.get(id) {
            Some(entry) => entry,
            None => panic!("formula `{}` missing from {} registry", id, self.name),
        }
    }

    /// Look up an id that came from outside the crate
    pub fn lookup(&self, field: &'static str, id: &str) -> Result<&'static T, InvalidInputError> {
        self.get(id)
            .ok_or_else(|| InvalidInputError::new(field, "Unknown formula or option"))
    }

    /// Entries in table order
    pub fn iter(&self) -> std::slice::Iter<'static, T> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

macro_rules! impl_formula_definition {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FormulaDefinition for $ty {
                fn id(&self) -> &'static str {
                    self.id
                }

                fn label(&self) -> &'static str {
                    self.label
                }
            }
        )*
    };
}

// ============================================================================
// Ideal Weight Formulas
// ============================================================================

/// `base + per_inch * (height_in - 60)`, coefficients in kg
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealWeightFormula {
    pub id: &'static str,
    pub label: &'static str,
    pub male_base_kg: f64,
    pub female_base_kg: f64,
    pub male_per_inch_kg: f64,
    pub female_per_inch_kg: f64,
}

impl IdealWeightFormula {
    /// `(base, per_inch)` for the given sex
    pub fn coefficients(&self, sex: BiologicalSex) -> (f64, f64) {
        match sex {
            BiologicalSex::Male => (self.male_base_kg, self.male_per_inch_kg),
            BiologicalSex::Female => (self.female_base_kg, self.female_per_inch_kg),
        }
    }
}

const IDEAL_WEIGHT_TABLE: &[IdealWeightFormula] = &[
    IdealWeightFormula {
        id: "devine",
        label: "Devine (1974)",
        male_base_kg: 50.0,
        female_base_kg: 45.5,
        male_per_inch_kg: 2.3,
        female_per_inch_kg: 2.3,
    },
    IdealWeightFormula {
        id: "robinson",
        label: "Robinson (1983)",
        male_base_kg: 52.0,
        female_base_kg: 49.0,
        male_per_inch_kg: 1.9,
        female_per_inch_kg: 1.7,
    },
    IdealWeightFormula {
        id: "miller",
        label: "Miller (1983)",
        male_base_kg: 56.2,
        female_base_kg: 53.1,
        male_per_inch_kg: 1.41,
        female_per_inch_kg: 1.36,
    },
    IdealWeightFormula {
        id: "hamwi",
        label: "Hamwi (1964)",
        male_base_kg: 48.0,
        female_base_kg: 45.5,
        male_per_inch_kg: 2.7,
        female_per_inch_kg: 2.2,
    },
];

pub static IDEAL_WEIGHT_FORMULAS: Lazy<FormulaRegistry<IdealWeightFormula>> =
    Lazy::new(|| FormulaRegistry::new("ideal weight", IDEAL_WEIGHT_TABLE));

// ============================================================================
// Heart Rate Zones
// ============================================================================

/// One training zone as a band of heart-rate percentages
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartRateZoneBand {
    pub id: &'static str,
    pub label: &'static str,
    pub min_percent: f64,
    pub max_percent: f64,
    pub description: &'static str,
}

/// Ascending by percent
const HEART_RATE_ZONE_TABLE: &[HeartRateZoneBand] = &[
    HeartRateZoneBand {
        id: "zone1",
        label: "Very Light",
        min_percent: 50.0,
        max_percent: 60.0,
        description: "Warm-up and recovery",
    },
    HeartRateZoneBand {
        id: "zone2",
        label: "Light",
        min_percent: 60.0,
        max_percent: 70.0,
        description: "Basic endurance and fat burning",
    },
    HeartRateZoneBand {
        id: "zone3",
        label: "Moderate",
        min_percent: 70.0,
        max_percent: 80.0,
        description: "Aerobic capacity",
    },
    HeartRateZoneBand {
        id: "zone4",
        label: "Hard",
        min_percent: 80.0,
        max_percent: 90.0,
        description: "Lactate threshold",
    },
    HeartRateZoneBand {
        id: "zone5",
        label: "Maximum",
        min_percent: 90.0,
        max_percent: 100.0,
        description: "Maximal effort and speed",
    },
];

pub static HEART_RATE_ZONES: Lazy<FormulaRegistry<HeartRateZoneBand>> =
    Lazy::new(|| FormulaRegistry::new("heart rate zone", HEART_RATE_ZONE_TABLE));

// ============================================================================
// Activity Levels
// ============================================================================

/// Multipliers attached to one activity level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivityLevelDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Applied to BMR to get TDEE
    pub tdee_multiplier: f64,
    /// Applied to the weight-based water baseline
    pub water_multiplier: f64,
}

const ACTIVITY_LEVEL_TABLE: &[ActivityLevelDefinition] = &[
    ActivityLevelDefinition {
        id: "sedentary",
        label: "Sedentary",
        description: "Little or no exercise",
        tdee_multiplier: 1.2,
        water_multiplier: 1.0,
    },
    ActivityLevelDefinition {
        id: "lightly_active",
        label: "Lightly Active",
        description: "Light exercise 1-3 days/week",
        tdee_multiplier: 1.375,
        water_multiplier: 1.1,
    },
    ActivityLevelDefinition {
        id: "moderately_active",
        label: "Moderately Active",
        description: "Moderate exercise 3-5 days/week",
        tdee_multiplier: 1.55,
        water_multiplier: 1.2,
    },
    ActivityLevelDefinition {
        id: "very_active",
        label: "Very Active",
        description: "Hard exercise 6-7 days/week",
        tdee_multiplier: 1.725,
        water_multiplier: 1.3,
    },
    ActivityLevelDefinition {
        id: "extra_active",
        label: "Extra Active",
        description: "Very hard exercise or physical job",
        tdee_multiplier: 1.9,
        water_multiplier: 1.4,
    },
];

pub static ACTIVITY_LEVELS: Lazy<FormulaRegistry<ActivityLevelDefinition>> =
    Lazy::new(|| FormulaRegistry::new("activity level", ACTIVITY_LEVEL_TABLE));

// ============================================================================
// BMR Equations
// ============================================================================

/// `constant + per_kg*kg + per_cm*cm + per_year*age`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmrCoefficients {
    pub constant: f64,
    pub per_kg: f64,
    pub per_cm: f64,
    pub per_year: f64,
}

impl BmrCoefficients {
    pub fn evaluate(&self, weight_kg: f64, height_cm: f64, age_years: u32) -> f64 {
        self.constant + self.per_kg * weight_kg + self.per_cm * height_cm
            + self.per_year * age_years as f64
    }
}

/// A BMR equation linear in weight, height and age
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearBmrFormula {
    pub id: &'static str,
    pub label: &'static str,
    pub male: BmrCoefficients,
    pub female: BmrCoefficients,
}

impl LinearBmrFormula {
    pub fn coefficients(&self, sex: BiologicalSex) -> &BmrCoefficients {
        match sex {
            BiologicalSex::Male => &self.male,
            BiologicalSex::Female => &self.female,
        }
    }
}

const LINEAR_BMR_TABLE: &[LinearBmrFormula] = &[
    LinearBmrFormula {
        id: "mifflin_st_jeor",
        label: "Mifflin-St Jeor (1990)",
        male: BmrCoefficients {
            constant: 5.0,
            per_kg: 10.0,
            per_cm: 6.25,
            per_year: -5.0,
        },
        female: BmrCoefficients {
            constant: -161.0,
            per_kg: 10.0,
            per_cm: 6.25,
            per_year: -5.0,
        },
    },
    LinearBmrFormula {
        id: "harris_benedict",
        label: "Harris-Benedict (revised 1984)",
        male: BmrCoefficients {
            constant: 88.362,
            per_kg: 13.397,
            per_cm: 4.799,
            per_year: -5.677,
        },
        female: BmrCoefficients {
            constant: 447.593,
            per_kg: 9.247,
            per_cm: 3.098,
            per_year: -4.330,
        },
    },
];

pub static LINEAR_BMR_FORMULAS: Lazy<FormulaRegistry<LinearBmrFormula>> =
    Lazy::new(|| FormulaRegistry::new("BMR", LINEAR_BMR_TABLE));

// ============================================================================
// MET Activities
// ============================================================================

/// Metabolic equivalent of one activity (Compendium of Physical Activities)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetActivity {
    pub id: &'static str,
    pub label: &'static str,
    pub met: f64,
}

const MET_ACTIVITY_TABLE: &[MetActivity] = &[
    MetActivity { id: "walking", label: "Walking, 3 mph", met: 3.5 },
    MetActivity { id: "brisk_walking", label: "Walking, 4 mph", met: 5.0 },
    MetActivity { id: "hiking", label: "Hiking, cross country", met: 6.0 },
    MetActivity { id: "running", label: "Running, 6 mph", met: 9.8 },
    MetActivity { id: "cycling", label: "Cycling, 12-14 mph", met: 8.0 },
    MetActivity { id: "swimming", label: "Swimming laps, moderate", met: 5.8 },
    MetActivity { id: "weight_training", label: "Weight training, general", met: 3.5 },
    MetActivity { id: "yoga", label: "Yoga, hatha", met: 2.5 },
    MetActivity { id: "dancing", label: "Dancing, aerobic", met: 7.3 },
    MetActivity { id: "jumping_rope", label: "Jumping rope, moderate", met: 11.8 },
];

pub static MET_ACTIVITIES: Lazy<FormulaRegistry<MetActivity>> =
    Lazy::new(|| FormulaRegistry::new("MET activity", MET_ACTIVITY_TABLE));

impl_formula_definition!(
    IdealWeightFormula,
    HeartRateZoneBand,
    ActivityLevelDefinition,
    LinearBmrFormula,
    MetActivity,
);
