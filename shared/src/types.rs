//! Profile enums shared by several calculators

use crate::errors::InvalidInputError;
use crate::registry::{ActivityLevelDefinition, ACTIVITY_LEVELS};
use serde::{Deserialize, Serialize};

/// Biological sex for health calculations
/// Note: This is used for physiological calculations only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl std::str::FromStr for BiologicalSex {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(InvalidInputError::new(
                "sex",
                "Biological sex must be male or female",
            )),
        }
    }
}

/// Activity level used for TDEE and hydration multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Registry id of this level
    pub fn id(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// Coefficients for this level
    pub fn definition(&self) -> &'static ActivityLevelDefinition {
        ACTIVITY_LEVELS.require(self.id())
    }

    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        self.definition().tdee_multiplier
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.id() == normalized)
            .ok_or_else(|| {
                InvalidInputError::new(
                    "activity_level",
                    "Activity level must be one of: sedentary, lightly_active, moderately_active, very_active, extra_active",
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_activity_level_has_a_definition() {
        for level in ActivityLevel::ALL {
            assert_eq!(level.definition().id, level.id());
        }
    }

    #[test]
    fn test_activity_multipliers_increase() {
        let multipliers: Vec<f64> = ActivityLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert_eq!(multipliers, vec![1.2, 1.375, 1.55, 1.725, 1.9]);
    }

    #[test]
    fn test_parse_activity_level() {
        assert_eq!("SEDENTARY".parse::<ActivityLevel>().unwrap(), ActivityLevel::Sedentary);
        assert_eq!(
            "very_active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::VeryActive
        );
        let err = "super_active".parse::<ActivityLevel>().unwrap_err();
        assert_eq!(err.field, "activity_level");
    }

    #[test]
    fn test_parse_biological_sex() {
        assert_eq!("Female".parse::<BiologicalSex>().unwrap(), BiologicalSex::Female);
        assert_eq!("m".parse::<BiologicalSex>().unwrap(), BiologicalSex::Male);
        assert!("other".parse::<BiologicalSex>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ActivityLevel::ModeratelyActive).unwrap();
        assert_eq!(json, "\"moderately_active\"");
        let sex: BiologicalSex = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(sex, BiologicalSex::Male);
    }
}
