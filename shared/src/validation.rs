//! Input validation functions
//!
//! Every calculator runs these checks before touching any arithmetic.
//! They are plain sign and range checks on primitive fields; a failed check
//! yields an [`InvalidInputError`] naming the field and the broken rule.

use crate::errors::InvalidInputError;

/// Reject NaN and infinities
pub fn require_finite(field: &'static str, value: f64) -> Result<(), InvalidInputError> {
    if value.is_nan() || value.is_infinite() {
        return Err(InvalidInputError::new(field, "Value must be a valid number"));
    }
    Ok(())
}

/// Require a finite value strictly greater than zero
pub fn require_positive(
    field: &'static str,
    value: f64,
    message: &'static str,
) -> Result<(), InvalidInputError> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(InvalidInputError::new(field, message));
    }
    Ok(())
}

/// Require a percentage in `(0, 100]`
pub fn require_percentage(
    field: &'static str,
    value: f64,
    message: &'static str,
) -> Result<(), InvalidInputError> {
    require_finite(field, value)?;
    if value <= 0.0 || value > 100.0 {
        return Err(InvalidInputError::new(field, message));
    }
    Ok(())
}

/// Require a finite value within `[min, max]`
pub fn require_in_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    message: &'static str,
) -> Result<(), InvalidInputError> {
    require_finite(field, value)?;
    if value < min || value > max {
        return Err(InvalidInputError::new(field, message));
    }
    Ok(())
}

/// Require a non-zero count
pub fn require_positive_int(
    field: &'static str,
    value: u32,
    message: &'static str,
) -> Result<(), InvalidInputError> {
    if value == 0 {
        return Err(InvalidInputError::new(field, message));
    }
    Ok(())
}

/// Require an integer within `[min, max]`
pub fn require_int_in_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
    message: &'static str,
) -> Result<(), InvalidInputError> {
    if !(min..=max).contains(&value) {
        return Err(InvalidInputError::new(field, message));
    }
    Ok(())
}

/// Heart rate bounds shared by the cardio calculators (bpm)
pub const MIN_HEART_RATE: u32 = 20;
pub const MAX_HEART_RATE: u32 = 300;

/// Validate heart rate (bpm)
pub fn validate_heart_rate(field: &'static str, bpm: u32) -> Result<(), InvalidInputError> {
    require_int_in_range(
        field,
        bpm,
        MIN_HEART_RATE,
        MAX_HEART_RATE,
        "Heart rate must be between 20 and 300 bpm",
    )
}

/// Validate age in whole years
pub fn validate_age(age_years: u32) -> Result<(), InvalidInputError> {
    require_int_in_range(
        "age_years",
        age_years,
        1,
        120,
        "Age must be between 1 and 120 years",
    )
}

/// Upper bounds on body measurements and daily quantities
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MAX_CIRCUMFERENCE_CM: f64 = 300.0;
pub const MAX_DAILY_CALORIES: f64 = 50_000.0;
pub const MAX_DURATION_MINUTES: f64 = 1440.0;

/// Require a finite value in `(0, max]`
///
/// `low_message` is used for non-positive values, `high_message` above `max`.
pub fn require_positive_at_most(
    field: &'static str,
    value: f64,
    max: f64,
    low_message: &'static str,
    high_message: &'static str,
) -> Result<(), InvalidInputError> {
    require_positive(field, value, low_message)?;
    if value > max {
        return Err(InvalidInputError::new(field, high_message));
    }
    Ok(())
}

/// Validate height (cm)
pub fn validate_height(height_cm: f64) -> Result<(), InvalidInputError> {
    require_positive_at_most(
        "height_cm",
        height_cm,
        MAX_HEIGHT_CM,
        "Height must be greater than 0",
        "Height must be at most 300 cm",
    )
}

/// Validate body weight (kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), InvalidInputError> {
    require_positive_at_most(
        "weight_kg",
        weight_kg,
        MAX_WEIGHT_KG,
        "Weight must be greater than 0",
        "Weight must be at most 500 kg",
    )
}

/// Validate a daily calorie budget
pub fn validate_calories(field: &'static str, calories: f64) -> Result<(), InvalidInputError> {
    require_positive_at_most(
        field,
        calories,
        MAX_DAILY_CALORIES,
        "Total calories must be greater than 0",
        "Calorie value unreasonably high",
    )
}

/// Validate a body circumference (cm)
pub fn validate_circumference(
    field: &'static str,
    value_cm: f64,
    low_message: &'static str,
) -> Result<(), InvalidInputError> {
    require_positive_at_most(
        field,
        value_cm,
        MAX_CIRCUMFERENCE_CM,
        low_message,
        "Circumference must be at most 300 cm",
    )
}

/// Validate an activity duration, capped at one day
pub fn validate_duration_minutes(minutes: f64) -> Result<(), InvalidInputError> {
    require_positive_at_most(
        "duration_minutes",
        minutes,
        MAX_DURATION_MINUTES,
        "Duration must be greater than 0",
        "Duration cannot exceed 24 hours",
    )
}

/// Validate the height/weight pair most body calculators take
pub fn validate_height_weight(height_cm: f64, weight_kg: f64) -> Result<(), InvalidInputError> {
    require_positive_at_most(
        "height_cm",
        height_cm,
        MAX_HEIGHT_CM,
        "Height and weight must be greater than 0",
        "Height must be at most 300 cm",
    )?;
    require_positive_at_most(
        "weight_kg",
        weight_kg,
        MAX_WEIGHT_KG,
        "Height and weight must be greater than 0",
        "Weight must be at most 500 kg",
    )
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "age" | "age_years" => "Age",
        "sex" => "Biological Sex",
        "activity_level" => "Activity Level",
        "total_calories" => "Daily Calories",
        "percent" => "Percentage",
        "body_fat_percent" => "Body Fat",
        "waist_cm" => "Waist",
        "neck_cm" => "Neck",
        "hip_cm" => "Hip",
        "max_heart_rate" => "Maximum Heart Rate",
        "resting_heart_rate" => "Resting Heart Rate",
        "heart_rate_bpm" => "Heart Rate",
        "walk_time_minutes" => "Walk Time",
        "distance_m" => "Distance",
        "duration_minutes" => "Duration",
        "activity" => "Activity",
        "formula" => "Formula",
        "last_period_date" => "First Day of Last Period",
        "cycle_length_days" => "Cycle Length",
        "reference_date" => "Reference Date",
        _ => field_name,
    }
}
