//! Menstrual cycle and pregnancy date calculators
//!
//! All arithmetic is whole calendar days on [`NaiveDate`]; there is no
//! timezone handling. Nothing here reads the clock, so "today" must be
//! passed in by the caller.

use crate::errors::InvalidInputError;
use crate::validation::require_int_in_range;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Luteal phase length assumed between ovulation and the next period
pub const LUTEAL_PHASE_DAYS: u32 = 14;
/// Days before ovulation in which conception is possible
pub const FERTILE_DAYS_BEFORE_OVULATION: u32 = 5;
/// Naegele's rule: 40 weeks from the last period for a 28-day cycle
pub const GESTATION_DAYS: u32 = 280;
pub const REFERENCE_CYCLE_DAYS: u32 = 28;

pub const MIN_CYCLE_DAYS: u32 = 21;
pub const MAX_CYCLE_DAYS: u32 = 45;

fn validate_cycle_length(cycle_length_days: u32) -> Result<(), InvalidInputError> {
    require_int_in_range(
        "cycle_length_days",
        cycle_length_days,
        MIN_CYCLE_DAYS,
        MAX_CYCLE_DAYS,
        "Cycle length must be between 21 and 45 days",
    )
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, InvalidInputError> {
    date.checked_add_days(Days::new(days.into()))
        .ok_or(InvalidInputError::new("last_period_date", "Date is out of range"))
}

fn sub_days(date: NaiveDate, days: u32) -> Result<NaiveDate, InvalidInputError> {
    date.checked_sub_days(Days::new(days.into()))
        .ok_or(InvalidInputError::new("last_period_date", "Date is out of range"))
}

fn default_cycle_length() -> u32 {
    REFERENCE_CYCLE_DAYS
}

// ============================================================================
// Ovulation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvulationInput {
    /// First day of the last period
    pub last_period_date: NaiveDate,
    #[serde(default = "default_cycle_length")]
    pub cycle_length_days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OvulationResult {
    pub ovulation_date: NaiveDate,
    pub fertile_window_start: NaiveDate,
    /// Same day as ovulation
    pub fertile_window_end: NaiveDate,
    pub next_period_date: NaiveDate,
    pub cycle_length_days: u32,
}

/// ovulation = last period + (cycle − 14) days; fertile window is the five
/// days before ovulation through ovulation; next period = last period + cycle
pub fn calculate_ovulation(input: &OvulationInput) -> Result<OvulationResult, InvalidInputError> {
    validate_cycle_length(input.cycle_length_days)?;

    let ovulation_date = add_days(
        input.last_period_date,
        input.cycle_length_days - LUTEAL_PHASE_DAYS,
    )?;

    Ok(OvulationResult {
        ovulation_date,
        fertile_window_start: sub_days(ovulation_date, FERTILE_DAYS_BEFORE_OVULATION)?,
        fertile_window_end: ovulation_date,
        next_period_date: add_days(input.last_period_date, input.cycle_length_days)?,
        cycle_length_days: input.cycle_length_days,
    })
}

calculator!(
    OvulationCalculator, "ovulation", OvulationInput => OvulationResult,
    |input| calculate_ovulation(input)
);

// ============================================================================
// Pregnancy Due Date
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDateInput {
    pub last_period_date: NaiveDate,
    #[serde(default = "default_cycle_length")]
    pub cycle_length_days: u32,
    /// Day to report gestational age for, usually today
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GestationalAge {
    pub weeks: u32,
    pub days: u32,
    pub trimester: u8,
    pub days_until_due: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueDateResult {
    pub due_date: NaiveDate,
    pub conception_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gestational_age: Option<GestationalAge>,
}

/// Naegele's rule adjusted for cycle length:
/// due = last period + 280 + (cycle − 28) days
pub fn calculate_due_date(input: &DueDateInput) -> Result<DueDateResult, InvalidInputError> {
    validate_cycle_length(input.cycle_length_days)?;

    let lmp = input.last_period_date;
    // cycle >= 21, so the offset stays positive
    let due_date = add_days(
        lmp,
        GESTATION_DAYS + input.cycle_length_days - REFERENCE_CYCLE_DAYS,
    )?;
    let conception_date = add_days(lmp, input.cycle_length_days - LUTEAL_PHASE_DAYS)?;

    let gestational_age = match input.reference_date {
        Some(reference) if reference < lmp => {
            return Err(InvalidInputError::new(
                "reference_date",
                "Reference date must not be before the last period",
            ))
        }
        Some(reference) => {
            let elapsed = (reference - lmp).num_days();
            let weeks = (elapsed / 7) as u32;
            let trimester = if weeks < 14 {
                1
            } else if weeks < 28 {
                2
            } else {
                3
            };
            Some(GestationalAge {
                weeks,
                days: (elapsed % 7) as u32,
                trimester,
                days_until_due: (due_date - reference).num_days(),
            })
        }
        None => None,
    };

    Ok(DueDateResult {
        due_date,
        conception_date,
        gestational_age,
    })
}

calculator!(
    DueDateCalculator, "due-date", DueDateInput => DueDateResult,
    |input| calculate_due_date(input)
);
