use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::Date;

use super::error::BalanceError;
use crate::meals::MealTotals;
use crate::steps::DailySteps;
use crate::workouts::WorkoutTotals;

/// Biological sex as stored on the profile. `None` on [`Profile`] means unknown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
        }
    }
}

impl FromStr for Sex {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            other => anyhow::bail!("unknown sex: {other}"),
        }
    }
}

/// Self-reported activity level used by the activity-adjusted TMB mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Multiplier applied on top of the basal estimate.
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => anyhow::bail!("unknown activity level: {other}"),
        }
    }
}

/// Biometric snapshot the calculator works from. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub sex: Option<Sex>,
    pub birth_date: Option<Date>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub caloric_deficit_goal: Option<i32>,
}

/// What was logged for one user on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyActivityAggregate {
    pub date: Date,
    pub consumed_kcal: i32,
    pub workout_kcal: i32,
    pub step_count: i32,
    pub has_meals: bool,
    pub has_workouts: bool,
    pub has_steps_record: bool,
}

impl DailyActivityAggregate {
    /// A day with nothing logged at all.
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            consumed_kcal: 0,
            workout_kcal: 0,
            step_count: 0,
            has_meals: false,
            has_workouts: false,
            has_steps_record: false,
        }
    }

    /// Folds one day's query results together. A missing steps record means
    /// zero steps but, unlike a record holding zero, no data.
    pub fn from_parts(
        date: Date,
        meals: &MealTotals,
        workouts: &WorkoutTotals,
        steps: Option<&DailySteps>,
    ) -> Result<Self, BalanceError> {
        let consumed_kcal = i32::try_from(meals.calories)
            .map_err(|_| BalanceError::invalid("consumed kcal out of range"))?;
        let workout_kcal = i32::try_from(workouts.calories_burned)
            .map_err(|_| BalanceError::invalid("workout kcal out of range"))?;
        Ok(Self {
            date,
            consumed_kcal,
            workout_kcal,
            step_count: steps.map(|s| s.steps_count).unwrap_or(0),
            has_meals: meals.count > 0,
            has_workouts: workouts.count > 0,
            has_steps_record: steps.is_some(),
        })
    }

    /// A steps record with zero steps still counts as data.
    pub fn has_data(&self) -> bool {
        self.has_meals || self.has_workouts || self.has_steps_record
    }
}

/// Nearest-integer rounding with halves going up, so -2.5 becomes -2.
pub(crate) fn round_kcal(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
