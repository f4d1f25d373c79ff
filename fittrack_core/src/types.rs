//! Core domain types for the FitTrack system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Validated numeric wrappers accepted by the store
//! - Fitness goals and their partial updates
//! - Logged meals
//! - The fitness state aggregate owned by the store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use uuid::Uuid;

// ============================================================================
// Validated Numbers
// ============================================================================

/// Rejected value for a [`PositiveReal`]
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("expected a positive finite number, got {0}")]
pub struct NotPositive(pub f64);

/// A finite real number strictly greater than zero.
///
/// Weight, stride length and target weight only reach the store through this
/// type, so NaN or non-positive values never land in the state.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PositiveReal(f64);

impl PositiveReal {
    /// Wrap `value` if it is finite and > 0
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PositiveReal {
    type Error = NotPositive;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(NotPositive(value))
    }
}

impl From<PositiveReal> for f64 {
    fn from(value: PositiveReal) -> Self {
        value.0
    }
}

impl fmt::Display for PositiveReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Goals
// ============================================================================

/// Daily and long-term fitness targets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitnessGoals {
    pub daily_steps: NonZeroU32,
    pub daily_calories: NonZeroU32,
    pub target_weight: PositiveReal,
}

/// Partial update of [`FitnessGoals`]; `None` fields are left untouched
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalsUpdate {
    pub daily_steps: Option<NonZeroU32>,
    pub daily_calories: Option<NonZeroU32>,
    pub target_weight: Option<PositiveReal>,
}

impl FitnessGoals {
    /// Shallow merge of the supplied fields
    pub(crate) fn merge(&mut self, update: GoalsUpdate) {
        if let Some(steps) = update.daily_steps {
            self.daily_steps = steps;
        }
        if let Some(calories) = update.daily_calories {
            self.daily_calories = calories;
        }
        if let Some(target) = update.target_weight {
            self.target_weight = target;
        }
    }
}

// ============================================================================
// Meals
// ============================================================================

/// A logged meal. Immutable once appended to the state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Fitness State
// ============================================================================

/// The fitness state aggregate.
///
/// Fields are only writable inside the crate; outside code reads through the
/// accessors and mutates through [`crate::store::FitnessStateStore`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FitnessState {
    pub(crate) steps: i64,
    pub(crate) calories_burned: i64,
    pub(crate) calories_consumed: u64,
    pub(crate) weight: PositiveReal,
    pub(crate) stride_length: PositiveReal,
    pub(crate) fitness_goals: FitnessGoals,
    pub(crate) meals: Vec<Meal>,
}

impl FitnessState {
    /// Fresh state with zeroed counters and the given profile
    pub fn new(weight: PositiveReal, stride_length: PositiveReal, goals: FitnessGoals) -> Self {
        Self {
            steps: 0,
            calories_burned: 0,
            calories_consumed: 0,
            weight,
            stride_length,
            fitness_goals: goals,
            meals: Vec::new(),
        }
    }

    pub fn steps(&self) -> i64 {
        self.steps
    }

    pub fn calories_burned(&self) -> i64 {
        self.calories_burned
    }

    pub fn calories_consumed(&self) -> u64 {
        self.calories_consumed
    }

    /// Body weight in kg
    pub fn weight(&self) -> f64 {
        self.weight.get()
    }

    /// Stride length in meters
    pub fn stride_length(&self) -> f64 {
        self.stride_length.get()
    }

    pub fn fitness_goals(&self) -> &FitnessGoals {
        &self.fitness_goals
    }

    /// Logged meals in insertion order
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }
}

impl Default for FitnessState {
    /// steps=0, weight=70 kg, stride=0.762 m, goals={10000, 2000, 70 kg}
    fn default() -> Self {
        Self::new(
            PositiveReal(crate::calorie_math::DEFAULT_WEIGHT_KG),
            PositiveReal(crate::calorie_math::DEFAULT_STRIDE_LENGTH_M),
            FitnessGoals::default(),
        )
    }
}

pub const DEFAULT_DAILY_STEPS: NonZeroU32 = match NonZeroU32::new(10_000) {
    Some(n) => n,
    None => panic!("default step goal must be non-zero"),
};

pub const DEFAULT_DAILY_CALORIES: NonZeroU32 = match NonZeroU32::new(2_000) {
    Some(n) => n,
    None => panic!("default calorie goal must be non-zero"),
};

pub const DEFAULT_TARGET_WEIGHT_KG: f64 = 70.0;

impl Default for FitnessGoals {
    fn default() -> Self {
        Self {
            daily_steps: DEFAULT_DAILY_STEPS,
            daily_calories: DEFAULT_DAILY_CALORIES,
            target_weight: PositiveReal(DEFAULT_TARGET_WEIGHT_KG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_real_rejects_bad_values() {
        assert!(PositiveReal::new(0.0).is_none());
        assert!(PositiveReal::new(-1.5).is_none());
        assert!(PositiveReal::new(f64::NAN).is_none());
        assert!(PositiveReal::new(f64::INFINITY).is_none());
        assert_eq!(PositiveReal::new(0.762).map(PositiveReal::get), Some(0.762));
    }

    #[test]
    fn test_positive_real_deserialize_validates() {
        let ok: PositiveReal = serde_json::from_str("72.5").unwrap();
        assert_eq!(ok.get(), 72.5);

        let bad = serde_json::from_str::<PositiveReal>("-3.0");
        assert!(bad.is_err());
    }

    #[test]
    fn test_default_state() {
        let state = FitnessState::default();
        assert_eq!(state.steps(), 0);
        assert_eq!(state.calories_burned(), 0);
        assert_eq!(state.calories_consumed(), 0);
        assert_eq!(state.weight(), 70.0);
        assert_eq!(state.stride_length(), 0.762);
        assert_eq!(state.fitness_goals().daily_steps.get(), 10_000);
        assert_eq!(state.fitness_goals().daily_calories.get(), 2_000);
        assert_eq!(state.fitness_goals().target_weight.get(), 70.0);
        assert!(state.meals().is_empty());
    }

    #[test]
    fn test_goals_merge_is_partial() {
        let mut goals = FitnessGoals::default();
        goals.merge(GoalsUpdate {
            daily_calories: NonZeroU32::new(1800),
            ..Default::default()
        });

        assert_eq!(goals.daily_calories.get(), 1800);
        assert_eq!(goals.daily_steps.get(), 10_000);
        assert_eq!(goals.target_weight.get(), 70.0);
    }
}
