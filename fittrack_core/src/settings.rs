//! Settings form validation.
//!
//! The form collects five text fields. [`SettingsForm::validate`] turns them
//! into a [`ValidatedSettings`], the only settings type the store accepts.
//! Fields are checked in form order and the first bad one aborts the whole
//! save, so a rejected form never changes anything.

use crate::types::PositiveReal;
use std::num::NonZeroU32;

/// Confirmation shown after a successful save
pub const SAVED_TITLE: &str = "Settings Saved";
pub const SAVED_MESSAGE: &str = "Your personal settings have been updated successfully.";

/// A settings field that failed to parse or was not positive
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid Weight: Please enter a valid weight value.")]
    Weight,
    #[error("Invalid Stride Length: Please enter a valid stride length.")]
    StrideLength,
    #[error("Invalid Steps Goal: Please enter a valid daily steps goal.")]
    DailyStepsGoal,
    #[error("Invalid Calorie Goal: Please enter a valid daily calorie goal.")]
    DailyCalorieGoal,
    #[error("Invalid Weight Goal: Please enter a valid target weight.")]
    TargetWeight,
}

impl ValidationError {
    /// Short heading naming the field
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::Weight => "Invalid Weight",
            ValidationError::StrideLength => "Invalid Stride Length",
            ValidationError::DailyStepsGoal => "Invalid Steps Goal",
            ValidationError::DailyCalorieGoal => "Invalid Calorie Goal",
            ValidationError::TargetWeight => "Invalid Weight Goal",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::Weight => "Please enter a valid weight value.",
            ValidationError::StrideLength => "Please enter a valid stride length.",
            ValidationError::DailyStepsGoal => "Please enter a valid daily steps goal.",
            ValidationError::DailyCalorieGoal => "Please enter a valid daily calorie goal.",
            ValidationError::TargetWeight => "Please enter a valid target weight.",
        }
    }
}

/// Raw text as typed into the settings form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub weight: String,
    pub stride_length: String,
    pub daily_steps_goal: String,
    pub daily_calorie_goal: String,
    pub target_weight: String,
}

/// Settings that passed validation
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedSettings {
    pub weight: PositiveReal,
    pub stride_length: PositiveReal,
    pub daily_steps_goal: NonZeroU32,
    pub daily_calorie_goal: NonZeroU32,
    pub target_weight: PositiveReal,
}

impl SettingsForm {
    /// Form pre-filled from the current state, as the settings screen shows it
    pub fn from_state(state: &crate::FitnessState) -> Self {
        let goals = state.fitness_goals();
        Self {
            weight: state.weight().to_string(),
            stride_length: state.stride_length().to_string(),
            daily_steps_goal: goals.daily_steps.to_string(),
            daily_calorie_goal: goals.daily_calories.to_string(),
            target_weight: goals.target_weight.to_string(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedSettings, ValidationError> {
        let settings = ValidatedSettings {
            weight: parse_real(&self.weight).ok_or(ValidationError::Weight)?,
            stride_length: parse_real(&self.stride_length).ok_or(ValidationError::StrideLength)?,
            daily_steps_goal: parse_count(&self.daily_steps_goal)
                .ok_or(ValidationError::DailyStepsGoal)?,
            daily_calorie_goal: parse_count(&self.daily_calorie_goal)
                .ok_or(ValidationError::DailyCalorieGoal)?,
            target_weight: parse_real(&self.target_weight).ok_or(ValidationError::TargetWeight)?,
        };

        tracing::debug!("Settings form validated: {:?}", settings);
        Ok(settings)
    }
}

fn parse_real(text: &str) -> Option<PositiveReal> {
    text.trim().parse::<f64>().ok().and_then(PositiveReal::new)
}

fn parse_count(text: &str) -> Option<NonZeroU32> {
    text.trim().parse::<NonZeroU32>().ok()
}
