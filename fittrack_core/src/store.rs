//! The fitness state store.
//!
//! [`FitnessStateStore`] owns the one [`FitnessState`] of a session. Reads go
//! through [`FitnessStateStore::state`], which only hands out a shared
//! reference; writes go through the named operations below or, for feeds
//! running elsewhere, through a [`Command`] passed to
//! [`FitnessStateStore::dispatch`].
//!
//! Every operation is synchronous and total over its input types. Inputs that
//! need checking (weights, goals) arrive as validated types, so there is no
//! failure path once a call is made. Running counters saturate at their
//! integer bounds.

use crate::calorie_math;
use crate::settings::ValidatedSettings;
use crate::types::{FitnessGoals, FitnessState, GoalsUpdate, Meal, PositiveReal};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// A write against the store.
///
/// Feeds (the step sensor, the meal analyzer) produce these instead of
/// touching the store, and the owner applies them in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    IncrementSteps(i64),
    ResetSteps,
    AddMeal { name: String, calories: u32 },
    UpdateWeight(PositiveReal),
    UpdateStrideLength(PositiveReal),
    UpdateFitnessGoals(GoalsUpdate),
    ApplySettings(ValidatedSettings),
}

/// Where the current weight stands relative to the target
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "kg", rename_all = "snake_case")]
pub enum WeightGoalStatus {
    ToLose(f64),
    ToGain(f64),
    Achieved,
}

/// Snapshot of the dashboard numbers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub steps: i64,
    pub daily_steps_goal: u32,
    pub steps_progress_percent: i64,
    pub calories_burned: i64,
    pub calories_consumed: u64,
    pub daily_calorie_goal: u32,
    pub calories_remaining: i64,
    pub weight: f64,
    pub stride_length: f64,
    pub target_weight: f64,
    pub weight_goal: WeightGoalStatus,
    pub meals_logged: usize,
}

/// Owner of the fitness state
#[derive(Clone, Debug, Default)]
pub struct FitnessStateStore {
    state: FitnessState,
}

impl FitnessStateStore {
    /// Store starting from the default profile and goals
    pub fn new() -> Self {
        Self::default()
    }

    /// Store starting from a prepared state (e.g. built from config)
    pub fn with_state(state: FitnessState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &FitnessState {
        &self.state
    }

    /// Apply one command
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::IncrementSteps(delta) => self.increment_steps(delta),
            Command::ResetSteps => self.reset_steps(),
            Command::AddMeal { name, calories } => {
                self.add_meal(name, calories);
            }
            Command::UpdateWeight(weight) => self.update_weight(weight),
            Command::UpdateStrideLength(stride) => self.update_stride_length(stride),
            Command::UpdateFitnessGoals(update) => self.update_fitness_goals(update),
            Command::ApplySettings(settings) => self.apply_settings(settings),
        }
    }

    /// Add `delta` steps and the calories they burn at the current weight and
    /// stride length.
    ///
    /// Negative deltas are applied as given. Both counters saturate at the
    /// `i64` bounds instead of overflowing.
    pub fn increment_steps(&mut self, delta: i64) {
        if delta < 0 {
            tracing::warn!("Applying negative step delta {}", delta);
        }

        let burned = calorie_math::calories_from_steps(
            delta as f64,
            self.state.weight.get(),
            self.state.stride_length.get(),
        );

        self.state.steps = self.state.steps.saturating_add(delta);
        self.state.calories_burned = self.state.calories_burned.saturating_add(burned);

        tracing::debug!(
            "Steps {:+} ({:+} kcal): {} steps, {} kcal burned",
            delta,
            burned,
            self.state.steps,
            self.state.calories_burned
        );
    }

    /// Zero steps and burned calories. Meals are kept.
    pub fn reset_steps(&mut self) {
        self.state.steps = 0;
        self.state.calories_burned = 0;
        tracing::debug!("Reset steps and burned calories");
    }

    /// Log a meal and count its calories as consumed
    pub fn add_meal(&mut self, name: impl Into<String>, calories: u32) -> &Meal {
        let meal = Meal {
            id: Uuid::new_v4(),
            name: name.into(),
            calories,
            timestamp: Utc::now(),
        };

        tracing::debug!("Logged meal {} ({}, {} kcal)", meal.id, meal.name, calories);

        self.state.calories_consumed = self
            .state
            .calories_consumed
            .saturating_add(u64::from(calories));
        self.state.meals.push(meal);
        &self.state.meals[self.state.meals.len() - 1]
    }

    /// Replace body weight; only later step increments see the new value
    pub fn update_weight(&mut self, weight: PositiveReal) {
        tracing::debug!("Weight {} -> {} kg", self.state.weight, weight);
        self.state.weight = weight;
    }

    /// Replace stride length; only later step increments see the new value
    pub fn update_stride_length(&mut self, stride_length: PositiveReal) {
        tracing::debug!(
            "Stride length {} -> {} m",
            self.state.stride_length,
            stride_length
        );
        self.state.stride_length = stride_length;
    }

    /// Merge the supplied goal fields, leaving the others as they are
    pub fn update_fitness_goals(&mut self, update: GoalsUpdate) {
        self.state.fitness_goals.merge(update);
        tracing::debug!("Goals now {:?}", self.state.fitness_goals);
    }

    /// Apply a saved settings form: weight, stride length, then goals
    pub fn apply_settings(&mut self, settings: ValidatedSettings) {
        self.update_weight(settings.weight);
        self.update_stride_length(settings.stride_length);
        self.update_fitness_goals(GoalsUpdate {
            daily_steps: Some(settings.daily_steps_goal),
            daily_calories: Some(settings.daily_calorie_goal),
            target_weight: Some(settings.target_weight),
        });
        tracing::info!("Settings saved");
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    fn goals(&self) -> &FitnessGoals {
        &self.state.fitness_goals
    }

    /// Calorie goal minus consumed plus burned
    pub fn calories_remaining(&self) -> i64 {
        let consumed = i64::try_from(self.state.calories_consumed).unwrap_or(i64::MAX);
        i64::from(self.goals().daily_calories.get())
            .saturating_sub(consumed)
            .saturating_add(self.state.calories_burned)
    }

    /// Percent of the daily step goal reached, capped at 100
    pub fn steps_progress_percent(&self) -> i64 {
        let goal = f64::from(self.goals().daily_steps.get());
        let percent = (self.state.steps as f64 / goal * 100.0).round() as i64;
        percent.min(100)
    }

    /// Target weight minus current weight (kg)
    pub fn weight_delta(&self) -> f64 {
        self.goals().target_weight.get() - self.state.weight.get()
    }

    pub fn weight_goal_status(&self) -> WeightGoalStatus {
        let delta = self.weight_delta();
        if delta < 0.0 {
            WeightGoalStatus::ToLose(-delta)
        } else if delta > 0.0 {
            WeightGoalStatus::ToGain(delta)
        } else {
            WeightGoalStatus::Achieved
        }
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            steps: self.state.steps,
            daily_steps_goal: self.goals().daily_steps.get(),
            steps_progress_percent: self.steps_progress_percent(),
            calories_burned: self.state.calories_burned,
            calories_consumed: self.state.calories_consumed,
            daily_calorie_goal: self.goals().daily_calories.get(),
            calories_remaining: self.calories_remaining(),
            weight: self.state.weight.get(),
            stride_length: self.state.stride_length.get(),
            target_weight: self.goals().target_weight.get(),
            weight_goal: self.weight_goal_status(),
            meals_logged: self.state.meals.len(),
        }
    }
}
