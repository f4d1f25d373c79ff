#![forbid(unsafe_code)]

//! Core domain model and business logic for FitTrack.
//!
//! This crate provides:
//! - Calorie, BMR and macro formulas
//! - The fitness state store and its command interface
//! - Settings form validation
//! - Step feed and meal analysis feeds
//! - Meal suggestions and progress history

pub mod types;
pub mod error;
pub mod calorie_math;
pub mod config;
pub mod logging;
pub mod store;
pub mod settings;
pub mod step_feed;
pub mod analysis;
pub mod suggestions;
pub mod progress;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{Command, DashboardSummary, FitnessStateStore, WeightGoalStatus};
pub use settings::{SettingsForm, ValidatedSettings, ValidationError};
pub use step_feed::{MotionSample, MotionSensor, SimulatedAccelerometer, StepDetector, StepFeed};
pub use analysis::{
    analyze_meal, AnalysisError, CameraPermission, MealAnalyzer, MealPhoto, MockMealAnalyzer,
    NutritionEstimate, PendingMeal,
};
pub use suggestions::{default_suggestions, suggestions_for, MealCategory, MealSuggestion};
pub use progress::ProgressHistory;
