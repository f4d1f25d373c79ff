//! Calorie and body-composition formulas.
//!
//! Everything here is a pure function of its inputs. Ranges are not checked:
//! negative steps or implausible heights produce numbers, not errors, and it
//! is up to callers to pass sensible values.
//!
//! Integer results use `f64::round` (half away from zero).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body weight assumed when none is known (kg)
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Average adult stride length (m)
pub const DEFAULT_STRIDE_LENGTH_M: f64 = 0.762;

/// Energy per meter walked per kg of body weight
const KCAL_PER_METER_KG: f64 = 0.0005;

/// Energy stored in one kg of body fat
pub const KCAL_PER_KG_FAT: f64 = 7700.0;

const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Calories burned walking `steps` steps.
///
/// `round(steps * stride_length * weight * 0.0005)`
pub fn calories_from_steps(steps: f64, weight: f64, stride_length: f64) -> i64 {
    (steps * stride_length * weight * KCAL_PER_METER_KG).round() as i64
}

/// [`calories_from_steps`] with the default weight and stride length
pub fn calories_from_steps_default(steps: f64) -> i64 {
    calories_from_steps(steps, DEFAULT_WEIGHT_KG, DEFAULT_STRIDE_LENGTH_M)
}

/// Basal metabolic rate (kcal/day), Harris-Benedict equation.
///
/// Weight in kg, height in cm, age in years.
pub fn basal_metabolic_rate(weight: f64, height: f64, age: f64, is_male: bool) -> i64 {
    let bmr = if is_male {
        66.5 + 13.75 * weight + 5.003 * height - 6.75 * age
    } else {
        655.1 + 9.563 * weight + 1.850 * height - 4.676 * age
    };
    bmr.round() as i64
}

// ============================================================================
// Activity Levels
// ============================================================================

/// Activity level used to scale BMR into daily needs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise and a physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "veryActive",
        }
    }

    /// Look up a level by key; unknown keys mean moderate
    pub fn from_key_or_default(key: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|level| level.key() == key)
            .unwrap_or_else(|| {
                tracing::debug!("Unknown activity level {:?}, using moderate", key);
                ActivityLevel::default()
            })
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Daily calorie needs: `round(bmr * multiplier)`
pub fn daily_calorie_needs(bmr: f64, level: ActivityLevel) -> i64 {
    (bmr * level.multiplier()).round() as i64
}

/// [`daily_calorie_needs`] keyed by the level's name.
///
/// Unrecognized keys fall back to the moderate multiplier.
pub fn daily_calorie_needs_for_key(bmr: f64, activity_level: &str) -> i64 {
    daily_calorie_needs(bmr, ActivityLevel::from_key_or_default(activity_level))
}

// ============================================================================
// Balance and Projection
// ============================================================================

/// Calories in minus calories out; positive is a surplus
pub fn calorie_balance(calories_in: f64, calories_out: f64) -> f64 {
    calories_in - calories_out
}

/// Projected weight change in kg after `days` at `daily_balance`.
///
/// Same sign as the balance: a surplus predicts a gain.
pub fn predict_weight_change(daily_balance: f64, days: f64) -> f64 {
    (daily_balance * days) / KCAL_PER_KG_FAT
}

/// [`predict_weight_change`] over one week
pub fn predict_weekly_weight_change(daily_balance: f64) -> f64 {
    predict_weight_change(daily_balance, 7.0)
}

// ============================================================================
// Macros
// ============================================================================

/// Percent of calories assigned to each macronutrient.
///
/// The three values are used as given; they need not add up to 100.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
}

impl Default for MacroRatios {
    fn default() -> Self {
        Self {
            protein_pct: 30.0,
            carbs_pct: 40.0,
            fat_pct: 30.0,
        }
    }
}

/// Grams of each macronutrient
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

/// Split `calories` into grams of protein, carbs and fat
pub fn macro_split(calories: f64, ratios: MacroRatios) -> MacroSplit {
    let grams =
        |pct: f64, kcal_per_gram: f64| (calories * (pct / 100.0) / kcal_per_gram).round() as i64;

    MacroSplit {
        protein: grams(ratios.protein_pct, KCAL_PER_GRAM_PROTEIN),
        carbs: grams(ratios.carbs_pct, KCAL_PER_GRAM_CARBS),
        fat: grams(ratios.fat_pct, KCAL_PER_GRAM_FAT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calories_from_steps_default_profile() {
        // 100 * 0.762 * 70 * 0.0005 = 2.667
        assert_eq!(calories_from_steps(100.0, 70.0, 0.762), 3);
        assert_eq!(calories_from_steps_default(100.0), 3);
        assert_eq!(calories_from_steps_default(0.0), 0);
        assert_eq!(calories_from_steps_default(10_000.0), 267);
    }

    #[test]
    fn test_calories_from_steps_matches_formula() {
        for steps in [0u32, 1, 7, 55, 999, 12_345] {
            for weight in [45.0, 70.0, 92.3] {
                for stride in [0.5, 0.762, 0.9] {
                    let expected = (steps as f64 * stride * weight * 0.0005).round() as i64;
                    assert_eq!(calories_from_steps(steps as f64, weight, stride), expected);
                }
            }
        }
    }

    #[test]
    fn test_calories_from_steps_accepts_negative() {
        assert_eq!(calories_from_steps(-100.0, 70.0, 0.762), -3);
    }

    #[test]
    fn test_bmr_male_and_female() {
        // 66.5 + 962.5 + 875.525 - 202.5 = 1702.025
        assert_eq!(basal_metabolic_rate(70.0, 175.0, 30.0, true), 1702);
        // 655.1 + 573.78 + 305.25 - 116.9 = 1417.23
        assert_eq!(basal_metabolic_rate(60.0, 165.0, 25.0, false), 1417);
    }

    #[test]
    fn test_daily_needs_table() {
        assert_eq!(daily_calorie_needs(1600.0, ActivityLevel::Sedentary), 1920);
        assert_eq!(daily_calorie_needs(1600.0, ActivityLevel::Light), 2200);
        assert_eq!(daily_calorie_needs(1600.0, ActivityLevel::Moderate), 2480);
        assert_eq!(daily_calorie_needs(1600.0, ActivityLevel::Active), 2760);
        assert_eq!(daily_calorie_needs(1600.0, ActivityLevel::VeryActive), 3040);
    }

    #[test]
    fn test_unknown_activity_level_uses_moderate() {
        assert_eq!(
            daily_calorie_needs_for_key(1500.0, "unknownLevel"),
            daily_calorie_needs_for_key(1500.0, "moderate")
        );
        assert_eq!(daily_calorie_needs_for_key(1500.0, "unknownLevel"), 2325);
        assert_eq!(daily_calorie_needs_for_key(1600.0, "veryActive"), 3040);
    }

    #[test]
    fn test_calorie_balance_and_prediction() {
        assert_eq!(calorie_balance(2500.0, 2000.0), 500.0);
        assert_eq!(calorie_balance(1800.0, 2300.0), -500.0);

        let gain = predict_weekly_weight_change(1100.0);
        assert!((gain - 1.0).abs() < 1e-9);

        let loss = predict_weight_change(-500.0, 14.0);
        assert!((loss - (-7000.0 / 7700.0)).abs() < 1e-9);
    }

    #[test]
    fn test_macro_split_defaults() {
        let split = macro_split(2000.0, MacroRatios::default());
        assert_eq!(
            split,
            MacroSplit {
                protein: 150,
                carbs: 200,
                fat: 67,
            }
        );
    }

    #[test]
    fn test_macro_split_does_not_normalize() {
        let ratios = MacroRatios {
            protein_pct: 50.0,
            carbs_pct: 50.0,
            fat_pct: 50.0,
        };
        let split = macro_split(1800.0, ratios);
        assert_eq!(split.protein, 225);
        assert_eq!(split.carbs, 225);
        assert_eq!(split.fat, 100);
    }
}
