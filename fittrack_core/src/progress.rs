//! Day-by-day progress history.
//!
//! Nothing is persisted; the history is whatever the session records, plus a
//! sample week used to populate the progress view before any real data
//! exists.

use crate::calorie_math;
use crate::types::FitnessState;
use serde::Serialize;

/// Totals for one day
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayRecord {
    pub label: String,
    pub steps: i64,
    pub calories_in: f64,
    pub calories_out: f64,
}

impl DayRecord {
    /// Calories in minus calories out
    pub fn balance(&self) -> f64 {
        calorie_math::calorie_balance(self.calories_in, self.calories_out)
    }
}

/// A weigh-in
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeightRecord {
    pub label: String,
    pub weight: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProgressHistory {
    pub days: Vec<DayRecord>,
    pub weights: Vec<WeightRecord>,
}

impl ProgressHistory {
    /// Demonstration data: one week of days and four weekly weigh-ins
    pub fn sample_week() -> Self {
        const LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        const STEPS: [i64; 7] = [6500, 5200, 7800, 8900, 6700, 10200, 9100];
        const CALORIES_IN: [f64; 7] = [1800.0, 2100.0, 1950.0, 1750.0, 2300.0, 2500.0, 2100.0];
        const CALORIES_OUT: [f64; 7] = [1600.0, 1700.0, 1800.0, 1750.0, 1900.0, 2200.0, 1850.0];
        const WEIGHTS: [f64; 4] = [75.2, 74.5, 73.8, 73.2];

        let days = (0..LABELS.len())
            .map(|i| DayRecord {
                label: LABELS[i].to_string(),
                steps: STEPS[i],
                calories_in: CALORIES_IN[i],
                calories_out: CALORIES_OUT[i],
            })
            .collect();

        let weights = WEIGHTS
            .iter()
            .enumerate()
            .map(|(i, weight)| WeightRecord {
                label: format!("Week {}", i + 1),
                weight: *weight,
            })
            .collect();

        Self { days, weights }
    }

    /// Append today's totals as read from the store's state.
    ///
    /// Calories out counts only step-derived burn.
    pub fn record_day(&mut self, label: impl Into<String>, state: &FitnessState) {
        let record = DayRecord {
            label: label.into(),
            steps: state.steps(),
            calories_in: state.calories_consumed() as f64,
            calories_out: state.calories_burned() as f64,
        };
        tracing::debug!("Recorded day {:?}", record);
        self.days.push(record);
    }

    pub fn record_weight(&mut self, label: impl Into<String>, weight: f64) {
        self.weights.push(WeightRecord {
            label: label.into(),
            weight,
        });
    }

    /// Mean steps per recorded day, rounded
    pub fn average_steps(&self) -> Option<i64> {
        if self.days.is_empty() {
            return None;
        }
        let total: i64 = self.days.iter().map(|d| d.steps).sum();
        Some((total as f64 / self.days.len() as f64).round() as i64)
    }

    /// Day with the most steps (earliest on ties)
    pub fn best_day(&self) -> Option<&DayRecord> {
        self.days
            .iter()
            .reduce(|best, day| if day.steps > best.steps { day } else { best })
    }

    /// Mean daily calorie balance
    pub fn average_balance(&self) -> Option<f64> {
        if self.days.is_empty() {
            return None;
        }
        let total: f64 = self.days.iter().map(DayRecord::balance).sum();
        Some(total / self.days.len() as f64)
    }

    /// Last weigh-in minus first
    pub fn total_weight_change(&self) -> Option<f64> {
        let first = self.weights.first()?;
        let last = self.weights.last()?;
        Some(last.weight - first.weight)
    }

    /// Weekly weight change predicted from the average balance
    pub fn projected_weekly_change(&self) -> Option<f64> {
        self.average_balance()
            .map(calorie_math::predict_weekly_weight_change)
    }
}
