//! Meal photo analysis.
//!
//! [`MealAnalyzer`] is the seam for a photo-to-nutrition backend. The only
//! implementation here is [`MockMealAnalyzer`], which waits a fixed delay and
//! returns the same estimate for every photo.
//!
//! An estimate is not logged by itself: it becomes a [`PendingMeal`], and
//! confirming that consumes it into exactly one [`Command::AddMeal`].

use crate::store::Command;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Delay used by the mock analyzer when none is configured
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Camera access was not granted; nothing was analyzed
    #[error("camera permission denied")]
    PermissionDenied,

    /// The backend could not produce an estimate
    #[error("analysis unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of asking for camera access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraPermission {
    Granted,
    Denied,
    Undetermined,
}

/// A captured meal photo
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MealPhoto {
    pub uri: String,
}

impl MealPhoto {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Estimated nutrition of one meal (macros in grams)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NutritionEstimate {
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

#[async_trait]
pub trait MealAnalyzer: Send + Sync {
    async fn analyze(&self, photo: &MealPhoto) -> Result<NutritionEstimate, AnalysisError>;
}

/// Stand-in analyzer returning a fixed estimate after a delay
#[derive(Clone, Debug)]
pub struct MockMealAnalyzer {
    delay: Duration,
}

impl MockMealAnalyzer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The estimate every photo gets
    pub fn canned_estimate() -> NutritionEstimate {
        NutritionEstimate {
            name: "Chicken Salad with Quinoa".into(),
            calories: 520,
            protein: 25,
            carbs: 60,
            fat: 12,
        }
    }
}

impl Default for MockMealAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYSIS_DELAY)
    }
}

#[async_trait]
impl MealAnalyzer for MockMealAnalyzer {
    async fn analyze(&self, photo: &MealPhoto) -> Result<NutritionEstimate, AnalysisError> {
        tracing::debug!("Mock analysis of {} ({:?})", photo.uri, self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(Self::canned_estimate())
    }
}

/// An estimate waiting for the user to confirm it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingMeal {
    estimate: NutritionEstimate,
}

impl PendingMeal {
    pub fn estimate(&self) -> &NutritionEstimate {
        &self.estimate
    }

    /// Turn the estimate into the store command that logs it
    pub fn confirm(self) -> Command {
        tracing::info!(
            "Confirmed meal {} ({} kcal)",
            self.estimate.name,
            self.estimate.calories
        );
        Command::AddMeal {
            name: self.estimate.name,
            calories: self.estimate.calories,
        }
    }
}

/// Run `analyzer` on `photo` if the camera may be used.
///
/// Without a granted permission the analyzer is never called.
pub async fn analyze_meal(
    analyzer: &dyn MealAnalyzer,
    permission: CameraPermission,
    photo: &MealPhoto,
) -> Result<PendingMeal, AnalysisError> {
    if permission != CameraPermission::Granted {
        tracing::warn!("Camera permission is {:?}, not analyzing", permission);
        return Err(AnalysisError::PermissionDenied);
    }

    let estimate = analyzer.analyze(photo).await?;
    tracing::info!("Analysis estimated {} at {} kcal", estimate.name, estimate.calories);
    Ok(PendingMeal { estimate })
}
