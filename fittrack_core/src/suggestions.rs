//! Built-in meal suggestions.
//!
//! Three categories of three meals each, plus the general nutrition tips shown
//! alongside them.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// Cached suggestion list, built once
static DEFAULT_SUGGESTIONS: Lazy<Vec<MealSuggestion>> = Lazy::new(build_default_suggestions);

/// Kind of meal plan a suggestion belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MealCategory {
    Balanced,
    LowCalorie,
    HighProtein,
}

impl MealCategory {
    pub const ALL: [MealCategory; 3] = [
        MealCategory::Balanced,
        MealCategory::LowCalorie,
        MealCategory::HighProtein,
    ];

    /// Parse `balanced`, `lowCalorie` / `low-calorie`, `highProtein` / `high-protein`
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().replace(['-', '_'], "").as_str() {
            "balanced" => Some(MealCategory::Balanced),
            "lowcalorie" => Some(MealCategory::LowCalorie),
            "highprotein" => Some(MealCategory::HighProtein),
            _ => None,
        }
    }
}

impl fmt::Display for MealCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MealCategory::Balanced => "Balanced",
            MealCategory::LowCalorie => "Low Calorie",
            MealCategory::HighProtein => "High Protein",
        })
    }
}

/// A suggested meal with its nutrition (macros in grams)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MealSuggestion {
    pub id: &'static str,
    pub name: &'static str,
    pub category: MealCategory,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub description: &'static str,
}

/// Nutrition tips as (heading, text)
pub const NUTRITION_TIPS: [(&str, &str); 2] = [
    (
        "Calorie Balance",
        "To maintain weight, consume calories equal to what you burn. To lose weight, \
         create a moderate deficit of 500-750 calories per day.",
    ),
    (
        "Protein Intake",
        "Aim for 1.6-2.2g of protein per kg of body weight to support muscle recovery \
         and maintenance.",
    ),
];

/// All built-in suggestions
pub fn default_suggestions() -> &'static [MealSuggestion] {
    &DEFAULT_SUGGESTIONS
}

/// Suggestions in one category, in catalog order
pub fn suggestions_for(category: MealCategory) -> impl Iterator<Item = &'static MealSuggestion> {
    default_suggestions()
        .iter()
        .filter(move |s| s.category == category)
}

fn build_default_suggestions() -> Vec<MealSuggestion> {
    use MealCategory::*;

    let meal = |id, name, category, calories, protein, carbs, fat, description| MealSuggestion {
        id,
        name,
        category,
        calories,
        protein,
        carbs,
        fat,
        description,
    };

    vec![
        // ====================================================================
        // Balanced
        // ====================================================================
        meal(
            "b1",
            "Grilled Chicken Salad",
            Balanced,
            350,
            30,
            20,
            12,
            "A nutritious salad with lean protein from grilled chicken, mixed greens, and a light vinaigrette.",
        ),
        meal(
            "b2",
            "Quinoa Bowl with Roasted Vegetables",
            Balanced,
            420,
            15,
            65,
            10,
            "Protein-rich quinoa with a colorful mix of roasted vegetables and tahini dressing.",
        ),
        meal(
            "b3",
            "Salmon with Sweet Potato",
            Balanced,
            480,
            32,
            45,
            15,
            "Omega-3 rich salmon fillet with baked sweet potato and steamed broccoli.",
        ),
        // ====================================================================
        // Low calorie
        // ====================================================================
        meal(
            "l1",
            "Vegetable Soup with Lentils",
            LowCalorie,
            180,
            12,
            30,
            2,
            "A hearty, low-calorie soup packed with vegetables and protein-rich lentils.",
        ),
        meal(
            "l2",
            "Greek Yogurt with Berries",
            LowCalorie,
            150,
            15,
            20,
            0,
            "Protein-rich Greek yogurt topped with fresh berries and a touch of honey.",
        ),
        meal(
            "l3",
            "Egg White Omelette with Spinach",
            LowCalorie,
            165,
            18,
            8,
            7,
            "Fluffy egg white omelette with fresh spinach, tomatoes, and feta cheese.",
        ),
        // ====================================================================
        // High protein
        // ====================================================================
        meal(
            "h1",
            "Steak with Roasted Brussels Sprouts",
            HighProtein,
            540,
            40,
            15,
            30,
            "Lean steak cooked to perfection with a side of roasted brussels sprouts.",
        ),
        meal(
            "h2",
            "Protein Smoothie Bowl",
            HighProtein,
            320,
            35,
            30,
            5,
            "A thick, creamy smoothie bowl with protein powder, banana, and a variety of toppings.",
        ),
        meal(
            "h3",
            "Tuna Steak with Quinoa",
            HighProtein,
            410,
            42,
            25,
            12,
            "Seared tuna steak with a side of fluffy quinoa and steamed asparagus.",
        ),
    ]
}
