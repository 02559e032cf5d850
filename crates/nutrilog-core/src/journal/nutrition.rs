//! Glycemic-load scoring and categorization.
//!
//! The glycemic-load score of a meal is the carb-weighted glycemic index of
//! its ingredient portions: `sum(GI_i * carbs_i) / 100`. Categories follow
//! the standard cutoffs (10 and 20).

use serde::{Deserialize, Serialize};

/// Glycemic-load category.
///
/// Stored and mirrored with the compact 1/2/3 integer coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlycemicLoad {
    Low,
    Medium,
    High,
}

impl GlycemicLoad {
    /// Compact integer coding used in storage and on the wire.
    pub fn code(&self) -> u8 {
        match self {
            GlycemicLoad::Low => 1,
            GlycemicLoad::Medium => 2,
            GlycemicLoad::High => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(GlycemicLoad::Low),
            2 => Some(GlycemicLoad::Medium),
            3 => Some(GlycemicLoad::High),
            _ => None,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            GlycemicLoad::Low => "Low",
            GlycemicLoad::Medium => "Medium",
            GlycemicLoad::High => "High",
        }
    }

    /// Categorize a numeric glycemic-load score.
    pub fn from_score(score: f64) -> Self {
        if score < 10.0 {
            GlycemicLoad::Low
        } else if score < 20.0 {
            GlycemicLoad::Medium
        } else {
            GlycemicLoad::High
        }
    }
}

/// Nutritional profile of one consumed ingredient portion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    /// Glycemic index of the food, 0..=100.
    pub glycemic_index: f64,
    /// Kilocalories in the portion.
    pub calories: f64,
    /// Grams of carbohydrate in the portion.
    pub carbohydrates: f64,
    /// Grams of protein in the portion.
    pub protein: f64,
    /// Grams of fat in the portion.
    pub fat: f64,
    /// Grams of fiber in the portion.
    pub fiber: f64,
}

/// Aggregated nutrition for a meal or recipe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fat: f64,
    pub fiber: f64,
    /// Carb-weighted glycemic index: `sum(GI_i * carbs_i) / 100`.
    pub glycemic_load_score: f64,
}

impl NutritionTotals {
    /// Aggregate a set of ingredient portions.
    pub fn from_ingredients(ingredients: &[Ingredient]) -> Self {
        let mut totals = Self::default();
        for ing in ingredients {
            totals.calories += ing.calories;
            totals.carbohydrates += ing.carbohydrates;
            totals.protein += ing.protein;
            totals.fat += ing.fat;
            totals.fiber += ing.fiber;
            totals.glycemic_load_score += ing.glycemic_index * ing.carbohydrates / 100.0;
        }
        totals
    }

    pub fn category(&self) -> GlycemicLoad {
        GlycemicLoad::from_score(self.glycemic_load_score)
    }
}

/// Index of the option with the lowest glycemic-load score, if any.
pub fn lowest_glycemic(options: &[NutritionTotals]) -> Option<usize> {
    options
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.glycemic_load_score
                .partial_cmp(&b.glycemic_load_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(index, _)| index)
}
