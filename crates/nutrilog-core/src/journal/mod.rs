//! Food journal entries and their nutritional analysis.
//!
//! Logging a journal entry is the qualifying activity behind the daily
//! streak. Entries live in SQLite (see [`crate::storage::Database`]);
//! the analysis attached to an entry carries calories, a glycemic-load
//! category and free-form advice.

mod nutrition;

pub use nutrition::{lowest_glycemic, GlycemicLoad, Ingredient, NutritionTotals};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Nutritional analysis attached to a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodAnalysis {
    pub calories: u32,
    pub glycemic_load: GlycemicLoad,
    /// Free-form dietary advice for this meal.
    pub advice: String,
}

/// One logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub food_name: String,
    pub description: String,
    pub logged_at: DateTime<Utc>,
    pub analysis: Option<FoodAnalysis>,
}

impl JournalEntry {
    /// Create an entry with a fresh identifier and no analysis.
    ///
    /// # Errors
    /// Returns an error if the food name is empty or whitespace-only.
    pub fn new(
        food_name: impl Into<String>,
        description: impl Into<String>,
        logged_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let food_name = food_name.into();
        if food_name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "food_name".into(),
                message: "cannot be empty".into(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            food_name,
            description: description.into(),
            logged_at,
            analysis: None,
        })
    }

    pub fn with_analysis(mut self, analysis: FoodAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }
}
