//! Joined recipe read model.

use chrono::{DateTime, Utc};

use crate::domain::{Ingredient, RecipeId, RecipeIngredientId, RecipeStepId, User};

use super::{CookTimeMinutes, Quantity, RecipeTitle, StepNumber};

/// Link between a recipe and an ingredient, carrying quantity and unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeIngredient {
    pub id: RecipeIngredientId,
    pub ingredient: Ingredient,
    pub quantity: Quantity,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One instruction of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeStep {
    pub id: RecipeStepId,
    pub step_number: StepNumber,
    pub instruction: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recipe joined with its owner, ingredient links and steps.
///
/// `ingredients` and `steps` are in stored order, which is the order they
/// were submitted in. Steps are never re-sorted by `step_number`.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: RecipeTitle,
    pub description: Option<String>,
    pub cook_time_minutes: CookTimeMinutes,
    pub owner: User,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<RecipeStep>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Step numbers in stored order.
    pub fn step_numbers(&self) -> Vec<i32> {
        self.steps.iter().map(|step| step.step_number.value()).collect()
    }
}
