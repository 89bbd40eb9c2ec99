//! Request and response bodies for the recipe endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, IngredientId, IngredientLineInput, Recipe, RecipeIngredient, RecipeStep,
    RecipeSubmission, StepInput,
};
use crate::inbound::http::ingredients::IngredientResponse;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::{FieldName, parse_optional_uuid_at};

const INGREDIENT_ID_FIELD: FieldName = FieldName::new("ingredientId");

/// One ingredient line of a new recipe. Set exactly one of `ingredientId`
/// and `ingredientName`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLineBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub ingredient_id: Option<String>,
    #[schema(example = "Basil")]
    pub ingredient_name: Option<String>,
    #[schema(example = 2.5)]
    pub quantity: f64,
    #[schema(example = "tbsp")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepBody {
    #[schema(example = 1)]
    pub step_number: i32,
    #[schema(example = "Chop the basil")]
    pub instruction: String,
}

/// Body for `POST /api/v1/recipes`.
///
/// Missing `title`, `ingredients` or `steps` are treated as empty so the
/// domain reports them with field context.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeBody {
    #[serde(default)]
    #[schema(example = "Pesto")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = 15)]
    pub cook_time_minutes: Option<i32>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLineBody>,
    #[serde(default)]
    pub steps: Vec<StepBody>,
}

impl CreateRecipeBody {
    /// Convert into a domain submission, rejecting malformed ingredient ids.
    pub fn into_submission(self) -> Result<RecipeSubmission, Error> {
        let ingredients = self
            .ingredients
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let ingredient_id =
                    parse_optional_uuid_at(line.ingredient_id.as_deref(), INGREDIENT_ID_FIELD, index)?
                        .map(IngredientId::from_uuid);
                Ok(IngredientLineInput {
                    ingredient_id,
                    ingredient_name: line.ingredient_name,
                    quantity: line.quantity,
                    unit: line.unit,
                })
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let steps = self
            .steps
            .into_iter()
            .map(|step| StepInput {
                step_number: step.step_number,
                instruction: step.instruction,
            })
            .collect();

        Ok(RecipeSubmission {
            title: self.title,
            description: self.description,
            cook_time_minutes: self.cook_time_minutes,
            ingredients,
            steps,
        })
    }
}

/// Query string for `GET /api/v1/recipes/search`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring matched against titles and descriptions, ignoring case.
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredientResponse {
    pub id: String,
    pub ingredient: IngredientResponse,
    pub quantity: f64,
    pub unit: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RecipeIngredient> for RecipeIngredientResponse {
    fn from(link: &RecipeIngredient) -> Self {
        Self {
            id: link.id.to_string(),
            ingredient: IngredientResponse::from(&link.ingredient),
            quantity: link.quantity.value(),
            unit: link.unit.clone(),
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStepResponse {
    pub id: String,
    pub step_number: i32,
    pub instruction: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&RecipeStep> for RecipeStepResponse {
    fn from(step: &RecipeStep) -> Self {
        Self {
            id: step.id.to_string(),
            step_number: step.step_number.value(),
            instruction: step.instruction.clone(),
            created_at: step.created_at,
            updated_at: step.updated_at,
        }
    }
}

/// A recipe with its owner, ingredient lines and steps in stored order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cook_time_minutes: i32,
    pub owner: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub steps: Vec<RecipeStepResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            title: recipe.title.to_string(),
            description: recipe.description.clone(),
            cook_time_minutes: recipe.cook_time_minutes.value(),
            owner: UserResponse::from(&recipe.owner),
            ingredients: recipe
                .ingredients
                .iter()
                .map(RecipeIngredientResponse::from)
                .collect(),
            steps: recipe.steps.iter().map(RecipeStepResponse::from).collect(),
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Result of `DELETE /api/v1/recipes/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeleteRecipeResponse {
    pub deleted: bool,
}
