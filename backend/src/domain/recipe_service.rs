//! Recipe domain service.
//!
//! Implements the recipe driving ports. Creation runs in three stages:
//! validate the submission, reconcile every ingredient reference, then hand a
//! single [`RecipeWrite`] to the repository. Nothing is written unless the
//! first two stages succeed, and the repository commits all or nothing.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use crate::domain::ports::{
    CreateRecipeRequest, IngredientRepository, IngredientRepositoryError, RecipeCommand,
    RecipeQuery, RecipeRepository, RecipeRepositoryError,
};
use crate::domain::{
    Error, IngredientReconciler, Recipe, RecipeDraft, RecipeId, RecipeValidationError, RecipeWrite,
    SearchTerm, UserId,
};

/// Convert a validation failure into an `invalid_request` error whose details
/// name the offending field.
pub(crate) fn map_validation_error(error: RecipeValidationError) -> Error {
    let mut details = Map::new();
    details.insert("field".to_owned(), Value::from(error.field()));
    if let Some(index) = error.index() {
        details.insert("index".to_owned(), Value::from(index));
    }
    details.insert("code".to_owned(), Value::from(error.code()));
    Error::invalid_request(error.to_string()).with_details(Value::Object(details))
}

fn map_lookup_error(error: IngredientRepositoryError) -> Error {
    match error {
        IngredientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        other => Error::internal(format!("ingredient lookup failed: {other}")),
    }
}

fn map_write_error(error: RecipeRepositoryError) -> Error {
    let cause = error.to_string();
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        RecipeRepositoryError::DuplicateIngredient { name } => {
            Error::write_failed("recipe was not saved").with_details(json!({
                "kind": "duplicate_ingredient",
                "name": name,
                "cause": cause,
            }))
        }
        RecipeRepositoryError::MissingReference { entity, .. } => {
            Error::write_failed("recipe was not saved").with_details(json!({
                "kind": "missing_reference",
                "entity": entity,
                "cause": cause,
            }))
        }
        RecipeRepositoryError::Constraint { .. } => Error::write_failed("recipe was not saved")
            .with_details(json!({ "kind": "constraint", "cause": cause })),
        RecipeRepositoryError::Query { .. } => Error::write_failed("recipe was not saved")
            .with_details(json!({ "kind": "query", "cause": cause })),
    }
}

fn map_read_error(error: RecipeRepositoryError) -> Error {
    match error {
        RecipeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("recipe repository unavailable: {message}"))
        }
        other => Error::internal(format!("recipe repository error: {other}")),
    }
}

/// Recipe service implementing [`RecipeCommand`] and [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeService<R, I> {
    recipe_repo: Arc<R>,
    reconciler: IngredientReconciler<I>,
}

impl<R, I> RecipeService<R, I> {
    /// Create a service writing recipes to `recipe_repo` and resolving names
    /// against `ingredient_repo`.
    pub fn new(recipe_repo: Arc<R>, ingredient_repo: Arc<I>) -> Self {
        Self {
            recipe_repo,
            reconciler: IngredientReconciler::new(ingredient_repo),
        }
    }
}

#[async_trait]
impl<R, I> RecipeCommand for RecipeService<R, I>
where
    R: RecipeRepository,
    I: IngredientRepository,
{
    async fn create_recipe(&self, request: CreateRecipeRequest) -> Result<Recipe, Error> {
        let CreateRecipeRequest {
            owner_id,
            submission,
        } = request;
        let draft = RecipeDraft::try_new(owner_id, submission).map_err(map_validation_error)?;

        let attachments = self
            .reconciler
            .resolve_lines(&draft.ingredient_lines)
            .await
            .map_err(map_lookup_error)?;
        let write = RecipeWrite::new(draft, attachments);

        match self.recipe_repo.create(&write).await {
            Ok(recipe) => {
                info!(
                    recipe_id = %recipe.id,
                    owner_id = %owner_id,
                    ingredients = recipe.ingredients.len(),
                    steps = recipe.steps.len(),
                    "recipe created"
                );
                Ok(recipe)
            }
            Err(error) => {
                warn!(owner_id = %owner_id, %error, "recipe write rolled back");
                Err(map_write_error(error))
            }
        }
    }

    async fn delete_recipe(&self, id: RecipeId) -> Result<bool, Error> {
        let deleted = self
            .recipe_repo
            .delete(&id)
            .await
            .map_err(map_read_error)?;
        if deleted {
            info!(recipe_id = %id, "recipe deleted");
        }
        Ok(deleted)
    }
}

#[async_trait]
impl<R, I> RecipeQuery for RecipeService<R, I>
where
    R: RecipeRepository,
    I: IngredientRepository,
{
    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, Error> {
        self.recipe_repo
            .find_by_id(&id)
            .await
            .map_err(map_read_error)?
            .ok_or_else(|| Error::not_found(format!("recipe {id} not found")))
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error> {
        self.recipe_repo.list_all().await.map_err(map_read_error)
    }

    async fn list_recipes_by_owner(&self, owner_id: UserId) -> Result<Vec<Recipe>, Error> {
        self.recipe_repo
            .list_by_owner(&owner_id)
            .await
            .map_err(map_read_error)
    }

    async fn search_recipes(&self, query: String) -> Result<Vec<Recipe>, Error> {
        self.recipe_repo
            .search(&SearchTerm::new(query))
            .await
            .map_err(map_read_error)
    }
}

#[cfg(test)]
#[path = "recipe_service_tests.rs"]
mod tests;
