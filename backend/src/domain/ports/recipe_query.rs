//! Driving port for recipe reads and search.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId, UserId};

/// Recipe reads exposed to inbound adapters.
///
/// Every result is joined with its owner, ingredient links and steps.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), recipe_backend::domain::Error> {
/// use recipe_backend::domain::ports::{FixtureRecipeQuery, RecipeQuery};
///
/// let found = FixtureRecipeQuery.search_recipes("pasta".to_owned()).await?;
/// assert!(found.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// Fetch one recipe, failing with `not_found` when absent.
    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, Error>;

    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error>;

    /// Recipes owned by `owner_id`. Callers must not rely on the order.
    async fn list_recipes_by_owner(&self, owner_id: UserId) -> Result<Vec<Recipe>, Error>;

    /// Case-insensitive substring search over title and description.
    ///
    /// No match is an empty list, not an error. An empty query returns every
    /// recipe.
    async fn search_recipes(&self, query: String) -> Result<Vec<Recipe>, Error>;
}

/// Fixture query over an empty recipe book.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeQuery;

#[async_trait]
impl RecipeQuery for FixtureRecipeQuery {
    async fn get_recipe(&self, id: RecipeId) -> Result<Recipe, Error> {
        Err(Error::not_found(format!("recipe {id} not found")))
    }

    async fn list_recipes(&self) -> Result<Vec<Recipe>, Error> {
        Ok(Vec::new())
    }

    async fn list_recipes_by_owner(&self, _owner_id: UserId) -> Result<Vec<Recipe>, Error> {
        Ok(Vec::new())
    }

    async fn search_recipes(&self, _query: String) -> Result<Vec<Recipe>, Error> {
        Ok(Vec::new())
    }
}
