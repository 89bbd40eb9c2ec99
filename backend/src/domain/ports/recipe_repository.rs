//! Port for recipe persistence.
//!
//! Writes are expressed as a [`RecipeWrite`] transaction script so adapters
//! never have to reconcile ingredients themselves; they only execute the
//! script atomically.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeId, RecipeWrite, SearchTerm, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by recipe repository adapters.
    pub enum RecipeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "recipe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "recipe repository query failed: {message}",
        /// A staged ingredient collided with an existing name.
        DuplicateIngredient { name: String } =>
            "ingredient named {name} already exists",
        /// A foreign key pointed at a row that does not exist.
        MissingReference { entity: String, message: String } =>
            "referenced {entity} does not exist: {message}",
        /// Any other integrity constraint rejected the write.
        Constraint { message: String } =>
            "recipe write violated a constraint: {message}",
    }
}

/// Storage for recipes and their ingredient links and steps.
///
/// Every read returns fully joined [`Recipe`] values with links and steps in
/// stored order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Execute `write` in a single transaction and return the stored recipe.
    ///
    /// On any error nothing from the write persists, including ingredients
    /// staged with [`crate::domain::IngredientAttachment::CreateNew`].
    async fn create(&self, write: &RecipeWrite) -> Result<Recipe, RecipeRepositoryError>;

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Every recipe, oldest first.
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Recipes owned by `owner_id`, oldest first.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Recipes whose title or description contains `term`, ignoring case.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Remove a recipe with its links and steps. Returns `false` when no
    /// recipe had this id. Ingredients are kept.
    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError>;
}
