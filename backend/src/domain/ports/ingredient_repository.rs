//! Port for the ingredient catalogue store.

use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientId, IngredientName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ingredient repository adapters.
    pub enum IngredientRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ingredient repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ingredient repository query failed: {message}",
        /// An ingredient with this exact name already exists.
        DuplicateName { name: String } =>
            "ingredient named {name} already exists",
    }
}

/// Storage for catalogue ingredients.
///
/// Names are unique and compared exactly: no trimming or case folding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Insert a new ingredient.
    ///
    /// Fails with [`IngredientRepositoryError::DuplicateName`] when the name
    /// is taken.
    async fn create(&self, name: &IngredientName) -> Result<Ingredient, IngredientRepositoryError>;

    async fn find_by_id(
        &self,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;

    /// Exact, case-sensitive name lookup.
    async fn find_by_name(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError>;

    /// Every ingredient, ordered by name.
    async fn list(&self) -> Result<Vec<Ingredient>, IngredientRepositoryError>;
}
