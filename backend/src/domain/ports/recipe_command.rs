//! Driving port for recipe mutations.
//!
//! Inbound adapters pass raw submissions through this port; validation,
//! ingredient reconciliation and the atomic write all happen behind it.

use async_trait::async_trait;

use crate::domain::{Error, Recipe, RecipeId, RecipeSubmission, UserId};

/// Request to create a recipe on behalf of a caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRecipeRequest {
    pub owner_id: UserId,
    pub submission: RecipeSubmission,
}

/// Recipe mutations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Validate, reconcile and atomically persist a recipe.
    ///
    /// Fails with `invalid_request` before any write when the submission is
    /// malformed, and with `write_failed` when the store rejects the write.
    async fn create_recipe(&self, request: CreateRecipeRequest) -> Result<Recipe, Error>;

    /// Delete a recipe. Returns `false` when it did not exist.
    async fn delete_recipe(&self, id: RecipeId) -> Result<bool, Error>;
}

/// Fixture command for wiring tests that never write recipes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeCommand;

#[async_trait]
impl RecipeCommand for FixtureRecipeCommand {
    async fn create_recipe(&self, _request: CreateRecipeRequest) -> Result<Recipe, Error> {
        Err(Error::service_unavailable("recipe storage is not configured"))
    }

    async fn delete_recipe(&self, _id: RecipeId) -> Result<bool, Error> {
        Ok(false)
    }
}
