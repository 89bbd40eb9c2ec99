//! Driving port for ingredient catalogue reads.

use async_trait::async_trait;

use crate::domain::{Error, Ingredient, IngredientId};

/// Catalogue reads exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientQuery: Send + Sync {
    /// Fetch one ingredient, failing with `not_found` when absent.
    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error>;

    /// Every ingredient, ordered by name.
    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, Error>;
}

/// Fixture query over an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIngredientQuery;

#[async_trait]
impl IngredientQuery for FixtureIngredientQuery {
    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error> {
        Err(Error::not_found(format!("ingredient {id} not found")))
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, Error> {
        Ok(Vec::new())
    }
}
