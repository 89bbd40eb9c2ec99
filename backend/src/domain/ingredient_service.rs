//! Ingredient catalogue service.
//!
//! Implements the ingredient driving ports on top of an
//! [`IngredientRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    IngredientCommand, IngredientQuery, IngredientRepository, IngredientRepositoryError,
};
use crate::domain::{Error, Ingredient, IngredientId, IngredientName};

fn map_repository_error(error: IngredientRepositoryError) -> Error {
    match error {
        IngredientRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ingredient repository unavailable: {message}"))
        }
        IngredientRepositoryError::Query { message } => {
            Error::internal(format!("ingredient repository error: {message}"))
        }
        IngredientRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("ingredient named {name} already exists"))
                .with_details(json!({ "field": "name", "value": name, "code": "duplicate_name" }))
        }
    }
}

/// Catalogue service implementing [`IngredientCommand`] and
/// [`IngredientQuery`].
#[derive(Clone)]
pub struct IngredientService<R> {
    ingredient_repo: Arc<R>,
}

impl<R> IngredientService<R> {
    pub fn new(ingredient_repo: Arc<R>) -> Self {
        Self { ingredient_repo }
    }
}

#[async_trait]
impl<R> IngredientCommand for IngredientService<R>
where
    R: IngredientRepository,
{
    async fn create_ingredient(&self, name: String) -> Result<Ingredient, Error> {
        let name = IngredientName::new(name).map_err(|err| {
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "name", "code": "blank_name" }))
        })?;

        let ingredient = self
            .ingredient_repo
            .create(&name)
            .await
            .map_err(map_repository_error)?;
        info!(ingredient_id = %ingredient.id(), ingredient = %name, "ingredient created");
        Ok(ingredient)
    }
}

#[async_trait]
impl<R> IngredientQuery for IngredientService<R>
where
    R: IngredientRepository,
{
    async fn get_ingredient(&self, id: IngredientId) -> Result<Ingredient, Error> {
        self.ingredient_repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ingredient {id} not found")))
    }

    async fn list_ingredients(&self) -> Result<Vec<Ingredient>, Error> {
        self.ingredient_repo
            .list()
            .await
            .map_err(map_repository_error)
    }
}
