//! PostgreSQL-backed `IngredientRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{Ingredient, IngredientId, IngredientName};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, ingredient_from_row};
use super::models::{IngredientRow, NewIngredientRow};
use super::pool::{DbPool, PoolError};
use super::schema::ingredients;

/// Diesel-backed ingredient catalogue.
#[derive(Clone)]
pub struct DieselIngredientRepository {
    pool: DbPool,
}

impl DieselIngredientRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IngredientRepositoryError {
    IngredientRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> IngredientRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection { message } => IngredientRepositoryError::connection(message),
        DieselFailure::UniqueViolation { message, .. }
        | DieselFailure::ForeignKeyViolation { message, .. }
        | DieselFailure::Constraint { message }
        | DieselFailure::Query { message } => IngredientRepositoryError::query(message),
    }
}

fn convert(row: IngredientRow) -> Result<Ingredient, IngredientRepositoryError> {
    ingredient_from_row(row).map_err(IngredientRepositoryError::query)
}

#[async_trait]
impl IngredientRepository for DieselIngredientRepository {
    async fn create(&self, name: &IngredientName) -> Result<Ingredient, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(ingredients::table)
            .values(&NewIngredientRow {
                id: Uuid::new_v4(),
                name: name.as_ref(),
            })
            .returning(IngredientRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| match classify_diesel_error(error) {
                DieselFailure::UniqueViolation { .. } => {
                    IngredientRepositoryError::duplicate_name(name.as_ref())
                }
                DieselFailure::Connection { message } => {
                    IngredientRepositoryError::connection(message)
                }
                DieselFailure::ForeignKeyViolation { message, .. }
                | DieselFailure::Constraint { message }
                | DieselFailure::Query { message } => IngredientRepositoryError::query(message),
            })?;

        convert(row)
    }

    async fn find_by_id(
        &self,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        ingredients::table
            .filter(ingredients::id.eq(id.as_uuid()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(convert)
            .transpose()
    }

    async fn find_by_name(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        ingredients::table
            .filter(ingredients::name.eq(name.as_ref()))
            .select(IngredientRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(convert)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<IngredientRow> = ingredients::table
            .select(IngredientRow::as_select())
            .order_by((ingredients::name.asc(), ingredients::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(convert).collect()
    }
}
