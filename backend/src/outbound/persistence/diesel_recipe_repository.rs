//! PostgreSQL-backed `RecipeRepository` implementation using Diesel ORM.
//!
//! `create` runs the [`RecipeWrite`] script inside one transaction:
//! 1. insert the `recipes` row;
//! 2. for each ingredient line in order, insert any staged ingredient, then
//!    the `recipe_ingredients` row with its position;
//! 3. insert every `recipe_steps` row with its position;
//! 4. read the joined recipe back on the same connection.
//!
//! Any error aborts the transaction so none of those rows persist.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    CookTimeMinutes, IngredientAttachment, Quantity, Recipe, RecipeId,
    RecipeIngredient, RecipeIngredientId, RecipeStep, RecipeStepId, RecipeTitle, RecipeWrite,
    SearchTerm, StepNumber, User, UserId,
};

use super::diesel_helpers::{
    DieselFailure, classify_diesel_error, ingredient_from_row, user_from_row,
};
use super::models::{
    IngredientRow, NewIngredientRow, NewRecipeIngredientRow, NewRecipeRow, NewRecipeStepRow,
    RecipeIngredientRow, RecipeRow, RecipeStepRow, UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{ingredients, recipe_ingredients, recipe_steps, recipes, users};

/// Diesel-backed recipe store.
#[derive(Clone)]
pub struct DieselRecipeRepository {
    pool: DbPool,
}

impl DieselRecipeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the create transaction, remembering which staged
/// ingredient was being inserted when it happened.
#[derive(Debug)]
enum WriteFailure {
    Diesel(diesel::result::Error),
    StagedIngredient {
        name: String,
        source: diesel::result::Error,
    },
    Integrity(String),
    ReadBack(RecipeRepositoryError),
}

impl From<diesel::result::Error> for WriteFailure {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

fn map_pool_error(error: PoolError) -> RecipeRepositoryError {
    RecipeRepositoryError::connection(error.into_message())
}

/// Name the entity behind a foreign-key constraint.
fn referenced_entity(constraint: Option<&str>, message: &str) -> Option<&'static str> {
    let haystack = constraint.unwrap_or(message);
    if haystack.contains("owner_id") {
        Some("user")
    } else if haystack.contains("ingredient_id") {
        Some("ingredient")
    } else if haystack.contains("recipe_id") {
        Some("recipe")
    } else {
        None
    }
}

fn map_failure(failure: DieselFailure) -> RecipeRepositoryError {
    match failure {
        DieselFailure::Connection { message } => RecipeRepositoryError::connection(message),
        DieselFailure::ForeignKeyViolation {
            constraint,
            message,
        } => match referenced_entity(constraint.as_deref(), &message) {
            Some(entity) => RecipeRepositoryError::missing_reference(entity, message),
            None => {
                warn!(
                    message,
                    constraint_name = ?constraint,
                    "unrecognised foreign key violation"
                );
                RecipeRepositoryError::constraint(message)
            }
        },
        DieselFailure::UniqueViolation { message, .. } | DieselFailure::Constraint { message } => {
            RecipeRepositoryError::constraint(message)
        }
        DieselFailure::Query { message } => RecipeRepositoryError::query(message),
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecipeRepositoryError {
    map_failure(classify_diesel_error(error))
}

fn map_write_failure(failure: WriteFailure) -> RecipeRepositoryError {
    match failure {
        WriteFailure::Diesel(error) => map_diesel_error(error),
        WriteFailure::StagedIngredient { name, source } => match classify_diesel_error(source) {
            DieselFailure::UniqueViolation { .. } => {
                RecipeRepositoryError::duplicate_ingredient(name)
            }
            other => map_failure(other),
        },
        WriteFailure::Integrity(message) => RecipeRepositoryError::constraint(message),
        WriteFailure::ReadBack(error) => error,
    }
}

fn position(index: usize) -> Result<i32, WriteFailure> {
    i32::try_from(index).map_err(|_| WriteFailure::Integrity(format!("position {index} overflows")))
}

/// Run the write script on an open transaction.
async fn insert_recipe(
    conn: &mut AsyncPgConnection,
    write: &RecipeWrite,
) -> Result<Uuid, WriteFailure> {
    let recipe_id = Uuid::new_v4();
    diesel::insert_into(recipes::table)
        .values(&NewRecipeRow {
            id: recipe_id,
            title: write.title.as_ref(),
            description: write.description.as_deref(),
            cook_time_minutes: write.cook_time_minutes.value(),
            owner_id: *write.owner_id.as_uuid(),
        })
        .execute(conn)
        .await?;

    let mut staged: HashMap<&str, Uuid> = HashMap::new();
    for (index, line) in write.ingredient_lines.iter().enumerate() {
        let ingredient_id = match &line.attachment {
            IngredientAttachment::Existing(id) => *id.as_uuid(),
            IngredientAttachment::CreateNew(name) => match staged.get(name.as_ref()) {
                Some(id) => *id,
                None => {
                    let id = Uuid::new_v4();
                    diesel::insert_into(ingredients::table)
                        .values(&NewIngredientRow {
                            id,
                            name: name.as_ref(),
                        })
                        .execute(conn)
                        .await
                        .map_err(|source| WriteFailure::StagedIngredient {
                            name: name.to_string(),
                            source,
                        })?;
                    debug!(ingredient = %name, "created ingredient on first use");
                    staged.insert(name.as_ref(), id);
                    id
                }
            },
        };

        diesel::insert_into(recipe_ingredients::table)
            .values(&NewRecipeIngredientRow {
                id: Uuid::new_v4(),
                recipe_id,
                ingredient_id,
                quantity: line.quantity.value(),
                unit: line.unit.as_deref(),
                position: position(index)?,
            })
            .execute(conn)
            .await?;
    }

    let steps = write
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            Ok(NewRecipeStepRow {
                id: Uuid::new_v4(),
                recipe_id,
                step_number: step.step_number.value(),
                instruction: step.instruction.as_str(),
                position: position(index)?,
            })
        })
        .collect::<Result<Vec<_>, WriteFailure>>()?;
    if !steps.is_empty() {
        diesel::insert_into(recipe_steps::table)
            .values(&steps)
            .execute(conn)
            .await?;
    }

    Ok(recipe_id)
}

/// Join owners, ingredient links and steps onto recipe rows, keeping the
/// order of `rows`.
async fn hydrate(
    conn: &mut AsyncPgConnection,
    rows: Vec<RecipeRow>,
) -> Result<Vec<Recipe>, RecipeRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let recipe_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let owner_ids: Vec<Uuid> = rows.iter().map(|row| row.owner_id).collect();

    let owners: Vec<UserRow> = users::table
        .filter(users::id.eq_any(&owner_ids))
        .select(UserRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let links: Vec<(RecipeIngredientRow, IngredientRow)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq_any(&recipe_ids))
        .order_by((
            recipe_ingredients::recipe_id,
            recipe_ingredients::position.asc(),
        ))
        .select((RecipeIngredientRow::as_select(), IngredientRow::as_select()))
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    let steps: Vec<RecipeStepRow> = recipe_steps::table
        .filter(recipe_steps::recipe_id.eq_any(&recipe_ids))
        .order_by((recipe_steps::recipe_id, recipe_steps::position.asc()))
        .select(RecipeStepRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    let mut owners_by_id: HashMap<Uuid, User> = HashMap::with_capacity(owners.len());
    for row in owners {
        let id = row.id;
        owners_by_id.insert(id, user_from_row(row).map_err(RecipeRepositoryError::query)?);
    }
    let mut links_by_recipe: HashMap<Uuid, Vec<RecipeIngredient>> = HashMap::new();
    for (link, ingredient) in links {
        let quantity = Quantity::new(link.quantity).ok_or_else(|| {
            RecipeRepositoryError::query(format!("invalid quantity on link {}", link.id))
        })?;
        let ingredient = ingredient_from_row(ingredient).map_err(RecipeRepositoryError::query)?;
        links_by_recipe
            .entry(link.recipe_id)
            .or_default()
            .push(RecipeIngredient {
                id: RecipeIngredientId::from_uuid(link.id),
                ingredient,
                quantity,
                unit: link.unit,
                created_at: link.created_at,
                updated_at: link.updated_at,
            });
    }
    let mut steps_by_recipe: HashMap<Uuid, Vec<RecipeStep>> = HashMap::new();
    for step in steps {
        steps_by_recipe
            .entry(step.recipe_id)
            .or_default()
            .push(RecipeStep {
                id: RecipeStepId::from_uuid(step.id),
                step_number: StepNumber::new(step.step_number),
                instruction: step.instruction,
                created_at: step.created_at,
                updated_at: step.updated_at,
            });
    }

    rows.into_iter()
        .map(|row| {
            let owner = owners_by_id.get(&row.owner_id).cloned().ok_or_else(|| {
                RecipeRepositoryError::query(format!("owner of recipe {} is missing", row.id))
            })?;
            let title = RecipeTitle::new(row.title).map_err(|err| {
                RecipeRepositoryError::query(format!("invalid recipe {} in database: {err}", row.id))
            })?;
            let cook_time_minutes = CookTimeMinutes::new(row.cook_time_minutes).ok_or_else(|| {
                RecipeRepositoryError::query(format!("negative cook time on recipe {}", row.id))
            })?;
            Ok(Recipe {
                id: RecipeId::from_uuid(row.id),
                title,
                description: row.description,
                cook_time_minutes,
                owner,
                ingredients: links_by_recipe.remove(&row.id).unwrap_or_default(),
                steps: steps_by_recipe.remove(&row.id).unwrap_or_default(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            })
        })
        .collect()
}

async fn load_one(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<Option<Recipe>, RecipeRepositoryError> {
    let rows: Vec<RecipeRow> = recipes::table
        .filter(recipes::id.eq(id))
        .select(RecipeRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    Ok(hydrate(conn, rows).await?.into_iter().next())
}

#[async_trait]
impl RecipeRepository for DieselRecipeRepository {
    async fn create(&self, write: &RecipeWrite) -> Result<Recipe, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let recipe = conn
            .transaction::<Recipe, WriteFailure, _>(|conn| {
                async move {
                    let recipe_id = insert_recipe(conn, write).await?;
                    load_one(conn, recipe_id)
                        .await
                        .map_err(WriteFailure::ReadBack)?
                        .ok_or_else(|| {
                            WriteFailure::Integrity(format!("recipe {recipe_id} vanished"))
                        })
                }
                .scope_boxed()
            })
            .await
            .map_err(map_write_failure)?;

        Ok(recipe)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_one(&mut conn, *id.as_uuid()).await
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecipeRow> = recipes::table
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at.asc(), recipes::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<RecipeRow> = recipes::table
            .filter(recipes::owner_id.eq(owner_id.as_uuid()))
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at.asc(), recipes::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = term.like_pattern();
        let rows: Vec<RecipeRow> = recipes::table
            .filter(
                recipes::title
                    .ilike(pattern.clone())
                    .or(recipes::description.ilike(pattern)),
            )
            .select(RecipeRow::as_select())
            .order_by((recipes::created_at.asc(), recipes::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        hydrate(&mut conn, rows).await
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(recipes::table.filter(recipes::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("recipes_owner_id_fkey"), "", Some("user"))]
    #[case(Some("recipe_ingredients_ingredient_id_fkey"), "", Some("ingredient"))]
    #[case(
        None,
        "insert or update on table \"recipe_ingredients\" violates foreign key constraint \"recipe_ingredients_ingredient_id_fkey\"",
        Some("ingredient")
    )]
    #[case(Some("something_else_fkey"), "", None)]
    fn foreign_keys_name_their_entity(
        #[case] constraint: Option<&str>,
        #[case] message: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(referenced_entity(constraint, message), expected);
    }

    #[rstest]
    fn staged_ingredient_query_errors_are_not_duplicates() {
        let err = map_write_failure(WriteFailure::StagedIngredient {
            name: "Salt".to_owned(),
            source: diesel::result::Error::NotFound,
        });
        assert!(matches!(err, RecipeRepositoryError::Query { .. }));
    }

    #[rstest]
    fn integrity_failures_become_constraint_errors() {
        let err = map_write_failure(WriteFailure::Integrity("position overflows".to_owned()));
        assert_eq!(err, RecipeRepositoryError::constraint("position overflows"));
    }
}
