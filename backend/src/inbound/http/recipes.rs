//! Recipe handlers.
//!
//! ```text
//! POST   /api/v1/recipes                (X-User-Id required)
//! GET    /api/v1/recipes
//! GET    /api/v1/recipes/search?query=pasta
//! GET    /api/v1/recipes/{id}
//! DELETE /api/v1/recipes/{id}
//! ```
//!
//! Register `search_recipes` before `get_recipe` so `search` is not taken
//! for an id.

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::ports::CreateRecipeRequest;
use crate::domain::{Error, RecipeId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::CallerId;
use crate::inbound::http::recipes_dto::{
    CreateRecipeBody, DeleteRecipeResponse, RecipeResponse, SearchParams,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

fn parse_recipe_id(raw: &str) -> Result<RecipeId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(RecipeId::from_uuid)
}

/// Create a recipe owned by the caller.
///
/// Named ingredients that do not exist yet are created in the same
/// transaction. Nothing is saved when any part of the write fails.
#[utoipa::path(
    post,
    path = "/api/v1/recipes",
    request_body = CreateRecipeBody,
    params(("X-User-Id" = String, Header, description = "Caller user id")),
    responses(
        (status = 201, description = "Recipe created", body = RecipeResponse),
        (status = 400, description = "Invalid submission", body = ErrorSchema),
        (status = 401, description = "Caller identity missing", body = ErrorSchema),
        (status = 422, description = "Write rejected and rolled back", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "createRecipe"
)]
#[post("/recipes")]
pub async fn create_recipe(
    state: web::Data<HttpState>,
    caller: CallerId,
    payload: web::Json<CreateRecipeBody>,
) -> ApiResult<HttpResponse> {
    let submission = payload.into_inner().into_submission()?;
    let recipe = state
        .recipes
        .create_recipe(CreateRecipeRequest {
            owner_id: caller.user_id(),
            submission,
        })
        .await?;
    Ok(HttpResponse::Created().json(RecipeResponse::from(&recipe)))
}

/// List every recipe, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/recipes",
    responses(
        (status = 200, description = "Recipes", body = [RecipeResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "listRecipes"
)]
#[get("/recipes")]
pub async fn list_recipes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let recipes = state.recipes_query.list_recipes().await?;
    Ok(web::Json(recipes.iter().map(RecipeResponse::from).collect()))
}

/// Case-insensitive substring search over titles and descriptions.
///
/// No match is an empty list, not an error. An empty query lists every
/// recipe.
#[utoipa::path(
    get,
    path = "/api/v1/recipes/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeResponse]),
        (status = 400, description = "Malformed query string", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "searchRecipes"
)]
#[get("/recipes/search")]
pub async fn search_recipes(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let SearchParams { query } = params.into_inner();
    let recipes = state.recipes_query.search_recipes(query).await?;
    Ok(web::Json(recipes.iter().map(RecipeResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Recipe", body = RecipeResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such recipe", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "getRecipe"
)]
#[get("/recipes/{id}")]
pub async fn get_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let id = parse_recipe_id(&path)?;
    let recipe = state.recipes_query.get_recipe(id).await?;
    Ok(web::Json(RecipeResponse::from(&recipe)))
}

/// Delete a recipe with its ingredient lines and steps. Ingredients stay in
/// the catalogue.
#[utoipa::path(
    delete,
    path = "/api/v1/recipes/{id}",
    params(("id" = String, Path, description = "Recipe id")),
    responses(
        (status = 200, description = "Whether a recipe was deleted", body = DeleteRecipeResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["recipes"],
    operation_id = "deleteRecipe"
)]
#[delete("/recipes/{id}")]
pub async fn delete_recipe(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteRecipeResponse>> {
    let id = parse_recipe_id(&path)?;
    let deleted = state.recipes.delete_recipe(id).await?;
    Ok(web::Json(DeleteRecipeResponse { deleted }))
}

#[cfg(test)]
#[path = "recipes_tests.rs"]
mod tests;
