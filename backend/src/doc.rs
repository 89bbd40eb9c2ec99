//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer and the
//! error schema wrappers. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use crate::inbound::http::ingredients::{CreateIngredientRequest, IngredientResponse};
use crate::inbound::http::recipes_dto::{
    CreateRecipeBody, DeleteRecipeResponse, IngredientLineBody, RecipeIngredientResponse,
    RecipeResponse, RecipeStepResponse, StepBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::UserResponse;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe backend API",
        description = "Recipes with ordered steps, ingredient lines and a shared ingredient catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::ingredients::create_ingredient,
        crate::inbound::http::ingredients::list_ingredients,
        crate::inbound::http::ingredients::get_ingredient,
        crate::inbound::http::recipes::create_recipe,
        crate::inbound::http::recipes::list_recipes,
        crate::inbound::http::recipes::search_recipes,
        crate::inbound::http::recipes::get_recipe,
        crate::inbound::http::recipes::delete_recipe,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::list_user_recipes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        CreateIngredientRequest,
        IngredientResponse,
        CreateRecipeBody,
        IngredientLineBody,
        StepBody,
        RecipeResponse,
        RecipeIngredientResponse,
        RecipeStepResponse,
        DeleteRecipeResponse,
        UserResponse
    )),
    tags(
        (name = "ingredients", description = "Shared ingredient catalogue"),
        (name = "recipes", description = "Recipe creation, lookup and search"),
        (name = "users", description = "Recipe owners"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
