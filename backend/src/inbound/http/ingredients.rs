//! Ingredient catalogue handlers.
//!
//! ```text
//! POST /api/v1/ingredients {"name":"Basil"}
//! GET  /api/v1/ingredients
//! GET  /api/v1/ingredients/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Ingredient, IngredientId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Body for `POST /api/v1/ingredients`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngredientRequest {
    #[schema(example = "Basil")]
    pub name: String,
}

/// Wire representation of a catalogue ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientResponse {
    pub id: String,
    #[schema(example = "Basil")]
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Ingredient> for IngredientResponse {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id().to_string(),
            name: ingredient.name().to_string(),
            created_at: ingredient.created_at(),
            updated_at: ingredient.updated_at(),
        }
    }
}

/// Add a named ingredient to the catalogue.
#[utoipa::path(
    post,
    path = "/api/v1/ingredients",
    request_body = CreateIngredientRequest,
    responses(
        (status = 201, description = "Ingredient created", body = IngredientResponse),
        (status = 400, description = "Blank name", body = ErrorSchema),
        (status = 409, description = "Name already taken", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "createIngredient"
)]
#[post("/ingredients")]
pub async fn create_ingredient(
    state: web::Data<HttpState>,
    payload: web::Json<CreateIngredientRequest>,
) -> ApiResult<HttpResponse> {
    let CreateIngredientRequest { name } = payload.into_inner();
    let ingredient = state.ingredients.create_ingredient(name).await?;
    Ok(HttpResponse::Created().json(IngredientResponse::from(&ingredient)))
}

/// List the catalogue ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients",
    responses(
        (status = 200, description = "Ingredients", body = [IngredientResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "listIngredients"
)]
#[get("/ingredients")]
pub async fn list_ingredients(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<IngredientResponse>>> {
    let ingredients = state.ingredients_query.list_ingredients().await?;
    Ok(web::Json(
        ingredients.iter().map(IngredientResponse::from).collect(),
    ))
}

/// Fetch one ingredient.
#[utoipa::path(
    get,
    path = "/api/v1/ingredients/{id}",
    params(("id" = String, Path, description = "Ingredient id")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such ingredient", body = ErrorSchema)
    ),
    tags = ["ingredients"],
    operation_id = "getIngredient"
)]
#[get("/ingredients/{id}")]
pub async fn get_ingredient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<IngredientResponse>> {
    let id = parse_uuid(&path, FieldName::new("id")).map(IngredientId::from_uuid)?;
    let ingredient = state.ingredients_query.get_ingredient(id).await?;
    Ok(web::Json(IngredientResponse::from(&ingredient)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use crate::domain::ports::MockIngredientCommand;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[rstest]
    #[actix_web::test]
    async fn duplicate_names_surface_as_conflict() {
        let mut command = MockIngredientCommand::new();
        command
            .expect_create_ingredient()
            .withf(|name| name == "Basil")
            .times(1)
            .return_once(|_| {
                Err(Error::conflict("ingredient already exists").with_details(json!({
                    "field": "name",
                    "value": "Basil",
                    "code": "duplicate_name",
                })))
            });
        let state = web::Data::new(HttpState {
            ingredients: Arc::new(command),
            ..HttpState::default()
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(web::scope("/api/v1").service(create_ingredient)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/ingredients")
                .set_json(json!({"name": "Basil"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "conflict");
        assert_eq!(body["details"]["code"], "duplicate_name");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_ingredient_is_not_found() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::default()))
                .service(web::scope("/api/v1").service(get_ingredient)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/ingredients/{}", IngredientId::random()))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
