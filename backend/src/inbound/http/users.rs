//! Users API handlers.
//!
//! ```text
//! GET /api/v1/users
//! GET /api/v1/users/{id}
//! GET /api/v1/users/{id}/recipes
//! ```

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes_dto::RecipeResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Wire representation of a recipe owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_owned(),
            name: user.name().map(str::to_owned),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    parse_uuid(raw, FieldName::new("id")).map(UserId::from_uuid)
}

/// List known users ordered by email.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// Recipes owned by a user, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/recipes",
    params(("id" = String, Path, description = "Owner id")),
    responses(
        (status = 200, description = "Recipes owned by the user", body = [RecipeResponse]),
        (status = 400, description = "Malformed id", body = ErrorSchema)
    ),
    tags = ["users", "recipes"],
    operation_id = "listRecipesByOwner"
)]
#[get("/users/{id}/recipes")]
pub async fn list_user_recipes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<RecipeResponse>>> {
    let owner_id = parse_user_id(&path)?;
    let recipes = state.recipes_query.list_recipes_by_owner(owner_id).await?;
    Ok(web::Json(recipes.iter().map(RecipeResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserDraft;
    use crate::domain::ports::MockUsersQuery;
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;
    use std::sync::Arc;

    fn ada() -> User {
        let now = Utc::now();
        User::new(UserDraft {
            id: UserId::random(),
            email: "ada@example.com".to_owned(),
            name: Some("Ada".to_owned()),
            created_at: now,
            updated_at: now,
        })
        .expect("valid user")
    }

    fn state_with(users: MockUsersQuery) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            users: Arc::new(users),
            ..HttpState::default()
        })
    }

    #[rstest]
    #[actix_web::test]
    async fn lists_users_in_camel_case() {
        let user = ada();
        let expected_id = user.id().to_string();
        let mut users = MockUsersQuery::new();
        users
            .expect_list_users()
            .times(1)
            .return_once(move || Ok(vec![user]));
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(users))
                .service(web::scope("/api/v1").service(list_users)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/users").to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body[0]["id"], Value::String(expected_id));
        assert!(body[0].get("createdAt").is_some());
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_user_id_is_rejected_before_lookup() {
        let mut users = MockUsersQuery::new();
        users.expect_get_user().times(0);
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(users))
                .service(web::scope("/api/v1").service(get_user)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/not-a-uuid")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["details"]["code"], "invalid_uuid");
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_user_is_not_found() {
        let mut users = MockUsersQuery::new();
        users
            .expect_get_user()
            .times(1)
            .return_once(|_| Err(Error::not_found("user not found")));
        let app = actix_test::init_service(
            App::new()
                .app_data(state_with(users))
                .service(web::scope("/api/v1").service(get_user)),
        )
        .await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/users/{}", UserId::random()))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
