//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod identity;
pub mod ingredients;
pub mod recipes;
pub mod recipes_dto;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` endpoint and the extractor configuration they
/// rely on. The caller provides `web::Data<HttpState>`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .service(
            web::scope("/api/v1")
                .service(ingredients::create_ingredient)
                .service(ingredients::list_ingredients)
                .service(ingredients::get_ingredient)
                .service(recipes::create_recipe)
                .service(recipes::list_recipes)
                .service(recipes::search_recipes)
                .service(recipes::get_recipe)
                .service(recipes::delete_recipe)
                .service(users::list_users)
                .service(users::get_user)
                .service(users::list_user_recipes),
        );
}
