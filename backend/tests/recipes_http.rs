//! End-to-end HTTP tests over the in-memory store.
//!
//! The full `/api/v1` surface is mounted with the real domain services, so
//! these tests exercise validation, reconciliation and the atomic write path
//! without a database.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use recipe_backend::Trace;
use recipe_backend::domain::ports::UserRepository;
use recipe_backend::domain::{User, UserDraft, UserId};
use recipe_backend::inbound::http::configure_api;
use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::memory::InMemoryStore;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

fn user(email: &str) -> User {
    let now = Utc::now();
    User::new(UserDraft {
        id: UserId::random(),
        email: email.to_owned(),
        name: None,
        created_at: now,
        updated_at: now,
    })
    .expect("valid user")
}

struct World {
    store: Arc<InMemoryStore>,
    alice: User,
    bob: User,
}

#[fixture]
async fn world() -> World {
    let store = Arc::new(InMemoryStore::new());
    let alice = user("alice@example.com");
    let bob = user("bob@example.com");
    store.upsert(&alice).await.expect("seed alice");
    store.upsert(&bob).await.expect("seed bob");
    World { store, alice, bob }
}

macro_rules! app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HttpState::from_repositories(
                    $store.clone(),
                    $store.clone(),
                    $store.clone(),
                )))
                .wrap(Trace)
                .configure(configure_api),
        )
        .await
    };
}

fn pesto_body() -> Value {
    json!({
        "title": "Pesto",
        "description": "Bright green sauce",
        "cookTimeMinutes": 10,
        "ingredients": [
            {"ingredientName": "Basil", "quantity": 2, "unit": "cup"},
            {"ingredientName": "Pine nuts", "quantity": 0.25, "unit": "cup"},
            {"ingredientName": "Basil", "quantity": 1}
        ],
        "steps": [
            {"stepNumber": 2, "instruction": "Blend"},
            {"stepNumber": 1, "instruction": "Toast the nuts"}
        ]
    })
}

#[rstest]
#[actix_web::test]
async fn created_recipe_round_trips_through_reads(#[future] world: World) {
    let World { store, alice, .. } = world.await;
    let app = app!(store);

    let created: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/recipes")
            .insert_header(("x-user-id", alice.id().to_string()))
            .set_json(pesto_body())
            .to_request(),
    )
    .await;
    let id = created["id"].as_str().expect("recipe id");

    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/recipes/{id}"))
            .to_request(),
    )
    .await;

    assert_eq!(fetched["owner"]["email"], "alice@example.com");
    let steps: Vec<i64> = fetched["steps"]
        .as_array()
        .expect("steps")
        .iter()
        .filter_map(|step| step["stepNumber"].as_i64())
        .collect();
    assert_eq!(steps, vec![2, 1]);
    let lines = fetched["ingredients"].as_array().expect("lines");
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["ingredient"]["id"], lines[2]["ingredient"]["id"]);

    let catalogue: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ingredients")
            .to_request(),
    )
    .await;
    let names: Vec<&str> = catalogue
        .as_array()
        .expect("ingredients")
        .iter()
        .filter_map(|ingredient| ingredient["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Basil", "Pine nuts"]);
}

#[rstest]
#[actix_web::test]
async fn dangling_ingredient_id_is_a_write_failure(#[future] world: World) {
    let World { store, alice, .. } = world.await;
    let app = app!(store);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/recipes")
            .insert_header(("x-user-id", alice.id().to_string()))
            .set_json(json!({
                "title": "Paella",
                "ingredients": [
                    {"ingredientName": "Saffron", "quantity": 1},
                    {"ingredientId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "quantity": 1}
                ],
                "steps": [{"stepNumber": 1, "instruction": "Simmer"}]
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(res.headers().contains_key("trace-id"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "write_failed");

    let catalogue: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/ingredients")
            .to_request(),
    )
    .await;
    assert_eq!(catalogue, json!([]));
    let recipes: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/recipes").to_request(),
    )
    .await;
    assert_eq!(recipes, json!([]));
}

#[rstest]
#[case(json!({"ingredients": [], "steps": [{"stepNumber": 1, "instruction": "x"}]}), "title")]
#[case(json!({"title": "Soup", "steps": [{"stepNumber": 1, "instruction": "Boil"}],
    "ingredients": [{"quantity": 1}]}), "ingredients")]
#[case(json!({"title": "Soup", "ingredients": [],
    "steps": [{"stepNumber": 1, "instruction": "a"}, {"stepNumber": 1, "instruction": "b"}]}), "steps")]
#[actix_web::test]
async fn invalid_submissions_write_nothing(
    #[future] world: World,
    #[case] body: Value,
    #[case] field: &str,
) {
    let World { store, alice, .. } = world.await;
    let app = app!(store);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/recipes")
            .insert_header(("x-user-id", alice.id().to_string()))
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(res).await;
    assert_eq!(error["code"], "invalid_request");
    assert_eq!(error["details"]["field"], field);
    let recipes: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/api/v1/recipes").to_request(),
    )
    .await;
    assert_eq!(recipes, json!([]));
}

#[rstest]
#[actix_web::test]
async fn owner_listing_and_search(#[future] world: World) {
    let World { store, alice, bob } = world.await;
    let app = app!(store);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/recipes")
            .insert_header(("x-user-id", alice.id().to_string()))
            .set_json(pesto_body())
            .to_request(),
    )
    .await;

    let bobs: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/users/{}/recipes", bob.id()))
            .to_request(),
    )
    .await;
    assert_eq!(bobs, json!([]));

    let hits: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/recipes/search?query=GREEN")
            .to_request(),
    )
    .await;
    assert_eq!(hits.as_array().map(Vec::len), Some(1));

    let misses: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/recipes/search?query=lasagne")
            .to_request(),
    )
    .await;
    assert_eq!(misses, json!([]));

    let everything: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/recipes/search?query=")
            .to_request(),
    )
    .await;
    let titles: Vec<&str> = everything
        .as_array()
        .expect("recipes")
        .iter()
        .filter_map(|recipe| recipe["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Pesto"]);
}

#[rstest]
#[actix_web::test]
async fn offline_store_is_service_unavailable(#[future] world: World) {
    let World { store, .. } = world.await;
    let app = app!(store);
    store.set_offline(true);

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/recipes").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[rstest]
#[actix_web::test]
async fn duplicate_ingredient_name_conflicts(#[future] world: World) {
    let World { store, .. } = world.await;
    let app = app!(store);
    let create = || {
        test::TestRequest::post()
            .uri("/api/v1/ingredients")
            .set_json(json!({"name": "Thyme"}))
            .to_request()
    };

    let first = test::call_service(&app, create()).await;
    let second = test::call_service(&app, create()).await;

    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[rstest]
#[actix_web::test]
async fn provisioning_store_accepts_a_fresh_caller() {
    let store = Arc::new(InMemoryStore::provisioning_owners());
    let app = app!(store);
    let caller = UserId::random();

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/recipes")
            .insert_header(("x-user-id", caller.to_string()))
            .set_json(pesto_body())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let owner: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/users/{caller}"))
            .to_request(),
    )
    .await;
    assert_eq!(owner["email"], format!("{caller}@users.invalid"));

    let owned: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/users/{caller}/recipes"))
            .to_request(),
    )
    .await;
    assert_eq!(owned.as_array().map(Vec::len), Some(1));
}
