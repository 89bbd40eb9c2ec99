//! Tests for the recipe service.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockIngredientRepository, MockRecipeRepository};
use crate::domain::{
    CookTimeMinutes, ErrorCode, Ingredient, IngredientAttachment, IngredientId, IngredientLineInput,
    IngredientName, RecipeIngredient, RecipeIngredientId, RecipeStep, RecipeStepId,
    RecipeSubmission, RecipeTitle, StepInput, User, UserDraft,
};

fn owner() -> User {
    let now = Utc::now();
    User::new(UserDraft {
        id: UserId::random(),
        email: "chef@example.com".to_owned(),
        name: None,
        created_at: now,
        updated_at: now,
    })
    .expect("valid user")
}

/// Materialise a write the way a store would, minting ids for staged rows.
fn materialise(write: &RecipeWrite) -> Recipe {
    let now = Utc::now();
    let ingredients = write
        .ingredient_lines
        .iter()
        .map(|line| {
            let ingredient = match &line.attachment {
                IngredientAttachment::Existing(id) => Ingredient::new(
                    *id,
                    IngredientName::new("existing").expect("valid name"),
                    now,
                    now,
                ),
                IngredientAttachment::CreateNew(name) => {
                    Ingredient::new(IngredientId::random(), name.clone(), now, now)
                }
            };
            RecipeIngredient {
                id: RecipeIngredientId::random(),
                ingredient,
                quantity: line.quantity,
                unit: line.unit.clone(),
                created_at: now,
                updated_at: now,
            }
        })
        .collect();
    let steps = write
        .steps
        .iter()
        .map(|step| RecipeStep {
            id: RecipeStepId::random(),
            step_number: step.step_number,
            instruction: step.instruction.clone(),
            created_at: now,
            updated_at: now,
        })
        .collect();

    Recipe {
        id: RecipeId::random(),
        title: write.title.clone(),
        description: write.description.clone(),
        cook_time_minutes: write.cook_time_minutes,
        owner: owner(),
        ingredients,
        steps,
        created_at: now,
        updated_at: now,
    }
}

fn line_by_name(name: &str) -> IngredientLineInput {
    IngredientLineInput {
        ingredient_id: None,
        ingredient_name: Some(name.to_owned()),
        quantity: 1.0,
        unit: Some("cup".to_owned()),
    }
}

#[fixture]
fn request() -> CreateRecipeRequest {
    CreateRecipeRequest {
        owner_id: UserId::random(),
        submission: RecipeSubmission {
            title: "Cake".to_owned(),
            description: None,
            cook_time_minutes: None,
            ingredients: vec![line_by_name("Flour"), line_by_name("Sugar")],
            steps: vec![
                StepInput {
                    step_number: 2,
                    instruction: "Bake".to_owned(),
                },
                StepInput {
                    step_number: 1,
                    instruction: "Mix".to_owned(),
                },
            ],
        },
    }
}

fn service(
    recipes: MockRecipeRepository,
    ingredients: MockIngredientRepository,
) -> RecipeService<MockRecipeRepository, MockIngredientRepository> {
    RecipeService::new(Arc::new(recipes), Arc::new(ingredients))
}

#[rstest]
#[tokio::test]
async fn create_writes_once_and_keeps_step_order(request: CreateRecipeRequest) {
    let mut ingredients = MockIngredientRepository::new();
    ingredients
        .expect_find_by_name()
        .times(2)
        .returning(|_| Ok(None));
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_create()
        .times(1)
        .returning(|write| Ok(materialise(write)));

    let recipe = service(recipes, ingredients)
        .create_recipe(request)
        .await
        .expect("created");

    assert_eq!(recipe.step_numbers(), [2, 1]);
    assert_eq!(recipe.steps[0].instruction, "Bake");
    assert_eq!(recipe.cook_time_minutes.value(), 0);
}

#[rstest]
#[tokio::test]
async fn existing_name_attaches_and_new_name_is_staged(request: CreateRecipeRequest) {
    let flour_id = IngredientId::random();
    let mut ingredients = MockIngredientRepository::new();
    ingredients.expect_find_by_name().times(2).returning(move |name| {
        let now = Utc::now();
        Ok((name.as_ref() == "Flour").then(|| Ingredient::new(flour_id, name.clone(), now, now)))
    });
    let captured = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&captured);
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_create().times(1).returning(move |write| {
        *sink.lock().expect("capture lock") = Some(write.clone());
        Ok(materialise(write))
    });

    service(recipes, ingredients)
        .create_recipe(request)
        .await
        .expect("created");

    let write = captured
        .lock()
        .expect("capture lock")
        .clone()
        .expect("write captured");
    let attachments: Vec<_> = write
        .ingredient_lines
        .iter()
        .map(|line| line.attachment.clone())
        .collect();
    assert_eq!(
        attachments,
        vec![
            IngredientAttachment::Existing(flour_id),
            IngredientAttachment::CreateNew(IngredientName::new("Sugar").expect("valid name")),
        ]
    );
}

#[rstest]
#[tokio::test]
async fn ambiguous_reference_fails_before_any_io(mut request: CreateRecipeRequest) {
    request.submission.ingredients[0].ingredient_id = Some(IngredientId::random());
    let mut ingredients = MockIngredientRepository::new();
    ingredients.expect_find_by_name().times(0);
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_create().times(0);

    let err = service(recipes, ingredients)
        .create_recipe(request)
        .await
        .expect_err("ambiguous");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    let details = err.details().expect("details");
    assert_eq!(details["field"], "ingredients");
    assert_eq!(details["index"], 0);
    assert_eq!(details["code"], "ambiguous_ingredient_reference");
}

#[rstest]
#[case(
    RecipeRepositoryError::duplicate_ingredient("Sugar"),
    ErrorCode::WriteFailed,
    Some("duplicate_ingredient")
)]
#[case(
    RecipeRepositoryError::missing_reference("user", "owner_id"),
    ErrorCode::WriteFailed,
    Some("missing_reference")
)]
#[case(
    RecipeRepositoryError::constraint("check failed"),
    ErrorCode::WriteFailed,
    Some("constraint")
)]
#[case(
    RecipeRepositoryError::connection("pool closed"),
    ErrorCode::ServiceUnavailable,
    None
)]
#[tokio::test]
async fn write_failures_are_classified(
    request: CreateRecipeRequest,
    #[case] failure: RecipeRepositoryError,
    #[case] expected: ErrorCode,
    #[case] kind: Option<&str>,
) {
    let mut ingredients = MockIngredientRepository::new();
    ingredients
        .expect_find_by_name()
        .returning(|_| Ok(None));
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_create()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = service(recipes, ingredients)
        .create_recipe(request)
        .await
        .expect_err("write fails");

    assert_eq!(err.code(), expected);
    if let Some(kind) = kind {
        let details = err.details().expect("details");
        assert_eq!(details["kind"], kind);
        assert!(details["cause"].is_string());
    }
}

#[rstest]
#[tokio::test]
async fn lookup_outage_aborts_before_write(request: CreateRecipeRequest) {
    let mut ingredients = MockIngredientRepository::new();
    ingredients
        .expect_find_by_name()
        .times(1)
        .return_once(|_| Err(IngredientRepositoryError::connection("refused")));
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_create().times(0);

    let err = service(recipes, ingredients)
        .create_recipe(request)
        .await
        .expect_err("lookup fails");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn get_missing_recipe_is_not_found() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let err = service(recipes, MockIngredientRepository::new())
        .get_recipe(RecipeId::random())
        .await
        .expect_err("missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn empty_search_returns_every_recipe() {
    let book: Vec<Recipe> = ["Soup", "Stew"]
        .into_iter()
        .map(|title| {
            materialise(&RecipeWrite {
                owner_id: UserId::random(),
                title: RecipeTitle::new(title).expect("valid title"),
                description: None,
                cook_time_minutes: CookTimeMinutes::default(),
                ingredient_lines: Vec::new(),
                steps: Vec::new(),
            })
        })
        .collect();
    let stored = book.clone();
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_search()
        .withf(|term| *term == SearchTerm::new(""))
        .times(1)
        .return_once(move |_| Ok(stored));

    let found = service(recipes, MockIngredientRepository::new())
        .search_recipes(String::new())
        .await
        .expect("empty query lists everything");

    assert_eq!(found, book);
}

#[rstest]
#[tokio::test]
async fn search_without_matches_is_empty() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_search()
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let found = service(recipes, MockIngredientRepository::new())
        .search_recipes("nonexistent".to_owned())
        .await
        .expect("search succeeds");

    assert!(found.is_empty());
}

#[rstest]
#[tokio::test]
async fn read_query_failures_are_internal() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_list_all()
        .times(1)
        .return_once(|| Err(RecipeRepositoryError::query("boom")));

    let err = service(recipes, MockIngredientRepository::new())
        .list_recipes()
        .await
        .expect_err("fails");

    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn delete_reports_whether_a_row_was_removed(#[case] removed: bool) {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_delete()
        .times(1)
        .return_once(move |_| Ok(removed));

    let deleted = service(recipes, MockIngredientRepository::new())
        .delete_recipe(RecipeId::random())
        .await
        .expect("delete succeeds");

    assert_eq!(deleted, removed);
}
