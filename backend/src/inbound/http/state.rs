//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureIngredientCommand, FixtureIngredientQuery, FixtureRecipeCommand, FixtureRecipeQuery,
    FixtureUsersQuery, IngredientCommand, IngredientQuery, IngredientRepository, RecipeCommand,
    RecipeQuery, RecipeRepository, UserRepository, UsersQuery,
};
use crate::domain::{IngredientService, RecipeService, UsersService};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use recipe_backend::domain::ports::FixtureUsersQuery;
/// use recipe_backend::inbound::http::state::HttpState;
///
/// let state = HttpState {
///     users: Arc::new(FixtureUsersQuery),
///     ..HttpState::default()
/// };
/// let _users = state.users.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub ingredients: Arc<dyn IngredientCommand>,
    pub ingredients_query: Arc<dyn IngredientQuery>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub users: Arc<dyn UsersQuery>,
}

impl Default for HttpState {
    /// Fixture ports that hold no data and never touch a store.
    fn default() -> Self {
        Self {
            ingredients: Arc::new(FixtureIngredientCommand),
            ingredients_query: Arc::new(FixtureIngredientQuery),
            recipes: Arc::new(FixtureRecipeCommand),
            recipes_query: Arc::new(FixtureRecipeQuery),
            users: Arc::new(FixtureUsersQuery),
        }
    }
}

impl HttpState {
    /// Wire the domain services over one set of driven adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_backend::inbound::http::state::HttpState;
    /// use recipe_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(store.clone(), store.clone(), store);
    /// let _recipes = state.recipes.clone();
    /// ```
    pub fn from_repositories<I, R, U>(ingredients: Arc<I>, recipes: Arc<R>, users: Arc<U>) -> Self
    where
        I: IngredientRepository + 'static,
        R: RecipeRepository + 'static,
        U: UserRepository + 'static,
    {
        let ingredient_service = Arc::new(IngredientService::new(ingredients.clone()));
        let recipe_service = Arc::new(RecipeService::new(recipes, ingredients));
        Self {
            ingredients: ingredient_service.clone(),
            ingredients_query: ingredient_service,
            recipes: recipe_service.clone(),
            recipes_query: recipe_service,
            users: Arc::new(UsersService::new(users)),
        }
    }
}
