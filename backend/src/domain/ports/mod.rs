//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters. Driving
//! ports (`*Command`, `*Query`) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod ingredient_command;
mod ingredient_query;
mod ingredient_repository;
mod recipe_command;
mod recipe_query;
mod recipe_repository;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use ingredient_command::MockIngredientCommand;
pub use ingredient_command::{FixtureIngredientCommand, IngredientCommand};
#[cfg(test)]
pub use ingredient_query::MockIngredientQuery;
pub use ingredient_query::{FixtureIngredientQuery, IngredientQuery};
#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientRepository, IngredientRepositoryError};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::{CreateRecipeRequest, FixtureRecipeCommand, RecipeCommand};
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::{FixtureRecipeQuery, RecipeQuery};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{FixtureUsersQuery, UsersQuery};
