//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! - Repositories only translate between Diesel rows and domain types.
//! - Row structs (`models.rs`) and the schema (`schema.rs`) stay private to
//!   this module.
//! - Database errors are classified once in `diesel_helpers` and mapped onto
//!   each port's error enum.
//!
//! # Example
//!
//! ```ignore
//! use recipe_backend::outbound::persistence::{DbPool, PoolConfig, DieselRecipeRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/recipes");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselRecipeRepository::new(pool);
//! ```

pub(crate) mod diesel_helpers;
mod diesel_ingredient_repository;
mod diesel_recipe_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
