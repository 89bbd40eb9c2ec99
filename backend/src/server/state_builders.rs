//! Builders choosing the driven adapters behind the HTTP state.

use std::sync::Arc;

use recipe_backend::inbound::http::state::HttpState;
use recipe_backend::outbound::memory::InMemoryStore;
use recipe_backend::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselUserRepository,
};
use tracing::{info, warn};

/// Diesel repositories when a pool is configured, otherwise one shared
/// in-memory store that provisions recipe owners on first write.
pub(crate) fn build_http_state(pool: Option<&DbPool>) -> HttpState {
    match pool {
        Some(pool) => {
            info!("serving from PostgreSQL");
            HttpState::from_repositories(
                Arc::new(DieselIngredientRepository::new(pool.clone())),
                Arc::new(DieselRecipeRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
            )
        }
        None => {
            warn!("no database configured; data lives in process memory only");
            let store = Arc::new(InMemoryStore::provisioning_owners());
            HttpState::from_repositories(store.clone(), store.clone(), store)
        }
    }
}
