//! Mutex-guarded store implementing the ingredient, recipe and user ports.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::ports::{
    IngredientRepository, IngredientRepositoryError, RecipeRepository, RecipeRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    CookTimeMinutes, Ingredient, IngredientAttachment, IngredientId, IngredientName, Quantity,
    Recipe, RecipeId, RecipeIngredient, RecipeIngredientId, RecipeStep, RecipeStepId, RecipeTitle,
    RecipeWrite, SearchTerm, User, UserDraft, UserId,
};

/// Domain for the addresses of owners minted by a provisioning store.
const PROVISIONED_EMAIL_DOMAIN: &str = "users.invalid";

#[derive(Debug, Clone)]
struct StoredLink {
    id: RecipeIngredientId,
    ingredient_id: IngredientId,
    quantity: Quantity,
    unit: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredRecipe {
    id: RecipeId,
    title: RecipeTitle,
    description: Option<String>,
    cook_time_minutes: CookTimeMinutes,
    owner_id: UserId,
    links: Vec<StoredLink>,
    steps: Vec<RecipeStep>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
struct State {
    users: Vec<User>,
    ingredients: Vec<Ingredient>,
    recipes: Vec<StoredRecipe>,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id() == id)
    }

    fn ingredient(&self, id: IngredientId) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.id() == id)
    }

    fn ingredient_named(&self, name: &IngredientName) -> Option<&Ingredient> {
        self.ingredients
            .iter()
            .find(|ingredient| ingredient.name() == name)
    }

    fn insert_ingredient(&mut self, name: &IngredientName, now: DateTime<Utc>) -> Option<IngredientId> {
        if self.ingredient_named(name).is_some() {
            return None;
        }
        let id = IngredientId::random();
        self.ingredients
            .push(Ingredient::new(id, name.clone(), now, now));
        Some(id)
    }

    fn hydrate(&self, stored: &StoredRecipe) -> Result<Recipe, String> {
        let owner = self
            .user(&stored.owner_id)
            .cloned()
            .ok_or_else(|| format!("owner of recipe {} is missing", stored.id))?;
        let ingredients = stored
            .links
            .iter()
            .map(|link| {
                let ingredient = self
                    .ingredient(link.ingredient_id)
                    .cloned()
                    .ok_or_else(|| format!("ingredient {} is missing", link.ingredient_id))?;
                Ok(RecipeIngredient {
                    id: link.id,
                    ingredient,
                    quantity: link.quantity,
                    unit: link.unit.clone(),
                    created_at: link.created_at,
                    updated_at: link.created_at,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Recipe {
            id: stored.id,
            title: stored.title.clone(),
            description: stored.description.clone(),
            cook_time_minutes: stored.cook_time_minutes,
            owner,
            ingredients,
            steps: stored.steps.clone(),
            created_at: stored.created_at,
            updated_at: stored.created_at,
        })
    }

    fn hydrate_where(
        &self,
        keep: impl Fn(&StoredRecipe) -> bool,
    ) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        self.recipes
            .iter()
            .filter(|stored| keep(stored))
            .map(|stored| self.hydrate(stored).map_err(RecipeRepositoryError::query))
            .collect()
    }

    fn provision_user(
        &mut self,
        id: UserId,
        now: DateTime<Utc>,
    ) -> Result<(), RecipeRepositoryError> {
        let user = User::new(UserDraft {
            id,
            email: format!("{id}@{PROVISIONED_EMAIL_DOMAIN}"),
            name: None,
            created_at: now,
            updated_at: now,
        })
        .map_err(|err| RecipeRepositoryError::query(err.to_string()))?;
        info!(user_id = %id, "provisioned recipe owner");
        self.users.push(user);
        Ok(())
    }

    /// Apply a recipe write to this state. Callers run it on a copy.
    fn apply(
        &mut self,
        write: &RecipeWrite,
        provision_owner: bool,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let now = Utc::now();
        if self.user(&write.owner_id).is_none() {
            if !provision_owner {
                return Err(RecipeRepositoryError::missing_reference(
                    "user",
                    format!("user {} not found", write.owner_id),
                ));
            }
            self.provision_user(write.owner_id, now)?;
        }

        let mut staged: HashMap<&IngredientName, IngredientId> = HashMap::new();
        let mut links = Vec::with_capacity(write.ingredient_lines.len());
        for line in &write.ingredient_lines {
            let ingredient_id = match &line.attachment {
                IngredientAttachment::Existing(id) => {
                    if self.ingredient(*id).is_none() {
                        return Err(RecipeRepositoryError::missing_reference(
                            "ingredient",
                            format!("ingredient {id} not found"),
                        ));
                    }
                    *id
                }
                IngredientAttachment::CreateNew(name) => match staged.get(name) {
                    Some(id) => *id,
                    None => {
                        let id = self.insert_ingredient(name, now).ok_or_else(|| {
                            RecipeRepositoryError::duplicate_ingredient(name.as_ref())
                        })?;
                        debug!(ingredient = %name, "created ingredient on first use");
                        staged.insert(name, id);
                        id
                    }
                },
            };
            links.push(StoredLink {
                id: RecipeIngredientId::random(),
                ingredient_id,
                quantity: line.quantity,
                unit: line.unit.clone(),
                created_at: now,
            });
        }

        let mut seen = HashSet::with_capacity(write.steps.len());
        let mut steps = Vec::with_capacity(write.steps.len());
        for step in &write.steps {
            if !seen.insert(step.step_number) {
                return Err(RecipeRepositoryError::constraint(format!(
                    "step number {} repeats",
                    step.step_number.value()
                )));
            }
            steps.push(RecipeStep {
                id: RecipeStepId::random(),
                step_number: step.step_number,
                instruction: step.instruction.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        let id = RecipeId::random();
        self.recipes.push(StoredRecipe {
            id,
            title: write.title.clone(),
            description: write.description.clone(),
            cook_time_minutes: write.cook_time_minutes,
            owner_id: write.owner_id,
            links,
            steps,
            created_at: now,
        });
        Ok(id)
    }
}

/// In-process implementation of every driven port.
///
/// Clones share state. [`InMemoryStore::set_offline`] makes every call fail
/// with a connection error until switched back.
///
/// A plain store rejects recipes whose owner was never upserted, like the
/// foreign key in PostgreSQL. A store built with
/// [`InMemoryStore::provisioning_owners`] instead registers the unseen owner
/// with a placeholder `<id>@users.invalid` address in the same write, so a
/// server without a database accepts any caller id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
    offline: Arc<AtomicBool>,
    provision_owners: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that creates a user for every unseen recipe owner.
    pub fn provisioning_owners() -> Self {
        Self {
            provision_owners: true,
            ..Self::default()
        }
    }

    /// Simulate an unreachable backing store.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        if self.offline.load(Ordering::SeqCst) {
            return Err("store is offline".to_owned());
        }
        self.state
            .lock()
            .map_err(|_| "store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::connection)?;
        match state.users.iter_mut().find(|existing| existing.id() == user.id()) {
            Some(existing) => *existing = user.clone(),
            None => state.users.push(user.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        Ok(state.user(id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::connection)?;
        let mut users = state.users.clone();
        users.sort_by(|a, b| a.email().cmp(b.email()));
        Ok(users)
    }
}

#[async_trait]
impl IngredientRepository for InMemoryStore {
    async fn create(&self, name: &IngredientName) -> Result<Ingredient, IngredientRepositoryError> {
        let mut state = self.lock().map_err(IngredientRepositoryError::connection)?;
        let id = state
            .insert_ingredient(name, Utc::now())
            .ok_or_else(|| IngredientRepositoryError::duplicate_name(name.as_ref()))?;
        state
            .ingredient(id)
            .cloned()
            .ok_or_else(|| IngredientRepositoryError::query(format!("ingredient {id} vanished")))
    }

    async fn find_by_id(
        &self,
        id: &IngredientId,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let state = self.lock().map_err(IngredientRepositoryError::connection)?;
        Ok(state.ingredient(*id).cloned())
    }

    async fn find_by_name(
        &self,
        name: &IngredientName,
    ) -> Result<Option<Ingredient>, IngredientRepositoryError> {
        let state = self.lock().map_err(IngredientRepositoryError::connection)?;
        Ok(state.ingredient_named(name).cloned())
    }

    async fn list(&self) -> Result<Vec<Ingredient>, IngredientRepositoryError> {
        let state = self.lock().map_err(IngredientRepositoryError::connection)?;
        let mut ingredients = state.ingredients.clone();
        ingredients.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(ingredients)
    }
}

#[async_trait]
impl RecipeRepository for InMemoryStore {
    async fn create(&self, write: &RecipeWrite) -> Result<Recipe, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::connection)?;
        let mut staged = state.clone();
        let id = staged.apply(write, self.provision_owners)?;
        *state = staged;

        let stored = state
            .recipes
            .iter()
            .find(|stored| stored.id == id)
            .ok_or_else(|| RecipeRepositoryError::query(format!("recipe {id} vanished")))?;
        state.hydrate(stored).map_err(RecipeRepositoryError::query)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::connection)?;
        state
            .recipes
            .iter()
            .find(|stored| stored.id == *id)
            .map(|stored| state.hydrate(stored).map_err(RecipeRepositoryError::query))
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::connection)?;
        state.hydrate_where(|_| true)
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::connection)?;
        state.hydrate_where(|stored| stored.owner_id == *owner_id)
    }

    async fn search(&self, term: &SearchTerm) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let state = self.lock().map_err(RecipeRepositoryError::connection)?;
        state.hydrate_where(|stored| {
            term.matches(stored.title.as_ref())
                || stored
                    .description
                    .as_deref()
                    .is_some_and(|description| term.matches(description))
        })
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock().map_err(RecipeRepositoryError::connection)?;
        let before = state.recipes.len();
        state.recipes.retain(|stored| stored.id != *id);
        Ok(state.recipes.len() < before)
    }
}

#[cfg(test)]
#[path = "in_memory_store_tests.rs"]
mod tests;
