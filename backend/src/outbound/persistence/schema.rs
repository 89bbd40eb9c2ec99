//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Recipe owners. Provisioned outside the recipe service.
    users (id) {
        id -> Uuid,
        /// Unique login email.
        email -> Varchar,
        name -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ingredient catalogue. `name` is unique and case-sensitive.
    ingredients (id) {
        id -> Uuid,
        name -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe headers.
    recipes (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Nullable<Text>,
        /// Non-negative minutes, defaulting to zero.
        cook_time_minutes -> Int4,
        /// Owning user; not cascaded.
        owner_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe-to-ingredient links. Cascade-deleted with the recipe.
    recipe_ingredients (id) {
        id -> Uuid,
        recipe_id -> Uuid,
        ingredient_id -> Uuid,
        quantity -> Float8,
        unit -> Nullable<Varchar>,
        /// Zero-based submission order of the line.
        position -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe steps. Cascade-deleted with the recipe.
    recipe_steps (id) {
        id -> Uuid,
        recipe_id -> Uuid,
        /// Caller-supplied number, unique per recipe.
        step_number -> Int4,
        instruction -> Text,
        /// Zero-based submission order of the step.
        position -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (owner_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_steps -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    ingredients,
    recipes,
    recipe_ingredients,
    recipe_steps,
);
