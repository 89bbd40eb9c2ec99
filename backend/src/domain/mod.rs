//! Domain primitives, aggregates and services.
//!
//! Purpose: define the recipe catalogue model and the use cases behind the
//! driving ports. Nothing here depends on HTTP or on a particular store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Ingredient, Recipe, User: read models returned by the ports.
//! - RecipeSubmission / RecipeDraft / RecipeWrite: the creation pipeline.
//! - IngredientService, RecipeService, UsersService: driving port
//!   implementations.

pub mod error;
pub mod identifiers;
pub mod ingredient;
pub mod ingredient_reconciler;
pub mod ingredient_service;
pub mod ports;
pub mod recipe;
pub mod recipe_service;
pub mod trace_id;
pub mod user;
pub mod users_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifiers::{
    IdentifierError, IngredientId, RecipeId, RecipeIngredientId, RecipeStepId, UserId,
};
pub use self::ingredient::{Ingredient, IngredientName, IngredientValidationError};
pub use self::ingredient_reconciler::IngredientReconciler;
pub use self::ingredient_service::IngredientService;
pub use self::recipe::{
    AttachedIngredientLine, CookTimeMinutes, IngredientAttachment, IngredientLine,
    IngredientLineInput, IngredientRef, Quantity, Recipe, RecipeDraft, RecipeIngredient,
    RecipeStep, RecipeSubmission, RecipeTitle, RecipeValidationError, RecipeWrite, SearchTerm,
    StepDraft, StepInput, StepNumber,
};
pub use self::recipe_service::RecipeService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserDraft, UserValidationError};
pub use self::users_service::UsersService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("recipe missing"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
