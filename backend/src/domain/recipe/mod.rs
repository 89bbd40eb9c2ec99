//! Recipe aggregate: submissions, validated drafts, the transactional write
//! script and the joined read model.
//!
//! A submission flows through three shapes:
//! 1. [`RecipeSubmission`] is the raw caller input.
//! 2. [`RecipeDraft`] is the validated form, produced before any I/O.
//! 3. [`RecipeWrite`] carries the resolved ingredient attachments handed to
//!    the repository as one atomic unit.

use std::fmt;

mod draft;
mod model;
mod values;
mod write;


pub use draft::{
    IngredientLine, IngredientLineInput, IngredientRef, RecipeDraft, RecipeSubmission, StepDraft,
    StepInput,
};
pub use model::{Recipe, RecipeIngredient, RecipeStep};
pub use values::{CookTimeMinutes, Quantity, RecipeTitle, SearchTerm, StepNumber};
pub use write::{AttachedIngredientLine, IngredientAttachment, RecipeWrite};

/// Validation errors raised while turning caller input into a [`RecipeDraft`]
/// or a [`SearchTerm`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeValidationError {
    BlankTitle,
    NegativeCookTime { value: i32 },
    MissingIngredientReference { index: usize },
    AmbiguousIngredientReference { index: usize },
    BlankIngredientName { index: usize },
    InvalidQuantity { index: usize, value: f64 },
    BlankInstruction { index: usize },
    DuplicateStepNumber { index: usize, step_number: i32 },
}

impl RecipeValidationError {
    /// Name of the offending input field, in wire casing.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankTitle => "title",
            Self::NegativeCookTime { .. } => "cookTimeMinutes",
            Self::MissingIngredientReference { .. }
            | Self::AmbiguousIngredientReference { .. }
            | Self::BlankIngredientName { .. }
            | Self::InvalidQuantity { .. } => "ingredients",
            Self::BlankInstruction { .. } | Self::DuplicateStepNumber { .. } => "steps",
        }
    }

    /// Position of the offending ingredient line or step, when applicable.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::MissingIngredientReference { index }
            | Self::AmbiguousIngredientReference { index }
            | Self::BlankIngredientName { index }
            | Self::InvalidQuantity { index, .. }
            | Self::BlankInstruction { index }
            | Self::DuplicateStepNumber { index, .. } => Some(*index),
            Self::BlankTitle | Self::NegativeCookTime { .. } => None,
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankTitle => "blank_title",
            Self::NegativeCookTime { .. } => "negative_cook_time",
            Self::MissingIngredientReference { .. } => "missing_ingredient_reference",
            Self::AmbiguousIngredientReference { .. } => "ambiguous_ingredient_reference",
            Self::BlankIngredientName { .. } => "blank_ingredient_name",
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::BlankInstruction { .. } => "blank_instruction",
            Self::DuplicateStepNumber { .. } => "duplicate_step_number",
        }
    }
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "recipe title must not be blank"),
            Self::NegativeCookTime { value } => {
                write!(f, "cook time must be zero or more minutes (got {value})")
            }
            Self::MissingIngredientReference { index } => write!(
                f,
                "ingredient line {index} must set one of ingredientId or ingredientName"
            ),
            Self::AmbiguousIngredientReference { index } => write!(
                f,
                "ingredient line {index} must not set both ingredientId and ingredientName"
            ),
            Self::BlankIngredientName { index } => {
                write!(f, "ingredient line {index} has a blank ingredient name")
            }
            Self::InvalidQuantity { index, value } => write!(
                f,
                "ingredient line {index} quantity must be finite and greater than zero (got {value})"
            ),
            Self::BlankInstruction { index } => {
                write!(f, "step {index} instruction must not be blank")
            }
            Self::DuplicateStepNumber { index, step_number } => write!(
                f,
                "step {index} repeats step number {step_number}"
            ),
        }
    }
}

impl std::error::Error for RecipeValidationError {}
