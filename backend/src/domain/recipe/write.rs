//! The transaction script handed to a recipe repository.

use crate::domain::{IngredientId, IngredientName, UserId};

use super::{CookTimeMinutes, IngredientLine, Quantity, RecipeDraft, RecipeTitle, StepDraft};

/// Resolved outcome of reconciling one ingredient reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientAttachment {
    /// Link to this id. Existence is only checked by the store on commit.
    Existing(IngredientId),
    /// Create an ingredient with this name inside the same transaction, then
    /// link to it.
    CreateNew(IngredientName),
}

/// Ingredient line with its attachment decided.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedIngredientLine {
    pub attachment: IngredientAttachment,
    pub quantity: Quantity,
    pub unit: Option<String>,
}

/// Everything a repository needs to persist a recipe atomically.
///
/// Adapters must write, in one transaction and in this order: the recipe row;
/// for each line in order, any staged ingredient then its link row; then every
/// step in order. Lines sharing a `CreateNew` name create the ingredient once.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeWrite {
    pub owner_id: UserId,
    pub title: RecipeTitle,
    pub description: Option<String>,
    pub cook_time_minutes: CookTimeMinutes,
    pub ingredient_lines: Vec<AttachedIngredientLine>,
    pub steps: Vec<StepDraft>,
}

impl RecipeWrite {
    /// Combine a validated draft with one attachment per ingredient line.
    ///
    /// `attachments` must be in the same order as `draft.ingredient_lines`.
    pub fn new(draft: RecipeDraft, attachments: Vec<IngredientAttachment>) -> Self {
        let RecipeDraft {
            owner_id,
            title,
            description,
            cook_time_minutes,
            ingredient_lines,
            steps,
        } = draft;
        let ingredient_lines = ingredient_lines
            .into_iter()
            .zip(attachments)
            .map(
                |(
                    IngredientLine {
                        quantity, unit, ..
                    },
                    attachment,
                )| AttachedIngredientLine {
                    attachment,
                    quantity,
                    unit,
                },
            )
            .collect();

        Self {
            owner_id,
            title,
            description,
            cook_time_minutes,
            ingredient_lines,
            steps,
        }
    }

    /// Names of ingredients this write would create, in line order.
    pub fn staged_ingredient_names(&self) -> impl Iterator<Item = &IngredientName> {
        self.ingredient_lines
            .iter()
            .filter_map(|line| match &line.attachment {
                IngredientAttachment::CreateNew(name) => Some(name),
                IngredientAttachment::Existing(_) => None,
            })
    }
}
