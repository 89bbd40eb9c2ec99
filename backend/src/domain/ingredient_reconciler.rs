//! Resolves recipe ingredient references into attachments.
//!
//! `ById` references are trusted without a lookup; a dangling id surfaces as a
//! foreign-key failure when the recipe write commits. `ByName` references are
//! looked up by exact name and staged for creation when missing.
//!
//! Two concurrent submissions naming the same new ingredient can both stage
//! it. The store's unique constraint lets one commit and fails the other as a
//! whole; nothing here retries.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};
use crate::domain::{IngredientAttachment, IngredientLine, IngredientRef};

/// Ingredient reconciler bound to a catalogue repository.
#[derive(Clone)]
pub struct IngredientReconciler<R> {
    ingredient_repo: Arc<R>,
}

impl<R> IngredientReconciler<R> {
    pub fn new(ingredient_repo: Arc<R>) -> Self {
        Self { ingredient_repo }
    }
}

impl<R> IngredientReconciler<R>
where
    R: IngredientRepository,
{
    /// Resolve a single reference.
    pub async fn resolve(
        &self,
        reference: &IngredientRef,
    ) -> Result<IngredientAttachment, IngredientRepositoryError> {
        match reference {
            IngredientRef::ById(id) => Ok(IngredientAttachment::Existing(*id)),
            IngredientRef::ByName(name) => {
                match self.ingredient_repo.find_by_name(name).await? {
                    Some(existing) => Ok(IngredientAttachment::Existing(existing.id())),
                    None => {
                        debug!(ingredient = %name, "staging new ingredient");
                        Ok(IngredientAttachment::CreateNew(name.clone()))
                    }
                }
            }
        }
    }

    /// Resolve every line independently, preserving line order.
    pub async fn resolve_lines(
        &self,
        lines: &[IngredientLine],
    ) -> Result<Vec<IngredientAttachment>, IngredientRepositoryError> {
        let mut attachments = Vec::with_capacity(lines.len());
        for line in lines {
            attachments.push(self.resolve(&line.reference).await?);
        }
        Ok(attachments)
    }
}
