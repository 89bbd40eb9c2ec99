//! Driving port for adding ingredients to the catalogue.

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Error, Ingredient, IngredientId, IngredientName};

/// Catalogue mutations exposed to inbound adapters.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), recipe_backend::domain::Error> {
/// use recipe_backend::domain::ports::{FixtureIngredientCommand, IngredientCommand};
///
/// let ingredient = FixtureIngredientCommand
///     .create_ingredient("Basil".to_owned())
///     .await?;
/// assert_eq!(ingredient.name().as_ref(), "Basil");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientCommand: Send + Sync {
    /// Create an ingredient. A taken name fails with a `conflict` error.
    async fn create_ingredient(&self, name: String) -> Result<Ingredient, Error>;
}

/// Fixture command that validates the name and echoes it back without
/// storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIngredientCommand;

#[async_trait]
impl IngredientCommand for FixtureIngredientCommand {
    async fn create_ingredient(&self, name: String) -> Result<Ingredient, Error> {
        let name = IngredientName::new(name).map_err(|err| Error::invalid_request(err.to_string()))?;
        let now = Utc::now();
        Ok(Ingredient::new(IngredientId::random(), name, now, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_rejects_blank_names() {
        let err = FixtureIngredientCommand
            .create_ingredient("  ".to_owned())
            .await
            .expect_err("blank name");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
