//! Catalogue ingredients shared between recipes.

use std::fmt;

use chrono::{DateTime, Utc};

use super::IngredientId;

/// Validation errors for ingredient values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientValidationError {
    BlankName,
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "ingredient name must not be blank"),
        }
    }
}

impl std::error::Error for IngredientValidationError {}

/// Unique ingredient name.
///
/// The value is kept exactly as supplied: no trimming and no case folding, so
/// `"Salt"` and `"salt"` are distinct catalogue entries.
///
/// # Examples
/// ```
/// use recipe_backend::domain::IngredientName;
///
/// let name = IngredientName::new("Basil").expect("valid name");
/// assert_eq!(name.as_ref(), "Basil");
/// assert!(IngredientName::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientName(String);

impl IngredientName {
    /// Validate and wrap an ingredient name.
    pub fn new(name: impl Into<String>) -> Result<Self, IngredientValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IngredientValidationError::BlankName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for IngredientName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for IngredientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<IngredientName> for String {
    fn from(value: IngredientName) -> Self {
        value.0
    }
}

/// A persisted catalogue ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    id: IngredientId,
    name: IngredientName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Ingredient {
    pub fn new(
        id: IngredientId,
        name: IngredientName,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> IngredientId {
        self.id
    }

    pub fn name(&self) -> &IngredientName {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
