//! UUID-backed identifiers for the recipe aggregates.
//!
//! Each identifier is a distinct type so a recipe id can never be passed where
//! an ingredient id is expected.

use thiserror::Error;

/// Error raised when an identifier string is not a usable UUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("{entity} id must not be empty")]
    Empty { entity: &'static str },
    #[error("{entity} id must be a valid UUID")]
    Invalid { entity: &'static str },
}

macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Parse an identifier from its canonical string form.
            ///
            /// Surrounding whitespace is rejected rather than trimmed.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdentifierError> {
                let raw = id.as_ref();
                if raw.is_empty() {
                    return Err(IdentifierError::Empty { entity: $entity });
                }
                if raw.trim() != raw {
                    return Err(IdentifierError::Invalid { entity: $entity });
                }
                ::uuid::Uuid::parse_str(raw)
                    .map(Self)
                    .map_err(|_| IdentifierError::Invalid { entity: $entity })
            }

            /// Generate a new random identifier.
            pub fn random() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(value: ::uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_uuid_id!(
    /// Identifier of a recipe owner.
    UserId,
    "user"
);
define_uuid_id!(
    /// Identifier of a catalogue ingredient.
    IngredientId,
    "ingredient"
);
define_uuid_id!(
    /// Identifier of a recipe.
    RecipeId,
    "recipe"
);
define_uuid_id!(
    /// Identifier of a recipe-to-ingredient link row.
    RecipeIngredientId,
    "recipe ingredient"
);
define_uuid_id!(
    /// Identifier of a recipe step row.
    RecipeStepId,
    "recipe step"
);
