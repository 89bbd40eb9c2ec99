//! Recipe owners.
//!
//! Users are provisioned outside the recipe service; this module only models
//! what the read paths return alongside a recipe.

use std::fmt;

use chrono::{DateTime, Utc};

use super::UserId;

/// Validation errors returned by [`User::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyEmail,
    InvalidEmail,
    BlankName,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must contain a single @ separator"),
            Self::BlankName => write!(f, "name must not be blank when present"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Input payload for [`User::new`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recipe owner.
///
/// ## Invariants
/// - `email` is non-empty and has exactly one `@` with text on both sides.
/// - `name`, when present, is not blank.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use recipe_backend::domain::{User, UserDraft, UserId};
///
/// let now = Utc::now();
/// let user = User::new(UserDraft {
///     id: UserId::random(),
///     email: "cook@example.com".into(),
///     name: Some("Cook".into()),
///     created_at: now,
///     updated_at: now,
/// })
/// .expect("valid user");
/// assert_eq!(user.email(), "cook@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Validate a draft into a [`User`].
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            email,
            name,
            created_at,
            updated_at,
        } = draft;

        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let mut parts = email.split('@');
        let well_formed = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
        );
        if !well_formed {
            return Err(UserValidationError::InvalidEmail);
        }
        if name.as_deref().is_some_and(|value| value.trim().is_empty()) {
            return Err(UserValidationError::BlankName);
        }

        Ok(Self {
            id,
            email,
            name,
            created_at,
            updated_at,
        })
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
