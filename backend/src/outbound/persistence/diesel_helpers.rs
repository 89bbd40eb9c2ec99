//! Shared Diesel error classification and row conversion helpers.
//!
//! Repositories translate [`DieselFailure`] into their own port error enums so
//! the classification of PostgreSQL error kinds lives in one place.

use tracing::debug;

use crate::domain::{Ingredient, IngredientId, IngredientName, User, UserDraft, UserId};

use super::models::{IngredientRow, UserRow};

/// Database failure reduced to the categories the ports care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection { message: String },
    /// A unique index rejected the row.
    UniqueViolation {
        constraint: Option<String>,
        message: String,
    },
    /// A foreign key pointed at a missing row.
    ForeignKeyViolation {
        constraint: Option<String>,
        message: String,
    },
    /// A `NOT NULL` or `CHECK` constraint rejected the row.
    Constraint { message: String },
    /// Anything else, including query-builder errors.
    Query { message: String },
}

/// Classify a Diesel error, emitting debug context.
pub(crate) fn classify_diesel_error(error: diesel::result::Error) -> DieselFailure {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            %error,
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(kind, info) => {
            let message = info.message().to_owned();
            let constraint = info.constraint_name().map(str::to_owned);
            match kind {
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation {
                    constraint,
                    message,
                },
                DatabaseErrorKind::ForeignKeyViolation => DieselFailure::ForeignKeyViolation {
                    constraint,
                    message,
                },
                DatabaseErrorKind::NotNullViolation | DatabaseErrorKind::CheckViolation => {
                    DieselFailure::Constraint { message }
                }
                DatabaseErrorKind::ClosedConnection => DieselFailure::Connection { message },
                _ => DieselFailure::Query { message },
            }
        }
        DieselError::NotFound => DieselFailure::Query {
            message: "record not found".to_owned(),
        },
        DieselError::QueryBuilderError(_) => DieselFailure::Query {
            message: "database query error".to_owned(),
        },
        other => DieselFailure::Query {
            message: other.to_string(),
        },
    }
}

pub(crate) fn ingredient_from_row(row: IngredientRow) -> Result<Ingredient, String> {
    let name = IngredientName::new(row.name)
        .map_err(|err| format!("invalid ingredient {} in database: {err}", row.id))?;
    Ok(Ingredient::new(
        IngredientId::from_uuid(row.id),
        name,
        row.created_at,
        row.updated_at,
    ))
}

pub(crate) fn user_from_row(row: UserRow) -> Result<User, String> {
    let id = row.id;
    User::new(UserDraft {
        id: UserId::from_uuid(row.id),
        email: row.email,
        name: row.name,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
    .map_err(|err| format!("invalid user {id} in database: {err}"))
}
