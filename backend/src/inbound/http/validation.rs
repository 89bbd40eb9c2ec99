//! Shared validation helpers for inbound HTTP adapters.

use actix_web::web;
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    MalformedBody,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain valid UUIDs")).with_index(
        ErrorCode::InvalidUuid,
        index,
        value,
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse an optional UUID carried on the `index`-th element of a list.
pub(crate) fn parse_optional_uuid_at(
    value: Option<&str>,
    field: FieldName,
    index: usize,
) -> Result<Option<Uuid>, Error> {
    value
        .map(|raw| Uuid::parse_str(raw).map_err(|_| invalid_uuid_index_error(field, index, raw)))
        .transpose()
}

/// JSON extractor settings reporting malformed bodies as `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed request body: {err}"))
            .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
            .into()
    })
}

/// Query-string extractor settings reporting bad parameters as
/// `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("malformed query string: {err}"))
            .with_details(json!({ "code": ErrorCode::MalformedQuery.as_str() }))
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const FIELD: FieldName = FieldName::new("ingredientId");

    #[rstest]
    fn missing_field_names_the_field() {
        let err = missing_field_error(FieldName::new("X-User-Id"));
        assert_eq!(err.code(), DomainCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({"field": "X-User-Id", "code": "missing_field"}))
        );
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn bad_uuids_echo_the_value(#[case] raw: &str) {
        let err = parse_uuid(raw, FIELD).expect_err("invalid uuid");
        assert_eq!(
            err.details(),
            Some(&json!({"field": "ingredientId", "value": raw, "code": "invalid_uuid"}))
        );
    }

    #[rstest]
    fn indexed_uuid_errors_carry_the_index() {
        let err = parse_optional_uuid_at(Some("nope"), FIELD, 2).expect_err("invalid uuid");
        assert_eq!(
            err.details(),
            Some(&json!({
                "field": "ingredientId",
                "index": 2,
                "value": "nope",
                "code": "invalid_uuid"
            }))
        );
    }

    #[rstest]
    fn absent_optional_uuid_is_none() {
        assert_eq!(parse_optional_uuid_at(None, FIELD, 0).expect("absent"), None);
    }
}
