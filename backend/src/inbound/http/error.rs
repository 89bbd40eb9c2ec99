//! Maps domain errors onto HTTP responses.
//!
//! Every failure leaves the server as the JSON form of [`Error`] with a
//! status derived from its [`ErrorCode`]. Internal errors are logged in full
//! and replaced by a generic message on the wire; write failures keep their
//! details so callers can see which reference or constraint broke.

use std::borrow::Cow;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::WriteFailed => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The payload a client is allowed to see.
fn public_view(error: &Error) -> Cow<'_, Error> {
    if error.code() != ErrorCode::InternalError {
        return Cow::Borrowed(error);
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    Cow::Owned(match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    })
}

fn log_server_side(error: &Error, status: StatusCode) {
    let trace_id = error.trace_id().unwrap_or("-");
    match error.code() {
        ErrorCode::InternalError => error!(
            %trace_id,
            status = status.as_u16(),
            reason = error.message(),
            details = ?error.details(),
            "request failed"
        ),
        ErrorCode::WriteFailed | ErrorCode::ServiceUnavailable => warn!(
            %trace_id,
            status = status.as_u16(),
            reason = error.message(),
            "request failed"
        ),
        _ => {}
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        log_server_side(self, status);

        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(public_view(self).as_ref())
    }
}
