//! Caller identity extraction.
//!
//! The owner of a new recipe is taken from the `X-User-Id` header. The value
//! is trusted as given; authenticating it belongs to whatever fronts this
//! service.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::warn;

use crate::domain::{Error, UserId};

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Identity of the user making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(UserId);

impl CallerId {
    pub fn user_id(&self) -> UserId {
        self.0
    }

    fn from_headers(req: &HttpRequest) -> Result<Self, Error> {
        let raw = req
            .headers()
            .get(USER_ID_HEADER)
            .ok_or_else(|| Error::unauthorized("caller identity required"))?;
        let text = raw.to_str().map_err(|_| {
            warn!("caller identity header is not visible ASCII");
            Error::unauthorized("caller identity is unreadable")
        })?;
        UserId::new(text.trim()).map(Self).map_err(|error| {
            warn!(%error, "caller identity header is not a UUID");
            Error::unauthorized("caller identity is unreadable")
        })
    }
}

impl FromRequest for CallerId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    async fn whoami(caller: CallerId) -> HttpResponse {
        HttpResponse::Ok().body(caller.user_id().to_string())
    }

    #[rstest]
    #[actix_web::test]
    async fn reads_the_header() {
        let app = test::init_service(App::new().route("/me", web::get().to(whoami))).await;
        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((USER_ID_HEADER, "3fa85f64-5717-4562-b3fc-2c963f66afa6"))
            .to_request();

        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = test::read_body(res).await;
        assert_eq!(body, "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[rstest]
    #[case(None)]
    #[case(Some("not-a-uuid"))]
    #[case(Some(""))]
    #[actix_web::test]
    async fn missing_or_unreadable_identity_is_unauthorised(#[case] header: Option<&str>) {
        let app = test::init_service(App::new().route("/me", web::get().to(whoami))).await;
        let mut req = test::TestRequest::get().uri("/me");
        if let Some(value) = header {
            req = req.insert_header((USER_ID_HEADER, value));
        }

        let res = test::call_service(&app, req.to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
