//! Request IDs - one per request, taken from `X-Request-ID` when the caller
//! supplies a usable one, otherwise generated.

use std::future::{Ready, ready};

use actix_web::body::MessageBody;
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_LEN: usize = 128;

/// Identifier of the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The caller's ID if it is short printable ASCII, else a fresh one.
    fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.len() <= MAX_LEN)
            .filter(|id| id.bytes().all(|b| b.is_ascii_graphic()))
            .map(|id| Self(id.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for RequestId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req.extensions().get::<RequestId>().cloned();
        ready(Ok(id.unwrap_or_else(Self::generate)))
    }
}

/// Middleware: runs the request inside a `request` span carrying its ID and
/// echoes the ID on the response.
///
/// Install with `actix_web::middleware::from_fn(propagate_request_id)`.
pub async fn propagate_request_id(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let id = RequestId::from_headers(req.headers());
    let span = tracing::info_span!("request", request_id = %id.as_str());
    req.extensions_mut().insert(id.clone());

    let mut res = next.call(req).instrument(span).await?;

    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        res.headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use actix_web::middleware::from_fn;
    use actix_web::{App, HttpResponse, test, web};

    use super::*;

    async fn echo(id: RequestId) -> HttpResponse {
        HttpResponse::Ok().body(id.as_str().to_string())
    }

    macro_rules! echo_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(from_fn(propagate_request_id))
                    .route("/", web::get().to(echo)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_generated_id_reaches_handler_and_response() {
        let app = echo_app!();

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = resp.headers().get(REQUEST_ID_HEADER).cloned().unwrap();
        let body = test::read_body(resp).await;

        assert!(Uuid::parse_str(header.to_str().unwrap()).is_ok());
        assert_eq!(header.as_bytes(), &body[..]);
    }

    #[actix_web::test]
    async fn test_oversized_caller_id_is_replaced() {
        let app = echo_app!();

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "x".repeat(MAX_LEN + 1)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let echoed = resp.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(echoed).is_ok());
    }
}
