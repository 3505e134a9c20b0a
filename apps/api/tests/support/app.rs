//! Service-under-test construction.

use actix_http::Request;
use actix_web::body::{self, BoxBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web, App, Error, HttpResponse};
use taskdeck::middleware::request_id::AssignRequestId;
use taskdeck::middleware::request_log::RequestLog;
use taskdeck::routes;
use taskdeck::state::app_state::AppState;
use taskdeck::state::security_config::SecurityConfig;
use test_support::error_body::WireError;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

/// Fresh in-memory state with the test signing secret.
pub fn test_state() -> AppState {
    AppState::in_memory(SecurityConfig::new(TEST_SECRET.as_bytes()))
}

/// Build the service under test with the production wiring: same middleware
/// stack (minus CORS), same route configuration, so protected scopes are
/// gated exactly as they are in `main`.
pub async fn spawn_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(RequestLog)
            .wrap(AssignRequestId)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}

/// Drive a request that the middleware stack is expected to refuse.
///
/// Gate rejections leave the service as errors rather than responses (the
/// HTTP layer renders them above the app), so `test::call_service` would
/// panic on them. This renders the error the same way the HTTP layer does
/// and decodes the envelope the client would see.
pub async fn call_rejected<S>(app: &S, req: Request) -> (StatusCode, WireError)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let err = app.call(req).await.expect_err("expected a gate rejection");
    let resp = HttpResponse::from_error(err);
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body())
        .await
        .expect("read rejection body");
    let wire: WireError = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        panic!(
            "rejection body is not an error envelope: {}",
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, wire)
}
