//! HTTP routes
//!
//! - [`health`]: liveness
//! - [`catalog`]: product listing
//! - [`cart`]: stateless cart evaluation
//! - [`checkout`]: quote and submit
//! - [`rewards`]: missions, redemption, collectibles
//! - [`orders`]: customer and staff order access
//! - [`statistics`]: metrics report (staff)
//!
//! Every handler answers with [`ApiResponse`]; errors go through
//! `AppError`'s `IntoResponse`.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod orders;
pub mod rewards;
pub mod statistics;

use axum::Router;

use crate::core::ServerState;

pub use crate::utils::{ApiResponse, AppResult};

/// All routes, state not yet applied
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(catalog::router())
        .merge(cart::router())
        .merge(checkout::router())
        .merge(rewards::router())
        .merge(orders::router())
        .merge(statistics::router())
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Request helpers for router tests

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http::header::CONTENT_TYPE;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::core::{ServerState, build_app};
    use crate::identity::{HEADER_CUSTOMER_ID, HEADER_CUSTOMER_NAME, HEADER_CUSTOMER_ROLE};
    use crate::relay::RecordingRelay;

    pub struct TestApp {
        pub state: ServerState,
        pub relay: Arc<RecordingRelay>,
    }

    impl TestApp {
        pub fn new() -> Self {
            Self::with_relay(RecordingRelay::default())
        }

        pub fn with_relay(relay: RecordingRelay) -> Self {
            let relay = Arc::new(relay);
            let state = ServerState::for_tests(relay.clone());
            Self { state, relay }
        }

        pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = build_app(self.state.clone())
                .oneshot(request)
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, body)
        }
    }

    /// Request builder with optional customer identity
    pub fn request(method: &str, uri: &str, customer: Option<&str>, body: Option<Value>) -> Request<Body> {
        request_as(method, uri, customer, false, body)
    }

    pub fn staff_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        request_as(method, uri, Some("staff-1"), true, body)
    }

    fn request_as(
        method: &str,
        uri: &str,
        customer: Option<&str>,
        staff: bool,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = customer {
            builder = builder
                .header(HEADER_CUSTOMER_ID, id)
                .header(HEADER_CUSTOMER_NAME, "Ana Souza");
        }
        if staff {
            builder = builder.header(HEADER_CUSTOMER_ROLE, "admin");
        }
        match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }
}
