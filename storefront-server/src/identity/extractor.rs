//! Identity extractors
//!
//! Handlers take [`CustomerIdentity`] for customer routes and
//! [`StaffAccess`] for admin routes.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{
    CustomerIdentity, HEADER_CUSTOMER_ID, HEADER_CUSTOMER_NAME, HEADER_CUSTOMER_PHONE,
    HEADER_CUSTOMER_ROLE, Role,
};
use crate::AppError;
use crate::core::ServerState;

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl FromRequestParts<ServerState> for CustomerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<CustomerIdentity>() {
            return Ok(identity.clone());
        }

        let Some(customer_id) = header(parts, HEADER_CUSTOMER_ID) else {
            tracing::debug!(uri = %parts.uri, "Request without customer identity");
            return Err(AppError::not_authenticated());
        };

        let identity = CustomerIdentity {
            customer_id,
            display_name: header(parts, HEADER_CUSTOMER_NAME),
            phone: header(parts, HEADER_CUSTOMER_PHONE),
            role: header(parts, HEADER_CUSTOMER_ROLE)
                .map(|r| Role::parse(&r))
                .unwrap_or_default(),
        };

        parts.extensions.insert(identity.clone());
        Ok(identity)
    }
}

/// Admin-only access guard
#[derive(Debug, Clone)]
pub struct StaffAccess(pub CustomerIdentity);

impl FromRequestParts<ServerState> for StaffAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let identity = CustomerIdentity::from_request_parts(parts, state).await?;
        if !identity.is_staff() {
            tracing::warn!(
                customer_id = %identity.customer_id,
                uri = %parts.uri,
                "Staff route denied"
            );
            return Err(AppError::permission_denied("Staff access required"));
        }
        Ok(Self(identity))
    }
}
