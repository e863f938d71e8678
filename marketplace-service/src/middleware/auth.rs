//! Caller context extractor.
//!
//! The authenticating frontend resolves the session and forwards the caller
//! identity on `X-User-ID` and the role tags on `X-User-Roles`
//! (comma-separated). This service never parses tokens itself; headers are
//! only trusted because the frontend sits in front of it.

use std::collections::HashSet;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;

use crate::models::user::Role;
use crate::services::authorization::Caller;

/// Resolved caller for the current request.
#[derive(Debug, Clone)]
pub struct AuthContext(pub Caller);

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-ID")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::AuthError(anyhow::anyhow!("Missing X-User-ID header")))?;

        let roles_raw = parts
            .headers
            .get("X-User-Roles")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::AuthError(anyhow::anyhow!("Missing X-User-Roles header")))?;

        let mut roles = HashSet::new();
        for tag in roles_raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let role: Role = tag
                .parse()
                .map_err(|e: String| AppError::AuthError(anyhow::anyhow!(e)))?;
            roles.insert(role);
        }

        Ok(AuthContext(Caller {
            id: user_id.to_string(),
            roles,
        }))
    }
}
