//! Domain error taxonomy of the ownership and lifecycle engine.
//!
//! Every variant carries a stable machine-readable `code` in its response body
//! so boundary clients can branch without string-matching messages. Infra
//! failures pass through as [`AppError`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service_core::error::AppError;
use thiserror::Error;

use crate::models::store::{LifecycleAction, StoreStatus};
use crate::models::user::Role;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("caller lacks a required role")]
    InsufficientRole { required: Vec<Role> },

    #[error("caller does not own this resource")]
    NotOwner,

    #[error("illegal lifecycle transition: {from} -> {action}")]
    InvalidTransition {
        from: StoreStatus,
        action: LifecycleAction,
    },

    #[error("identity already owns a store")]
    AlreadyOwnsResource,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("cascade deletion incomplete; root identity left in place")]
    CascadeIncomplete { completed: Vec<&'static str> },

    #[error("conflicting concurrent update")]
    Conflict,

    #[error(transparent)]
    App(#[from] AppError),
}

impl EngineError {
    /// Stable machine-readable kind, surfaced verbatim to the boundary layer.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InsufficientRole { .. } => "insufficient_role",
            EngineError::NotOwner => "not_owner",
            EngineError::InvalidTransition { .. } => "invalid_transition",
            EngineError::AlreadyOwnsResource => "already_owns_resource",
            EngineError::NotFound(_) => "not_found",
            EngineError::CascadeIncomplete { .. } => "cascade_incomplete",
            EngineError::Conflict => "conflict",
            EngineError::App(_) => "internal",
        }
    }
}

impl From<mongodb::error::Error> for EngineError {
    fn from(err: mongodb::error::Error) -> Self {
        EngineError::App(AppError::from(err))
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
            code: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<serde_json::Value>,
        }

        // Infra errors keep their own status/body mapping.
        let this = match self {
            EngineError::App(err) => return err.into_response(),
            other => other,
        };

        let (status, details) = match &this {
            EngineError::InsufficientRole { required } => (
                StatusCode::FORBIDDEN,
                Some(serde_json::json!({ "required_roles": required })),
            ),
            EngineError::NotOwner => (StatusCode::FORBIDDEN, None),
            EngineError::InvalidTransition { from, action } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Some(serde_json::json!({
                    "from": from.as_str(),
                    "action": action.as_str(),
                })),
            ),
            EngineError::AlreadyOwnsResource => (StatusCode::CONFLICT, None),
            EngineError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            EngineError::CascadeIncomplete { completed } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Some(serde_json::json!({ "completed_collections": completed })),
            ),
            EngineError::Conflict => (StatusCode::CONFLICT, None),
            EngineError::App(_) => unreachable!("handled above"),
        };

        (
            status,
            Json(ErrorResponse {
                error: this.to_string(),
                code: this.code(),
                details,
            }),
        )
            .into_response()
    }
}
