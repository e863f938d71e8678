//! Super-admin lifecycle actions on stores.
//!
//! Each route fixes one action; the transition table decides legality.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::dtos::StoreResponse;
use crate::middleware::AuthContext;
use crate::models::{LifecycleAction, Role};
use crate::services::{apply_lifecycle_transition, authorize, EngineError};
use crate::startup::AppState;

async fn apply_action(
    state: AppState,
    ctx: AuthContext,
    store_id: String,
    action: LifecycleAction,
) -> Result<Json<StoreResponse>, EngineError> {
    authorize(&ctx.0, &[Role::SuperAdmin], None)?;
    let store = apply_lifecycle_transition(&state.db, &store_id, action).await?;
    Ok(Json(StoreResponse::from(store)))
}

pub async fn verify_store(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    apply_action(state, ctx, id, LifecycleAction::Verify).await
}

pub async fn reject_store(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    apply_action(state, ctx, id, LifecycleAction::Reject).await
}

pub async fn suspend_store(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    apply_action(state, ctx, id, LifecycleAction::Suspend).await
}

pub async fn block_store(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    apply_action(state, ctx, id, LifecycleAction::Block).await
}
