use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{
    DeletionResponse, RegisterUserRequest, UpdateUserRequest, UpdateUserRolesRequest, UserResponse,
};
use crate::middleware::AuthContext;
use crate::models::{Role, User};
use crate::services::{authorize, delete_identity_cascade, EngineError};
use crate::startup::AppState;

pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, EngineError> {
    payload.validate().map_err(AppError::from)?;

    let roles = payload.roles.unwrap_or_else(|| vec![Role::Buyer]);
    // Privileged roles are granted by administrators, never self-assigned.
    if roles.contains(&Role::SuperAdmin) {
        return Err(EngineError::App(AppError::BadRequest(anyhow::anyhow!(
            "super-admin cannot be self-assigned"
        ))));
    }
    let user = User::new(payload.user_name, payload.email, roles);

    if !state.db.insert_user(&user).await? {
        return Err(EngineError::App(AppError::Conflict(anyhow::anyhow!(
            "User already exists"
        ))));
    }

    tracing::info!(user_id = %user.id, "user registered");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn list_users(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::SuperAdmin], None)?;

    let users = state.db.list_users().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    // Ownership is checked against the path id itself, before any lookup,
    // so a non-owner learns nothing about whether the account exists.
    authorize(&ctx.0, &[], Some(&id))?;

    let user = state
        .db
        .find_user(&id)
        .await?
        .ok_or(EngineError::NotFound("user"))?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[], Some(&id))?;
    payload.validate().map_err(AppError::from)?;

    let mut set = mongodb::bson::Document::new();
    if let Some(user_name) = payload.user_name {
        set.insert("user_name", user_name);
    }
    if let Some(email) = payload.email {
        set.insert("email", email);
    }
    if set.is_empty() {
        return Err(EngineError::App(AppError::BadRequest(anyhow::anyhow!(
            "No updatable fields provided"
        ))));
    }

    let user = state
        .db
        .update_user_fields(&id, set)
        .await?
        .ok_or(EngineError::NotFound("user"))?;
    Ok(Json(UserResponse::from(user)))
}

pub async fn update_user_roles(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRolesRequest>,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::SuperAdmin], None)?;

    if payload.roles.is_empty() {
        return Err(EngineError::App(AppError::BadRequest(anyhow::anyhow!(
            "Roles must not be empty"
        ))));
    }

    let roles = mongodb::bson::to_bson(&payload.roles)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to serialize roles: {}", e)))?;
    let mut set = mongodb::bson::Document::new();
    set.insert("roles", roles);

    let user = state
        .db
        .update_user_fields(&id, set)
        .await?
        .ok_or(EngineError::NotFound("user"))?;
    tracing::info!(user_id = %id, "user roles updated by administrator");
    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[], Some(&id))?;

    let report = delete_identity_cascade(&state.db, &id).await?;
    Ok(Json(DeletionResponse::from(report)))
}
