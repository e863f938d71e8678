use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{CreateStoreRequest, StoreResponse, UpdateStoreRequest};
use crate::middleware::AuthContext;
use crate::models::{Role, Store};
use crate::services::{authorize, EngineError};
use crate::startup::AppState;

pub async fn create_store(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CreateStoreRequest>,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::StoreAdmin], None)?;
    payload.validate().map_err(AppError::from)?;

    if state.db.find_user(&ctx.0.id).await?.is_none() {
        return Err(EngineError::NotFound("user"));
    }

    // Fast path; the unique index on stores.user_id closes the race.
    if state.db.find_store_by_owner(&ctx.0.id).await?.is_some() {
        return Err(EngineError::AlreadyOwnsResource);
    }

    let store = Store::new(
        ctx.0.id.clone(),
        payload.store_name,
        payload.store_logo,
        payload.store_cover_image,
        payload.store_description,
        payload.store_category_id,
        payload.id_card_number,
    );

    if !state.db.insert_store(&store).await? {
        return Err(EngineError::AlreadyOwnsResource);
    }

    tracing::info!(store_id = %store.id, user_id = %store.user_id, "store created");
    Ok((StatusCode::CREATED, Json(StoreResponse::from(store))))
}

pub async fn get_my_store(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::StoreAdmin], None)?;

    let store = state
        .db
        .find_store_by_owner(&ctx.0.id)
        .await?
        .ok_or(EngineError::NotFound("store"))?;
    Ok(Json(StoreResponse::from(store)))
}

pub async fn update_my_store(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<UpdateStoreRequest>,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::StoreAdmin], None)?;
    payload.validate().map_err(AppError::from)?;

    let mut set = mongodb::bson::Document::new();
    if let Some(store_name) = payload.store_name {
        set.insert("store_name", store_name);
    }
    if let Some(store_logo) = payload.store_logo {
        set.insert("store_logo", store_logo);
    }
    if let Some(store_cover_image) = payload.store_cover_image {
        set.insert("store_cover_image", store_cover_image);
    }
    if let Some(store_description) = payload.store_description {
        set.insert("store_description", store_description);
    }
    if let Some(store_category_id) = payload.store_category_id {
        set.insert("store_category_id", store_category_id);
    }
    if set.is_empty() {
        return Err(EngineError::App(AppError::BadRequest(anyhow::anyhow!(
            "No updatable fields provided"
        ))));
    }

    let store = state
        .db
        .update_store_by_owner(&ctx.0.id, set)
        .await?
        .ok_or(EngineError::NotFound("store"))?;
    Ok(Json(StoreResponse::from(store)))
}

pub async fn delete_my_store(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::StoreAdmin], None)?;

    if !state.db.delete_store_by_owner(&ctx.0.id).await? {
        return Err(EngineError::NotFound("store"));
    }
    tracing::info!(user_id = %ctx.0.id, "store deleted by owner");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_stores(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, EngineError> {
    let stores = state.db.list_stores().await?;
    let stores: Vec<StoreResponse> = stores.into_iter().map(StoreResponse::from).collect();
    Ok(Json(stores))
}
