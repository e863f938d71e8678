use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{CategoryResponse, CreateCategoryRequest, CreateProductRequest, ProductResponse};
use crate::middleware::AuthContext;
use crate::models::records::{StoreProduct, StoreProductCategory};
use crate::models::{Role, StoreStatus};
use crate::services::{authorize, EngineError};
use crate::startup::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::StoreAdmin], None)?;
    payload.validate().map_err(AppError::from)?;

    let store = state
        .db
        .find_store_by_owner(&ctx.0.id)
        .await?
        .ok_or(EngineError::NotFound("store"))?;

    // Only an approved storefront may list products.
    if store.status != StoreStatus::Verified {
        return Err(EngineError::App(AppError::Forbidden(anyhow::anyhow!(
            "Store is not verified"
        ))));
    }

    let product = StoreProduct::new(
        ctx.0.id.clone(),
        store.id,
        payload.product_name,
        payload.product_price,
        payload.product_description,
    );
    state.db.insert_product(&product).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

pub async fn delete_product(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, EngineError> {
    let product = state
        .db
        .find_product(&id)
        .await?
        .ok_or(EngineError::NotFound("product"))?;

    authorize(&ctx.0, &[], Some(&product.created_by))?;

    if !state.db.delete_product(&id).await? {
        return Err(EngineError::NotFound("product"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_category(
    State(state): State<AppState>,
    ctx: AuthContext,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, EngineError> {
    authorize(&ctx.0, &[Role::StoreAdmin, Role::SuperAdmin], None)?;
    payload.validate().map_err(AppError::from)?;

    let category = StoreProductCategory::new(
        ctx.0.id.clone(),
        payload.category_name,
        payload.category_type,
    );
    state.db.insert_category(&category).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, EngineError> {
    let categories = state.db.list_categories().await?;
    let categories: Vec<CategoryResponse> =
        categories.into_iter().map(CategoryResponse::from).collect();
    Ok(Json(categories))
}
