use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::records::{StoreProduct, StoreProductCategory};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 2, max = 200))]
    pub product_name: String,
    #[validate(range(min = 0.0))]
    pub product_price: f64,
    #[validate(length(max = 5000))]
    pub product_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub created_by: String,
    pub store_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub product_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StoreProduct> for ProductResponse {
    fn from(p: StoreProduct) -> Self {
        Self {
            id: p.id,
            created_by: p.created_by,
            store_id: p.store_id,
            product_name: p.product_name,
            product_price: p.product_price,
            product_description: p.product_description,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 120))]
    pub category_name: String,
    pub category_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: String,
    pub created_by: String,
    pub category_name: String,
    pub category_type: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<StoreProductCategory> for CategoryResponse {
    fn from(c: StoreProductCategory) -> Self {
        Self {
            id: c.id,
            created_by: c.created_by,
            category_name: c.category_name,
            category_type: c.category_type,
            created_at: c.created_at,
        }
    }
}
