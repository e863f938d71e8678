//! Dependent records with no lifecycle of their own.
//!
//! Only the types with routes get full models; the remaining cascade targets
//! (orders, feedback, reviews, transactions) are reached through untyped
//! collection handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_by: String,
    pub store_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub product_description: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl StoreProduct {
    pub fn new(
        created_by: String,
        store_id: String,
        product_name: String,
        product_price: f64,
        product_description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_by,
            store_id,
            product_name,
            product_price,
            product_description,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreProductCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub created_by: String,
    pub category_name: String,
    pub category_type: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl StoreProductCategory {
    pub fn new(created_by: String, category_name: String, category_type: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_by,
            category_name,
            category_type,
            created_at: Utc::now(),
        }
    }
}
