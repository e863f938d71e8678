use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::store::{Store, StoreStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStoreRequest {
    #[validate(length(min = 2, max = 120))]
    pub store_name: String,
    pub store_logo: Option<String>,
    pub store_cover_image: Option<String>,
    #[validate(length(max = 2000))]
    pub store_description: Option<String>,
    pub store_category_id: Option<String>,
    pub id_card_number: Option<String>,
}

/// Owner-updatable fields. Everything else (`status` above all) is not
/// deserialized and can never reach the update write.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoreRequest {
    #[validate(length(min = 2, max = 120))]
    pub store_name: Option<String>,
    pub store_logo: Option<String>,
    pub store_cover_image: Option<String>,
    #[validate(length(max = 2000))]
    pub store_description: Option<String>,
    pub store_category_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub id: String,
    pub user_id: String,
    pub store_name: String,
    pub store_logo: Option<String>,
    pub store_cover_image: Option<String>,
    pub store_description: Option<String>,
    pub store_category_id: Option<String>,
    pub status: StoreStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Store> for StoreResponse {
    fn from(s: Store) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            store_name: s.store_name,
            store_logo: s.store_logo,
            store_cover_image: s.store_cover_image,
            store_description: s.store_description,
            store_category_id: s.store_category_id,
            status: s.status,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}
