pub mod admin;
pub mod health;
pub mod records;
pub mod stores;
pub mod users;

pub use admin::{block_store, reject_store, suspend_store, verify_store};
pub use health::{health_check, readiness_check};
pub use records::{create_category, create_product, delete_product, list_categories};
pub use stores::{create_store, delete_my_store, get_my_store, list_stores, update_my_store};
pub use users::{
    delete_user, get_user, list_users, register_user, update_user, update_user_roles,
};
