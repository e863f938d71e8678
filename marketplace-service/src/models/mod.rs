pub mod records;
pub mod store;
pub mod user;

pub use records::{StoreProduct, StoreProductCategory};
pub use store::{LifecycleAction, Store, StoreStatus};
pub use user::{Role, User};
