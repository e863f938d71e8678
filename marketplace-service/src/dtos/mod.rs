pub mod records;
pub mod stores;
pub mod users;

pub use records::{CategoryResponse, CreateCategoryRequest, CreateProductRequest, ProductResponse};
pub use stores::{CreateStoreRequest, StoreResponse, UpdateStoreRequest};
pub use users::{
    DeletionResponse, RegisterUserRequest, UpdateUserRequest, UpdateUserRolesRequest, UserResponse,
};
