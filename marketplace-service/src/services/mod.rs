pub mod authorization;
pub mod cascade;
pub mod database;
pub mod error;
pub mod lifecycle;

pub use authorization::{authorize, Caller};
pub use cascade::{delete_identity_cascade, CascadeStore, DeletionReport, OWNERSHIP_GRAPH};
pub use database::MongoDb;
pub use error::EngineError;
pub use lifecycle::apply_lifecycle_transition;
