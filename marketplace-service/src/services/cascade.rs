//! Ownership graph and cascading identity deletion.
//!
//! The graph is static data: every collection that references a user root,
//! and the field carrying that reference. New dependent types are added
//! here, not as new deletion code.

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use service_core::error::AppError;

use crate::services::database::MongoDb;
use crate::services::error::EngineError;

/// One collection owned by a user identity.
#[derive(Debug)]
pub struct OwnedCollection {
    pub collection: &'static str,
    pub owner_field: &'static str,
}

/// Every collection referencing a user root. No entry depends on another
/// entry, only on the root, so deletion order among them is irrelevant.
pub const OWNERSHIP_GRAPH: &[OwnedCollection] = &[
    OwnedCollection {
        collection: "store_products",
        owner_field: "created_by",
    },
    OwnedCollection {
        collection: "store_orders",
        owner_field: "user_id",
    },
    OwnedCollection {
        collection: "stores",
        owner_field: "user_id",
    },
    OwnedCollection {
        collection: "store_feedback",
        owner_field: "user_id",
    },
    OwnedCollection {
        collection: "store_product_categories",
        owner_field: "created_by",
    },
    OwnedCollection {
        collection: "store_product_feedback",
        owner_field: "user_id",
    },
    OwnedCollection {
        collection: "store_product_reviews",
        owner_field: "user_id",
    },
    OwnedCollection {
        collection: "store_transactions",
        owner_field: "user_id",
    },
];

#[derive(Debug, Serialize)]
pub struct DeletionReport {
    pub related_data_deleted: bool,
}

/// Persistence operations the cascade coordinator needs. `MongoDb` is the
/// production implementation; the seam lets the failure handling run against
/// a store that fails on demand.
#[async_trait]
pub trait CascadeStore: Sync {
    async fn user_exists(&self, user_id: &str) -> Result<bool, AppError>;
    async fn delete_user(&self, user_id: &str) -> Result<bool, AppError>;
    async fn exists_owned(
        &self,
        collection: &str,
        owner_field: &str,
        owner_id: &str,
    ) -> Result<bool, AppError>;
    async fn delete_owned(
        &self,
        collection: &str,
        owner_field: &str,
        owner_id: &str,
    ) -> Result<u64, AppError>;
}

#[async_trait]
impl CascadeStore for MongoDb {
    async fn user_exists(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self.find_user(user_id).await?.is_some())
    }

    async fn delete_user(&self, user_id: &str) -> Result<bool, AppError> {
        MongoDb::delete_user(self, user_id).await
    }

    async fn exists_owned(
        &self,
        collection: &str,
        owner_field: &str,
        owner_id: &str,
    ) -> Result<bool, AppError> {
        MongoDb::exists_owned(self, collection, owner_field, owner_id).await
    }

    async fn delete_owned(
        &self,
        collection: &str,
        owner_field: &str,
        owner_id: &str,
    ) -> Result<u64, AppError> {
        MongoDb::delete_owned(self, collection, owner_field, owner_id).await
    }
}

/// Remove a user and everything that references it.
///
/// The existence probe completes across all graph entries before the first
/// delete is issued. On any delete failure the root user is left in place and
/// the error names the collections that did complete, for reconciliation.
pub async fn delete_identity_cascade(
    db: &impl CascadeStore,
    user_id: &str,
) -> Result<DeletionReport, EngineError> {
    if !db.user_exists(user_id).await? {
        return Err(EngineError::NotFound("user"));
    }

    let probes = join_all(
        OWNERSHIP_GRAPH
            .iter()
            .map(|entry| db.exists_owned(entry.collection, entry.owner_field, user_id)),
    )
    .await;

    let mut has_related = false;
    for probe in probes {
        if probe? {
            has_related = true;
        }
    }

    if !has_related {
        db.delete_user(user_id).await?;
        tracing::info!(user_id = %user_id, "user deleted, no related data found");
        return Ok(DeletionReport {
            related_data_deleted: false,
        });
    }

    let outcomes = join_all(OWNERSHIP_GRAPH.iter().map(|entry| async move {
        (
            entry.collection,
            db.delete_owned(entry.collection, entry.owner_field, user_id)
                .await,
        )
    }))
    .await;

    let mut completed = Vec::with_capacity(OWNERSHIP_GRAPH.len());
    let mut failed = false;
    for (collection, outcome) in outcomes {
        match outcome {
            Ok(count) => {
                tracing::debug!(collection, count, "cascade removed dependent records");
                completed.push(collection);
            }
            Err(e) => {
                tracing::error!(collection, error = %e, "cascade delete failed");
                failed = true;
            }
        }
    }

    if failed {
        return Err(EngineError::CascadeIncomplete { completed });
    }

    db.delete_user(user_id).await?;
    tracing::info!(user_id = %user_id, "user and related data deleted");
    Ok(DeletionReport {
        related_data_deleted: true,
    })
}
