//! MongoDB persistence layer for the marketplace.
//!
//! All cross-entity state lives here; the engine's own logic stays pure.

use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Client as MongoClient, Collection, Database, IndexModel};
use service_core::error::AppError;

use crate::models::{Store, StoreProduct, StoreProductCategory, StoreStatus, User};
use crate::services::cascade::OWNERSHIP_GRAPH;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for marketplace-service");

        // Unique owner index: one store per identity, race included.
        let store_owner_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("store_owner_unique".to_string())
                    .build(),
            )
            .build();
        self.stores()
            .create_index(store_owner_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create unique owner index on stores: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on stores.user_id");

        let user_email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_email_unique".to_string())
                    .build(),
            )
            .build();
        self.users()
            .create_index(user_email_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create unique email index on users: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on users.email");

        // Owner-reference index per cascade target keeps the existence probes
        // and fan-out deletes off collection scans.
        for entry in OWNERSHIP_GRAPH {
            let index = IndexModel::builder()
                .keys(doc! { entry.owner_field: 1 })
                .options(
                    IndexOptions::builder()
                        .name(format!("{}_owner_lookup", entry.collection))
                        .build(),
                )
                .build();
            self.collection(entry.collection)
                .create_index(index, None)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to create owner index on {}: {}",
                        entry.collection,
                        e
                    );
                    AppError::from(e)
                })?;
        }
        tracing::info!("Created owner-reference indexes for cascade targets");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("users")
    }

    pub fn stores(&self) -> Collection<Store> {
        self.db.collection("stores")
    }

    pub fn products(&self) -> Collection<StoreProduct> {
        self.db.collection("store_products")
    }

    pub fn categories(&self) -> Collection<StoreProductCategory> {
        self.db.collection("store_product_categories")
    }

    /// Untyped handle, used by the cascade coordinator and tests.
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    // ==================== User Operations ====================

    pub async fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.users()
            .find_one(doc! { "_id": user_id }, None)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let cursor = self.users().find(doc! {}, None).await?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    /// Returns false when the email is already registered.
    pub async fn insert_user(&self, user: &User) -> Result<bool, AppError> {
        match self.users().insert_one(user, None).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(AppError::from(e)),
        }
    }

    /// Errors with `Conflict` when the update collides with the unique email
    /// index.
    pub async fn update_user_fields(
        &self,
        user_id: &str,
        mut set: Document,
    ) -> Result<Option<User>, AppError> {
        set.insert("updated_at", mongodb::bson::DateTime::now());
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        match self
            .users()
            .find_one_and_update(doc! { "_id": user_id }, doc! { "$set": set }, options)
            .await
        {
            Ok(user) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(AppError::Conflict(anyhow::anyhow!(
                "Email is already registered"
            ))),
            Err(e) => Err(AppError::from(e)),
        }
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<bool, AppError> {
        let result = self.users().delete_one(doc! { "_id": user_id }, None).await?;
        Ok(result.deleted_count == 1)
    }

    // ==================== Store Operations ====================

    pub async fn find_store_by_id(&self, store_id: &str) -> Result<Option<Store>, AppError> {
        self.stores()
            .find_one(doc! { "_id": store_id }, None)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_store_by_owner(&self, user_id: &str) -> Result<Option<Store>, AppError> {
        self.stores()
            .find_one(doc! { "user_id": user_id }, None)
            .await
            .map_err(AppError::from)
    }

    pub async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        let cursor = self.stores().find(doc! {}, None).await?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    /// Returns false when the owner already has a store (unique index hit).
    pub async fn insert_store(&self, store: &Store) -> Result<bool, AppError> {
        match self.stores().insert_one(store, None).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(AppError::from(e)),
        }
    }

    pub async fn update_store_by_owner(
        &self,
        user_id: &str,
        mut set: Document,
    ) -> Result<Option<Store>, AppError> {
        set.insert("updated_at", mongodb::bson::DateTime::now());
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.stores()
            .find_one_and_update(doc! { "user_id": user_id }, doc! { "$set": set }, options)
            .await
            .map_err(AppError::from)
    }

    /// Compare-and-set status write. Filters on the expected current status,
    /// so of two racing transitions exactly one can hit.
    pub async fn update_store_status(
        &self,
        store_id: &str,
        from: StoreStatus,
        to: StoreStatus,
    ) -> Result<Option<Store>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.stores()
            .find_one_and_update(
                doc! { "_id": store_id, "status": from.as_str() },
                doc! { "$set": {
                    "status": to.as_str(),
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
                options,
            )
            .await
            .map_err(AppError::from)
    }

    pub async fn delete_store_by_owner(&self, user_id: &str) -> Result<bool, AppError> {
        let result = self
            .stores()
            .delete_one(doc! { "user_id": user_id }, None)
            .await?;
        Ok(result.deleted_count == 1)
    }

    // ==================== Dependent Records ====================

    pub async fn insert_product(&self, product: &StoreProduct) -> Result<(), AppError> {
        self.products().insert_one(product, None).await?;
        Ok(())
    }

    pub async fn find_product(&self, product_id: &str) -> Result<Option<StoreProduct>, AppError> {
        self.products()
            .find_one(doc! { "_id": product_id }, None)
            .await
            .map_err(AppError::from)
    }

    pub async fn delete_product(&self, product_id: &str) -> Result<bool, AppError> {
        let result = self
            .products()
            .delete_one(doc! { "_id": product_id }, None)
            .await?;
        Ok(result.deleted_count == 1)
    }

    pub async fn insert_category(
        &self,
        category: &StoreProductCategory,
    ) -> Result<(), AppError> {
        self.categories().insert_one(category, None).await?;
        Ok(())
    }

    pub async fn list_categories(&self) -> Result<Vec<StoreProductCategory>, AppError> {
        let cursor = self.categories().find(doc! {}, None).await?;
        cursor.try_collect().await.map_err(AppError::from)
    }

    // ==================== Cascade Primitives ====================

    /// Does any record in `collection` reference `owner_id` through `owner_field`?
    pub async fn exists_owned(
        &self,
        collection: &str,
        owner_field: &str,
        owner_id: &str,
    ) -> Result<bool, AppError> {
        self.collection(collection)
            .find_one(doc! { owner_field: owner_id }, None)
            .await
            .map(|d| d.is_some())
            .map_err(AppError::from)
    }

    /// Delete every record in `collection` referencing `owner_id`.
    pub async fn delete_owned(
        &self,
        collection: &str,
        owner_field: &str,
        owner_id: &str,
    ) -> Result<u64, AppError> {
        let result = self
            .collection(collection)
            .delete_many(doc! { owner_field: owner_id }, None)
            .await?;
        Ok(result.deleted_count)
    }
}

/// Mongo reports unique-index violations as error 11000: a write error on
/// inserts, a command error on findAndModify.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(we)) => {
            we.code == 11000
        }
        mongodb::error::ErrorKind::Command(ce) => ce.code == 11000,
        _ => false,
    }
}
