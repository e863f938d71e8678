//! Store approval state machine.
//!
//! Authorization has already happened by the time this runs; the state
//! machine still refuses any transition it cannot map, however it was
//! reached.

use crate::models::{LifecycleAction, Store};
use crate::services::database::MongoDb;
use crate::services::error::EngineError;

/// Apply one administrative action to a store's lifecycle status.
///
/// The commit is a compare-and-set on the loaded status, so two racing
/// transitions on the same store resolve to exactly one winner; the loser
/// sees `Conflict` and no intermediate state is ever observable.
pub async fn apply_lifecycle_transition(
    db: &MongoDb,
    store_id: &str,
    action: LifecycleAction,
) -> Result<Store, EngineError> {
    let store = db
        .find_store_by_id(store_id)
        .await?
        .ok_or(EngineError::NotFound("store"))?;

    let target = store
        .status
        .transition(action)
        .ok_or(EngineError::InvalidTransition {
            from: store.status,
            action,
        })?;

    match db.update_store_status(store_id, store.status, target).await? {
        Some(updated) => {
            tracing::info!(
                store_id = %store_id,
                from = %store.status,
                to = %target,
                action = %action,
                "store lifecycle transition applied"
            );
            Ok(updated)
        }
        None => {
            // CAS missed: the store vanished or a concurrent transition won.
            match db.find_store_by_id(store_id).await? {
                None => Err(EngineError::NotFound("store")),
                Some(current) => {
                    tracing::warn!(
                        store_id = %store_id,
                        expected = %store.status,
                        found = %current.status,
                        action = %action,
                        "lost lifecycle transition race"
                    );
                    Err(EngineError::Conflict)
                }
            }
        }
    }
}
