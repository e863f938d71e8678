//! Store model and its approval lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Approval state of a store. `Pending` is the sole initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Pending,
    Verified,
    Rejected,
    Suspended,
    Blocked,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Pending => "pending",
            StoreStatus::Verified => "verified",
            StoreStatus::Rejected => "rejected",
            StoreStatus::Suspended => "suspended",
            StoreStatus::Blocked => "blocked",
        }
    }

    /// The legal administrative transitions. Anything unmapped is illegal and
    /// must leave the stored status untouched.
    pub fn transition(self, action: LifecycleAction) -> Option<StoreStatus> {
        use LifecycleAction::*;
        use StoreStatus::*;
        match (self, action) {
            (Pending, Verify) => Some(Verified),
            (Pending, Reject) => Some(Rejected),
            (Verified, Suspend) => Some(Suspended),
            (Verified, Block) => Some(Blocked),
            (Suspended, Verify) => Some(Verified),
            (Suspended, Block) => Some(Blocked),
            (Rejected, Verify) => Some(Verified),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Administrative action applied to a store's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleAction {
    Verify,
    Reject,
    Suspend,
    Block,
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleAction::Verify => "verify",
            LifecycleAction::Reject => "reject",
            LifecycleAction::Suspend => "suspend",
            LifecycleAction::Block => "block",
        }
    }
}

impl std::fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seller storefront. Exactly one user owns a store; a unique index on
/// `user_id` backs that invariant at the collection level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub store_name: String,
    pub store_logo: Option<String>,
    pub store_cover_image: Option<String>,
    pub store_description: Option<String>,
    pub store_category_id: Option<String>,
    pub id_card_number: Option<String>,
    pub status: StoreStatus,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Store {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: String,
        store_name: String,
        store_logo: Option<String>,
        store_cover_image: Option<String>,
        store_description: Option<String>,
        store_category_id: Option<String>,
        id_card_number: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            store_name,
            store_logo,
            store_cover_image,
            store_description,
            store_category_id,
            id_card_number,
            status: StoreStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LifecycleAction::*;
    use super::StoreStatus::*;
    use super::*;

    #[test]
    fn every_listed_transition_is_legal() {
        assert_eq!(Pending.transition(Verify), Some(Verified));
        assert_eq!(Pending.transition(Reject), Some(Rejected));
        assert_eq!(Verified.transition(Suspend), Some(Suspended));
        assert_eq!(Verified.transition(Block), Some(Blocked));
        assert_eq!(Suspended.transition(Verify), Some(Verified));
        assert_eq!(Suspended.transition(Block), Some(Blocked));
        assert_eq!(Rejected.transition(Verify), Some(Verified));
    }

    #[test]
    fn unlisted_transitions_are_illegal() {
        // Re-verifying a verified store is not in the table.
        assert_eq!(Verified.transition(Verify), None);
        // A rejected store cannot jump to suspended.
        assert_eq!(Rejected.transition(Suspend), None);
        assert_eq!(Rejected.transition(Block), None);
        // Blocked is a dead end for every action.
        for action in [Verify, Reject, Suspend, Block] {
            assert_eq!(Blocked.transition(action), None);
        }
        // Nothing maps back to pending.
        for from in [Pending, Verified, Rejected, Suspended, Blocked] {
            for action in [Verify, Reject, Suspend, Block] {
                assert_ne!(from.transition(action), Some(Pending));
            }
        }
    }

    #[test]
    fn verify_suspend_verify_returns_to_verified() {
        let s1 = Pending.transition(Verify).unwrap();
        let s2 = s1.transition(Suspend).unwrap();
        let s3 = s2.transition(Verify).unwrap();
        assert_eq!(s3, Verified);
    }
}
