//! Authorization evaluator.
//!
//! One pure function decides every gated action: a role rule, then an
//! ownership rule, evaluated in order with the first failure reported.
//! The evaluator does no persistence access; callers hand it already
//! resolved role and ownership data, which is what keeps it testable
//! in isolation.

use std::collections::HashSet;

use crate::models::user::Role;
use crate::services::error::EngineError;

/// Resolved caller identity and role set for one request.
#[derive(Debug, Clone)]
pub struct Caller {
    pub id: String,
    pub roles: HashSet<Role>,
}

impl Caller {
    pub fn new(id: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id: id.into(),
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Decide whether `caller` may perform a gated action.
///
/// Rule A: a non-empty `required_roles` must intersect the caller's roles.
/// Rule B: when `resource_owner` is given, the caller must be that identity;
/// `super-admin` is the sole role exempt from the ownership rule.
pub fn authorize(
    caller: &Caller,
    required_roles: &[Role],
    resource_owner: Option<&str>,
) -> Result<(), EngineError> {
    if !required_roles.is_empty() && !required_roles.iter().any(|r| caller.has_role(*r)) {
        return Err(EngineError::InsufficientRole {
            required: required_roles.to_vec(),
        });
    }

    if let Some(owner) = resource_owner {
        if caller.id != owner && !caller.has_role(Role::SuperAdmin) {
            return Err(EngineError::NotOwner);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_is_denied_a_super_admin_action() {
        let caller = Caller::new("u1", [Role::Buyer]);
        let err = authorize(&caller, &[Role::SuperAdmin], None).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientRole { .. }));
    }

    #[test]
    fn role_rule_fails_before_ownership_rule() {
        // Even the resource owner is denied when the role check fails first.
        let caller = Caller::new("u1", [Role::Buyer]);
        let err = authorize(&caller, &[Role::SuperAdmin], Some("u1")).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientRole { .. }));
    }

    #[test]
    fn owner_passes_ownership_rule() {
        let caller = Caller::new("u1", [Role::StoreAdmin]);
        assert!(authorize(&caller, &[Role::StoreAdmin], Some("u1")).is_ok());
    }

    #[test]
    fn non_owner_is_denied() {
        let caller = Caller::new("u1", [Role::StoreAdmin]);
        let err = authorize(&caller, &[], Some("u2")).unwrap_err();
        assert!(matches!(err, EngineError::NotOwner));
    }

    #[test]
    fn super_admin_bypasses_ownership() {
        let caller = Caller::new("a1", [Role::SuperAdmin]);
        assert!(authorize(&caller, &[], Some("u2")).is_ok());
    }

    #[test]
    fn empty_required_roles_skips_the_role_rule() {
        let caller = Caller::new("u1", [Role::Buyer]);
        assert!(authorize(&caller, &[], None).is_ok());
    }

    #[test]
    fn any_of_the_required_roles_suffices() {
        let caller = Caller::new("u1", [Role::StoreAdmin]);
        assert!(authorize(&caller, &[Role::StoreAdmin, Role::SuperAdmin], None).is_ok());
    }
}
