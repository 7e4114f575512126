//! Owner/admin authorization decisions.
//!
//! `evaluate` is pure: it never touches the store and holds no state, so it can be
//! called from any request without synchronization.

use crate::common::ApiError;
use crate::services::token::Identity;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Action {
    Read,
    Create,
    Delete,
    /// List devices across every tenant.
    ListAll,
    /// Delete any device regardless of its owner.
    DeleteAny,
}

impl Action {
    pub fn is_admin_only(self) -> bool {
        matches!(self, Action::ListAll | Action::DeleteAny)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Decision {
    Allow,
    Deny,
}

/// `owner_id` is `None` for actions that do not target a single resource.
pub fn evaluate(identity: &Identity, owner_id: Option<Uuid>, action: Action) -> Decision {
    if identity.is_admin {
        return Decision::Allow;
    }
    if action.is_admin_only() {
        return Decision::Deny;
    }
    match owner_id {
        Some(owner_id) if owner_id == identity.subject_id => Decision::Allow,
        _ => Decision::Deny,
    }
}

/// Like [`evaluate`], with `Deny` mapped to `403`.
pub fn authorize(
    identity: &Identity,
    owner_id: Option<Uuid>,
    action: Action,
) -> Result<(), ApiError> {
    match evaluate(identity, owner_id, action) {
        Decision::Allow => Ok(()),
        Decision::Deny => {
            tracing::debug!(subject = %identity.subject_id, ?action, "access denied");
            Err(ApiError::Unauthorized)
        }
    }
}
