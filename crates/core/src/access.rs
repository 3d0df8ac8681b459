//! Owner-or-admin authorization predicate.
//!
//! Every request carries an explicit [`Caller`] built from the access token.
//! Record-level checks compare the caller against the record's owning
//! pedagogue (for students) or author (for observations, events, logs).

use crate::error::CoreError;
use crate::roles::{ROLE_ADMIN, ROLE_PEDAGOGUE};
use crate::types::DbId;

/// The authenticated principal of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: DbId,
    pub role: String,
}

impl Caller {
    pub fn new(user_id: DbId, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Staff roles may create and edit student-facing records.
    pub fn is_staff(&self) -> bool {
        self.role == ROLE_ADMIN || self.role == ROLE_PEDAGOGUE
    }

    /// Restrict list queries to this caller's records unless they are admin.
    ///
    /// Returns `None` for admins (no filter) and `Some(user_id)` otherwise.
    pub fn owner_scope(&self) -> Option<DbId> {
        if self.is_admin() {
            None
        } else {
            Some(self.user_id)
        }
    }
}

/// Whether `caller` may read or modify a record owned by `owner_id`.
///
/// Records with no owner (an unassigned student, say) are admin-only.
pub fn can_manage(caller: &Caller, owner_id: Option<DbId>) -> bool {
    caller.is_admin() || owner_id == Some(caller.user_id)
}

/// [`can_manage`] as a `Result`, producing a `Forbidden` error naming `entity`.
pub fn ensure_can_manage(
    caller: &Caller,
    owner_id: Option<DbId>,
    entity: &str,
) -> Result<(), CoreError> {
    if can_manage(caller, owner_id) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "You do not have permission to access this {entity}"
        )))
    }
}
