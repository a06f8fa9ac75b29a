//! Access-control policy
//!
//! Every service operation asks [`authorize`] before touching storage. The
//! rules are pure: they look only at the acting user, the operation and the
//! user the operation is about.

use crate::entities::User;
use crate::error::DomainError;
use crate::value_objects::{Role, UserId};

/// Operations subject to access control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Check in, check out, or read one's own history
    SelfService,
    /// Read attendance belonging to the subject
    ViewAttendance,
    /// Create an attendance record for the subject
    CreateAttendance,
    /// Update or delete attendance belonging to the subject
    ManageAttendance,
    /// List the actor's direct reports
    ListTeam,
    /// Create a user who will report to the actor
    CreateUser,
    /// Read or modify the subject's account
    ManageUser,
    /// Deactivate the subject's account
    DeactivateUser,
}

impl Operation {
    /// Whether the operation requires a managerial role
    pub const fn requires_manager(self) -> bool {
        matches!(
            self,
            Self::ManageAttendance
                | Self::ListTeam
                | Self::CreateUser
                | Self::ManageUser
                | Self::DeactivateUser
        )
    }
}

/// Why an operation was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    NotManager,
    NotInTeam,
    NotRecordViewer,
    SelfDeactivation,
}

impl From<DenyReason> for DomainError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::NotManager => DomainError::NotManager,
            DenyReason::NotInTeam => DomainError::NotInTeam,
            DenyReason::NotRecordViewer => DomainError::NotRecordViewer,
            DenyReason::SelfDeactivation => DomainError::SelfDeactivation,
        }
    }
}

/// Outcome of a policy check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[inline]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Convert into a `Result` for use with `?`
    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(reason) => Err(reason.into()),
        }
    }
}

/// Decide whether `actor` may perform `operation` on `subject`
///
/// `subject` is the user the operation concerns: the owner of an attendance
/// record or the target account. With no subject, operations on users only
/// evaluate the role gate, and attendance operations act on the actor.
pub fn authorize(actor: &User, operation: Operation, subject: Option<&User>) -> Decision {
    let acting_on_self = subject.is_none_or(|s| s.id == actor.id);

    match operation {
        Operation::SelfService => Decision::Allow,

        Operation::ViewAttendance => {
            if acting_on_self || subject.is_some_and(|s| actor.manages(s)) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotRecordViewer)
            }
        }

        Operation::CreateAttendance if acting_on_self => Decision::Allow,

        Operation::CreateAttendance | Operation::ManageAttendance | Operation::ManageUser => {
            if !actor.is_manager() {
                return Decision::Deny(DenyReason::NotManager);
            }
            team_scope(actor, subject)
        }

        Operation::ListTeam | Operation::CreateUser => {
            if actor.is_manager() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotManager)
            }
        }

        Operation::DeactivateUser => {
            if !actor.is_manager() {
                return Decision::Deny(DenyReason::NotManager);
            }
            match subject {
                Some(s) if s.id == actor.id => Decision::Deny(DenyReason::SelfDeactivation),
                _ => team_scope(actor, subject),
            }
        }
    }
}

fn team_scope(actor: &User, subject: Option<&User>) -> Decision {
    match subject {
        Some(s) if !actor.manages(s) => Decision::Deny(DenyReason::NotInTeam),
        _ => Decision::Allow,
    }
}

/// `authorize` as a `Result`
pub fn ensure(actor: &User, operation: Operation, subject: Option<&User>) -> Result<(), DomainError> {
    authorize(actor, operation, subject).into_result()
}

/// Reject an attempt by `actor` to deactivate their own account
///
/// Runs before the target is loaded, so it takes precedence over team scope.
pub fn ensure_not_self_deactivation(actor: &User, target: UserId) -> Result<(), DomainError> {
    if actor.id == target {
        return Err(DomainError::SelfDeactivation);
    }
    Ok(())
}

/// Validate that `manager` may be assigned as manager of `target`
///
/// `target` is `None` for a user that does not exist yet. `manager` is the
/// looked-up candidate, `None` if no such user exists.
pub fn validate_manager_assignment(
    target: Option<UserId>,
    manager_id: UserId,
    manager: Option<&User>,
) -> Result<(), DomainError> {
    if target == Some(manager_id) {
        return Err(DomainError::SelfManagement);
    }
    match manager {
        Some(m) if m.is_manager() => Ok(()),
        _ => Err(DomainError::InvalidManager),
    }
}

/// Reject demoting a manager who still has direct reports
pub fn validate_role_change(user: &User, new_role: Role, report_count: i64) -> Result<(), DomainError> {
    if user.is_manager() && !new_role.is_managerial() && report_count > 0 {
        return Err(DomainError::ManagerHasReports(report_count));
    }
    Ok(())
}
