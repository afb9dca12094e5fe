//! Role policy for browsing and editing

use fleet_types::{AccessError, Action, Role};

/// Whether `role` may perform `action`.
///
/// Admins may do anything. Technicians browse and maintain parts but
/// cannot touch vehicles, delete parts, or reset data.
pub fn is_allowed(role: Role, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::Technician => matches!(
            action,
            Action::Browse | Action::CreatePart | Action::EditPart
        ),
    }
}

pub fn authorize(role: Role, action: Action) -> Result<(), AccessError> {
    if is_allowed(role, action) {
        Ok(())
    } else {
        Err(AccessError::Denied { role, action })
    }
}
