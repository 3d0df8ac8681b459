//! Well-known role name constants.
//!
//! These must match the seed data in `20260301000001_create_roles_and_users.sql`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_PEDAGOGUE: &str = "pedagogue";

/// Roles an administrator may assign to an account.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_PEDAGOGUE];

/// Validate that a role name is one of the known roles.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
