//! Roles
//!
//! Every account carries exactly one role. What a role may do is answered by
//! [`Role::can`], so menu flows ask for a [`Capability`] instead of inspecting
//! role names.

use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// Account role as stored in the `Users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Rents games and manages their own account.
    Customer,

    /// Store staff; may update tracking records.
    Employee,

    /// Store management; may additionally edit the catalog and other users.
    Manager,
}

/// Operations that are restricted by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Place rental orders and view one's own orders and tracking.
    RentGames,

    /// Change status, location, courier or comments of any tracking record.
    UpdateTracking,

    /// Change catalog entries.
    UpdateCatalog,

    /// Change other users' records.
    UpdateUsers,

    /// Change one's own login, role or overdue-game count.
    ManageOwnAccount,
}

/// Error returned when a role string is not one of the known roles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role {0:?}; expected customer, employee or manager")]
pub struct RoleParseError(pub String);

/// Error returned when a role lacks a capability.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("role {role} is not allowed to {capability}")]
pub struct AccessDenied {
    /// Role that made the attempt.
    pub role: Role,

    /// Capability that was missing.
    pub capability: Capability,
}

impl Role {
    /// All roles in ascending order of privilege.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Employee, Role::Manager];

    /// Canonical lowercase name stored in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    /// Whether this role grants `capability`.
    pub const fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::RentGames => true,
            Capability::UpdateTracking => matches!(self, Role::Employee | Role::Manager),
            Capability::UpdateCatalog | Capability::UpdateUsers | Capability::ManageOwnAccount => {
                matches!(self, Role::Manager)
            }
        }
    }

    /// Check `capability`, returning an error that names what was missing.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when the role does not grant `capability`.
    pub const fn require(self, capability: Capability) -> Result<(), AccessDenied> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(AccessDenied {
                role: self,
                capability,
            })
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Capability::RentGames => "rent games",
            Capability::UpdateTracking => "update tracking information",
            Capability::UpdateCatalog => "update the game catalog",
            Capability::UpdateUsers => "update user information",
            Capability::ManageOwnAccount => "change their login, role or overdue games",
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_stored_role_names() -> TestResult {
        assert_eq!("customer".parse::<Role>()?, Role::Customer);
        assert_eq!("Employee".parse::<Role>()?, Role::Employee);
        assert_eq!("  manager\n".parse::<Role>()?, Role::Manager);

        Ok(())
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(
            "store manager".parse::<Role>(),
            Err(RoleParseError("store manager".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() -> TestResult {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>()?, role);
        }

        Ok(())
    }

    #[test]
    fn everyone_can_rent() {
        assert!(Role::ALL.iter().all(|role| role.can(Capability::RentGames)));
    }

    #[test]
    fn tracking_updates_need_staff() {
        assert!(!Role::Customer.can(Capability::UpdateTracking));
        assert!(Role::Employee.can(Capability::UpdateTracking));
        assert!(Role::Manager.can(Capability::UpdateTracking));
    }

    #[test]
    fn catalog_and_user_updates_need_manager() {
        for capability in [
            Capability::UpdateCatalog,
            Capability::UpdateUsers,
            Capability::ManageOwnAccount,
        ] {
            assert!(!Role::Customer.can(capability));
            assert!(!Role::Employee.can(capability));
            assert!(Role::Manager.can(capability));
        }
    }

    #[test]
    fn require_reports_missing_capability() {
        let denied = Role::Employee.require(Capability::UpdateCatalog);

        assert_eq!(
            denied,
            Err(AccessDenied {
                role: Role::Employee,
                capability: Capability::UpdateCatalog,
            })
        );
        assert_eq!(
            denied.map_err(|error| error.to_string()),
            Err("role employee is not allowed to update the game catalog".to_string())
        );
    }
}
