//! Session
//!
//! The authenticated operator, passed explicitly to every menu flow.

use gamerental::roles::{AccessDenied, Capability, Role};

use crate::domain::users::records::UserRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    login: String,
    role: Role,
}

impl Session {
    #[must_use]
    pub fn new(login: impl Into<String>, role: Role) -> Self {
        Self {
            login: login.into(),
            role,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }

    /// Check that the session's role grants `capability`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessDenied`] when it does not.
    pub fn require(&self, capability: Capability) -> Result<(), AccessDenied> {
        self.role.require(capability)
    }

    /// Follow changes made to the operator's own account.
    pub fn refresh(&mut self, user: &UserRecord) {
        self.login.clone_from(&user.login);
        self.role = user.role;
    }
}

impl From<&UserRecord> for Session {
    fn from(user: &UserRecord) -> Self {
        Self::new(user.login.clone(), user.role)
    }
}
