use serde::{Deserialize, Serialize};
use std::fmt;

/// One workstation: the machine installed at a post and its habitual user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub machine_id: String,
    pub first_name: String,
    pub surname: String,
}

impl Post {
    pub fn new(
        machine_id: impl Into<String>,
        first_name: impl Into<String>,
        surname: impl Into<String>,
    ) -> Self {
        Self {
            machine_id: machine_id.into(),
            first_name: first_name.into(),
            surname: surname.into(),
        }
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.machine_id, self.first_name, self.surname)
    }
}

/// Resolved parameters for opening a store connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectionParams {
    pub location: String,
    pub principal: String,
    pub credential: String,
}

impl ConnectionParams {
    pub fn new(
        location: impl Into<String>,
        principal: impl Into<String>,
        credential: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            principal: principal.into(),
            credential: credential.into(),
        }
    }

    /// Parameters for a store without authentication.
    pub fn anonymous(location: impl Into<String>) -> Self {
        Self::new(location, "", "")
    }
}
