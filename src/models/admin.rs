use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Authenticated admin, as returned by verify/login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminPrincipal {
    #[serde(alias = "_id", alias = "adminId")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

/// Instructional language track that scopes admin queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medium {
    Hindi,
    English,
}

impl Medium {
    pub fn as_str(&self) -> &'static str {
        match self {
            Medium::Hindi => "Hindi",
            Medium::English => "English",
        }
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medium {
    type Err = PortalError;

    /// Exact match only; "hindi" or " Hindi" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hindi" => Ok(Medium::Hindi),
            "English" => Ok(Medium::English),
            other => Err(PortalError::InvalidMedium(other.to_string())),
        }
    }
}

#[derive(Clone, PartialEq, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    pub admin_id: String,
    pub password: String,
}

/// `data` of the admin verify and login responses.
#[derive(Clone, PartialEq, Deserialize, Debug)]
pub struct AdminSessionData {
    pub admin: AdminPrincipal,
}
