//! Capabilities, roles, and authorization.
//!
//! This module provides:
//! - The dashboard capability
//! - Role definitions
//! - The `Authorizer` seam and a role-grant implementation

mod authorizer;

pub use authorizer::RoleAuthorizer;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A named permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// View the dashboard and refresh its figures.
    #[serde(rename = "manage_infotrack")]
    ManageDashboard,
}

impl Capability {
    /// Returns the wire name of the capability.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ManageDashboard => "manage_infotrack",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manage_infotrack" => Ok(Self::ManageDashboard),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// User roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Site administrator.
    Administrator,
    /// Publishes and manages others' content.
    Editor,
    /// Publishes own content.
    Author,
    /// Writes but cannot publish.
    Contributor,
    /// Profile only.
    Subscriber,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Administrator => write!(f, "administrator"),
            Self::Editor => write!(f, "editor"),
            Self::Author => write!(f, "author"),
            Self::Contributor => write!(f, "contributor"),
            Self::Subscriber => write!(f, "subscriber"),
        }
    }
}

impl FromStr for UserRole {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "administrator" => Ok(Self::Administrator),
            "editor" => Ok(Self::Editor),
            "author" => Ok(Self::Author),
            "contributor" => Ok(Self::Contributor),
            "subscriber" => Ok(Self::Subscriber),
            other => Err(UnknownName(other.to_string())),
        }
    }
}

/// A role or capability name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// User ID.
    pub id: Uuid,
    /// User role.
    pub role: UserRole,
}

impl Actor {
    /// Creates a new actor.
    #[must_use]
    pub const fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }
}

/// Decides whether an actor holds a capability.
pub trait Authorizer: Send + Sync {
    /// Returns true if `actor` holds `capability`.
    fn can(&self, actor: &Actor, capability: Capability) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("administrator", UserRole::Administrator)]
    #[case("editor", UserRole::Editor)]
    #[case("author", UserRole::Author)]
    #[case("contributor", UserRole::Contributor)]
    #[case("subscriber", UserRole::Subscriber)]
    fn test_role_names(#[case] name: &str, #[case] role: UserRole) {
        assert_eq!(name.parse::<UserRole>().unwrap(), role);
        assert_eq!(role.to_string(), name);
    }

    #[test]
    fn test_unknown_role() {
        assert_eq!(
            "owner".parse::<UserRole>(),
            Err(UnknownName("owner".to_string()))
        );
    }

    #[test]
    fn test_capability_wire_name() {
        assert_eq!(Capability::ManageDashboard.as_str(), "manage_infotrack");
        assert_eq!(
            "manage_infotrack".parse::<Capability>().unwrap(),
            Capability::ManageDashboard
        );
        assert!("manage_options".parse::<Capability>().is_err());
        assert_eq!(
            serde_json::to_string(&Capability::ManageDashboard).unwrap(),
            "\"manage_infotrack\""
        );
    }
}
