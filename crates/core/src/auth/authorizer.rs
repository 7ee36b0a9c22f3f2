//! Role-based authorizer backed by a concurrent grant map.

use std::collections::HashSet;

use dashmap::DashMap;
use tracing::info;

use super::{Actor, Authorizer, Capability, UserRole};

/// Holds capability grants per role.
///
/// Grants change only through `activate`, `deactivate`, `grant` and
/// `revoke`; checks are lock-free reads.
#[derive(Debug, Default)]
pub struct RoleAuthorizer {
    grants: DashMap<UserRole, HashSet<Capability>>,
}

impl RoleAuthorizer {
    /// Creates an authorizer with no grants.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an authorizer with the administrator grant already applied.
    #[must_use]
    pub fn activated() -> Self {
        let authorizer = Self::new();
        authorizer.activate();
        authorizer
    }

    /// Grants the dashboard capability to administrators.
    pub fn activate(&self) {
        self.grant(UserRole::Administrator, Capability::ManageDashboard);
        info!(
            role = %UserRole::Administrator,
            capability = %Capability::ManageDashboard,
            "Dashboard capability granted"
        );
    }

    /// Removes the dashboard capability from administrators.
    pub fn deactivate(&self) {
        self.revoke(UserRole::Administrator, Capability::ManageDashboard);
        info!(
            role = %UserRole::Administrator,
            capability = %Capability::ManageDashboard,
            "Dashboard capability revoked"
        );
    }

    /// Grants `capability` to every actor with `role`.
    pub fn grant(&self, role: UserRole, capability: Capability) {
        self.grants.entry(role).or_default().insert(capability);
    }

    /// Revokes `capability` from `role`.
    pub fn revoke(&self, role: UserRole, capability: Capability) {
        if let Some(mut caps) = self.grants.get_mut(&role) {
            caps.remove(&capability);
        }
    }

    /// Returns the capabilities currently granted to `role`.
    #[must_use]
    pub fn capabilities(&self, role: UserRole) -> Vec<Capability> {
        self.grants
            .get(&role)
            .map(|caps| caps.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl Authorizer for RoleAuthorizer {
    fn can(&self, actor: &Actor, capability: Capability) -> bool {
        self.grants
            .get(&actor.role)
            .is_some_and(|caps| caps.contains(&capability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn actor(role: UserRole) -> Actor {
        Actor::new(Uuid::new_v4(), role)
    }

    #[test]
    fn test_empty_authorizer_denies_everyone() {
        let authorizer = RoleAuthorizer::new();
        assert!(!authorizer.can(&actor(UserRole::Administrator), Capability::ManageDashboard));
    }

    #[test]
    fn test_activate_grants_administrator_only() {
        let authorizer = RoleAuthorizer::activated();

        assert!(authorizer.can(&actor(UserRole::Administrator), Capability::ManageDashboard));
        assert!(!authorizer.can(&actor(UserRole::Editor), Capability::ManageDashboard));
        assert!(!authorizer.can(&actor(UserRole::Subscriber), Capability::ManageDashboard));
    }

    #[test]
    fn test_deactivate_revokes_administrator() {
        let authorizer = RoleAuthorizer::activated();
        authorizer.deactivate();

        assert!(!authorizer.can(&actor(UserRole::Administrator), Capability::ManageDashboard));
        assert!(authorizer.capabilities(UserRole::Administrator).is_empty());
    }

    #[test]
    fn test_extra_grant_and_revoke() {
        let authorizer = RoleAuthorizer::activated();
        authorizer.grant(UserRole::Editor, Capability::ManageDashboard);
        assert!(authorizer.can(&actor(UserRole::Editor), Capability::ManageDashboard));

        authorizer.revoke(UserRole::Editor, Capability::ManageDashboard);
        assert!(!authorizer.can(&actor(UserRole::Editor), Capability::ManageDashboard));
        assert!(authorizer.can(&actor(UserRole::Administrator), Capability::ManageDashboard));
    }

    #[test]
    fn test_revoke_unknown_role_is_noop() {
        let authorizer = RoleAuthorizer::new();
        authorizer.revoke(UserRole::Author, Capability::ManageDashboard);
        assert!(authorizer.capabilities(UserRole::Author).is_empty());
    }
}
