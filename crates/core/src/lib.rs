//! Core dashboard logic for InfoTrack.
//!
//! This crate contains the domain with ZERO web or HTTP client dependencies.
//!
//! # Modules
//!
//! - `auth` - Capabilities, roles, and authorization
//! - `dashboard` - Query/result types, input sanitization, refresh service
//! - `provider` - Ad platform provider seam
//! - `logging` - Error log collaborator

pub mod auth;
pub mod dashboard;
pub mod logging;
pub mod provider;

pub use auth::{Actor, Authorizer, Capability, RoleAuthorizer, UserRole};
pub use dashboard::{DashboardError, DashboardQuery, DashboardResult, DashboardService};
pub use logging::{ErrorLog, TracingErrorLog};
pub use provider::{AdsProvider, ProviderError, ProviderKind};
