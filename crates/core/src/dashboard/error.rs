//! Dashboard error types.

use thiserror::Error;

use crate::provider::{ProviderError, ProviderKind};

/// Dashboard refresh errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Caller lacks the dashboard capability.
    #[error("Permission denied")]
    PermissionDenied,

    /// A provider fetch failed. Displays the raw provider message.
    #[error("{source}")]
    Provider {
        /// The failing provider.
        provider: ProviderKind,
        /// The provider error.
        source: ProviderError,
    },
}
