//! Dashboard refresh.
//!
//! This module provides:
//! - Query and result types
//! - Text field sanitization
//! - The refresh service that fans out to both providers

pub mod error;
pub mod sanitize;
pub mod service;
pub mod types;

#[cfg(test)]
mod sanitize_props;

pub use error::DashboardError;
pub use sanitize::sanitize_text_field;
pub use service::DashboardService;
pub use types::{CampaignFilter, DashboardQuery, DashboardResult, DateRange, RefreshInput};
