//! Ad platform HTTP clients.
//!
//! This crate provides the production `AdsProvider` implementations:
//! - `GoogleAdsClient` - Google Ads API `googleAds:search` with GAQL
//! - `FacebookAdsClient` - Meta Marketing API ad account insights

mod facebook_ads;
mod google_ads;
mod http;

pub use facebook_ads::{FacebookAdsClient, insights_params};
pub use google_ads::{GoogleAdsClient, build_gaql};
pub use http::MAX_PAGES;
