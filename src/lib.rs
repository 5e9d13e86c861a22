//! Allervie Analytics dashboard backend
//!
//! Serves Google Ads performance data to the dashboard, answering from a
//! static mock dataset whenever API credentials are incomplete (and, when
//! allowed, whenever the API call fails). Every payload is tagged with the
//! source it came from.

pub mod ads;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod server;
pub mod source;

// Re-export commonly used types for convenience
pub use ads::{AdsApi, AdsError, CampaignRow, DateRange, PerformanceReport};
pub use config::{Config, ConfigLoader};
pub use credentials::{CredentialField, CredentialSet};
pub use server::{create_router, AppState, DashboardServer};
pub use source::{DataSourceKind, DataSourceSelector, Envelope, SelectionPolicy, SourceError};
