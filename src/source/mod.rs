//! Data source selection
//!
//! Chooses between the live Google Ads API and the mock dataset, and tags
//! every payload with the source it came from.

mod envelope;
mod selector;

pub use envelope::{DataSourceKind, Envelope};
pub use selector::{select, DataSourceSelector, MockReason, SelectionPolicy, SourceError};
