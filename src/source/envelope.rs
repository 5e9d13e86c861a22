//! Response envelope tagging payloads with their origin

use serde::Serialize;
use std::fmt;

/// Where a payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Real,
    Mock,
}

impl DataSourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DataSourceKind::Real => "real",
            DataSourceKind::Mock => "mock",
        }
    }
}

impl fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload tagged as real API data or mock fallback data
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Real(T),
    Mock(T),
}

impl<T> Envelope<T> {
    pub fn source(&self) -> DataSourceKind {
        match self {
            Envelope::Real(_) => DataSourceKind::Real,
            Envelope::Mock(_) => DataSourceKind::Mock,
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Envelope::Mock(_))
    }

    pub fn payload(&self) -> &T {
        match self {
            Envelope::Real(payload) | Envelope::Mock(payload) => payload,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Envelope::Real(payload) | Envelope::Mock(payload) => payload,
        }
    }
}
