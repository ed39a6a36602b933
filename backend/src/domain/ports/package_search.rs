//! Port for the host's dataset search service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Parameters of a `package_search` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSearchQuery {
    /// Maximum number of datasets to return.
    pub rows: u32,
    /// Solr-style sort clause, e.g. `metadata_created desc`.
    pub sort: String,
}

impl PackageSearchQuery {
    /// Build a query returning `rows` datasets ordered by `sort`.
    pub fn sorted(rows: u32, sort: impl Into<String>) -> Self {
        Self {
            rows,
            sort: sort.into(),
        }
    }
}

/// Datasets returned by the search service.
///
/// Each dataset is passed through as the host returned it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageSearchResult {
    /// Total number of matches reported by the host, when provided.
    #[serde(default)]
    pub count: Option<u64>,
    /// Matching datasets in the requested order.
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Errors raised by search adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackageSearchError {
    /// The search service could not be reached.
    #[error("package search unavailable: {message}")]
    Unavailable { message: String },
    /// The search service answered with an unreadable payload.
    #[error("package search returned an invalid payload: {message}")]
    Decode { message: String },
}

impl PackageSearchError {
    /// Helper for transport failures.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for payload decoding failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Driven port wrapping the host's `package_search` action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageSearch: Send + Sync {
    /// Run a search and return the matching datasets.
    async fn search(
        &self,
        query: &PackageSearchQuery,
    ) -> Result<PackageSearchResult, PackageSearchError>;
}

/// Search fixture returning no datasets.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePackageSearch;

#[async_trait]
impl PackageSearch for FixturePackageSearch {
    async fn search(
        &self,
        _query: &PackageSearchQuery,
    ) -> Result<PackageSearchResult, PackageSearchError> {
        Ok(PackageSearchResult {
            count: Some(0),
            results: Vec::new(),
        })
    }
}
