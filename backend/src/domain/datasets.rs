//! Template helpers listing datasets for the portal front page.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::Error;
use crate::domain::ports::{PackageSearch, PackageSearchError, PackageSearchQuery};

/// Number of datasets each helper returns.
pub const HELPER_ROWS: u32 = 10;

/// Dataset listing helpers exposed to page templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetHelper {
    /// Most recently created datasets.
    LatestDatasets,
    /// Datasets with the most recent views.
    MostPopularDatasets,
}

impl DatasetHelper {
    /// Every helper in registration order.
    pub const ALL: [Self; 2] = [Self::LatestDatasets, Self::MostPopularDatasets];

    /// Name under which the helper is registered with the host.
    pub fn name(self) -> &'static str {
        match self {
            Self::LatestDatasets => "portalopendatadk_latest_datasets",
            Self::MostPopularDatasets => "portalopendatadk_most_popular_datasets",
        }
    }

    /// Sort clause sent to the search service.
    pub fn sort(self) -> &'static str {
        match self {
            Self::LatestDatasets => "metadata_created desc",
            Self::MostPopularDatasets => "views_recent desc",
        }
    }

    /// Search query issued by this helper.
    pub fn query(self) -> PackageSearchQuery {
        PackageSearchQuery::sorted(HELPER_ROWS, self.sort())
    }
}

impl fmt::Display for DatasetHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a helper name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template helper: {0}")]
pub struct UnknownHelper(pub String);

impl FromStr for DatasetHelper {
    type Err = UnknownHelper;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|helper| helper.name() == name)
            .ok_or_else(|| UnknownHelper(name.to_owned()))
    }
}

/// Service running dataset helpers against the search port.
pub struct DatasetHelpers<S: ?Sized> {
    search: Arc<S>,
}

impl<S: ?Sized> Clone for DatasetHelpers<S> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
        }
    }
}

impl<S: ?Sized> DatasetHelpers<S> {
    /// Create helpers backed by `search`.
    pub fn new(search: Arc<S>) -> Self {
        Self { search }
    }
}

impl<S> DatasetHelpers<S>
where
    S: PackageSearch + ?Sized,
{
    /// The ten most recently created datasets.
    pub async fn latest_datasets(&self) -> Result<Vec<Value>, Error> {
        self.run(DatasetHelper::LatestDatasets).await
    }

    /// The ten datasets with the most recent views.
    pub async fn most_popular_datasets(&self) -> Result<Vec<Value>, Error> {
        self.run(DatasetHelper::MostPopularDatasets).await
    }

    /// Run `helper` and return the datasets in the order the host sorted them.
    pub async fn run(&self, helper: DatasetHelper) -> Result<Vec<Value>, Error> {
        let result = self
            .search
            .search(&helper.query())
            .await
            .map_err(Self::map_search_error)?;
        debug!(%helper, datasets = result.results.len(), "dataset helper ran");
        Ok(result.results)
    }

    fn map_search_error(error: PackageSearchError) -> Error {
        match error {
            PackageSearchError::Unavailable { message } => {
                Error::service_unavailable(format!("dataset search unavailable: {message}"))
            }
            PackageSearchError::Decode { message } => {
                Error::internal(format!("dataset search returned an invalid payload: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockPackageSearch, PackageSearchResult};
    use rstest::rstest;
    use serde_json::json;

    fn helpers(search: MockPackageSearch) -> DatasetHelpers<MockPackageSearch> {
        DatasetHelpers::new(Arc::new(search))
    }

    fn expect_query(search: &mut MockPackageSearch, sort: &'static str, results: Vec<Value>) {
        search
            .expect_search()
            .withf(move |query| query.rows == 10 && query.sort == sort)
            .times(1)
            .return_once(move |_| {
                Ok(PackageSearchResult {
                    count: Some(results.len() as u64),
                    results,
                })
            });
    }

    #[tokio::test]
    async fn latest_datasets_sorts_by_creation() {
        let mut search = MockPackageSearch::new();
        expect_query(
            &mut search,
            "metadata_created desc",
            vec![json!({"name": "new"}), json!({"name": "older"})],
        );

        let datasets = helpers(search).latest_datasets().await.expect("datasets");
        assert_eq!(datasets, vec![json!({"name": "new"}), json!({"name": "older"})]);
    }

    #[tokio::test]
    async fn most_popular_datasets_sorts_by_recent_views() {
        let mut search = MockPackageSearch::new();
        expect_query(&mut search, "views_recent desc", Vec::new());

        let datasets = helpers(search)
            .most_popular_datasets()
            .await
            .expect("datasets");
        assert!(datasets.is_empty());
    }

    #[tokio::test]
    async fn search_outage_is_service_unavailable() {
        let mut search = MockPackageSearch::new();
        search
            .expect_search()
            .times(1)
            .return_once(|_| Err(PackageSearchError::unavailable("timeout")));

        let error = helpers(search)
            .latest_datasets()
            .await
            .expect_err("outage");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[case("portalopendatadk_latest_datasets", DatasetHelper::LatestDatasets)]
    #[case(
        "portalopendatadk_most_popular_datasets",
        DatasetHelper::MostPopularDatasets
    )]
    fn helpers_resolve_by_registered_name(#[case] name: &str, #[case] expected: DatasetHelper) {
        assert_eq!(name.parse::<DatasetHelper>(), Ok(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    fn unknown_helper_names_are_rejected() {
        assert_eq!(
            "latest_datasets".parse::<DatasetHelper>(),
            Err(UnknownHelper("latest_datasets".to_owned()))
        );
    }
}
