//! Template helper handlers.
//!
//! ```text
//! GET /api/helpers/portalopendatadk_latest_datasets
//! GET /api/helpers/portalopendatadk_most_popular_datasets
//! ```

use actix_web::{get, web};
use serde_json::Value;

use crate::domain::{DatasetHelper, Error, UnknownHelper};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actions::ActionResponse;
use crate::inbound::http::state::HttpState;

/// Run a registered dataset helper and return its datasets.
#[get("/api/helpers/{helper}")]
pub async fn call_helper(
    state: web::Data<HttpState>,
    helper: web::Path<String>,
) -> ApiResult<web::Json<ActionResponse<Vec<Value>>>> {
    let helper: DatasetHelper = helper
        .parse()
        .map_err(|err: UnknownHelper| Error::not_found(err.to_string()))?;
    let datasets = state.datasets.run(helper).await?;
    Ok(ActionResponse::ok(datasets))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::NoticeSettings;
    use crate::domain::ports::{
        FixtureHostUserActions, FixtureUserDirectory, MockPackageSearch, PackageSearchResult,
        StaticAuthorizer,
    };
    use crate::inbound::http::state::HttpStatePorts;
    use crate::outbound::mail::LoggingMailer;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    fn state(search: MockPackageSearch) -> web::Data<HttpState> {
        let ports = HttpStatePorts {
            host_users: Arc::new(FixtureHostUserActions),
            authorizer: Arc::new(StaticAuthorizer::default()),
            directory: Arc::new(FixtureUserDirectory),
            mailer: Arc::new(LoggingMailer::default()),
            search: Arc::new(search),
        };
        web::Data::new(HttpState::new(ports, NoticeSettings::default()))
    }

    #[actix_web::test]
    async fn latest_datasets_helper_returns_search_results() {
        let mut search = MockPackageSearch::new();
        search
            .expect_search()
            .withf(|query| query.sort == "metadata_created desc" && query.rows == 10)
            .times(1)
            .return_once(|_| {
                Ok(PackageSearchResult {
                    count: Some(1),
                    results: vec![json!({"name": "roads"})],
                })
            });
        let app = test::init_service(App::new().app_data(state(search)).service(call_helper)).await;

        let req = test::TestRequest::get()
            .uri("/api/helpers/portalopendatadk_latest_datasets")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!({ "success": true, "result": [{"name": "roads"}] })
        );
    }

    #[actix_web::test]
    async fn unknown_helper_is_not_found() {
        let mut search = MockPackageSearch::new();
        search.expect_search().times(0);
        let app = test::init_service(App::new().app_data(state(search)).service(call_helper)).await;

        let req = test::TestRequest::get()
            .uri("/api/helpers/unknown_helper")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
