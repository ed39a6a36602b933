//! Caller identity supplied by the fronting gateway.
//!
//! The gateway authenticates the browser session and forwards the login name
//! in `X-Remote-User`. Requests without the header run anonymously.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

/// Header carrying the authenticated login name.
pub const REMOTE_USER_HEADER: &str = "x-remote-user";

/// Login name of the caller, if the gateway supplied one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteUser(Option<String>);

impl RemoteUser {
    /// The caller's login name.
    pub fn name(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn from_headers(req: &HttpRequest) -> Self {
        let name = req
            .headers()
            .get(REMOTE_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned);
        Self(name)
    }
}

impl FromRequest for RemoteUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_headers(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some("admin"), Some("admin"))]
    #[case(Some("  admin  "), Some("admin"))]
    #[case(Some("   "), None)]
    fn reads_trimmed_login_name(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        let mut request = TestRequest::default();
        if let Some(value) = header {
            request = request.insert_header((REMOTE_USER_HEADER, value));
        }
        let user = RemoteUser::from_headers(&request.to_http_request());
        assert_eq!(user.name(), expected);
    }
}
