//! End-to-end coverage of the action API over the Actix service stack.
//!
//! Handlers run against recording doubles so each test can assert exactly
//! what reached the host, the directory and the mailer.

mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use portal::Trace;
use portal::domain::NoticeSettings;
use portal::domain::ports::FixturePackageSearch;
use portal::inbound::http::actions::call_action;
use portal::inbound::http::identity::REMOTE_USER_HEADER;
use portal::inbound::http::state::{HttpState, HttpStatePorts};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use support::doubles::{
    HostCall, RecordingAuthorizer, RecordingDirectory, RecordingHost, RecordingMailer, user,
};

const STRONG: &str = "Capsmall12!@";

struct World {
    host: RecordingHost,
    authorizer: RecordingAuthorizer,
    directory: RecordingDirectory,
    mailer: RecordingMailer,
    pass_date: &'static str,
}

impl World {
    fn state(&self) -> web::Data<HttpState> {
        let ports = HttpStatePorts {
            host_users: Arc::new(self.host.clone()),
            authorizer: Arc::new(self.authorizer.clone()),
            directory: Arc::new(self.directory.clone()),
            mailer: Arc::new(self.mailer.clone()),
            search: Arc::new(FixturePackageSearch),
        };
        web::Data::new(HttpState::new(ports, NoticeSettings::new(self.pass_date)))
    }
}

#[fixture]
fn world() -> World {
    World {
        host: RecordingHost::default(),
        authorizer: RecordingAuthorizer::admins(&["admin"]),
        directory: RecordingDirectory::with_users(vec![
            user("a", "", "A"),
            user("b", "b@x.com", "B"),
            user("c", "c@x.com", "C"),
        ]),
        mailer: RecordingMailer::failing_for(&["c@x.com"]),
        pass_date: "1st May 2021",
    }
}

async fn post(
    world: &World,
    action: &str,
    caller: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(world.state())
            .wrap(Trace)
            .service(call_action),
    )
    .await;
    let mut req = test::TestRequest::post()
        .uri(&format!("/api/3/action/{action}"))
        .set_json(body);
    if let Some(name) = caller {
        req = req.insert_header((REMOTE_USER_HEADER, name));
    }
    let res = test::call_service(&app, req.to_request()).await;
    let status = res.status();
    assert!(res.headers().contains_key("trace-id"));
    (status, test::read_body_json(res).await)
}

#[rstest]
#[actix_web::test]
async fn registration_form_forwards_confirmed_password(world: World) {
    let (status, body) = post(
        &world,
        "user_create",
        None,
        json!({
            "name": "ada",
            "email": "ada@example.org",
            "password1": STRONG,
            "password2": STRONG,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.get("success"), Some(&json!(true)));
    let calls = world.host.calls();
    assert_eq!(calls.len(), 1);
    let (call, caller, record) = &calls[0];
    assert_eq!(*call, HostCall::Create);
    assert_eq!(caller, &None);
    assert_eq!(record.get("password"), Some(&json!(STRONG)));
    assert!(!record.contains("password1"));
    assert!(!record.contains("password2"));
}

#[rstest]
#[case("password")]
#[case("Passw0rd")]
#[case("P@ss1")]
#[actix_web::test]
async fn weak_api_passwords_never_reach_the_host(world: World, #[case] password: &str) {
    let (status, body) = post(
        &world,
        "user_create",
        None,
        json!({ "name": "ada", "email": "ada@example.org", "password": password }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body
        .pointer("/details/password/0")
        .and_then(Value::as_str)
        .expect("password message");
    assert!(message.starts_with("Your password must be 8 characters or longer"));
    assert!(world.host.calls().is_empty());
}

#[rstest]
#[actix_web::test]
async fn non_string_password_is_rejected(world: World) {
    let (status, body) = post(
        &world,
        "user_update",
        Some("ada"),
        json!({ "id": "ada", "email": "ada@example.org", "password": 12345678 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body.pointer("/details/password/0"),
        Some(&json!("Passwords must be strings"))
    );
}

#[rstest]
#[actix_web::test]
async fn profile_form_without_new_password_keeps_the_old_one(world: World) {
    let (status, _) = post(
        &world,
        "user_update",
        Some("ada"),
        json!({
            "id": "ada",
            "email": "ada@example.org",
            "password1": "",
            "password2": "",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = world.host.calls();
    let (call, caller, record) = &calls[0];
    assert_eq!(*call, HostCall::Update);
    assert_eq!(caller.as_deref(), Some("ada"));
    assert!(!record.contains("password"));
}

#[rstest]
#[actix_web::test]
async fn profile_form_ignores_a_direct_password(world: World) {
    let (status, _) = post(
        &world,
        "user_update",
        Some("ada"),
        json!({ "id": "ada", "email": "ada@example.org", "password": "weak", "password2": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = world.host.calls();
    assert_eq!(calls.len(), 1);
    let (_, _, record) = &calls[0];
    assert!(!record.contains("password"));
    assert!(!record.contains("password2"));
}

#[rstest]
#[actix_web::test]
async fn update_forwards_profile_fields_outside_the_default_schema(world: World) {
    let (status, _) = post(
        &world,
        "user_update",
        Some("ada"),
        json!({
            "id": "ada",
            "email": "ada@example.org",
            "image_url": "https://example.org/ada.png",
            "plugin_extras": { "theme": "dark" },
            "password": STRONG,
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = world.host.calls();
    let (call, _, record) = &calls[0];
    assert_eq!(*call, HostCall::Update);
    assert_eq!(
        record.get("image_url"),
        Some(&json!("https://example.org/ada.png"))
    );
    assert_eq!(record.get("plugin_extras"), Some(&json!({ "theme": "dark" })));
    assert_eq!(record.get("password"), Some(&json!(STRONG)));
}

#[rstest]
#[actix_web::test]
async fn notice_reports_partial_delivery(world: World) {
    let (status, body) = post(&world, "send_password_notice_email", Some("admin"), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body.get("result"),
        Some(&json!("Email sent to 1 of 2 users; 1 failed"))
    );
    let sent = world.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_name, "b");
    assert_eq!(
        sent[0].subject,
        "Login security update for Open Data DK portal"
    );
    assert_eq!(sent[0].body.matches("1st May 2021").count(), 2);
}

#[rstest]
#[actix_web::test]
async fn notice_refuses_regular_users_before_listing(world: World) {
    let (status, body) = post(&world, "send_password_notice_email", Some("ada"), json!({})).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.get("code"), Some(&json!("forbidden")));
    assert_eq!(world.authorizer.checked(), vec!["ada".to_owned()]);
    assert_eq!(world.directory.calls(), 0);
    assert!(world.mailer.sent().is_empty());
}
