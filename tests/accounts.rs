//! Auth gateway and session flow against a mocked backend.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use url::Url;
use wayfare::application::gateway::{
    AuthGateway, BearerToken, Credentials, NewAccount, PageWindow, ReleaseGateway,
};
use wayfare::application::session::SessionStore;
use wayfare::domain::types::Role;
use wayfare::infra::http::{HttpGateway, Transport};
use wayfare::infra::storage::LocalStore;

fn build_transport(server: &MockServer, bearer: BearerToken) -> Arc<Transport> {
    let base = Url::parse(&server.base_url()).expect("server url");
    Arc::new(Transport::new(base, Duration::from_secs(5), bearer).expect("transport"))
}

#[tokio::test]
async fn login_yields_a_session_and_authorizes_later_calls() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let login = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/checkLogin")
                .json_body(json!({ "userName": "admin", "passWord": "123456" }));
            then.status(200).json_body(json!({
                "data": {
                    "token": "t-42",
                    "user": { "id": "u-1", "userName": "admin", "role": "admin" }
                }
            }));
        })
        .await;
    let authed_list = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/releases")
                .header("authorization", "Bearer t-42");
            then.status(200)
                .json_body(json!({ "data": { "releases": [] } }));
        })
        .await;

    let bearer = BearerToken::default();
    let transport = build_transport(&server, bearer.clone());
    let gateway = HttpGateway::new(transport);

    let auth = gateway
        .login(Credentials {
            user_name: "admin".to_string(),
            pass_word: "123456".to_string(),
        })
        .await
        .expect("login");
    login.assert_async().await;

    let user = auth.user.expect("account in login payload");
    assert_eq!(user.role, Role::Admin);

    let store = LocalStore::open(dir.path()).expect("store");
    let mut session = SessionStore::new(store, bearer);
    session.set_user(user).expect("persist user");
    session.set_token(auth.token).expect("persist token");

    // The installed token rides along on every later request.
    gateway
        .list_releases(PageWindow { limit: 50, offset: 0 })
        .await
        .expect("authorized list");
    authed_list.assert_async().await;
}

#[tokio::test]
async fn sign_up_posts_the_camel_case_payload() {
    let server = MockServer::start_async().await;

    let sign_up = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/signUp")
                .json_body(json!({ "userName": "marco", "passWord": "polo" }));
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;

    let gateway = HttpGateway::new(build_transport(&server, BearerToken::default()));
    gateway
        .sign_up(NewAccount {
            user_name: "marco".to_string(),
            pass_word: "polo".to_string(),
            avatar_url: None,
        })
        .await
        .expect("sign up");
    sign_up.assert_async().await;
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_status() {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/checkLogin");
            then.status(401).body("bad credentials");
        })
        .await;

    let gateway = HttpGateway::new(build_transport(&server, BearerToken::default()));
    let err = gateway
        .login(Credentials {
            user_name: "admin".to_string(),
            pass_word: "wrong".to_string(),
        })
        .await
        .expect_err("rejected login");

    let message = err.to_string();
    assert!(message.contains("401"), "unexpected error: {message}");
}
