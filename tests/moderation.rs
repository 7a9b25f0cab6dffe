//! Moderation store behavior against a mocked backend and temp storage.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use url::Url;
use wayfare::application::gateway::BearerToken;
use wayfare::application::releases::{ModerationError, ModerationService, StatusFilter};
use wayfare::domain::entities::Release;
use wayfare::domain::types::ReviewState;
use wayfare::infra::http::{HttpGateway, Transport};
use wayfare::infra::storage::{LocalStore, keys};
use wayfare_api_types::ReleaseId;

fn build_service(server: &MockServer, dir: &TempDir) -> ModerationService {
    let base = Url::parse(&server.base_url()).expect("server url");
    let transport = Arc::new(
        Transport::new(base, Duration::from_secs(5), BearerToken::default())
            .expect("transport"),
    );
    let gateway = Arc::new(HttpGateway::new(transport));
    let store = LocalStore::open(dir.path()).expect("store");
    ModerationService::new(gateway, store).expect("service")
}

fn row(id: &str) -> Value {
    json!({
        "releaseID": id,
        "state": "wait",
        "deleteStatus": 1,
        "title": format!("journal {id}")
    })
}

fn page(rows: Vec<Value>) -> Value {
    json!({ "data": { "releases": rows, "pagination": { "limit": 50, "offset": 0 } } })
}

#[tokio::test]
async fn fetch_merges_both_pages_and_derives_flags() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/releases")
                .query_param("limit", "50")
                .query_param("offset", "0");
            then.status(200).json_body(page(vec![
                json!({ "releaseID": "r-1", "state": "resolve", "deleteStatus": 1 }),
                json!({ "releaseID": "r-2", "deleteStatus": 0 }),
            ]));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/releases")
                .query_param("limit", "50")
                .query_param("offset", "50");
            then.status(200).json_body(page(vec![row("r-3")]));
        })
        .await;

    let mut service = build_service(&server, &dir);
    service.fetch_releases().await.expect("fetch");

    first.assert_async().await;
    second.assert_async().await;
    assert!(service.is_loaded());

    // The server-deleted record is parsed as deleted and hidden.
    let visible: Vec<&str> = service
        .visible()
        .iter()
        .map(|release| release.release_id.as_str())
        .collect();
    assert_eq!(visible, vec!["r-1", "r-3"]);

    let hidden = service.find(&ReleaseId::from("r-2")).expect("record");
    assert!(hidden.is_deleted);
    assert_eq!(hidden.delete_status, 0);
    // Absent state defaults at the boundary.
    assert_eq!(hidden.state, ReviewState::Wait);

    // The second call is a no-op while loaded.
    service.fetch_releases().await.expect("second fetch");
    assert_eq!(first.hits_async().await, 1);
    assert_eq!(second.hits_async().await, 1);
}

#[tokio::test]
async fn pagination_window_never_reaches_past_one_hundred() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    // Both pages over-deliver: 60 rows each instead of the requested 50.
    let first_rows: Vec<Value> = (0..60).map(|n| row(&format!("r-{n}"))).collect();
    let second_rows: Vec<Value> = (50..110).map(|n| row(&format!("r-{n}"))).collect();

    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "0");
            then.status(200).json_body(page(first_rows));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "50");
            then.status(200).json_body(page(second_rows));
        })
        .await;

    let mut service = build_service(&server, &dir);
    service.fetch_releases().await.expect("fetch");

    // Each page is truncated to its window; nothing past the two hardcoded
    // offsets is ever requested.
    assert_eq!(service.visible().len(), 100);
    assert_eq!(first.hits_async().await, 1);
    assert_eq!(second.hits_async().await, 1);
}

#[tokio::test]
async fn unknown_state_fails_before_any_network_call() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let state_endpoint = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/release/r-1/state");
            then.status(200);
        })
        .await;

    let mut service = build_service(&server, &dir);
    let err = service
        .update_status(&ReleaseId::from("r-1"), "published", Some("nope"))
        .await
        .expect_err("unknown state");

    assert!(matches!(err, ModerationError::UnknownState { .. }));
    assert_eq!(state_endpoint.hits_async().await, 0);
}

#[tokio::test]
async fn update_status_syncs_server_then_memory() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "0");
            then.status(200).json_body(page(vec![row("r-1"), row("r-2")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "50");
            then.status(200).json_body(page(vec![]));
        })
        .await;
    let reject = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/release/r-1/state")
                .json_body(json!({ "state": "reject", "reason": "blurry photos" }));
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;

    let mut service = build_service(&server, &dir);
    service.fetch_releases().await.expect("fetch");

    service
        .update_status(&ReleaseId::from("r-1"), "reject", Some("blurry photos"))
        .await
        .expect("update");
    reject.assert_async().await;

    let rejected = service.find(&ReleaseId::from("r-1")).expect("record");
    assert_eq!(rejected.state, ReviewState::Reject);
    assert_eq!(rejected.reason.as_deref(), Some("blurry photos"));

    // Narrowed view follows the stored filter.
    service.set_filter(StatusFilter::Only(ReviewState::Reject));
    let narrowed: Vec<&str> = service
        .filtered()
        .iter()
        .map(|release| release.release_id.as_str())
        .collect();
    assert_eq!(narrowed, vec!["r-1"]);
}

#[tokio::test]
async fn soft_delete_then_restore_returns_to_pre_delete_state() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "0");
            then.status(200).json_body(page(vec![row("r-1"), row("r-2")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "50");
            then.status(200).json_body(page(vec![]));
        })
        .await;
    let flag_off = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/release/r-1/delete-status")
                .json_body(json!({ "deleteStatus": 0 }));
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;
    let flag_on = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/release/r-1/delete-status")
                .json_body(json!({ "deleteStatus": 1 }));
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;

    let mut service = build_service(&server, &dir);
    service.fetch_releases().await.expect("fetch");
    let id = ReleaseId::from("r-1");

    service.soft_delete(&id).await.expect("soft delete");
    flag_off.assert_async().await;
    assert_eq!(service.visible().len(), 1);
    assert_eq!(service.deleted().len(), 1);

    // The snapshot is persisted verbatim under the fixed key.
    let persisted: Vec<Release> = LocalStore::open(dir.path())
        .expect("store")
        .get_json(keys::DELETED_RELEASES)
        .expect("readable")
        .expect("present");
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].release_id, id);

    service.restore(&id).await.expect("restore");
    flag_on.assert_async().await;
    let restored = service.find(&id).expect("record");
    assert!(!restored.is_deleted);
    assert_eq!(restored.delete_status, 1);
    assert!(service.deleted().is_empty());

    let persisted: Vec<Release> = LocalStore::open(dir.path())
        .expect("store")
        .get_json(keys::DELETED_RELEASES)
        .expect("readable")
        .expect("present");
    assert!(persisted.is_empty());
}

#[tokio::test]
async fn permanent_delete_purges_once_and_is_idempotent() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "0");
            then.status(200).json_body(page(vec![row("r-1")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "50");
            then.status(200).json_body(page(vec![]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/release/r-1/delete-status");
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;
    let purge = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/release/r-1")
                .json_body(json!({ "userID": "admin" }));
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;

    let mut service = build_service(&server, &dir);
    service.fetch_releases().await.expect("fetch");
    let id = ReleaseId::from("r-1");

    service.soft_delete(&id).await.expect("soft delete");
    service.permanent_delete(&id, "admin").await.expect("purge");
    assert!(service.deleted().is_empty());
    assert_eq!(purge.hits_async().await, 1);

    // Second purge: silent no-op, no further network traffic.
    service.permanent_delete(&id, "admin").await.expect("repeat purge");
    assert_eq!(purge.hits_async().await, 1);
}

#[tokio::test]
async fn failed_fetch_records_error_and_permits_retry() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let broken = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases");
            then.status(500).body("backend down");
        })
        .await;

    let mut service = build_service(&server, &dir);
    let err = service.fetch_releases().await.expect_err("failed fetch");
    assert!(matches!(err, ModerationError::Gateway(_)));
    assert!(service.last_error().is_some());
    assert!(!service.is_loaded());

    broken.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "0");
            then.status(200).json_body(page(vec![row("r-1")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "50");
            then.status(200).json_body(page(vec![]));
        })
        .await;

    // The failed load left the guard unset, so the next call goes out again.
    service.fetch_releases().await.expect("retry");
    assert!(service.is_loaded());
    assert_eq!(service.last_error(), None);
    assert_eq!(service.visible().len(), 1);
}

#[tokio::test]
async fn sync_restore_clears_in_place_or_reloads() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let first = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "0");
            then.status(200)
                .json_body(page(vec![json!({ "releaseID": "r-1", "deleteStatus": 0 })]));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "50");
            then.status(200).json_body(page(vec![]));
        })
        .await;

    let mut service = build_service(&server, &dir);
    service.fetch_releases().await.expect("fetch");

    // Known id: cleared in place, no extra requests.
    service
        .sync_restore(&ReleaseId::from("r-1"))
        .await
        .expect("in-place sync");
    assert!(!service.find(&ReleaseId::from("r-1")).expect("record").is_deleted);
    assert_eq!(first.hits_async().await, 1);

    // Unknown id: reset and refetch in full.
    service
        .sync_restore(&ReleaseId::from("r-9"))
        .await
        .expect("reload sync");
    assert_eq!(first.hits_async().await, 2);
    assert_eq!(second.hits_async().await, 2);
}

#[tokio::test]
async fn recycle_bin_rehydrates_and_reloads_from_server() {
    let server = MockServer::start_async().await;
    let dir = tempfile::tempdir().expect("tempdir");

    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "0");
            then.status(200).json_body(page(vec![row("r-1")]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/releases").query_param("offset", "50");
            then.status(200).json_body(page(vec![]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/release/r-1/delete-status");
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/releases/deleted")
                .query_param("offset", "0");
            then.status(200)
                .json_body(page(vec![json!({ "releaseID": "r-7", "deleteStatus": 0 })]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/releases/deleted")
                .query_param("offset", "50");
            then.status(200).json_body(page(vec![]));
        })
        .await;

    let mut service = build_service(&server, &dir);
    service.fetch_releases().await.expect("fetch");
    service
        .soft_delete(&ReleaseId::from("r-1"))
        .await
        .expect("soft delete");

    // A new service over the same storage sees the persisted bin.
    let mut rebuilt = build_service(&server, &dir);
    assert_eq!(rebuilt.deleted().len(), 1);

    // Re-syncing replaces the local snapshot with the server's view.
    rebuilt.reload_deleted().await.expect("reload");
    assert_eq!(rebuilt.deleted().len(), 1);
    assert_eq!(rebuilt.deleted()[0].release_id.as_str(), "r-7");
    assert!(rebuilt.deleted()[0].is_deleted);
}
