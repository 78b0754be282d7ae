//! Integration tests for the record service and client
//!
//! The first group runs the real server on an ephemeral port and drives it
//! through [`ApiClient`]. The remaining groups point the client, the action
//! modal and the List Page at wiremock to cover failure handling.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tadmin::api::{format_api_error, ApiClient, ClientError};
use tadmin::model::{Record, RecordId};
use tadmin::server::{Router, Server};
use tadmin::store::{MemoryStore, RecordStore};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(id: &str, name: &str) -> Record {
    Record {
        id: RecordId::parse(id).unwrap(),
        name: name.to_string(),
    }
}

fn client_for(url: &str) -> ApiClient {
    ApiClient::new(url, Duration::from_secs(5)).expect("valid url")
}

/// Start a server on 127.0.0.1:0 over `store`, returning a client for it
async fn spawn_server(store: Arc<dyn RecordStore>) -> (ApiClient, tokio::sync::oneshot::Sender<()>) {
    let server = Server::bind(
        "127.0.0.1:0".parse().unwrap(),
        Router::new(store).expect("routes"),
    )
        .await
        .expect("bind");
    let addr = server.local_addr().expect("local addr");
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(server.serve_with_shutdown(async {
        let _ = rx.await;
    }));
    (client_for(&format!("http://{}", addr)), tx)
}

/// End-to-end endpoint scenarios against a live server
mod live_server_tests {
    use super::*;

    #[tokio::test]
    async fn test_lifecycle_of_seeded_record() {
        let store = Arc::new(MemoryStore::with_records(vec![record("1", "Alpha")]).unwrap());
        let (client, _shutdown) = spawn_server(store).await;
        let id = RecordId::parse("1").unwrap();

        let fetched = client.get_record(&id).await.expect("get");
        assert_eq!(fetched.name, "Alpha");

        let updated = client.update_record(&id, "Beta").await.expect("update");
        assert_eq!(updated, record("1", "Beta"));

        tokio_test::assert_ok!(client.delete_record(&id).await);

        let err = client.get_record(&id).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(format_api_error(&err), "Test not found");

        // Deleting again is a miss, not a success
        let err = client.delete_record(&id).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_then_list_in_order() {
        let (client, _shutdown) = spawn_server(Arc::new(MemoryStore::new())).await;

        let first = client.create_record("First").await.expect("create");
        let second = client.create_record("Second").await.expect("create");
        assert_ne!(first.id, second.id);

        let records = client.list_records().await.expect("list");
        assert_eq!(records, vec![first, second]);
    }

    #[tokio::test]
    async fn test_blank_name_rejected_by_server() {
        let store = Arc::new(MemoryStore::with_records(vec![record("1", "Alpha")]).unwrap());
        let (client, _shutdown) = spawn_server(store).await;

        let err = client.create_record("").await.unwrap_err();
        match &err {
            ClientError::Status { status, message } => {
                assert_eq!(*status, 500);
                assert_eq!(message, "Failed to create test");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let id = RecordId::parse("1").unwrap();
        let err = client.update_record(&id, " ").await.unwrap_err();
        match &err {
            ClientError::Status { status, message } => {
                assert_eq!(*status, 500);
                assert_eq!(message, "Failed to update test");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert_eq!(client.list_records().await.unwrap(), vec![record("1", "Alpha")]);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let store = Arc::new(MemoryStore::with_records(vec![record("a", "Alpha")]).unwrap());
        let (client, _shutdown) = spawn_server(store).await;
        let id = RecordId::parse("a").unwrap();

        let once = client.update_record(&id, "Gamma").await.unwrap();
        let twice = client.update_record(&id, "Gamma").await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(client.get_record(&id).await.unwrap().name, "Gamma");
    }

    #[tokio::test]
    async fn test_raw_status_codes() {
        let (client, _shutdown) = spawn_server(Arc::new(MemoryStore::new())).await;
        let http = reqwest::Client::new();
        let base = client.base_url().as_str().trim_end_matches('/').to_string();

        let created = http
            .post(format!("{}/api/tests", base))
            .json(&json!({"name": "Alpha"}))
            .send()
            .await
            .unwrap();
        assert_eq!(created.status(), 201);

        let list: serde_json::Value = http
            .get(format!("{}/api/tests", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(list["data"].as_array().unwrap().len(), 1);
        let id = list["data"][0]["id"].as_str().unwrap().to_string();

        let deleted: serde_json::Value = http
            .delete(format!("{}/api/tests/{}", base, id))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(deleted, json!({"success": true}));

        let not_routed = http.get(format!("{}/nope", base)).send().await.unwrap();
        assert_eq!(not_routed.status(), 404);

        let wrong_method = http
            .patch(format!("{}/api/tests/{}", base, id))
            .send()
            .await
            .unwrap();
        assert_eq!(wrong_method.status(), 405);

        let bad_body = http
            .post(format!("{}/api/tests", base))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(bad_body.status(), 500);
        let body: serde_json::Value = bad_body.json().await.unwrap();
        assert_eq!(body, json!({"error": "Failed to create test"}));
    }

    #[tokio::test]
    async fn test_malformed_id_is_generic_failure() {
        let (client, _shutdown) = spawn_server(Arc::new(MemoryStore::new())).await;
        let http = reqwest::Client::new();
        let base = client.base_url().as_str().trim_end_matches('/').to_string();

        let response = http
            .get(format!("{}/api/tests/bad%20id", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 500);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Failed to fetch test"}));
    }
}

/// Client decoding and error mapping against wiremock
mod client_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_accepts_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"_id": "x1", "name": "Alpha"}])),
            )
            .mount(&server)
            .await;

        let records = client_for(&server.uri()).list_records().await.unwrap();
        assert_eq!(records, vec![record("x1", "Alpha")]);
    }

    #[tokio::test]
    async fn test_update_sends_name_only() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/tests/7"))
            .and(body_json(json!({"name": "Beta"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "7", "name": "Beta"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let updated = client_for(&server.uri())
            .update_record(&RecordId::parse("7").unwrap(), "Beta")
            .await
            .unwrap();
        assert_eq!(updated.name, "Beta");
    }

    #[tokio::test]
    async fn test_server_error_is_masked() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to fetch tests"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).list_records().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
        assert_eq!(format_api_error(&err), "Server error. Please try again.");
    }

    #[tokio::test]
    async fn test_unexpected_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let err = client_for(&server.uri()).list_records().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": []}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Duration::from_millis(50)).unwrap();
        let err = client.list_records().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}

/// Action modal and List Page flows against wiremock
mod ui_flow_tests {
    use super::*;
    use tadmin::app::{App, Mode};
    use tadmin::config::Config;
    use tadmin::modal::{ActionKind, ActionModal, ViewState, LOAD_FAILED};

    fn app_for(server: &MockServer) -> App {
        App::new(client_for(&server.uri()), Config::default(), 10)
    }

    async fn mount_list(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_failure_then_manual_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tests"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.fetch_records().await;
        assert!(app.can_retry());
        assert_eq!(app.error_message.as_deref(), Some("Server error. Please try again."));

        mount_list(&server, json!({"data": [{"id": "1", "name": "Alpha"}]})).await;
        app.fetch_records().await;
        assert!(app.error_message.is_none());
        assert_eq!(app.records, vec![record("1", "Alpha")]);
    }

    #[tokio::test]
    async fn test_view_loads_lazily() {
        let server = MockServer::start().await;
        mount_list(&server, json!({"data": [{"id": "1", "name": "Alpha"}]})).await;
        Mock::given(method("GET"))
            .and(path("/api/tests/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": "1", "name": "Alpha"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.fetch_records().await;
        app.open_modal(ActionKind::View).await;

        assert_eq!(app.mode, Mode::Modal);
        match &app.modal {
            ActionModal::View(viewer) => {
                assert_eq!(viewer.state, ViewState::Loaded(record("1", "Alpha")));
            }
            other => panic!("unexpected modal: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_view_failure_shows_message() {
        let server = MockServer::start().await;
        mount_list(&server, json!({"data": [{"id": "1", "name": "Alpha"}]})).await;
        Mock::given(method("GET"))
            .and(path("/api/tests/1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Test not found"})))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.fetch_records().await;
        app.open_modal(ActionKind::View).await;

        match &app.modal {
            ActionModal::View(viewer) => {
                assert_eq!(viewer.state, ViewState::Failed(LOAD_FAILED.to_string()));
            }
            other => panic!("unexpected modal: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_success_closes_notifies_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tests"))
            .and(body_json(json!({"name": "Gamma"})))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": "3", "name": "Gamma"})),
            )
            .expect(1)
            .mount(&server)
            .await;
        mount_list(&server, json!({"data": [{"id": "3", "name": "Gamma"}]})).await;

        let mut app = app_for(&server);
        app.open_modal(ActionKind::Create).await;
        for c in "Gamma".chars() {
            app.modal.form_mut().unwrap().push_char(c);
        }
        app.begin_submit();
        app.finish_submit().await;

        assert!(!app.modal.is_open());
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.notification_manager.current_toast().map(|n| n.message.as_str()),
            Some("Data inserted successfully")
        );
        assert_eq!(app.records, vec![record("3", "Gamma")]);
    }

    #[tokio::test]
    async fn test_update_failure_keeps_form_open() {
        let server = MockServer::start().await;
        mount_list(&server, json!({"data": [{"id": "1", "name": "Alpha"}]})).await;
        Mock::given(method("PUT"))
            .and(path("/api/tests/1"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to update test"})),
            )
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.fetch_records().await;
        app.open_modal(ActionKind::Update).await;
        app.begin_submit();
        app.finish_submit().await;

        assert_eq!(app.mode, Mode::Modal);
        let form = app.modal.form_mut().expect("form still open");
        assert_eq!(form.name, "Alpha");
        assert_eq!(form.error.as_deref(), Some("Server error. Please try again."));
    }

    #[tokio::test]
    async fn test_delete_failure_stays_open_then_succeeds() {
        let server = MockServer::start().await;
        mount_list(&server, json!({"data": [{"id": "1", "name": "Alpha"}]})).await;
        Mock::given(method("DELETE"))
            .and(path("/api/tests/1"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to delete test"})),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.fetch_records().await;
        app.open_modal(ActionKind::Delete).await;
        app.begin_submit();
        app.finish_submit().await;

        match &app.modal {
            ActionModal::Delete(confirm) => {
                assert!(!confirm.deleting);
                assert_eq!(
                    confirm.error.as_deref(),
                    Some("Delete failed: Server error. Please try again.")
                );
            }
            other => panic!("unexpected modal: {other:?}"),
        }

        Mock::given(method("DELETE"))
            .and(path("/api/tests/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(&server)
            .await;
        app.begin_submit();
        app.finish_submit().await;

        assert!(!app.modal.is_open());
        assert_eq!(
            app.notification_manager.current_toast().map(|n| n.message.as_str()),
            Some("Test deleted successfully")
        );
    }
}
