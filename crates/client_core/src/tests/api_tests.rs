use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode as HttpStatus,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::LinkId;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{messages, ClientContext, MissingClipboard, Notification, SubmitOutcome};

#[derive(Clone)]
struct MockServer {
    links: Arc<Mutex<Vec<LinkRecord>>>,
    create_bodies: Arc<Mutex<Vec<Value>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    list_calls: Arc<AtomicUsize>,
    list_failure: Option<(HttpStatus, String)>,
    create_failure: Option<(HttpStatus, String)>,
    delete_status: HttpStatus,
}

impl Default for MockServer {
    fn default() -> Self {
        Self {
            links: Arc::new(Mutex::new(Vec::new())),
            create_bodies: Arc::new(Mutex::new(Vec::new())),
            deleted: Arc::new(Mutex::new(Vec::new())),
            list_calls: Arc::new(AtomicUsize::new(0)),
            list_failure: None,
            create_failure: None,
            delete_status: HttpStatus::NO_CONTENT,
        }
    }
}

impl MockServer {
    fn with_links(links: Vec<LinkRecord>) -> Self {
        Self {
            links: Arc::new(Mutex::new(links)),
            ..Default::default()
        }
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

async fn handle_list(State(state): State<MockServer>) -> Response {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    if let Some((status, body)) = &state.list_failure {
        return (*status, body.clone()).into_response();
    }
    Json(state.links.lock().await.clone()).into_response()
}

async fn handle_create(State(state): State<MockServer>, Json(body): Json<Value>) -> Response {
    state.create_bodies.lock().await.push(body.clone());
    if let Some((status, reply)) = &state.create_failure {
        return (*status, reply.clone()).into_response();
    }

    let code = body
        .get("code")
        .and_then(Value::as_str)
        .unwrap_or("gen0001")
        .to_string();
    let url = body
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let short_url = format!("http://x/{code}");

    let mut links = state.links.lock().await;
    let id = links.len() as i64 + 1;
    links.push(record(id, &code, &url));

    (
        HttpStatus::CREATED,
        Json(json!({ "short_url": short_url, "code": code, "original_url": url })),
    )
        .into_response()
}

async fn handle_delete(State(state): State<MockServer>, Path(code): Path<String>) -> HttpStatus {
    state.deleted.lock().await.push(code.clone());
    if state.delete_status == HttpStatus::NO_CONTENT {
        state.links.lock().await.retain(|record| record.code != code);
    }
    state.delete_status
}

async fn spawn_link_server(state: MockServer) -> anyhow::Result<Url> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/links", get(handle_list).post(handle_create))
        .route("/api/links/:code", delete(handle_delete))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(Url::parse(&format!("http://{addr}"))?)
}

async fn unreachable_base_url() -> anyhow::Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(Url::parse(&format!("http://{addr}"))?)
}

fn record(id: i64, code: &str, original_url: &str) -> LinkRecord {
    LinkRecord {
        id: LinkId::Numeric(id),
        code: code.to_string(),
        short_url: format!("http://x/{code}"),
        original_url: original_url.to_string(),
        clicks: 0,
        last_clicked_at: None,
    }
}

#[test]
fn endpoints_extend_base_path_and_encode_code() {
    let api = HttpLinkApi::new(Url::parse("http://links.example/prefix/").expect("url"));

    assert_eq!(
        api.endpoint(None).expect("collection").as_str(),
        "http://links.example/prefix/api/links"
    );
    assert_eq!(
        api.endpoint(Some("a b/c")).expect("item").as_str(),
        "http://links.example/prefix/api/links/a%20b%2Fc"
    );
}

#[tokio::test]
async fn lists_links_in_server_order() {
    let server = MockServer::with_links(vec![
        record(2, "yt2025", "https://youtube.com"),
        record(1, "abc123", "https://example.com"),
    ]);
    let base = spawn_link_server(server.clone()).await.expect("spawn server");
    let api = HttpLinkApi::new(base);

    let links = api.list_links().await.expect("list");

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].code, "yt2025");
    assert_eq!(links[1].code, "abc123");
    assert_eq!(server.list_calls(), 1);
}

#[tokio::test]
async fn list_error_status_is_a_rejection() {
    let server = MockServer {
        list_failure: Some((
            HttpStatus::INTERNAL_SERVER_ERROR,
            r#"{"message":"db down"}"#.into(),
        )),
        ..Default::default()
    };
    let base = spawn_link_server(server).await.expect("spawn server");

    let err = HttpLinkApi::new(base)
        .list_links()
        .await
        .expect_err("must fail");

    let rejection = err.rejection().expect("rejection");
    assert_eq!(rejection.status, 500);
    assert_eq!(rejection.message(), Some("db down"));
}

#[tokio::test]
async fn list_with_unexpected_shape_is_a_decode_error() {
    let server = MockServer {
        list_failure: Some((HttpStatus::OK, r#"{"links":[]}"#.into())),
        ..Default::default()
    };
    let base = spawn_link_server(server).await.expect("spawn server");

    let err = HttpLinkApi::new(base)
        .list_links()
        .await
        .expect_err("must fail");

    assert!(matches!(err, LinkApiError::Decode(_)), "unexpected: {err}");
}

#[tokio::test]
async fn create_omits_code_key_when_none_requested() {
    let server = MockServer::default();
    let base = spawn_link_server(server.clone()).await.expect("spawn server");
    let api = HttpLinkApi::new(base);

    let created = api
        .create_link(&CreateLinkRequest::from_inputs("https://example.com", " "))
        .await
        .expect("create");
    api.create_link(&CreateLinkRequest::from_inputs("https://example.com", "abc123"))
        .await
        .expect("create with code");

    assert_eq!(created.short_url, "http://x/gen0001");
    let bodies = server.create_bodies.lock().await;
    assert_eq!(bodies[0], json!({ "url": "https://example.com" }));
    assert_eq!(
        bodies[1],
        json!({ "url": "https://example.com", "code": "abc123" })
    );
}

#[tokio::test]
async fn create_rejection_carries_server_message() {
    let server = MockServer {
        create_failure: Some((
            HttpStatus::BAD_REQUEST,
            r#"{"message":"code already taken"}"#.into(),
        )),
        ..Default::default()
    };
    let base = spawn_link_server(server).await.expect("spawn server");

    let err = HttpLinkApi::new(base)
        .create_link(&CreateLinkRequest::from_inputs("https://example.com", "abc123"))
        .await
        .expect_err("must fail");

    let rejection = err.rejection().expect("rejection");
    assert_eq!(rejection.status, 400);
    assert_eq!(rejection.message(), Some("code already taken"));
}

#[tokio::test]
async fn create_rejection_with_empty_error_object_has_no_message() {
    let server = MockServer {
        create_failure: Some((HttpStatus::INTERNAL_SERVER_ERROR, "{}".into())),
        ..Default::default()
    };
    let base = spawn_link_server(server).await.expect("spawn server");

    let err = HttpLinkApi::new(base)
        .create_link(&CreateLinkRequest::from_inputs("https://example.com", ""))
        .await
        .expect_err("must fail");

    let rejection = err.rejection().expect("rejection");
    assert_eq!(rejection.status, 500);
    assert_eq!(rejection.message(), None);
}

#[tokio::test]
async fn create_failure_with_non_json_body_is_a_decode_error() {
    let server = MockServer {
        create_failure: Some((
            HttpStatus::BAD_GATEWAY,
            "<html>Bad Gateway</html>".into(),
        )),
        ..Default::default()
    };
    let base = spawn_link_server(server).await.expect("spawn server");

    let err = HttpLinkApi::new(base)
        .create_link(&CreateLinkRequest::from_inputs("https://example.com", ""))
        .await
        .expect_err("must fail");

    assert!(matches!(err, LinkApiError::Decode(_)), "unexpected: {err}");
    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn delete_succeeds_only_on_no_content() {
    let server = MockServer::with_links(vec![record(1, "abc123", "https://example.com")]);
    let base = spawn_link_server(server.clone()).await.expect("spawn server");

    HttpLinkApi::new(base)
        .delete_link("abc123")
        .await
        .expect("delete");
    assert_eq!(*server.deleted.lock().await, vec!["abc123".to_string()]);
    assert!(server.links.lock().await.is_empty());

    let ok_but_not_204 = MockServer {
        delete_status: HttpStatus::OK,
        ..Default::default()
    };
    let base = spawn_link_server(ok_but_not_204).await.expect("spawn server");
    let err = HttpLinkApi::new(base)
        .delete_link("abc123")
        .await
        .expect_err("200 is not a delete success");
    assert!(matches!(err, LinkApiError::Decode(_)), "unexpected: {err}");
}

#[tokio::test]
async fn delete_sends_code_as_single_path_segment() {
    let server = MockServer::default();
    let base = spawn_link_server(server.clone()).await.expect("spawn server");

    HttpLinkApi::new(base)
        .delete_link("a b")
        .await
        .expect("delete");

    assert_eq!(*server.deleted.lock().await, vec!["a b".to_string()]);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let base = unreachable_base_url().await.expect("closed port");

    let err = HttpLinkApi::new(base)
        .list_links()
        .await
        .expect_err("must fail");

    assert!(matches!(err, LinkApiError::Transport(_)), "unexpected: {err}");
}

#[tokio::test]
async fn context_create_round_trip_refreshes_directory() {
    let server = MockServer::default();
    let base = spawn_link_server(server.clone()).await.expect("spawn server");
    let ctx = ClientContext::new(base);

    let outcome = ctx.submit_with("https://example.com", "abc123").await;

    assert_eq!(
        outcome,
        SubmitOutcome::Created {
            short_url: "http://x/abc123".into()
        }
    );
    assert_eq!(
        ctx.notification(),
        Some(Notification::success("Short URL created: http://x/abc123"))
    );
    assert_eq!(ctx.form().inputs().url, "");
    assert_eq!(server.list_calls(), 1);
    assert_eq!(ctx.snapshot().records()[0].code, "abc123");
}

#[tokio::test]
async fn context_rejected_create_leaves_directory_alone() {
    let server = MockServer {
        create_failure: Some((
            HttpStatus::BAD_REQUEST,
            r#"{"message":"code already taken"}"#.into(),
        )),
        ..Default::default()
    };
    let base = spawn_link_server(server.clone()).await.expect("spawn server");
    let ctx = ClientContext::new(base);

    ctx.submit_with("https://example.com", "abc123").await;

    assert_eq!(
        ctx.notification(),
        Some(Notification::error("code already taken"))
    );
    assert_eq!(ctx.form().inputs().code, "abc123");
    assert_eq!(server.list_calls(), 0);
}

#[tokio::test]
async fn context_create_behind_html_error_page_is_generic_failure() {
    let server = MockServer {
        create_failure: Some((
            HttpStatus::BAD_GATEWAY,
            "<html>Bad Gateway</html>".into(),
        )),
        ..Default::default()
    };
    let base = spawn_link_server(server.clone()).await.expect("spawn server");
    let ctx = ClientContext::new(base);

    let outcome = ctx.submit_with("https://example.com", "abc123").await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(
        ctx.notification(),
        Some(Notification::error(messages::TRANSPORT_FAILURE_TEXT))
    );
    assert_eq!(ctx.form().inputs().code, "abc123");
    assert_eq!(server.list_calls(), 0);
}

#[tokio::test]
async fn context_delete_against_failing_server_keeps_directory() {
    let server = MockServer {
        delete_status: HttpStatus::INTERNAL_SERVER_ERROR,
        ..MockServer::with_links(vec![record(1, "abc123", "https://example.com")])
    };
    let base = spawn_link_server(server.clone()).await.expect("spawn server");
    let ctx = ClientContext::new(base);
    ctx.bootstrap().await;

    assert!(!ctx.remove("abc123").await);

    assert_eq!(server.list_calls(), 1);
    assert_eq!(ctx.snapshot().len(), 1);
    assert_eq!(
        ctx.notification(),
        Some(Notification::error(messages::DELETE_FAILED_TEXT))
    );
}

#[tokio::test]
async fn context_against_unreachable_server_reports_generic_failures() {
    let base = unreachable_base_url().await.expect("closed port");
    let ctx = ClientContext::new_with_dependencies(
        Arc::new(HttpLinkApi::new(base)),
        Arc::new(MissingClipboard),
        "http://unreachable",
    );

    assert!(!ctx.bootstrap().await);
    assert_eq!(
        ctx.notification(),
        Some(Notification::error(messages::LOAD_FAILED_TEXT))
    );

    assert_eq!(
        ctx.submit_with("https://example.com", "").await,
        SubmitOutcome::Failed
    );
    assert_eq!(
        ctx.notification(),
        Some(Notification::error(messages::TRANSPORT_FAILURE_TEXT))
    );
    assert_eq!(ctx.form().inputs().url, "https://example.com");
}
