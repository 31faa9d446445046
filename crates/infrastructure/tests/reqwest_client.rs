//! Integration tests for the reqwest adapter against a local stub server.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::get;
use postcheck_application::ports::{HttpClient, HttpClientError};
use postcheck_domain::case::object;
use postcheck_domain::request::{HttpMethod, RequestSpec};
use postcheck_infrastructure::ReqwestHttpClient;
use serde_json::{Value, json};
use url::Url;

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
}

#[derive(Clone, Default)]
struct Stub {
    statuses: Arc<HashMap<String, u16>>,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn capture(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let path = uri.path().to_string();
    let status = stub.statuses.get(&path).copied().unwrap_or(200);
    stub.captured.lock().unwrap().push(Captured {
        method,
        path,
        headers,
        body,
    });
    (StatusCode::from_u16(status).unwrap(), "{\"message\":\"ok\"}")
}

async fn spawn_stub(statuses: &[(&str, u16)]) -> (SocketAddr, Stub) {
    let stub = Stub {
        statuses: Arc::new(
            statuses
                .iter()
                .map(|(p, s)| ((*p).to_string(), *s))
                .collect(),
        ),
        captured: Arc::default(),
    };
    let app = Router::new().fallback(capture).with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, stub)
}

fn url(addr: SocketAddr, path: &str) -> Url {
    Url::parse(&format!("http://{addr}{path}")).unwrap()
}

#[tokio::test]
async fn sends_method_path_headers_and_json_body() {
    let (addr, stub) = spawn_stub(&[("/api/post/like", 200)]).await;
    let client = ReqwestHttpClient::new().unwrap();

    let request = RequestSpec::new("like_post", HttpMethod::Put, url(addr, "/api/post/like"))
        .with_bearer("tok-123")
        .with_json(object([
            ("postId", json!("p1")),
            ("userId", json!("u1")),
            ("likeAdd", json!(true)),
            ("likeRemove", json!(false)),
        ]));

    let response = client.execute(&request).await.unwrap();
    assert_eq!(response.status.as_u16(), 200);
    assert_eq!(response.body, "{\"message\":\"ok\"}");
    assert_eq!(response.size, 16);

    let captured = stub.captured.lock().unwrap().clone();
    assert_eq!(captured.len(), 1);
    let sent = &captured[0];
    assert_eq!(sent.method, Method::PUT);
    assert_eq!(sent.path, "/api/post/like");
    assert_eq!(sent.headers["authorization"], "Bearer tok-123");
    assert_eq!(sent.headers["content-type"], "application/json");

    let body: Value = serde_json::from_slice(&sent.body).unwrap();
    assert_eq!(
        body,
        json!({"postId": "p1", "userId": "u1", "likeAdd": true, "likeRemove": false})
    );
}

#[tokio::test]
async fn get_without_body_or_token() {
    let (addr, stub) = spawn_stub(&[]).await;
    let client = ReqwestHttpClient::new().unwrap();

    let request = RequestSpec::new("list_posts", HttpMethod::Get, url(addr, "/api/posts"));
    client.execute(&request).await.unwrap();

    let captured = stub.captured.lock().unwrap().clone();
    assert_eq!(captured[0].method, Method::GET);
    assert!(captured[0].body.is_empty());
    assert!(!captured[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn error_statuses_are_responses_not_errors() {
    let (addr, _stub) = spawn_stub(&[("/api/user/login", 401), ("/api/user/register", 500)]).await;
    let client = ReqwestHttpClient::new().unwrap();

    let login = RequestSpec::new("login", HttpMethod::Post, url(addr, "/api/user/login"));
    assert_eq!(client.execute(&login).await.unwrap().status.as_u16(), 401);

    let register = RequestSpec::new("register", HttpMethod::Post, url(addr, "/api/user/register"));
    assert_eq!(client.execute(&register).await.unwrap().status.as_u16(), 500);
}

#[tokio::test]
async fn connection_refused_maps_to_refused() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ReqwestHttpClient::new().unwrap();
    let request = RequestSpec::new("login", HttpMethod::Post, url(addr, "/api/user/login"))
        .with_timeout(Some(Duration::from_secs(5)));
    let err = client.execute(&request).await.unwrap_err();

    match err {
        HttpClientError::ConnectionRefused { host, port } => {
            assert_eq!(host, "127.0.0.1");
            assert_eq!(port, addr.port());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_maps_to_timeout() {
    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    let app = Router::new().route("/api/posts", get(slow));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ReqwestHttpClient::new().unwrap();
    let request = RequestSpec::new("list_posts", HttpMethod::Get, url(addr, "/api/posts"))
        .with_timeout(Some(Duration::from_millis(200)));
    let err = client.execute(&request).await.unwrap_err();

    assert_eq!(
        err,
        HttpClientError::Timeout {
            timeout_ms: Some(200)
        }
    );
    assert_eq!(err.to_string(), "request timed out after 200 ms");
}

#[tokio::test]
async fn unresolvable_host_maps_to_dns_error() {
    let client = ReqwestHttpClient::new().unwrap();
    let request = RequestSpec::new(
        "list_posts",
        HttpMethod::Get,
        Url::parse("http://no-such-host.invalid/api/posts").unwrap(),
    )
    .with_timeout(Some(Duration::from_secs(10)));
    let err = client.execute(&request).await.unwrap_err();

    assert!(
        matches!(
            err,
            HttpClientError::DnsError { ref host, .. } if host == "no-such-host.invalid"
        ),
        "unexpected error: {err:?}"
    );
}
