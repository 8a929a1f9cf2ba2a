// tests/http_transport.rs

//! HttpTransport against a raw TCP listener, checking what goes on the wire.

use recipe_sync::transport::StatusCode;
use recipe_sync::{ApiRequest, HttpTransport, Transport};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept one connection, answer with `status_line` and `body`, and hand
/// back the raw request text
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = stream.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);

            let text = String::from_utf8_lossy(&raw).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= end + 4 + content_length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();

        String::from_utf8(raw).unwrap()
    });

    (base_url, handle)
}

fn request_line(raw: &str) -> &str {
    raw.lines().next().unwrap()
}

fn has_header(raw: &str, name: &str, value: &str) -> bool {
    raw.lines()
        .filter_map(|line| line.split_once(':'))
        .any(|(n, v)| n.trim().eq_ignore_ascii_case(name) && v.trim() == value)
}

fn header_present(raw: &str, name: &str) -> bool {
    raw.lines()
        .filter_map(|line| line.split_once(':'))
        .any(|(n, _)| n.trim().eq_ignore_ascii_case(name))
}

#[tokio::test]
async fn test_get_without_token_or_body() {
    let (base_url, server) = serve_once("200 OK", "[]").await;
    let transport = HttpTransport::new(&base_url).unwrap();

    let response = transport.send(ApiRequest::get("/recipes")).await.unwrap();

    let raw = server.await.unwrap();
    assert_eq!(request_line(&raw), "GET /recipes HTTP/1.1");
    assert!(!header_present(&raw, "authorization"));
    assert!(!header_present(&raw, "content-type"));
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "[]");
}

#[tokio::test]
async fn test_empty_search_term_still_sends_name() {
    let (base_url, server) = serve_once("200 OK", "[]").await;
    let transport = HttpTransport::new(&base_url).unwrap();

    transport
        .send(ApiRequest::get("/recipes").with_query("name", ""))
        .await
        .unwrap();

    let raw = server.await.unwrap();
    assert_eq!(request_line(&raw), "GET /recipes?name= HTTP/1.1");
}

#[tokio::test]
async fn test_search_term_is_form_encoded() {
    let (base_url, server) = serve_once("200 OK", "[]").await;
    let transport = HttpTransport::new(&base_url).unwrap();

    transport
        .send(ApiRequest::get("/recipes").with_query("name", "a b&c"))
        .await
        .unwrap();

    let raw = server.await.unwrap();
    assert_eq!(request_line(&raw), "GET /recipes?name=a+b%26c HTTP/1.1");
}

#[tokio::test]
async fn test_post_carries_bearer_and_json() {
    let (base_url, server) = serve_once("201 Created", "").await;
    let transport = HttpTransport::new(&format!("{}/", base_url)).unwrap();

    let request = ApiRequest::post("/recipes")
        .with_bearer(Some("tok".to_string()))
        .with_json(&json!({"name": "Pie", "instructions": "Bake"}))
        .unwrap();
    let response = transport.send(request).await.unwrap();

    let raw = server.await.unwrap();
    assert_eq!(request_line(&raw), "POST /recipes HTTP/1.1");
    assert!(has_header(&raw, "authorization", "Bearer tok"));
    assert!(has_header(&raw, "content-type", "application/json"));

    let body = raw.split_once("\r\n\r\n").unwrap().1;
    let sent: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(sent, json!({"name": "Pie", "instructions": "Bake"}));
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_delete_path_and_error_status_pass_through() {
    let (base_url, server) = serve_once("404 Not Found", "").await;
    let transport = HttpTransport::new(&base_url).unwrap();

    let request = ApiRequest::delete("/recipes/pie%201").with_bearer(Some("tok".to_string()));
    let response = transport.send(request).await.unwrap();

    let raw = server.await.unwrap();
    assert_eq!(request_line(&raw), "DELETE /recipes/pie%201 HTTP/1.1");
    assert!(has_header(&raw, "authorization", "Bearer tok"));
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let transport = HttpTransport::new(&base_url).unwrap();
    assert!(transport.send(ApiRequest::get("/recipes")).await.is_err());
}
