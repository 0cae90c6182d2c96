// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end tests over the production reqwest transport, against a
//! local wiremock server

use std::io::Write;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::RequestClient;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[tokio::test]
async fn test_get_roundtrip() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("param1", "value1"))
        .and(header("x-test", "yes"))
        .and(header("cookie", "session=abc"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"ok":true}"#, "application/json")
                .insert_header("set-cookie", "session=def; Path=/; HttpOnly"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = RequestClient::new();
    let response = client
        .add_param("param1", "value1")
        .add_header("x-test", "yes")
        .add_cookie("session", "abc")
        .get(&format!("{}/get", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 200);
    assert_eq!(&response.body[..], br#"{"ok":true}"#);
    assert_eq!(response.cookie("session"), Some("def"));
}

#[tokio::test]
async fn test_post_form_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .and(body_string_contains("request=test"))
        .and(body_string_contains("num=1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = RequestClient::new();
    let response = client
        .post_value(
            &format!("{}/post", server.uri()),
            &json!({"request": "test", "num": 1}),
        )
        .await
        .unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_send_file_roundtrip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"upload me").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(body_string_contains("name=\"a\""))
        .and(body_string_contains("upload me"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = RequestClient::new();
    let response = client
        .add_file("a", file.path().to_str().unwrap())
        .send_file(&format!("{}/upload", server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status_code(), 201);
}

#[tokio::test]
async fn test_default_client_free_functions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let response = crate::get(&format!("{}/shared", server.uri()))
        .await
        .unwrap();
    assert!(response.is_success());

    // Chained configuration through the guard form
    let response = {
        let mut client = crate::default_client().await;
        client.add_header("x-test", "yes");
        client.get(&format!("{}/shared", server.uri())).await
    }
    .unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_unreachable_host_surfaces_transport_error() {
    let mut client = RequestClient::new();
    let err = client.get("http://name.invalid/").await.unwrap_err();
    assert!(err.is_transport());
}
