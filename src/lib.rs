// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Nopea - Fluent HTTP Request Client
//!
//! A small HTTP client that accumulates query parameters, headers,
//! cookies, a body and file attachments through a chained builder
//! surface, then dispatches a single GET/POST/file-upload call and
//! normalizes the result into a uniform [`Response`].
//!
//! ## Features
//!
//! - Fluent configuration: chained `add_*`/`set_*` calls, no I/O until
//!   the terminal call
//! - Content-type driven body encoding: form-urlencoded by default,
//!   JSON passthrough on explicit override
//! - Multipart file uploads assembled from a name-to-path mapping
//! - Explicit Building/Dispatched lifecycle with a selectable reuse
//!   policy
//! - Transport seam: the dispatcher is testable against a simulated
//!   transport
//! - Client pool with exclusive checkout and reset-on-checkout
//! - Free-function convenience form over a lazily-initialized shared
//!   client
//!
//! ## Example
//!
//! ```rust,no_run
//! use nopea::RequestClient;
//!
//! #[tokio::main]
//! async fn main() -> nopea::Result<()> {
//!     let mut client = RequestClient::new();
//!     let response = client
//!         .add_param("q", "nopea")
//!         .get("https://httpbin.org/get")
//!         .await?;
//!     assert!(response.is_success());
//!
//!     let response = client
//!         .post_value("https://httpbin.org/post", &serde_json::json!({
//!             "request": "test",
//!             "num": 1,
//!         }))
//!         .await?;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```

pub mod body;
pub mod client;
pub mod error;
pub mod request;
pub mod response;

// Re-exports for convenience

// Client, transport seam and pool
pub use client::{
    ClientPool, PoolStats, PooledClient, ReqwestTransport, RequestClient, Transport,
    TransportRequest, TransportResponse,
};

// Request configuration
pub use request::{Body, ConfigState, Mapping, RequestConfig, ReusePolicy, DEFAULT_TIMEOUT};

// Multipart assembly output
pub use body::MultipartBody;

// Errors
pub use error::{Error, Result};

// Response entity
pub use response::Response;

/// Media types driving the body-encoding decision
pub mod media {
    /// Default content-type when none is declared
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
    /// JSON passthrough content-type
    pub const JSON: &str = "application/json";
    /// File-upload content-type, completed with a boundary parameter
    pub const MULTIPART_FORM: &str = "multipart/form-data";
}

/// Common HTTP headers
pub mod headers {
    pub const CONTENT_TYPE: &str = "content-type";
    pub const COOKIE: &str = "cookie";
    pub const SET_COOKIE: &str = "set-cookie";
}

use std::time::Duration;

use lazy_static::lazy_static;
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

lazy_static! {
    // Initialized on first use, lives for the process lifetime
    static ref DEFAULT_CLIENT: Mutex<RequestClient> = Mutex::new(RequestClient::new());
}

/// Lock the process-wide default client, e.g. to chain configuration and
/// a terminal call under one guard
pub async fn default_client() -> MutexGuard<'static, RequestClient> {
    DEFAULT_CLIENT.lock().await
}

/// GET through the default client
pub async fn get(url: &str) -> Result<Response> {
    DEFAULT_CLIENT.lock().await.get(url).await
}

/// POST the accumulated body through the default client
pub async fn post(url: &str) -> Result<Response> {
    DEFAULT_CLIENT.lock().await.post(url).await
}

/// POST a structured value through the default client
pub async fn post_value<T: Serialize>(url: &str, body: &T) -> Result<Response> {
    DEFAULT_CLIENT.lock().await.post_value(url, body).await
}

/// Upload the attached files through the default client
pub async fn send_file(url: &str) -> Result<Response> {
    DEFAULT_CLIENT.lock().await.send_file(url).await
}

/// Set the default client's timeout
pub async fn set_timeout(timeout: Duration) {
    DEFAULT_CLIENT.lock().await.set_timeout(timeout);
}

/// Route the default client through a proxy
pub async fn set_proxy(proxy: &str) {
    DEFAULT_CLIENT.lock().await.set_proxy(proxy);
}

/// Load a client certificate into the default client
pub async fn set_client_certificate(
    cert_path: impl AsRef<std::path::Path>,
    key_path: impl AsRef<std::path::Path>,
) -> Result<()> {
    DEFAULT_CLIENT
        .lock()
        .await
        .set_client_certificate(cert_path, key_path)?;
    Ok(())
}
