// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client facade and dispatcher
//!
//! [`RequestClient`] owns one request configuration, exposes the chained
//! `add_*`/`set_*` builder surface, and performs the terminal
//! `get`/`post`/`send_file` calls through the transport seam.

mod pool;
#[cfg(test)]
mod server_tests;
mod transport;

pub use pool::{ClientPool, PoolStats, PooledClient};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use url::Url;

use crate::body::{encoder, multipart};
use crate::error::{Error, Result};
use crate::headers;
use crate::request::{ConfigState, Mapping, RequestConfig, ReusePolicy};
use crate::response::Response;

/// Fluent HTTP client: accumulate configuration through chained calls,
/// then dispatch once with a terminal call.
///
/// ```rust,no_run
/// use nopea::RequestClient;
///
/// #[tokio::main]
/// async fn main() -> nopea::Result<()> {
///     let mut client = RequestClient::new();
///     let response = client
///         .add_param("q", "nopea")
///         .add_header("x-requested-with", "nopea")
///         .add_cookie("session", "abc")
///         .get("https://httpbin.org/get")
///         .await?;
///
///     println!("{}: {}", response.status_code(), response.text());
///     Ok(())
/// }
/// ```
///
/// Builder calls are not safe for concurrent use on the same instance;
/// prefer one client per logical caller or a [`ClientPool`].
pub struct RequestClient {
    config: RequestConfig,
    transport: Arc<dyn Transport>,
}

impl Default for RequestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestClient {
    /// Create a client backed by the production reqwest transport
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport))
    }

    /// Create a client over a custom transport collaborator
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            config: RequestConfig::new(),
            transport,
        }
    }

    /// Add a query parameter
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.config.add_param(key, value);
        self
    }

    /// Merge a mapping of query parameters
    pub fn add_params(&mut self, params: Mapping) -> &mut Self {
        self.config.add_params(params);
        self
    }

    /// Add a header
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.config.add_header(name, value);
        self
    }

    /// Merge a mapping of headers
    pub fn add_headers(&mut self, headers: Mapping) -> &mut Self {
        self.config.add_headers(headers);
        self
    }

    /// Add a request cookie
    pub fn add_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.config.add_cookie(name, value);
        self
    }

    /// Merge a mapping of request cookies
    pub fn add_cookies(&mut self, cookies: Mapping) -> &mut Self {
        self.config.add_cookies(cookies);
        self
    }

    /// Attach a file for upload: logical part name to local path
    pub fn add_file(&mut self, name: impl Into<String>, path: impl Into<String>) -> &mut Self {
        self.config.add_file(name, path);
        self
    }

    /// Merge a mapping of file attachments
    pub fn add_files(&mut self, files: Mapping) -> &mut Self {
        self.config.add_files(files);
        self
    }

    /// Set a pre-built raw body
    pub fn set_body(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.config.set_body(body);
        self
    }

    /// Set the body from a structured value
    pub fn set_body_from_value<T: Serialize>(&mut self, value: &T) -> Result<&mut Self> {
        self.config.set_body_from_value(value)?;
        Ok(self)
    }

    /// Route requests through a proxy
    pub fn set_proxy(&mut self, proxy: impl Into<String>) -> &mut Self {
        self.config.set_proxy(proxy);
        self
    }

    /// Set the transport-enforced timeout
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.config.set_timeout(timeout);
        self
    }

    /// Load a PEM client certificate and key pair, failing eagerly on
    /// malformed input
    pub fn set_client_certificate(
        &mut self,
        cert_path: impl AsRef<Path>,
        key_path: impl AsRef<Path>,
    ) -> Result<&mut Self> {
        self.config.set_client_certificate(cert_path, key_path)?;
        Ok(self)
    }

    /// Disable TLS verification of the peer (dangerous!)
    pub fn danger_accept_invalid_certs(&mut self, accept: bool) -> &mut Self {
        self.config.danger_accept_invalid_certs(accept);
        self
    }

    /// Select what happens to accumulated state after a terminal call
    pub fn reuse_policy(&mut self, policy: ReusePolicy) -> &mut Self {
        self.config.reuse_policy(policy);
        self
    }

    /// Access the accumulated configuration
    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Current configuration lifecycle state
    pub fn state(&self) -> ConfigState {
        self.config.state()
    }

    /// Clear all accumulated request state
    pub fn reset(&mut self) -> &mut Self {
        self.config.reset();
        self
    }

    /// Terminal call: GET. Accumulated params are appended to the URL as
    /// a query string (pair order unspecified); GET carries no body.
    pub async fn get(&mut self, url: &str) -> Result<Response> {
        let url = self.build_url(url, true)?;
        self.dispatch(Method::GET, url, None).await
    }

    /// Terminal call: POST with whatever body was accumulated, encoded
    /// according to the declared content-type.
    pub async fn post(&mut self, url: &str) -> Result<Response> {
        let url = self.build_url(url, false)?;
        let body = encoder::encode_body(&self.config.headers, self.config.body.as_ref())?;
        self.dispatch(Method::POST, url, body).await
    }

    /// Terminal call: POST a structured value in one step
    pub async fn post_value<T: Serialize>(&mut self, url: &str, body: &T) -> Result<Response> {
        self.set_body_from_value(body)?;
        self.post(url).await
    }

    /// Terminal call: upload the attached files as multipart/form-data.
    /// The computed boundary content-type overwrites any caller-set one.
    pub async fn send_file(&mut self, url: &str) -> Result<Response> {
        let url = self.build_url(url, false)?;
        let form = multipart::assemble(&self.config.files).await?;
        // The boundary content-type wins regardless of how the caller
        // spelled the header name
        self.config
            .headers
            .remove_ignore_ascii_case(headers::CONTENT_TYPE);
        self.config
            .add_header(headers::CONTENT_TYPE, form.content_type.clone());
        self.dispatch(Method::POST, url, Some(form.bytes)).await
    }

    /// Validate the URL and, for GET, fold the params mapping into it.
    /// An empty URL is rejected before any transport interaction.
    fn build_url(&self, url: &str, with_query: bool) -> Result<Url> {
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        let mut url = Url::parse(url)?;
        if with_query && !self.config.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.config.params.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Freeze the configuration, perform the exchange, apply the reuse
    /// policy, and normalize the raw result.
    async fn dispatch(&mut self, method: Method, url: Url, body: Option<Bytes>) -> Result<Response> {
        let request = TransportRequest {
            method,
            url: url.into(),
            headers: self.config.headers.clone(),
            cookies: self.config.cookies.clone(),
            body,
            timeout: self.config.timeout,
            proxy: self.config.proxy.clone(),
            identity: self.config.identity.clone(),
            accept_invalid_certs: self.config.accept_invalid_certs,
        };

        let result = self.transport.execute(request).await;
        // Reuse policy applies on success and transport failure alike
        self.config.finish_dispatch();
        let raw = result?;

        Ok(Response::new(raw.status, raw.body, raw.cookies))
    }
}
