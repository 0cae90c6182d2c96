// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request configuration and its fluent builder surface

use std::path::Path;
use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use super::mapping::Mapping;
use crate::error::{Error, Result};

/// Default timeout applied to newly created configurations
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body as accumulated by the builder.
///
/// Structured values stay structured until the content-type is known, so
/// the default form encoding reads the value directly instead of
/// round-tripping through JSON bytes.
#[derive(Debug, Clone)]
pub enum Body {
    /// Pre-built bytes supplied by the caller
    Raw(Bytes),
    /// A structured value to be encoded according to the content-type
    Structured(serde_json::Value),
}

/// Lifecycle state of a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigState {
    /// Builder calls accepted, no I/O performed
    #[default]
    Building,
    /// A terminal call has consumed this configuration
    Dispatched,
}

/// What happens to the configuration after a terminal call.
///
/// Reuse after dispatch is a caller-selectable policy, not an accident:
/// `Reset` clears all accumulated state once the call finishes, `Keep`
/// retains it verbatim for the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReusePolicy {
    /// Clear accumulated state after every terminal call (default)
    #[default]
    Reset,
    /// Retain accumulated state across terminal calls
    Keep,
}

/// Accumulated request intent: four mappings, an optional body, and the
/// connection-level settings one exchange needs.
///
/// Exclusively owned by one client; never shared across concurrent
/// client instances.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub(crate) params: Mapping,
    pub(crate) headers: Mapping,
    pub(crate) cookies: Mapping,
    pub(crate) files: Mapping,
    pub(crate) body: Option<Body>,
    pub(crate) proxy: Option<String>,
    pub(crate) timeout: Duration,
    pub(crate) identity: Option<reqwest::Identity>,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) state: ConfigState,
    pub(crate) reuse_policy: ReusePolicy,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestConfig {
    /// Create an empty configuration in the `Building` state
    pub fn new() -> Self {
        Self {
            params: Mapping::new(),
            headers: Mapping::new(),
            cookies: Mapping::new(),
            files: Mapping::new(),
            body: None,
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            identity: None,
            accept_invalid_certs: false,
            state: ConfigState::Building,
            reuse_policy: ReusePolicy::Reset,
        }
    }

    /// Add a query parameter (last-write-wins per key)
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.set(key, value);
        self
    }

    /// Merge a mapping of query parameters
    pub fn add_params(&mut self, params: Mapping) -> &mut Self {
        self.params.merge(params);
        self
    }

    /// Add a header (last-write-wins per key)
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.set(name, value);
        self
    }

    /// Merge a mapping of headers
    pub fn add_headers(&mut self, headers: Mapping) -> &mut Self {
        self.headers.merge(headers);
        self
    }

    /// Add a request cookie (last-write-wins per name)
    pub fn add_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.cookies.set(name, value);
        self
    }

    /// Merge a mapping of request cookies
    pub fn add_cookies(&mut self, cookies: Mapping) -> &mut Self {
        self.cookies.merge(cookies);
        self
    }

    /// Attach a file for upload: logical part name to local path
    pub fn add_file(&mut self, name: impl Into<String>, path: impl Into<String>) -> &mut Self {
        self.files.set(name, path);
        self
    }

    /// Merge a mapping of file attachments
    pub fn add_files(&mut self, files: Mapping) -> &mut Self {
        self.files.merge(files);
        self
    }

    /// Set a pre-built raw body
    pub fn set_body(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = Some(Body::Raw(body.into()));
        self
    }

    /// Set the body from a structured value.
    ///
    /// The value is converted eagerly so an unencodable body fails here,
    /// not at dispatch time.
    pub fn set_body_from_value<T: Serialize>(&mut self, value: &T) -> Result<&mut Self> {
        let value = serde_json::to_value(value)?;
        self.body = Some(Body::Structured(value));
        Ok(self)
    }

    /// Route the exchange through a proxy, e.g. `http://127.0.0.1:8080`
    pub fn set_proxy(&mut self, proxy: impl Into<String>) -> &mut Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the transport-enforced timeout for the exchange
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Load a PEM client certificate and key pair.
    ///
    /// Both inputs are parsed eagerly; a malformed pair fails this call
    /// rather than being deferred to dispatch time. Presenting a client
    /// certificate does not affect peer verification, see
    /// [`danger_accept_invalid_certs`](Self::danger_accept_invalid_certs).
    pub fn set_client_certificate(
        &mut self,
        cert_path: impl AsRef<Path>,
        key_path: impl AsRef<Path>,
    ) -> Result<&mut Self> {
        let cert_path = cert_path.as_ref();
        let key_path = key_path.as_ref();
        let mut pem = std::fs::read(cert_path)
            .map_err(|e| Error::certificate(format!("{}: {}", cert_path.display(), e)))?;
        let key = std::fs::read(key_path)
            .map_err(|e| Error::certificate(format!("{}: {}", key_path.display(), e)))?;
        pem.extend_from_slice(&key);

        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|e| Error::certificate(e.to_string()))?;
        self.identity = Some(identity);
        Ok(self)
    }

    /// Disable TLS verification of the peer (dangerous!).
    ///
    /// Deliberately a separate opt-in from `set_client_certificate`:
    /// presenting a client cert and trusting the server are independent
    /// concerns.
    pub fn danger_accept_invalid_certs(&mut self, accept: bool) -> &mut Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Select what happens to accumulated state after a terminal call
    pub fn reuse_policy(&mut self, policy: ReusePolicy) -> &mut Self {
        self.reuse_policy = policy;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> ConfigState {
        self.state
    }

    /// Accumulated query parameters
    pub fn params(&self) -> &Mapping {
        &self.params
    }

    /// Accumulated headers
    pub fn headers(&self) -> &Mapping {
        &self.headers
    }

    /// Accumulated request cookies
    pub fn cookies(&self) -> &Mapping {
        &self.cookies
    }

    /// Accumulated file attachments
    pub fn files(&self) -> &Mapping {
        &self.files
    }

    /// Clear all accumulated request state and return to `Building`.
    ///
    /// Connection-level settings (proxy, timeout, certificate, the
    /// invalid-cert flag, reuse policy) survive a reset.
    pub fn reset(&mut self) {
        self.params.clear();
        self.headers.clear();
        self.cookies.clear();
        self.files.clear();
        self.body = None;
        self.state = ConfigState::Building;
    }

    /// Transition out of `Building` after a terminal call and apply the
    /// reuse policy. Runs on success and on transport failure alike.
    pub(crate) fn finish_dispatch(&mut self) {
        self.state = ConfigState::Dispatched;
        if self.reuse_policy == ReusePolicy::Reset {
            self.reset();
        }
    }
}
