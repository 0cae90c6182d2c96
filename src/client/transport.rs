// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam between the dispatcher and the HTTP machinery
//!
//! The dispatcher only ever talks to the [`Transport`] trait, so tests
//! can exercise the full dispatch path against a simulated transport.
//! [`ReqwestTransport`] is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::error::{Error, Result};
use crate::headers;
use crate::request::Mapping;

/// Everything one exchange needs, frozen at dispatch time
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Final URL, query string included
    pub url: String,
    pub headers: Mapping,
    pub cookies: Mapping,
    pub body: Option<Bytes>,
    /// Transport-enforced timeout for the whole exchange
    pub timeout: Duration,
    pub proxy: Option<String>,
    pub identity: Option<reqwest::Identity>,
    pub accept_invalid_certs: bool,
}

/// Raw result of one exchange
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Bytes,
    /// Cookies parsed from the response's `set-cookie` headers
    pub cookies: Mapping,
}

/// Transport collaborator contract consumed by the dispatcher.
///
/// Failures are returned unmodified; no retry, no classification.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Production transport backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport;

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        let mut builder = reqwest::Client::builder()
            .timeout(request.timeout)
            .danger_accept_invalid_certs(request.accept_invalid_certs);

        if let Some(ref proxy) = request.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy)
                    .map_err(|e| Error::config(format!("invalid proxy URL: {}", e)))?,
            );
        }
        if let Some(ref identity) = request.identity {
            builder = builder.identity(identity.clone());
        }
        let client = builder.build()?;

        let mut req = client.request(request.method.clone(), &request.url);
        for (name, value) in request.headers.iter() {
            req = req.header(name, value);
        }
        if let Some(cookie_header) = cookie_header(&request.cookies) {
            req = req.header(headers::COOKIE, cookie_header);
        }
        if let Some(body) = request.body {
            req = req.body(body);
        }

        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = req.send().await?;

        let status = response.status();
        let mut cookies = Mapping::new();
        for value in response.headers().get_all(headers::SET_COOKIE) {
            if let Ok(raw) = value.to_str() {
                if let Some((name, value)) = parse_set_cookie(raw) {
                    cookies.set(name, value);
                }
            }
        }
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(TransportResponse {
            status,
            body,
            cookies,
        })
    }
}

/// Build the `cookie` header value from the cookies mapping
pub(crate) fn cookie_header(cookies: &Mapping) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Extract the name=value pair from a `set-cookie` header value,
/// dropping attributes after the first `;`
pub(crate) fn parse_set_cookie(raw: &str) -> Option<(&str, &str)> {
    let pair = raw.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    Some((name.trim(), value.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_cookie() {
        assert_eq!(
            parse_set_cookie("session=abc; Path=/; HttpOnly"),
            Some(("session", "abc"))
        );
        assert_eq!(parse_set_cookie("session=abc"), Some(("session", "abc")));
        assert_eq!(parse_set_cookie("garbage"), None);
    }

    #[test]
    fn test_cookie_header_joins_pairs() {
        let mut cookies = Mapping::new();
        assert_eq!(cookie_header(&cookies), None);

        cookies.set("a", "1");
        assert_eq!(cookie_header(&cookies).as_deref(), Some("a=1"));

        cookies.set("b", "2");
        let header = cookie_header(&cookies).unwrap();
        assert!(header.contains("a=1"));
        assert!(header.contains("b=2"));
        assert!(header.contains("; "));
    }
}
