// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content-type-driven body encoding
//!
//! Callers may supply either a structured value or pre-built bytes; the
//! wire representation is decided here, from the headers accumulated at
//! dispatch time. The default experience is "pass a value, get
//! form-encoded on the wire"; explicit JSON passthrough is a
//! content-type override away.

use bytes::Bytes;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::media;
use crate::request::{Body, Mapping};

/// Effective content-type of a request: the `content-type` header looked
/// up case-insensitively, defaulting to form-urlencoded when absent.
pub fn content_type(headers: &Mapping) -> &str {
    headers
        .get_ignore_ascii_case("content-type")
        .unwrap_or(media::FORM_URLENCODED)
}

/// Produce the exact bytes to place on the wire for a non-GET call.
///
/// Decision policy, in order:
/// 1. content-type is exactly `application/json`: bytes pass through
///    unmodified (structured values are JSON-marshaled here).
/// 2. content-type does not contain `multipart/form-data`: the body is
///    reinterpreted as a map of string keys to arbitrary values and
///    re-encoded as a form-urlencoded query string. Failure to decode is
///    [`Error::BodyDecode`], fatal to the call.
/// 3. otherwise the bytes pass through unmodified; the multipart
///    assembler has already populated them.
pub fn encode_body(headers: &Mapping, body: Option<&Body>) -> Result<Option<Bytes>> {
    let Some(body) = body else {
        return Ok(None);
    };
    let content_type = content_type(headers);

    if content_type == media::JSON {
        return match body {
            Body::Raw(bytes) => Ok(Some(bytes.clone())),
            Body::Structured(value) => Ok(Some(Bytes::from(serde_json::to_vec(value)?))),
        };
    }

    if !content_type.contains(media::MULTIPART_FORM) {
        return match body {
            Body::Structured(value) => {
                let map = value.as_object().ok_or(Error::BodyDecode)?;
                Ok(Some(form_encode(map.iter().map(|(k, v)| (k.as_str(), v)))))
            }
            Body::Raw(bytes) => {
                // No fallback: raw bytes that cannot be read back as a
                // key-value map are fatal under the form content-type.
                let parsed: Value =
                    serde_json::from_slice(bytes).map_err(|_| Error::BodyDecode)?;
                let map = parsed.as_object().ok_or(Error::BodyDecode)?;
                Ok(Some(form_encode(map.iter().map(|(k, v)| (k.as_str(), v)))))
            }
        };
    }

    match body {
        Body::Raw(bytes) => Ok(Some(bytes.clone())),
        Body::Structured(value) => Ok(Some(Bytes::from(serde_json::to_vec(value)?))),
    }
}

/// Form-encode key-value pairs as `key=value&key=value`, order unspecified
fn form_encode<'a>(pairs: impl Iterator<Item = (&'a str, &'a Value)>) -> Bytes {
    let body = pairs
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(&coerce(v))))
        .collect::<Vec<_>>()
        .join("&");
    Bytes::from(body)
}

/// Coerce an arbitrary JSON value to its string representation: strings
/// unquoted, everything else via its canonical display form
fn coerce(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Percent-encode a string for form/query use
pub fn percent_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                for byte in c.to_string().bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn headers_with(content_type: &str) -> Mapping {
        let mut headers = Mapping::new();
        headers.set("content-type", content_type);
        headers
    }

    fn decode_pairs(body: &[u8]) -> std::collections::HashMap<String, String> {
        std::str::from_utf8(body)
            .unwrap()
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap();
                (k.to_string(), v.to_string())
            })
            .collect()
    }

    #[test]
    fn test_default_content_type_is_form() {
        assert_eq!(content_type(&Mapping::new()), media::FORM_URLENCODED);
        assert_eq!(
            content_type(&headers_with("application/json")),
            media::JSON
        );
    }

    #[test]
    fn test_content_type_lookup_is_case_insensitive() {
        let mut headers = Mapping::new();
        headers.set("Content-Type", "application/json");
        assert_eq!(content_type(&headers), media::JSON);
    }

    #[test]
    fn test_structured_body_form_encodes_by_default() {
        let body = Body::Structured(json!({"request": "test", "num": 1}));
        let encoded = encode_body(&Mapping::new(), Some(&body)).unwrap().unwrap();

        // Pair order is unspecified, assert via decoded set
        let pairs = decode_pairs(&encoded);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["request"], "test");
        assert_eq!(pairs["num"], "1");
    }

    #[test]
    fn test_json_content_type_passes_bytes_through() {
        let raw = Bytes::from(r#"{"request":"test","num":1}"#);
        let body = Body::Raw(raw.clone());
        let encoded = encode_body(&headers_with("application/json"), Some(&body))
            .unwrap()
            .unwrap();
        assert_eq!(encoded, raw);
    }

    #[test]
    fn test_json_content_type_marshals_structured_value() {
        let body = Body::Structured(json!({"ok": true}));
        let encoded = encode_body(&headers_with("application/json"), Some(&body))
            .unwrap()
            .unwrap();
        assert_eq!(&encoded[..], br#"{"ok":true}"#);
    }

    #[test]
    fn test_raw_map_bytes_are_reencoded_as_form() {
        let body = Body::Raw(Bytes::from(r#"{"a":"1","b":2}"#));
        let encoded = encode_body(&Mapping::new(), Some(&body)).unwrap().unwrap();

        let pairs = decode_pairs(&encoded);
        assert_eq!(pairs["a"], "1");
        assert_eq!(pairs["b"], "2");
    }

    #[test]
    fn test_undecodable_raw_body_is_fatal() {
        let body = Body::Raw(Bytes::from_static(b"not json at all"));
        let err = encode_body(&Mapping::new(), Some(&body)).unwrap_err();
        assert!(matches!(err, Error::BodyDecode));

        // A JSON value that is not a map fails the same way
        let body = Body::Raw(Bytes::from_static(b"[1,2,3]"));
        let err = encode_body(&Mapping::new(), Some(&body)).unwrap_err();
        assert!(matches!(err, Error::BodyDecode));
    }

    #[test]
    fn test_non_object_structured_body_is_fatal() {
        // Structured bodies must be objects under the form content-type
        let body = Body::Structured(json!([1, 2, 3]));
        let err = encode_body(&Mapping::new(), Some(&body)).unwrap_err();
        assert!(matches!(err, Error::BodyDecode));

        let body = Body::Structured(json!("just a string"));
        let err = encode_body(&Mapping::new(), Some(&body)).unwrap_err();
        assert!(matches!(err, Error::BodyDecode));
    }

    #[test]
    fn test_multipart_content_type_passes_bytes_through() {
        let raw = Bytes::from_static(b"--boundary--\r\n");
        let body = Body::Raw(raw.clone());
        let encoded = encode_body(
            &headers_with("multipart/form-data; boundary=boundary"),
            Some(&body),
        )
        .unwrap()
        .unwrap();
        assert_eq!(encoded, raw);
    }

    #[test]
    fn test_no_body_encodes_to_none() {
        assert!(encode_body(&Mapping::new(), None).unwrap().is_none());
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("a b"), "a+b");
        assert_eq!(percent_encode("käse"), "k%C3%A4se");
        assert_eq!(percent_encode("safe-1_2.3~"), "safe-1_2.3~");
    }
}
