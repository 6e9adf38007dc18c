//! Captured HTTP responses persisted to the cache under a background id.
//!
//! A status code, the full header multimap and the raw body, round-tripped
//! through JSON losslessly (including repeated header values and an empty
//! body).

pub mod client;
#[cfg(test)]
pub mod fake;

use std::collections::BTreeMap;
use std::future::Future;

use base64::Engine;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

pub use client::Cache;

use crate::error::CacheError;

/// `set` / `get` / `delete` against a store of captured responses keyed by
/// background id. Generic so the async boundary middleware and the
/// retrieval endpoint can run against a fake in tests instead of live Redis.
pub trait CacheClient: Clone + Send + Sync + 'static {
    fn set(&self, key: &str, response: &CapturedResponse) -> impl Future<Output = Result<(), CacheError>> + Send;
    fn get(&self, key: &str) -> impl Future<Output = Result<CapturedResponse, CacheError>> + Send;
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), CacheError>> + Send;
}

/// A response that was produced by a deferred handler and stashed in the
/// cache for later retrieval via `GET /bg-responses/{bg_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedResponse {
    pub code: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedResponse {
    pub fn new(code: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self { code, headers, body }
    }
}

/// Wire shape: `headers` as `name -> [values]`, `body` as base64 text.
/// Matches Go's default `json.Marshal` encoding of `http.Header` and
/// `[]byte`.
#[derive(Debug, Serialize, Deserialize)]
struct Wire {
    code: u16,
    headers: BTreeMap<String, Vec<String>>,
    body: String,
}

impl From<&CapturedResponse> for Wire {
    fn from(resp: &CapturedResponse) -> Self {
        let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for name in resp.headers.keys() {
            let values: Vec<String> = resp
                .headers
                .get_all(name)
                .iter()
                .map(|v| v.to_str().unwrap_or_default().to_owned())
                .collect();
            headers.insert(name.as_str().to_owned(), values);
        }
        Wire {
            code: resp.code.as_u16(),
            headers,
            body: base64::engine::general_purpose::STANDARD.encode(&resp.body),
        }
    }
}

impl TryFrom<Wire> for CapturedResponse {
    type Error = serde_json::Error;

    fn try_from(wire: Wire) -> Result<Self, Self::Error> {
        use serde::de::Error as _;

        let code = StatusCode::from_u16(wire.code).map_err(serde_json::Error::custom)?;

        let mut headers = HeaderMap::new();
        for (name, values) in wire.headers {
            let name = HeaderName::try_from(name.as_str()).map_err(serde_json::Error::custom)?;
            for value in values {
                let value = HeaderValue::try_from(value.as_str()).map_err(serde_json::Error::custom)?;
                headers.append(name.clone(), value);
            }
        }

        let body = base64::engine::general_purpose::STANDARD
            .decode(wire.body)
            .map_err(serde_json::Error::custom)?;

        Ok(CapturedResponse { code, headers, body: Bytes::from(body) })
    }
}

impl Serialize for CapturedResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Wire::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CapturedResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let wire = Wire::deserialize(deserializer)?;
        CapturedResponse::try_from(wire).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_headers_and_body() {
        let mut headers = HeaderMap::new();
        headers.append("x-custom", HeaderValue::from_static("a"));
        headers.append("x-custom", HeaderValue::from_static("b"));
        let resp = CapturedResponse::new(StatusCode::OK, headers, Bytes::from_static(b"hello"));

        let json = serde_json::to_string(&resp).unwrap();
        let back: CapturedResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(resp, back);
        assert_eq!(back.headers.get_all("x-custom").iter().count(), 2);
    }

    #[test]
    fn round_trips_empty_body_and_headers() {
        let resp = CapturedResponse::new(StatusCode::NO_CONTENT, HeaderMap::new(), Bytes::new());
        let json = serde_json::to_string(&resp).unwrap();
        let back: CapturedResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp, back);
    }

    #[test]
    fn body_is_base64_encoded_on_the_wire() {
        let resp = CapturedResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(b"hi"));
        let value: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["body"], serde_json::Value::String("aGk=".to_owned()));
    }
}
