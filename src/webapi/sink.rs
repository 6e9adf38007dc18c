//! The captured-response sink: a plain value standing in for the real
//! response writer while a handler's outcome is still in the race. It never
//! delegates to a real writer — by the time the timeout branch has won, the
//! real writer may already be committed with a 202.

use bytes::{BufMut, Bytes, BytesMut};
use http::{HeaderMap, StatusCode};

use crate::responsecache::CapturedResponse;

#[derive(Debug, Default)]
pub struct Sink {
    headers: HeaderMap,
    status: Option<StatusCode>,
    body: BytesMut,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn write_header(&mut self, code: StatusCode) {
        self.status = Some(code);
    }

    /// Appends to the internal buffer, returning the number of bytes
    /// accepted. Never short-writes.
    pub fn write(&mut self, bytes: &[u8]) -> usize {
        self.body.put_slice(bytes);
        bytes.len()
    }

    /// Consumes the sink, defaulting the status to 200 if `write_header`
    /// was never called.
    pub fn into_captured(self) -> CapturedResponse {
        CapturedResponse::new(
            self.status.unwrap_or(StatusCode::OK),
            self.headers,
            Bytes::from(self.body),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_200() {
        let mut sink = Sink::new();
        sink.write(b"hi");
        let resp = sink.into_captured();
        assert_eq!(resp.code, StatusCode::OK);
        assert_eq!(resp.body, Bytes::from_static(b"hi"));
    }

    #[test]
    fn explicit_status_is_preserved() {
        let mut sink = Sink::new();
        sink.write_header(StatusCode::CREATED);
        sink.write(b"ok");
        assert_eq!(sink.into_captured().code, StatusCode::CREATED);
    }

    #[test]
    fn write_reports_exact_length_accepted() {
        let mut sink = Sink::new();
        assert_eq!(sink.write(b"abcde"), 5);
    }
}
