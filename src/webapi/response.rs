//! Canonical response helpers shared by handlers. These write into a
//! [`Sink`], not the wire; the sink's own `write` never fails, so there is no
//! I/O error left to swallow at this layer — only the eventual flush to the
//! wire can fail, and that is logged where the framework adapter performs it.

use http::StatusCode;

use super::sink::Sink;

pub fn bad_request(sink: &mut Sink, msg: &str) {
    sink.write_header(StatusCode::BAD_REQUEST);
    sink.write(msg.as_bytes());
}

pub fn internal_error(sink: &mut Sink, msg: &str) {
    sink.write_header(StatusCode::INTERNAL_SERVER_ERROR);
    sink.write(msg.as_bytes());
}

pub fn not_found(sink: &mut Sink, msg: &str) {
    sink.write_header(StatusCode::NOT_FOUND);
    sink.write(msg.as_bytes());
}

pub fn status_ok(sink: &mut Sink, msg: &str) {
    sink.write_header(StatusCode::OK);
    sink.write(msg.as_bytes());
}
