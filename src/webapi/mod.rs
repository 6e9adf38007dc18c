//! HTTP-facing glue: owned request/response types, the deferred-response
//! middleware, endpoint handlers, and the router that wires them together.

pub mod async_boundary;
pub mod coordinator;
pub mod durable;
pub mod header_policy;
pub mod response;
pub mod retrieval;
pub mod router;
pub mod sink;

use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use http::{HeaderMap, Method};

use sink::Sink;

/// A fully owned, `'static` request: method, path, headers, and the whole
/// body drained into `Bytes`. Handlers never see the framework's borrowed,
/// single-threaded request type directly, which is what makes it possible
/// to hand a request to a detached background task.
#[derive(Debug, Clone)]
pub struct OwnedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub type HandlerFuture = Pin<Box<dyn Future<Output = Sink> + Send>>;

/// A handler owns the sink for the duration of its work and hands it back
/// when done; this lets the async boundary middleware spawn the call as an
/// independent task without borrowing anything short-lived.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: OwnedRequest, sink: Sink) -> HandlerFuture;
}

/// Adapts a plain async closure into a [`Handler`], mirroring the
/// `fn_service` pattern used throughout the framework for trivial services.
pub struct HandlerFn<F>(F);

pub fn handler_fn<F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(OwnedRequest, Sink) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Sink> + Send + 'static,
{
    HandlerFn(f)
}

impl<F, Fut> Handler for HandlerFn<F>
where
    F: Fn(OwnedRequest, Sink) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Sink> + Send + 'static,
{
    fn call(&self, req: OwnedRequest, sink: Sink) -> HandlerFuture {
        Box::pin((self.0)(req, sink))
    }
}
