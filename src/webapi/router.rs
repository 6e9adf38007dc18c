//! Hand-rolled method+path dispatch. The framework's own `Router`/`Route`
//! machinery (see `xitca-http`'s `util::service::router`) is built around
//! macro-generated, type-erased route tables sized for dozens of endpoints;
//! three routes read more plainly as a `match`.

use http::Method;

use super::coordinator::Coordinator;
use super::durable;
use super::response;
use super::retrieval::Retrieval;
use super::sink::Sink;
use super::{Handler, HandlerFuture, OwnedRequest};
use crate::responsecache::CacheClient;

pub struct AppHandler<C> {
    coordinator: Coordinator,
    retrieval: Retrieval<C>,
}

impl<C: CacheClient> AppHandler<C> {
    pub fn new(coordinator: Coordinator, cache: C) -> Self {
        Self { coordinator, retrieval: Retrieval::new(cache) }
    }
}

impl<C: CacheClient> Handler for AppHandler<C> {
    fn call(&self, req: OwnedRequest, sink: Sink) -> HandlerFuture {
        match (&req.method, req.path.as_str()) {
            (&Method::POST, "/send") => self.coordinator.call(req, sink),
            (&Method::GET, "/durable") => Box::pin(durable::durable(req, sink)),
            (&Method::GET, path) if path.starts_with("/bg-responses/") => self.retrieval.call(req, sink),
            _ => Box::pin(async move {
                let mut sink = sink;
                response::not_found(&mut sink, "not found");
                sink
            }),
        }
    }
}
