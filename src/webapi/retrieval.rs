//! `GET /bg-responses/{bg_id}`: load, then delete-on-read, serving the
//! cached headers/status/body verbatim.

use tracing::{error, trace, warn};

use crate::error::CacheError;
use crate::responsecache::CacheClient;

use super::response;
use super::sink::Sink;
use super::{Handler, HandlerFuture, OwnedRequest};

pub struct Retrieval<C> {
    cache: C,
}

impl<C: CacheClient> Retrieval<C> {
    pub fn new(cache: C) -> Self {
        Self { cache }
    }
}

impl<C: CacheClient> Handler for Retrieval<C> {
    fn call(&self, req: OwnedRequest, mut sink: Sink) -> HandlerFuture {
        let cache = self.cache.clone();
        Box::pin(async move {
            let bg_id = req.path.rsplit('/').next().unwrap_or_default().to_owned();

            match cache.get(&bg_id).await {
                Ok(captured) => {
                    match cache.delete(&bg_id).await {
                        Ok(()) => trace!(bg_id, "response purged"),
                        Err(err) => warn!(bg_id, error = %err, "drop cache key failed"),
                    }
                    for (name, value) in captured.headers.iter() {
                        sink.headers_mut().append(name.clone(), value.clone());
                    }
                    sink.write_header(captured.code);
                    sink.write(&captured.body);
                }
                Err(CacheError::NotFound) => {
                    warn!(bg_id, "background id not found");
                    response::not_found(&mut sink, "background id not found");
                }
                Err(err) => {
                    error!(bg_id, error = %err, "get response failed");
                    response::internal_error(&mut sink, "get response failed");
                }
            }

            sink
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::{HeaderMap, Method, StatusCode};

    use super::*;
    use crate::responsecache::fake::InMemoryCache;
    use crate::responsecache::CapturedResponse;

    fn req(path: &str) -> OwnedRequest {
        OwnedRequest { method: Method::GET, path: path.to_owned(), headers: HeaderMap::new(), body: Bytes::new() }
    }

    #[tokio::test]
    async fn hit_then_miss() {
        let cache = InMemoryCache::new();
        cache.seed("uniq_id", CapturedResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from_static(b"from cache")));
        let retrieval = Retrieval::new(cache);

        let first = retrieval.call(req("/bg-responses/uniq_id"), Sink::new()).await.into_captured();
        assert_eq!(first.code, StatusCode::OK);
        assert_eq!(first.body, Bytes::from_static(b"from cache"));

        let second = retrieval.call(req("/bg-responses/uniq_id"), Sink::new()).await.into_captured();
        assert_eq!(second.code, StatusCode::NOT_FOUND);
        assert_eq!(second.body, Bytes::from_static(b"background id not found"));
    }

    #[tokio::test]
    async fn cold_miss() {
        let retrieval = Retrieval::new(InMemoryCache::new());
        let resp = retrieval.call(req("/bg-responses/anything"), Sink::new()).await.into_captured();
        assert_eq!(resp.code, StatusCode::NOT_FOUND);
        assert_eq!(resp.body, Bytes::from_static(b"background id not found"));
    }
}
