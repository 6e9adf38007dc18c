//! The async boundary middleware: races a handler against a deadline and
//! emits either the handler's real response or a 202-with-background-id
//! acknowledgement, persisting the late response in the cache.

use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use tokio::sync::oneshot;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use crate::responsecache::{CacheClient, CapturedResponse};

use super::header_policy::{self, Mode};
use super::sink::Sink;
use super::{Handler, OwnedRequest};

const BACKGROUND_ID_HEADER: &str = "x-background-id";
const BACKGROUND_ACK_BODY: &str = "request will be executed in the background";

pub struct AsyncBoundary<H, C> {
    inner: Arc<H>,
    cache: C,
}

impl<H, C> AsyncBoundary<H, C>
where
    H: Handler,
    C: CacheClient,
{
    pub fn new(inner: H, cache: C) -> Self {
        Self { inner: Arc::new(inner), cache }
    }

    pub async fn call(&self, req: OwnedRequest) -> CapturedResponse {
        match header_policy::resolve(&req.headers) {
            Mode::Sync => self.inner.call(req, Sink::new()).await.into_captured(),
            Mode::Async { ttl } => self.run_async(req, ttl).await,
        }
    }

    async fn run_async(&self, req: OwnedRequest, ttl: std::time::Duration) -> CapturedResponse {
        let bg_id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel::<CapturedResponse>();

        let inner = Arc::clone(&self.inner);
        let cache = self.cache.clone();
        let bg_id_str = bg_id.to_string();
        let span = info_span!("background_handler", bg_id = %bg_id_str);

        tokio::spawn(
            async move {
                let worker = tokio::spawn(inner.call(req, Sink::new()).instrument(span.clone()));
                let captured = match worker.await {
                    Ok(sink) => sink.into_captured(),
                    Err(join_err) => {
                        error!(error = %join_err, "handler panicked");
                        CapturedResponse::new(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            HeaderMap::new(),
                            Bytes::from_static(b"internal error"),
                        )
                    }
                };

                if let Err(captured) = tx.send(captured) {
                    // The timeout branch already won; nobody is listening.
                    if let Err(err) = cache.set(&bg_id_str, &captured).await {
                        error!(error = %err, "failed to persist background response");
                    }
                }
            }
            .instrument(span),
        );

        tokio::select! {
            result = rx => result.unwrap_or_else(|_| accepted_response(bg_id)),
            () = tokio::time::sleep(ttl) => accepted_response(bg_id),
        }
    }
}

fn accepted_response(bg_id: Uuid) -> CapturedResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        BACKGROUND_ID_HEADER,
        HeaderValue::from_str(&bg_id.to_string()).expect("uuid is valid header value"),
    );
    CapturedResponse::new(StatusCode::ACCEPTED, headers, Bytes::from_static(BACKGROUND_ACK_BODY.as_bytes()))
}
