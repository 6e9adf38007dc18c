mod clients;
mod config;
mod error;
mod responsecache;
mod webapi;

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use futures_core::Stream;
use tonic::transport::Channel;
use tracing::{info, info_span, warn, Instrument};
use xitca_http::body::ResponseBody;
use xitca_http::http::{Request, RequestExt, Response};
use xitca_http::{h1, HttpServiceBuilder};
use xitca_service::{fn_service, ServiceExt};

use clients::order::OrderService;
use clients::user::UserService;
use responsecache::Cache;
use webapi::async_boundary::AsyncBoundary;
use webapi::router::AppHandler;
use webapi::{Handler, OwnedRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let settings = config::load()?;
    info!(bind = %settings.app_api.bind, "starting rest-server");

    let cache = Cache::connect(&settings.app_api.cache_addr).await?;

    let user_channel = Channel::from_shared(settings.user_api.address.clone())?.connect_lazy();
    let order_channel = Channel::from_shared(settings.order_api.address.clone())?.connect_lazy();

    let coordinator = webapi::coordinator::Coordinator::new(
        UserService::new(user_channel),
        OrderService::new(order_channel),
    );

    let app = Arc::new(AsyncBoundary::new(AppHandler::new(coordinator, cache.clone()), cache));

    let svc = fn_service(move |req: Request<RequestExt<h1::RequestBody>>| {
        let app = Arc::clone(&app);
        async move { Ok::<_, Infallible>(serve(&app, req).await) }
    });

    xitca_server::Builder::new()
        .shutdown_timeout(settings.server.shutdown_timeout.as_secs())
        .bind("rest-server", settings.app_api.bind.clone(), svc.enclosed(HttpServiceBuilder::h1()))?
        .build()
        .await
        .map_err(Into::into)
}

async fn serve<H>(
    app: &AsyncBoundary<H, Cache>,
    req: Request<RequestExt<h1::RequestBody>>,
) -> Response<ResponseBody>
where
    H: Handler,
{
    let (parts, body) = req.into_parts();
    let span = info_span!("request", method = %parts.method, path = parts.uri.path());

    async move {
        let body = drain_body(body).await;
        let owned = OwnedRequest {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body,
        };
        let captured = app.call(owned).await;
        to_http_response(captured)
    }
    .instrument(span)
    .await
}

/// Collects the whole request body into owned bytes before any handler logic
/// runs, so nothing downstream holds the framework's single-threaded,
/// `Rc`-backed body stream across a task boundary.
async fn drain_body(mut body: RequestExt<h1::RequestBody>) -> Bytes {
    let mut buf = BytesMut::new();
    loop {
        match std::future::poll_fn(|cx| Pin::new(&mut body).poll_next(cx)).await {
            Some(Ok(chunk)) => buf.extend_from_slice(&chunk),
            Some(Err(err)) => {
                warn!(error = %err, "error reading request body, truncating");
                break;
            }
            None => break,
        }
    }
    buf.freeze()
}

fn to_http_response(captured: responsecache::CapturedResponse) -> Response<ResponseBody> {
    let mut builder = Response::builder().status(captured.code);
    for (name, value) in captured.headers.iter() {
        builder = builder.header(name, value);
    }
    builder
        .body(ResponseBody::bytes(captured.body))
        .expect("captured response headers are always valid for the wire")
}
