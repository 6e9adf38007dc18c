//! Example slow handler. Exists to give the async boundary middleware
//! something worth deferring.

use std::time::Duration;

use super::response;
use super::sink::Sink;
use super::OwnedRequest;

const SLEEP: Duration = Duration::from_secs(200);

pub async fn durable(_req: OwnedRequest, mut sink: Sink) -> Sink {
    tokio::time::sleep(SLEEP).await;
    response::status_ok(&mut sink, "a long time ago");
    sink
}
