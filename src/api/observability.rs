//! Per-request span and completion log.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub async fn request_logging(req: Request, next: Next) -> Response {
    let started = Instant::now();

    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned());

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        path = %req.uri().path(),
        route = route.as_deref().unwrap_or("-"),
    );

    async move {
        let response = next.run(req).await;

        let status = response.status();
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if status.is_server_error() {
            warn!(status = status.as_u16(), latency_ms, "Request failed");
        } else if status.is_client_error() {
            info!(status = status.as_u16(), latency_ms, "Request rejected");
        } else {
            info!(status = status.as_u16(), latency_ms, "Request finished");
        }

        response
    }
    .instrument(span)
    .await
}
