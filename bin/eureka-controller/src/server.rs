//! Metrics and probe endpoints

use eureka_core::SyncMetrics;
use http_body_util::Full;
use hyper::{
    body::Bytes,
    header::{HeaderValue, CONTENT_TYPE},
    server::conn::http1,
    service::service_fn,
    Method, Request, Response, StatusCode,
};
use hyper_util::rt::tokio::TokioIo;
use std::convert::Infallible;
use tokio::net::TcpListener;
use tracing::{debug, warn};

const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Accept connections until the listener fails
pub async fn serve(listener: TcpListener, metrics: SyncMetrics) -> anyhow::Result<()> {
    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let metrics = metrics.clone();

        tokio::task::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let response = route(req.method(), req.uri().path(), &metrics);
                async move { Ok::<_, Infallible>(response) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("Error serving HTTP connection from {}: {}", peer_addr, e);
            }
        });
    }
}

fn route(method: &Method, path: &str, metrics: &SyncMetrics) -> Response<Full<Bytes>> {
    match (method, path) {
        (&Method::GET, "/metrics") => match metrics.gather() {
            Ok(text) => {
                let mut response = text_response(StatusCode::OK, text);
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(METRICS_CONTENT_TYPE));
                response
            }
            Err(e) => {
                warn!("Failed to gather metrics: {}", e);
                text_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to gather metrics\n")
            }
        },
        (_, "/healthz") | (_, "/readyz") => text_response(StatusCode::OK, "OK\n"),
        _ => text_response(StatusCode::NOT_FOUND, "Not Found\n"),
    }
}

fn text_response(status: StatusCode, body: impl Into<Bytes>) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
}
