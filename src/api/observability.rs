use axum::{
    body::{Body, HttpBody},
    extract::Request,
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{Instrument, Level, debug, info, info_span, warn};
use uuid::Uuid;

use super::ApiError;
use crate::constants::http::MAX_LOGGED_BODY_BYTES;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().clone();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri.path(),
    );

    async move {
        info!("{}: {}", method, uri);

        let req = if tracing::enabled!(Level::DEBUG) {
            match log_request_details(req).await {
                Ok(req) => req,
                Err(response) => return response,
            }
        } else {
            req
        };

        let response = next.run(req).await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        debug!(
            event = "http_request_finished",
            duration_ms = duration_ms,
            status_code = status,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

/// Logs url, method, query parameters and body, then hands back a request
/// carrying the buffered body. Bodies without a known length at or below
/// `MAX_LOGGED_BODY_BYTES` are passed through untouched and not logged.
async fn log_request_details(req: Request) -> Result<Request, Response> {
    let (parts, body) = req.into_parts();

    debug!("url: {}", parts.uri);
    debug!("method: {}", parts.method);
    if let Some(query) = parts.uri.query() {
        for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
            debug!("param: {} = {}", name, value);
        }
    }

    let loggable = body
        .size_hint()
        .exact()
        .and_then(|len| usize::try_from(len).ok())
        .filter(|len| *len <= MAX_LOGGED_BODY_BYTES);

    let Some(len) = loggable else {
        debug!("body: not logged (length unknown or over {} bytes)", MAX_LOGGED_BODY_BYTES);
        return Ok(Request::from_parts(parts, body));
    };

    let bytes = match axum::body::to_bytes(body, len).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return Err(ApiError::bad_request("Request body could not be read").into_response());
        }
    };
    debug!("body: {}", String::from_utf8_lossy(&bytes));

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

/// Catch-all for paths and methods the adapter does not serve.
pub async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::unknown_route(uri.path())
}
