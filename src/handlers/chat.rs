use axum::{
    Json,
    extract::{ConnectInfo, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_TOTAL, UPSTREAM_FAILURES, UPSTREAM_LATENCY};
use crate::models::{ChatResponse, ErrorResponse};
use crate::state::AppState;
use crate::upstream::UpstreamResult;
use crate::validate::validate_message;

// Rate-limit bucket key for a request: first X-Forwarded-For entry when the
// relay sits behind a proxy, otherwise the peer address.
fn client_key(headers: &HeaderMap, peer: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| peer.ip().to_string())
}

// Serving host as seen by the client, forwarded upstream as the referer
fn host_url(headers: &HeaderMap) -> String {
    match headers.get(header::HOST).and_then(|v| v.to_str().ok()) {
        Some(host) => format!("http://{host}"),
        None => String::new(),
    }
}

fn reject(status: StatusCode, error: &str) -> Response {
    (status, Json(ErrorResponse::new(error))).into_response()
}

fn fail(status: StatusCode, error: &str) -> Response {
    (status, Json(ErrorResponse::with_status(error))).into_response()
}

// POST /chat handler. Each check is terminal: credential, rate limit, body
// shape, message validity, then the upstream call.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    REQUEST_TOTAL.inc();

    let Some(api_key) = state.api_key.as_deref() else {
        return reject(StatusCode::UNAUTHORIZED, "OpenRouter API key not found");
    };

    let key = client_key(&headers, peer);
    if !state.rate_limiter.admit(&key, Instant::now()) {
        RATE_LIMITED_TOTAL.inc();
        tracing::info!(client = %key, "rate limit exceeded");
        return reject(
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again later.",
        );
    }

    let Ok(Json(body)) = payload else {
        return reject(StatusCode::BAD_REQUEST, "Request must be JSON");
    };

    let message = match validate_message(
        body.get("message").unwrap_or(&Value::Null),
        state.max_message_length,
    ) {
        Ok(message) => message,
        Err(reason) => return reject(StatusCode::BAD_REQUEST, &reason),
    };

    let referer = host_url(&headers);
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let start = Instant::now();
    let result = state.upstream.send(api_key, message, &referer, request_id).await;
    UPSTREAM_LATENCY.observe(start.elapsed().as_secs_f64());

    match result {
        UpstreamResult::Success(text) => (
            StatusCode::OK,
            Json(ChatResponse {
                response: text,
                status: "success",
            }),
        )
            .into_response(),
        UpstreamResult::Timeout => {
            UPSTREAM_FAILURES.inc();
            fail(
                StatusCode::GATEWAY_TIMEOUT,
                "Request timed out. Please try again.",
            )
        }
        UpstreamResult::Transport(detail) => {
            UPSTREAM_FAILURES.inc();
            tracing::warn!("upstream call failed: {detail}");
            fail(StatusCode::INTERNAL_SERVER_ERROR, &detail)
        }
        UpstreamResult::Unexpected => {
            UPSTREAM_FAILURES.inc();
            fail(
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> SocketAddr {
        "192.0.2.7:40000".parse().unwrap()
    }

    #[test]
    fn forwarded_header_wins_over_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.5, 10.0.0.1".parse().unwrap());
        assert_eq!(client_key(&headers, peer()), "203.0.113.5");
    }

    #[test]
    fn falls_back_to_peer_address() {
        assert_eq!(client_key(&HeaderMap::new(), peer()), "192.0.2.7");
    }

    #[test]
    fn host_url_reflects_the_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "chat.example.com:5001".parse().unwrap());
        assert_eq!(host_url(&headers), "http://chat.example.com:5001");
        assert_eq!(host_url(&HeaderMap::new()), "");
    }
}
