//! Rate limiting middleware for axum.
//!
//! Checks the global window first (infrastructure protection), then the
//! per-caller window keyed by client IP. Status is returned in standard
//! headers:
//! - `X-RateLimit-Limit`: maximum requests allowed in the window
//! - `X-RateLimit-Remaining`: requests remaining in the current window
//! - `X-RateLimit-Reset`: unix timestamp when the window frees a slot
//! - `Retry-After`: seconds to wait (only on 429)
//!
//! A limiter backend error fails open: availability wins over strict
//! admission control.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::ports::{RateLimitDecision, RateLimitKey, RateLimitStatus, RateLimiter};

/// Rate limiter middleware state.
pub type RateLimiterState = Arc<dyn RateLimiter>;

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    pub static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Admission gate applied to every API route.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client_ip = extract_client_ip(&request, connect_info.as_ref());

    // Global window first.
    match limiter.check(&RateLimitKey::global()).await {
        Ok(RateLimitDecision::Denied(denied)) => {
            return rate_limit_response(denied.limit, denied.retry_after_secs);
        }
        Err(e) => {
            tracing::warn!(error = %e, "rate limiter unavailable for global check, failing open");
        }
        Ok(RateLimitDecision::Allowed(_)) => {}
    }

    // Per-caller window.
    let mut ip_status: Option<RateLimitStatus> = None;
    if let Some(ip) = &client_ip {
        match limiter.check(&RateLimitKey::ip(ip)).await {
            Ok(RateLimitDecision::Denied(denied)) => {
                return rate_limit_response(denied.limit, denied.retry_after_secs);
            }
            Ok(RateLimitDecision::Allowed(status)) => ip_status = Some(status),
            Err(e) => {
                tracing::warn!(error = %e, "rate limiter unavailable for ip check, failing open");
            }
        }
    }

    let mut response = next.run(request).await;

    if let Some(status) = ip_status {
        add_rate_limit_headers(&mut response, &status);
    }

    response
}

/// Extract client IP, checking forwarded headers first.
///
/// Order of precedence:
/// 1. X-Forwarded-For header (first IP in list)
/// 2. X-Real-IP header
/// 3. ConnectInfo socket address
fn extract_client_ip<B>(
    request: &axum::http::Request<B>,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first_ip) = forwarded.split(',').next() {
            return Some(first_ip.trim().to_string());
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return Some(real_ip.to_string());
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}

/// 429 Too Many Requests with retry metadata.
fn rate_limit_response(limit: u32, retry_after_secs: u32) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({
            "error": "Rate limit exceeded",
            "code": "RATE_LIMIT_EXCEEDED",
            "retry_after_secs": retry_after_secs
        })),
    )
        .into_response();

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
        headers.insert(headers::X_RATELIMIT_LIMIT.clone(), value);
    }
    headers.insert(
        headers::X_RATELIMIT_REMAINING.clone(),
        HeaderValue::from_static("0"),
    );
    if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
        headers.insert("Retry-After", value);
    }

    response
}

/// Attaches the window status to a successful response.
fn add_rate_limit_headers(response: &mut Response, status: &RateLimitStatus) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&status.limit.to_string()) {
        headers.insert(headers::X_RATELIMIT_LIMIT.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&status.remaining.to_string()) {
        headers.insert(headers::X_RATELIMIT_REMAINING.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&status.reset_at.as_unix_secs().to_string()) {
        headers.insert(headers::X_RATELIMIT_RESET.clone(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[test]
    fn extract_ip_from_x_forwarded_for() {
        let request = Request::builder()
            .uri("/test")
            .header("X-Forwarded-For", "1.2.3.4, 5.6.7.8")
            .body(())
            .unwrap();

        let ip = extract_client_ip(&request, None);
        assert_eq!(ip, Some("1.2.3.4".to_string()));
    }

    #[test]
    fn extract_ip_from_x_real_ip() {
        let request = Request::builder()
            .uri("/test")
            .header("X-Real-IP", "9.8.7.6")
            .body(())
            .unwrap();

        let ip = extract_client_ip(&request, None);
        assert_eq!(ip, Some("9.8.7.6".to_string()));
    }

    #[test]
    fn extract_ip_prefers_x_forwarded_for() {
        let request = Request::builder()
            .uri("/test")
            .header("X-Forwarded-For", "1.2.3.4")
            .header("X-Real-IP", "5.6.7.8")
            .body(())
            .unwrap();

        let ip = extract_client_ip(&request, None);
        assert_eq!(ip, Some("1.2.3.4".to_string()));
    }

    #[test]
    fn extract_ip_returns_none_without_headers() {
        let request = Request::builder().uri("/test").body(()).unwrap();
        assert_eq!(extract_client_ip(&request, None), None);
    }

    #[test]
    fn rate_limit_response_has_429_and_headers() {
        let response = rate_limit_response(5, 30);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get("Retry-After").unwrap(), "30");
        assert_eq!(response.headers().get("x-ratelimit-limit").unwrap(), "5");
        assert_eq!(response.headers().get("x-ratelimit-remaining").unwrap(), "0");
    }
}
