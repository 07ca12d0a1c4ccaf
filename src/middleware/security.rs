// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response hardening for the JSON API.
//!
//! Every response (including auth rejections) may carry profile data, a
//! session cookie or questionnaire results, so none of it may be cached or
//! framed.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Headers stamped on every response, overriding anything a handler set.
pub const RESPONSE_HEADERS: [(&str, &str); 7] = [
    ("cache-control", "no-store"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
    ("referrer-policy", "no-referrer"),
    ("permissions-policy", "camera=(), geolocation=(), microphone=(), payment=()"),
];

pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in RESPONSE_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use axum::{routing::get, Router};
    use tower::ServiceExt; // for oneshot

    fn app() -> Router {
        Router::new()
            .route(
                "/login",
                get(|| async {
                    (
                        [
                            (header::SET_COOKIE, "session_token=abc; HttpOnly"),
                            (header::CACHE_CONTROL, "public, max-age=600"),
                        ],
                        "{}",
                    )
                }),
            )
            .route(
                "/me",
                get(|| async { Err::<String, _>(AppError::SessionExpired) }),
            )
            .layer(axum::middleware::from_fn(add_security_headers))
    }

    async fn get_headers(uri: &str) -> (StatusCode, axum::http::HeaderMap) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        (response.status(), response.headers().clone())
    }

    #[tokio::test]
    async fn test_cookie_response_is_never_cached() {
        let (status, headers) = get_headers("/login").await;
        assert_eq!(status, StatusCode::OK);

        // Handler-supplied caching is overridden
        assert_eq!(headers.get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert!(headers.get(header::SET_COOKIE).is_some());
        for (name, value) in RESPONSE_HEADERS {
            assert_eq!(headers.get(name).unwrap(), value, "{}", name);
        }
    }

    #[tokio::test]
    async fn test_error_responses_are_hardened() {
        let (status, headers) = get_headers("/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        for (name, value) in RESPONSE_HEADERS {
            assert_eq!(headers.get(name).unwrap(), value, "{}", name);
        }
    }
}
