// security headers middleware

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderName, HeaderValue, Response},
    middleware::Next,
};

/// pages load same-origin styles and media only; deep-links are plain navigations
const CONTENT_SECURITY_POLICY: &str =
    "default-src 'self'; style-src 'self'; media-src 'self'; img-src 'self' data:; object-src 'none'";

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-frame-options", "DENY"),
    ("x-content-type-options", "nosniff"),
    // deep-links embed absolute urls; keep library paths out of cross-origin referrers
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", CONTENT_SECURITY_POLICY),
];

/// add security headers to all responses
pub async fn add_security_headers(request: Request, next: Next) -> Response<Body> {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    for &(name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}
