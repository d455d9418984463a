//! Client metadata extraction from HTTP requests.

use axum::extract::ConnectInfo;
use axum::http::{Extensions, HeaderMap, header};
use std::net::SocketAddr;

use crate::domain::entities::ClientInfo;

/// Collects the user agent, peer IP and referrer of a request.
///
/// The peer address comes from [`ConnectInfo`], which is only present when the
/// server was started with `into_make_service_with_connect_info`. Header values
/// that are not valid visible ASCII are treated as missing.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::USER_AGENT, "curl/8.5".parse().unwrap());
///
/// let client = client_info_from_parts(&headers, &Extensions::new());
/// assert_eq!(client.user_agent.as_deref(), Some("curl/8.5"));
/// assert_eq!(client.ip, None);
/// ```
pub fn client_info_from_parts(headers: &HeaderMap, extensions: &Extensions) -> ClientInfo {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    ClientInfo {
        user_agent: header_value(header::USER_AGENT),
        ip: extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string()),
        referrer: header_value(header::REFERER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_collects_headers_and_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers.insert(header::REFERER, HeaderValue::from_static("https://news.example/"));

        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 51234))));

        let client = client_info_from_parts(&headers, &extensions);

        assert_eq!(client.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(client.ip.as_deref(), Some("192.0.2.10"));
        assert_eq!(client.referrer.as_deref(), Some("https://news.example/"));
    }

    #[test]
    fn test_missing_metadata_is_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(""));

        let client = client_info_from_parts(&headers, &Extensions::new());

        assert_eq!(client, ClientInfo::default());
    }

    #[test]
    fn test_non_ascii_header_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_bytes(b"https://caf\xc3\xa9.example").unwrap(),
        );

        let client = client_info_from_parts(&headers, &Extensions::new());

        assert_eq!(client.referrer, None);
    }
}
