//! Helpers for pulling record attributes out of a request
//!
//! Client IP resolution follows the usual reverse-proxy conventions before
//! falling back to the socket peer address.

use std::backtrace::Backtrace;
use std::net::SocketAddr;

use actix_web::http::header::HeaderMap;

/// Resolve the client IP for a request, handling proxies.
///
/// Checks headers in this order:
/// 1. `X-Real-IP` (set by nginx)
/// 2. `X-Forwarded-For` (first entry)
/// 3. Falls back to the connection peer address
pub fn client_ip(headers: &HeaderMap, peer_addr: Option<SocketAddr>) -> Option<String> {
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return Some(real_ip.trim().to_string());
    }

    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return Some(first.to_string());
            }
        }
    }

    peer_addr.map(|addr| addr.ip().to_string())
}

/// The request's `User-Agent` header, if one was sent and is valid UTF-8.
pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Snapshot of the current call stack as text.
///
/// Forced capture, so it works without `RUST_BACKTRACE` set in the host
/// environment.
pub fn capture_stacktrace() -> String {
    Backtrace::force_capture().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_client_ip_prefers_x_real_ip() {
        let headers = headers(&[
            ("x-real-ip", "192.168.1.100"),
            ("x-forwarded-for", "10.9.8.7"),
        ]);
        let peer = "10.0.0.1:9999".parse().ok();

        assert_eq!(client_ip(&headers, peer), Some("192.168.1.100".to_string()));
    }

    #[test]
    fn test_client_ip_takes_first_forwarded_entry() {
        let headers = headers(&[("x-forwarded-for", "192.168.1.100, 10.0.0.1")]);

        assert_eq!(
            client_ip(&headers, "127.0.0.1:80".parse().ok()),
            Some("192.168.1.100".to_string())
        );
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let headers = HeaderMap::new();
        let peer = "203.0.113.1:4433".parse().ok();

        assert_eq!(client_ip(&headers, peer), Some("203.0.113.1".to_string()));
    }

    #[test]
    fn test_client_ip_no_source() {
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }

    #[test]
    fn test_user_agent_present_and_absent() {
        let with = headers(&[("user-agent", "curl/8.5.0")]);
        assert_eq!(user_agent(&with), Some("curl/8.5.0".to_string()));

        assert_eq!(user_agent(&HeaderMap::new()), None);
    }

    #[test]
    fn test_capture_stacktrace_is_nonempty() {
        let trace = capture_stacktrace();
        assert!(!trace.is_empty());
    }
}
