//! Request dispatch
//!
//! Entry point for HTTP request processing: method validation, context
//! extraction, hand-off to the static file path, and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use crate::logger::AccessLogEntry;
use chrono::Local;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Per-request context handed to the serving path.
pub struct RequestContext<'a> {
    /// URL path, still percent-encoded
    pub path: &'a str,
    pub is_head: bool,
    pub range_header: Option<String>,
    pub peer_addr: SocketAddr,
}

/// Main entry point for HTTP request handling.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let version = req.version();
    let path = req.uri().path().to_owned();
    let is_head = method == Method::HEAD;

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = if let Some(resp) = check_http_method(&method) {
        resp
    } else {
        let ctx = RequestContext {
            path: &path,
            is_head,
            range_header: req
                .headers()
                .get("range")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
            peer_addr,
        };
        static_files::serve_path(&ctx, &state).await
    };

    if state.config.logging.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.to_string(),
            time: Local::now(),
            method: method.to_string(),
            path,
            http_version: http_version_str(version).to_string(),
            status: response.status().as_u16(),
            bytes_sent: response.body().size_hint().exact().unwrap_or(0),
            served_range: response
                .headers()
                .get("content-range")
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
            user_agent,
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// GET and HEAD proceed to file serving; OPTIONS answers the CORS
/// preflight; everything else is refused.
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn http_version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_head_pass_through() {
        assert!(check_http_method(&Method::GET).is_none());
        assert!(check_http_method(&Method::HEAD).is_none());
    }

    #[test]
    fn options_gets_preflight() {
        let resp = check_http_method(&Method::OPTIONS).expect("preflight response");
        assert_eq!(resp.status(), 204);
    }

    #[test]
    fn other_methods_are_refused() {
        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let resp = check_http_method(&method).expect("405 response");
            assert_eq!(resp.status(), 405);
        }
    }
}
