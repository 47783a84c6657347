//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, session extraction, route dispatch, and access logging.

mod alchemy;
mod auth;
mod contracts;
mod profile;
mod quests;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response, StatusCode};

use crate::config::AppState;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::session::{self, Session};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(ToString::to_string);
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = gate_and_route(req, &method, &path, &state).await;

    if state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed)
    {
        let mut entry = AccessLogEntry::new(peer_addr.ip().to_string(), method.to_string(), path);
        entry.query = query;
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.user_agent = user_agent;
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Apply the method and body-size gates, then dispatch
async fn gate_and_route(
    req: Request<hyper::body::Incoming>,
    method: &Method,
    path: &str,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        return resp;
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    let session = session::session_from_headers(
        req.headers(),
        &state.config.session.cookie_name,
        state.config.session.secret.as_bytes(),
    );

    route_request(req, method, path, session, state).await
}

/// Check HTTP method and reject anything outside GET/HEAD/POST
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD | Method::POST => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size_str = content_length.to_str().ok()?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        _ => None,
    }
}

/// Route request based on method and path
async fn route_request(
    req: Request<hyper::body::Incoming>,
    method: &Method,
    path: &str,
    session: Option<Session>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let is_head = *method == Method::HEAD;

    match (method, path) {
        (&Method::GET | &Method::HEAD, "/") => profile::serve_profile(state, is_head),
        (&Method::GET, "/alchemy") => alchemy::filter_items(req.uri().query(), state),
        (&Method::GET | &Method::HEAD, "/login") => auth::serve_login_form(is_head),
        (&Method::POST, "/login") => auth::handle_login(req, state).await,
        (&Method::GET, "/logout") => auth::handle_logout(state),
        (&Method::GET, "/kaermorhen") => auth::serve_kaer_morhen(session.as_ref(), state),
        (&Method::GET | &Method::HEAD, "/contracts") => {
            contracts::serve_board(session.as_ref(), state, is_head)
        }
        (&Method::GET, "/contracts/report") => contracts::serve_report(session.as_ref(), state),
        (&Method::GET | &Method::HEAD, "/quests") => quests::serve_reviews(state, is_head),
        (&Method::POST, "/quests") => quests::handle_submission(req, session.as_ref(), state).await,
        (&Method::GET, "/witcher/stats") => profile::serve_stats(state),
        (&Method::GET, "/healthz") => {
            http::json_response(StatusCode::OK, &serde_json::json!({"status": "ok"}))
        }
        _ => http::build_404_response(),
    }
}
