// Authentication handlers
// Login form, session issue/clear, and the school-gated keep route

use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;

use crate::config::AppState;
use crate::guard;
use crate::http;
use crate::logger;
use crate::render;
use crate::session::{self, Session, DEFAULT_RANK};

#[derive(Debug, Default, Deserialize)]
struct LoginForm {
    school: Option<String>,
    rank: Option<String>,
}

/// GET /login renders the login form view
pub fn serve_login_form(is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(render::render_login(), is_head)
}

/// POST /login issues the session cookie and redirects home
///
/// `school` is required; `rank` defaults to Novice when the field is
/// absent from the form.
pub async fn handle_login(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read login body: {e}"));
            return http::build_bad_request_response("body", "failed to read request body");
        }
    };

    let form: LoginForm = match serde_urlencoded::from_bytes(&body) {
        Ok(f) => f,
        Err(e) => return http::build_bad_request_response("body", &format!("invalid form: {e}")),
    };

    let Some(school) = form.school else {
        return http::build_bad_request_response("school", "school is required");
    };

    let new_session = Session {
        school,
        rank: form.rank.unwrap_or_else(|| DEFAULT_RANK.to_string()),
    };

    match session::encode_session(&new_session, state.config.session.secret.as_bytes()) {
        Ok(token) => http::build_redirect_with_cookie(
            "/",
            &session::issue_cookie(&state.config.session.cookie_name, &token),
        ),
        Err(e) => {
            logger::log_error(&format!("Failed to sign session: {e}"));
            http::build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// GET /logout clears the session cookie and redirects home
pub fn handle_logout(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    http::build_redirect_with_cookie(
        "/",
        &session::clear_cookie(&state.config.session.cookie_name),
    )
}

/// GET /kaermorhen welcomes witchers of the configured school, 403 otherwise
pub fn serve_kaer_morhen(
    session: Option<&Session>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let school = &state.config.session.kaer_morhen_school;
    if let Err(denied) = guard::require_school(session, school) {
        return denied;
    }

    http::build_text_response(
        StatusCode::OK,
        &format!("Welcome to Kaer Morhen, witcher of the {school} School!"),
    )
}
