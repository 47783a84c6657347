// Quest review handlers
// Review listing and the file-persisted submission form

use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use serde::Deserialize;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::model::Review;
use crate::render;
use crate::session::Session;

/// Author recorded when no session school is set
const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, Default, Deserialize)]
struct ReviewForm {
    quest: Option<String>,
    rating: Option<String>,
    comment: Option<String>,
}

/// GET /quests loads reviews fresh from disk on every request
pub fn serve_reviews(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    let reviews = state.reviews.load();
    http::build_html_response(render::render_quests(&reviews), is_head)
}

/// POST /quests appends the submitted review and renders the updated list
pub async fn handle_submission(
    req: Request<hyper::body::Incoming>,
    session: Option<&Session>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_warning(&format!("Failed to read review body: {e}"));
            return http::build_bad_request_response("body", "failed to read request body");
        }
    };

    let form: ReviewForm = match serde_urlencoded::from_bytes(&body) {
        Ok(f) => f,
        Err(e) => return http::build_bad_request_response("body", &format!("invalid form: {e}")),
    };

    let review = match validate_submission(form, session) {
        Ok(review) => review,
        Err(resp) => return resp,
    };

    match state.reviews.append(review).await {
        Ok(updated) => http::build_html_response(render::render_quests(&updated), false),
        Err(e) => {
            logger::log_error(&format!("Failed to persist review: {e}"));
            http::build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// Turn the raw form into a review, with a field-level 400 on bad input
///
/// The rating range is deliberately unvalidated; only integer-ness is
/// checked. The author comes from the session school, Anonymous otherwise.
fn validate_submission(
    form: ReviewForm,
    session: Option<&Session>,
) -> Result<Review, Response<Full<Bytes>>> {
    let Some(quest) = form.quest else {
        return Err(http::build_bad_request_response("quest", "quest is required"));
    };
    let Some(rating_raw) = form.rating else {
        return Err(http::build_bad_request_response(
            "rating",
            "rating is required",
        ));
    };
    let Ok(rating) = rating_raw.trim().parse::<i64>() else {
        return Err(http::build_bad_request_response(
            "rating",
            "rating must be an integer",
        ));
    };
    let Some(comment) = form.comment else {
        return Err(http::build_bad_request_response(
            "comment",
            "comment is required",
        ));
    };

    Ok(Review {
        quest,
        rating,
        comment,
        author: session.map_or_else(|| ANONYMOUS_AUTHOR.to_string(), |s| s.school.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(quest: Option<&str>, rating: Option<&str>, comment: Option<&str>) -> ReviewForm {
        ReviewForm {
            quest: quest.map(ToString::to_string),
            rating: rating.map(ToString::to_string),
            comment: comment.map(ToString::to_string),
        }
    }

    #[test]
    fn test_valid_submission_takes_author_from_session() {
        let session = Session {
            school: "Wolf".to_string(),
            rank: "Novice".to_string(),
        };
        let review =
            validate_submission(form(Some("Find Ciri"), Some("5"), Some("long")), Some(&session))
                .unwrap();
        assert_eq!(review.quest, "Find Ciri");
        assert_eq!(review.rating, 5);
        assert_eq!(review.author, "Wolf");
    }

    #[test]
    fn test_anonymous_author_without_session() {
        let review = validate_submission(form(Some("q"), Some("1"), Some("c")), None).unwrap();
        assert_eq!(review.author, "Anonymous");
    }

    #[test]
    fn test_missing_fields_rejected() {
        for bad in [
            form(None, Some("1"), Some("c")),
            form(Some("q"), None, Some("c")),
            form(Some("q"), Some("1"), None),
        ] {
            let resp = validate_submission(bad, None).unwrap_err();
            assert_eq!(resp.status(), 400);
        }
    }

    #[test]
    fn test_non_numeric_rating_rejected() {
        let resp = validate_submission(form(Some("q"), Some("five"), Some("c")), None).unwrap_err();
        assert_eq!(resp.status(), 400);
    }

    #[test]
    fn test_rating_range_is_not_validated() {
        let review = validate_submission(form(Some("q"), Some("-40"), Some("c")), None).unwrap();
        assert_eq!(review.rating, -40);
    }
}
