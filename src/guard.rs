// Access gate module
// Pure session predicates applied before the gated handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http;
use crate::session::Session;

/// Require the session to belong to the given school
///
/// Returns the 403 denial response on mismatch or a missing session.
/// Has no side effects and does not modify state.
pub fn require_school(
    session: Option<&Session>,
    expected: &str,
) -> Result<(), Response<Full<Bytes>>> {
    match session {
        Some(s) if s.school == expected => Ok(()),
        _ => Err(http::build_forbidden_response(&format!(
            "Access denied: {expected} school witchers only"
        ))),
    }
}

/// Require the session to carry the given rank
///
/// Returns the 403 denial response on mismatch or a missing session.
pub fn require_rank(session: Option<&Session>, expected: &str) -> Result<(), Response<Full<Bytes>>> {
    match session {
        Some(s) if s.rank == expected => Ok(()),
        _ => Err(http::build_forbidden_response(&format!(
            "Access denied: {expected} rank required"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(school: &str, rank: &str) -> Session {
        Session {
            school: school.to_string(),
            rank: rank.to_string(),
        }
    }

    #[test]
    fn test_require_school_admits_exact_match() {
        let s = session("Wolf", "Novice");
        assert!(require_school(Some(&s), "Wolf").is_ok());
    }

    #[test]
    fn test_require_school_rejects_other_school_and_anonymous() {
        let s = session("Griffin", "Novice");
        let denied = require_school(Some(&s), "Wolf").unwrap_err();
        assert_eq!(denied.status(), 403);

        let denied = require_school(None, "Wolf").unwrap_err();
        assert_eq!(denied.status(), 403);
    }

    #[test]
    fn test_require_rank_admits_master_only() {
        let master = session("Bear", "Master");
        assert!(require_rank(Some(&master), "Master").is_ok());

        let novice = session("Wolf", "Novice");
        let denied = require_rank(Some(&novice), "Master").unwrap_err();
        assert_eq!(denied.status(), 403);

        assert!(require_rank(None, "Master").is_err());
    }

    #[test]
    fn test_gates_are_independent() {
        // A Master of another school passes the rank gate but not the school gate
        let s = session("Cat", "Master");
        assert!(require_rank(Some(&s), "Master").is_ok());
        assert!(require_school(Some(&s), "Wolf").is_err());
    }
}
