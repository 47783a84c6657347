// Session module
// Signed-cookie session state: HMAC-SHA256 over a base64url JSON payload

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use hyper::header::{HeaderMap, COOKIE};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SESSION_VERSION_V1: &str = "v1";
const MAX_TOKEN_LEN: usize = 1024;

/// Rank granted when the login form omits one
pub const DEFAULT_RANK: &str = "Novice";

/// Per-browser session state carried in the signed cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub school: String,
    pub rank: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorCode {
    InvalidFormat,
    UnsupportedVersion,
    InvalidSignature,
    InvalidPayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub code: SessionErrorCode,
    pub message: String,
}

impl SessionError {
    fn new(code: SessionErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for SessionError {}

/// Encode a session into a `v1.<payload>.<sig>` cookie token
pub fn encode_session(session: &Session, secret: &[u8]) -> Result<String, SessionError> {
    let payload_bytes = serde_json::to_vec(session)
        .map_err(|e| SessionError::new(SessionErrorCode::InvalidPayload, e.to_string()))?;
    let payload_part = URL_SAFE_NO_PAD.encode(payload_bytes);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SessionError::new(SessionErrorCode::InvalidPayload, e.to_string()))?;
    mac.update(payload_part.as_bytes());
    let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{SESSION_VERSION_V1}.{payload_part}.{sig_part}"))
}

/// Decode and verify a session cookie token
pub fn decode_session(token: &str, secret: &[u8]) -> Result<Session, SessionError> {
    if token.len() > MAX_TOKEN_LEN {
        return Err(SessionError::new(
            SessionErrorCode::InvalidFormat,
            "token exceeds max length",
        ));
    }

    let (payload_part, sig_part) = parse_token_parts(token)?;

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| SessionError::new(SessionErrorCode::InvalidPayload, e.to_string()))?;
    mac.update(payload_part.as_bytes());
    let expected = URL_SAFE_NO_PAD
        .decode(sig_part)
        .map_err(|e| SessionError::new(SessionErrorCode::InvalidFormat, e.to_string()))?;
    mac.verify_slice(&expected).map_err(|_| {
        SessionError::new(SessionErrorCode::InvalidSignature, "signature mismatch")
    })?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_part)
        .map_err(|e| SessionError::new(SessionErrorCode::InvalidFormat, e.to_string()))?;
    serde_json::from_slice(&payload_bytes)
        .map_err(|e| SessionError::new(SessionErrorCode::InvalidPayload, e.to_string()))
}

fn parse_token_parts(token: &str) -> Result<(&str, &str), SessionError> {
    let parts: Vec<&str> = token.split('.').collect();
    match parts.as_slice() {
        [version, payload, sig] if *version == SESSION_VERSION_V1 => Ok((payload, sig)),
        [version, _, _] => Err(SessionError::new(
            SessionErrorCode::UnsupportedVersion,
            format!("unsupported session version: {version}"),
        )),
        _ => Err(SessionError::new(
            SessionErrorCode::InvalidFormat,
            "invalid token format",
        )),
    }
}

/// Extract the session from the request's Cookie header
///
/// Any absent, malformed, or tampered cookie yields `None`; the request
/// proceeds anonymously.
pub fn session_from_headers(
    headers: &HeaderMap,
    cookie_name: &str,
    secret: &[u8],
) -> Option<Session> {
    let cookie_header = headers.get(COOKIE)?.to_str().ok()?;
    let token = find_cookie(cookie_header, cookie_name)?;
    decode_session(token, secret).ok()
}

/// Find a named cookie value in a Cookie header line
fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Set-Cookie value issuing a session token
pub fn issue_cookie(cookie_name: &str, token: &str) -> String {
    format!("{cookie_name}={token}; Path=/; HttpOnly")
}

/// Set-Cookie value clearing the session
pub fn clear_cookie(cookie_name: &str) -> String {
    format!("{cookie_name}=; Path=/; HttpOnly; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    const SECRET: &[u8] = b"test-secret";

    fn wolf_master() -> Session {
        Session {
            school: "Wolf".to_string(),
            rank: "Master".to_string(),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let session = wolf_master();
        let token = encode_session(&session, SECRET).unwrap();
        assert!(token.starts_with("v1."));
        assert_eq!(decode_session(&token, SECRET).unwrap(), session);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let token = encode_session(&wolf_master(), SECRET).unwrap();
        let forged = Session {
            school: "Griffin".to_string(),
            rank: "Master".to_string(),
        };
        let forged_payload =
            URL_SAFE_NO_PAD.encode(serde_json::to_vec(&forged).unwrap());
        let sig = token.rsplit('.').next().unwrap();
        let tampered = format!("v1.{forged_payload}.{sig}");

        let err = decode_session(&tampered, SECRET).unwrap_err();
        assert_eq!(err.code, SessionErrorCode::InvalidSignature);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = encode_session(&wolf_master(), SECRET).unwrap();
        let err = decode_session(&token, b"other-secret").unwrap_err();
        assert_eq!(err.code, SessionErrorCode::InvalidSignature);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let err = decode_session("not-a-token", SECRET).unwrap_err();
        assert_eq!(err.code, SessionErrorCode::InvalidFormat);

        let err = decode_session("v2.abc.def", SECRET).unwrap_err();
        assert_eq!(err.code, SessionErrorCode::UnsupportedVersion);
    }

    #[test]
    fn test_session_from_headers() {
        let token = encode_session(&wolf_master(), SECRET).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; guild_session={token}")).unwrap(),
        );

        let session = session_from_headers(&headers, "guild_session", SECRET).unwrap();
        assert_eq!(session, wolf_master());

        // Tampered cookie falls back to anonymous
        headers.insert(
            COOKIE,
            HeaderValue::from_static("guild_session=v1.garbage.garbage"),
        );
        assert!(session_from_headers(&headers, "guild_session", SECRET).is_none());
    }

    #[test]
    fn test_find_cookie_picks_exact_name() {
        assert_eq!(find_cookie("a=1; b=2; c=3", "b"), Some("2"));
        assert_eq!(find_cookie("ab=1", "a"), None);
        assert_eq!(find_cookie("", "a"), None);
    }
}
