use actix_web::HttpRequest;
use log::{debug, trace};

pub const SESSION_HEADER: &str = "x-bobiare-session";
const MAX_SESSION_ID_LEN: usize = 64;

/// Returns the session id sent with the request, or a fresh one if the request carries none (or an unusable one).
///
/// Session ids double as directory names for cart storage, so only ASCII letters, digits, `-` and `_` are accepted.
pub fn session_id(req: &HttpRequest) -> String {
    let supplied = req.headers().get(SESSION_HEADER).and_then(|v| v.to_str().ok()).map(str::trim);
    match supplied {
        Some(id) if is_valid_session_id(id) => {
            trace!("💻️ Request for session {id}");
            id.to_string()
        },
        Some(id) => {
            debug!("💻️ Ignoring malformed session id '{id}'. Starting a new session");
            new_session_id()
        },
        None => new_session_id(),
    }
}

pub fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty() &&
        id.len() <= MAX_SESSION_ID_LEN &&
        id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub fn new_session_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}
