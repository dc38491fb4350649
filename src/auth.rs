//! Password login and token-cookie authentication.
//!
//! The whole site sits behind one shared password. A successful login is
//! traded for an opaque token, stored server-side and presented back via
//! the `Auth` cookie. Tokens do not expire.

use crate::api::AppState;
use axum::http::{header, HeaderMap};
use axum::response::Redirect;
use chrono::{DateTime, Utc};
use rand::RngCore;

/// Raw token length in bytes; hex-encoded on the wire.
pub const TOKEN_BYTES: usize = 64;

pub const AUTH_COOKIE: &str = "Auth";

/// Generate a fresh opaque auth token.
pub fn generate_token() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

/// Value of the `Auth` cookie, if present.
pub fn auth_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        (name == AUTH_COOKIE).then(|| value.to_string())
    })
}

/// Context carried by every authenticated page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContext {
    /// Blocks created at or before this instant are visible.
    pub release_horizon: DateTime<Utc>,
    /// Posts waiting in blocks that have not been released yet.
    pub queued_posts: usize,
}

/// Check the `Auth` cookie against the token store and build the page
/// context, or say where to send the visitor instead.
pub async fn require_page_auth(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<PageContext, Redirect> {
    let Some(token) = auth_cookie(headers) else {
        return Err(Redirect::to("/password"));
    };
    if !state.store.token_valid(&token).await {
        return Err(Redirect::to("/password?error=true"));
    }

    let release_horizon = state.schedule.release_horizon(Utc::now());
    Ok(PageContext {
        release_horizon,
        queued_posts: state.store.queued_posts(release_horizon).await,
    })
}
