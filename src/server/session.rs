//! Dashboard login sessions, kept in a signed cookie.
//!
//! The cookie value is `"{expires_at}|{username}"`; the signature makes it
//! tamper-proof so no server-side session store is needed.

use crate::consts::dashboard_consts::server::SESSION_COOKIE;
use crate::environment::Profile;
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    /// Unix timestamp (seconds) after which the session is void.
    pub expires_at: i64,
}

impl Session {
    pub fn new(username: impl Into<String>, lifetime: Duration) -> Self {
        let lifetime = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);
        Self {
            username: username.into(),
            expires_at: chrono::Utc::now().timestamp().saturating_add(lifetime),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}|{}", self.expires_at, self.username)
    }

    pub fn decode(value: &str) -> Option<Self> {
        let (expires_at, username) = value.split_once('|')?;
        Some(Self {
            username: username.to_string(),
            expires_at: expires_at.parse().ok()?,
        })
    }

    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.expires_at
    }
}

/// The live session carried by `jar`, if any.
pub fn current_session(jar: &SignedCookieJar) -> Option<Session> {
    let cookie = jar.get(SESSION_COOKIE)?;
    Session::decode(cookie.value()).filter(|session| !session.is_expired())
}

/// Adds the session cookie for `session` to `jar`.
pub fn start(jar: SignedCookieJar, session: &Session, profile: Profile) -> SignedCookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, session.encode()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(profile.secure_cookies());
    jar.add(cookie)
}

pub fn end(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
