//! Session token storage.
//!
//! DESIGN
//! ======
//! The session is a single bearer token whose presence is the only validity
//! signal. Storage sits behind the `TokenStore` trait so the auth and product
//! clients can be driven by an in-memory store under test and by a cookie
//! file on disk from the CLI.
//!
//! The file store keeps the token as one `Set-Cookie` line (`auth_token`,
//! `Path=/`, `SameSite=Strict`, `Expires=...`) and enforces expiry on read,
//! the way a browser cookie jar would.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

/// Cookie name the token is stored under.
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Lifetime given to a token stored at login.
pub const SESSION_TTL: Duration = Duration::days(1);

/// Persistent storage for the current session token.
pub trait TokenStore: Send + Sync {
    /// The stored token, or `None` when absent or expired.
    fn get(&self) -> Option<String>;

    /// Store `token`, replacing any previous one, expiring `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, token: &str, ttl: Duration) -> io::Result<()>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn clear(&self);

    fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

/// Build the session cookie for `token`, expiring `ttl` after `now`.
#[must_use]
pub fn session_cookie(token: &str, ttl: Duration, now: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token.to_owned()))
        .path("/")
        .same_site(SameSite::Strict)
        .expires(now + ttl)
        .build()
}

/// Token value of a stored cookie line if it is the session cookie and has
/// not expired at `now`.
#[must_use]
pub fn live_token(raw: &str, now: OffsetDateTime) -> Option<String> {
    let cookie = Cookie::parse(raw.trim()).ok()?;
    if cookie.name() != AUTH_COOKIE_NAME || cookie.value().is_empty() {
        return None;
    }
    if let Some(expires) = cookie.expires_datetime()
        && expires <= now
    {
        return None;
    }
    Some(cookie.value().to_owned())
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<(String, OffsetDateTime)>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token` for one session lifetime.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.put(token, SESSION_TTL);
        store
    }

    fn put(&self, token: &str, ttl: Duration) {
        let expires = OffsetDateTime::now_utc() + ttl;
        let mut slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some((token.to_owned(), expires));
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        match slot.as_ref() {
            Some((token, expires)) if *expires > OffsetDateTime::now_utc() => Some(token.clone()),
            _ => None,
        }
    }

    fn set(&self, token: &str, ttl: Duration) -> io::Result<()> {
        self.put(token, ttl);
        Ok(())
    }

    fn clear(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = None;
    }
}

// =============================================================================
// COOKIE FILE STORE
// =============================================================================

/// Token store backed by a single-cookie file on disk.
#[derive(Debug, Clone)]
pub struct CookieFileTokenStore {
    path: PathBuf,
}

impl CookieFileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for CookieFileTokenStore {
    fn get(&self) -> Option<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session file unreadable");
                return None;
            }
        };
        live_token(&raw, OffsetDateTime::now_utc())
    }

    fn set(&self, token: &str, ttl: Duration) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let cookie = session_cookie(token, ttl, OffsetDateTime::now_utc());
        std::fs::write(&self.path, format!("{cookie}\n"))
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "session file not removed"),
        }
    }
}
