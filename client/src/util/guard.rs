//! Route protection decision.
//!
//! SYSTEM CONTEXT
//! ==============
//! Evaluated once per navigation before a page renders. The decision is a
//! pure function of the requested path and whether a session token is
//! present; whoever asks performs the navigation. No I/O happens here.
//!
//! `/login` is the only public page. Asset, framework and API prefixes are
//! excluded from the check altogether and always pass.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Segments that bypass the guard when the path starts with `/<segment>`.
pub const DEFAULT_EXCLUSIONS: &[&str] = &["api", "_next", "assets", "fonts", "favicon.ico", "sitemap.xml"];

/// What the caller should do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Render the requested page unchanged.
    Allow,
    /// Navigate to this path instead.
    Redirect(&'static str),
}

/// Guard with a configurable exclusion set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    exclusions: Vec<String>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUSIONS.iter().copied())
    }
}

impl RouteGuard {
    /// Guard excluding paths that start with `/<segment>` for each segment.
    ///
    /// Leading slashes and surrounding whitespace on segments are ignored;
    /// blank segments are dropped.
    pub fn new<I, S>(exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let exclusions = exclusions
            .into_iter()
            .map(|s| s.as_ref().trim().trim_start_matches('/').to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        Self { exclusions }
    }

    /// Default exclusions plus `extra`.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut guard = Self::default();
        guard.exclusions.extend(Self::new(extra).exclusions);
        guard
    }

    #[must_use]
    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    /// Whether `path` bypasses the guard entirely.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        let rest = path.strip_prefix('/').unwrap_or(path);
        self.exclusions.iter().any(|segment| rest.starts_with(segment.as_str()))
    }

    /// Decide a navigation to `path`.
    ///
    /// - excluded path: allow;
    /// - `/login` with a token: go home;
    /// - any other path without a token: go to `/login`;
    /// - otherwise allow.
    #[must_use]
    pub fn decide(&self, path: &str, token_present: bool) -> Navigation {
        if self.is_excluded(path) {
            return Navigation::Allow;
        }
        let is_public = path == LOGIN_PATH;
        match (is_public, token_present) {
            (true, true) => Navigation::Redirect(HOME_PATH),
            (false, false) => Navigation::Redirect(LOGIN_PATH),
            _ => Navigation::Allow,
        }
    }
}
