//! Cookie-backed blob store.
//!
//! The production backend: the whole history list lives in one cookie,
//! value = URL-encoded JSON. Every write refreshes the cookie with a
//! fixed max-age, so the history expires a week after the last change.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use tracing::warn;

use crate::types::errors::StorageError;

use super::blob::BlobStore;

/// Default cookie name; overridable through [`CookieSettings`].
pub const HISTORY_COOKIE_NAME: &str = "searchHistory";

/// Cookie lifetime from the last write.
pub const HISTORY_COOKIE_MAX_AGE: Duration = Duration::days(7);

/// Attributes applied to the history cookie on every write.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    /// Set the `Secure` attribute. Off for plain-HTTP development.
    pub secure: bool,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            name: HISTORY_COOKIE_NAME.to_string(),
            secure: false,
        }
    }
}

/// Blob store over an axum cookie jar.
///
/// Handlers construct one from the request jar, run a store operation,
/// then take the jar back via [`CookieBlobStore::into_jar`] so the
/// refreshed cookie rides out on the response.
pub struct CookieBlobStore {
    jar: CookieJar,
    settings: CookieSettings,
}

impl CookieBlobStore {
    pub fn new(jar: CookieJar, settings: CookieSettings) -> Self {
        Self { jar, settings }
    }

    /// Consumes the store, returning the jar with any pending `Set-Cookie`.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn build_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.settings.name.clone(), value))
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.settings.secure)
            .http_only(true)
            .max_age(HISTORY_COOKIE_MAX_AGE)
            .build()
    }
}

impl BlobStore for CookieBlobStore {
    fn read(&self) -> Option<String> {
        let raw = self.jar.get(&self.settings.name)?.value().to_string();
        match urlencoding::decode(&raw) {
            Ok(decoded) => Some(decoded.into_owned()),
            Err(e) => {
                // Treated as absent; the store recovers with empty history.
                warn!("history cookie is not valid percent-encoding: {}", e);
                None
            }
        }
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        let encoded = urlencoding::encode(value).into_owned();
        let cookie = self.build_cookie(encoded);
        self.jar = self.jar.clone().add(cookie);
        Ok(())
    }
}
