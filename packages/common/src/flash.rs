use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

/// Cookie carrying the pending flash message, consumed on the next render.
pub const FLASH_COOKIE: &str = "flash";

/// Severity tag for a flash message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Error,
    Success,
}

/// A one-shot user-facing status message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }
}

/// Store a flash message in the jar, replacing any pending one.
///
/// The payload is hex-encoded JSON so the cookie value never needs quoting.
pub fn push(jar: CookieJar, flash: &Flash) -> CookieJar {
    let Ok(payload) = serde_json::to_vec(flash) else {
        return jar;
    };
    jar.add(
        Cookie::build((FLASH_COOKIE, hex::encode(payload)))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Take the pending flash message out of the jar, if any.
///
/// The cookie is removed either way, so a message renders at most once.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|c| hex::decode(c.value()).ok())
        .and_then(|raw| serde_json::from_slice(&raw).ok());
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    (jar, flash)
}
