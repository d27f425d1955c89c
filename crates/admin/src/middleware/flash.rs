use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// One-shot feedback shown on the next page load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    #[serde(rename = "type")]
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    fn encode(&self) -> String {
        urlencoding::encode(&format!("{}:{}", self.kind.as_str(), self.message)).into_owned()
    }

    fn decode(raw: &str) -> Option<Self> {
        let decoded = urlencoding::decode(raw).ok()?;
        let (kind, message) = decoded.split_once(':')?;

        let kind = match kind {
            "success" => FlashKind::Success,
            "error" => FlashKind::Error,
            _ => return None,
        };

        Some(Self {
            kind,
            message: message.to_string(),
        })
    }
}

fn flash_cookie(value: String) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(flash_cookie(flash.encode()))
}

/// Reads the pending flash and schedules its removal. An unreadable flash
/// cookie is removed as well.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = Flash::decode(cookie.value());
    (jar.remove(flash_cookie(String::new())), flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_survives_cookie_encoding() {
        let flash = Flash::error("Deposit with reference a:b not found");
        let encoded = flash.encode();

        assert!(!encoded.contains(' '));
        assert_eq!(Flash::decode(&encoded), Some(flash));
    }

    #[test]
    fn flash_is_taken_once() {
        let jar = set_flash(CookieJar::new(), Flash::success("Deposit Approved"));

        let (jar, first) = take_flash(jar);
        assert_eq!(first, Some(Flash::success("Deposit Approved")));

        let (_, second) = take_flash(jar);
        assert_eq!(second, None);
    }

    #[test]
    fn unknown_flash_is_ignored() {
        assert_eq!(Flash::decode("warning%3Ahello"), None);
        assert_eq!(Flash::decode("no-separator"), None);
    }

    #[test]
    fn unreadable_flash_cookie_is_removed() {
        let jar = CookieJar::new().add(flash_cookie("warning%3Ahello".to_string()));

        let (jar, flash) = take_flash(jar);
        assert_eq!(flash, None);
        assert!(jar.get(FLASH_COOKIE).is_none());
    }
}
