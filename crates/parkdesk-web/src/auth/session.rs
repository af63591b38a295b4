//! Cookie-backed client state: the session token, the signed-in profile and
//! one-shot flash notices.

use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use base64::Engine;

use crate::models::User;

const FLASH_COOKIE: &str = "parkdesk_flash";
const SESSION_DAYS: i64 = 30;

/// Which page family a session belongs to. User and admin sessions are
/// stored under separate cookies and never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realm {
    User,
    Admin,
}

impl Realm {
    pub fn token_cookie(self) -> &'static str {
        match self {
            Realm::User => "parkdesk_token",
            Realm::Admin => "parkdesk_admin_token",
        }
    }

    pub fn profile_cookie(self) -> &'static str {
        match self {
            Realm::User => "parkdesk_user",
            Realm::Admin => "parkdesk_admin",
        }
    }

    /// Where a visitor without a session is sent.
    pub fn entry_path(self) -> &'static str {
        match self {
            Realm::User => "/",
            Realm::Admin => "/secret-admin-panel",
        }
    }
}

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .max_age(time::Duration::days(SESSION_DAYS))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name)
        .path("/")
        .max_age(time::Duration::ZERO)
        .http_only(true)
        .build()
}

pub fn token(jar: &CookieJar, realm: Realm) -> Option<String> {
    jar.get(realm.token_cookie())
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// Stores the token and profile returned by a successful login.
pub fn sign_in(jar: CookieJar, realm: Realm, token: String, user: &User, secure: bool) -> CookieJar {
    jar.add(base_cookie(realm.token_cookie(), token, secure))
        .add(profile_cookie(realm, user, secure))
}

pub fn profile_cookie(realm: Realm, user: &User, secure: bool) -> Cookie<'static> {
    let json = serde_json::to_vec(user).unwrap_or_default();
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
    base_cookie(realm.profile_cookie(), encoded, secure)
}

pub fn profile(jar: &CookieJar, realm: Realm) -> Option<User> {
    let raw = jar.get(realm.profile_cookie())?.value().to_string();
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(raw)
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

pub fn sign_out(jar: CookieJar, realm: Realm) -> CookieJar {
    jar.add(removal(realm.token_cookie()))
        .add(removal(realm.profile_cookie()))
}

/// Queues a notice to be shown once on the next rendered page.
pub fn flash(jar: CookieJar, message: &str) -> CookieJar {
    let encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(message);
    jar.add(
        Cookie::build((FLASH_COOKIE, encoded))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build(),
    )
}

pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<String>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };
    let message = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(cookie.value())
        .ok()
        .and_then(|b| String::from_utf8(b).ok())
        .filter(|m| !m.is_empty());
    (jar.add(removal(FLASH_COOKIE)), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_survives_cookie_encoding() {
        let user = User {
            full_name: Some("Asha; Rao, \"A\"".to_string()),
            email: "a@b.c".to_string(),
            ..Default::default()
        };
        let jar = sign_in(CookieJar::new(), Realm::User, "tok".to_string(), &user, false);

        assert_eq!(token(&jar, Realm::User).as_deref(), Some("tok"));
        assert_eq!(token(&jar, Realm::Admin), None);
        let stored = profile(&jar, Realm::User).unwrap();
        assert_eq!(stored.display_name(), "Asha; Rao, \"A\"");
    }

    #[test]
    fn sign_out_blanks_both_cookies() {
        let jar = sign_in(CookieJar::new(), Realm::Admin, "tok".to_string(), &User::default(), false);
        let jar = sign_out(jar, Realm::Admin);
        assert_eq!(token(&jar, Realm::Admin), None);
        assert!(profile(&jar, Realm::Admin).is_none());
    }

    #[test]
    fn flash_is_read_once() {
        let jar = flash(CookieJar::new(), "Booking successful!");
        let (jar, message) = take_flash(jar);
        assert_eq!(message.as_deref(), Some("Booking successful!"));

        let (_, again) = take_flash(jar);
        assert_eq!(again, None);
    }
}
