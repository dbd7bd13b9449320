use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration as TimeDuration;

pub const STATE_COOKIE: &str = "oauth_state";

// Long enough to get through the consent dialog.
const STATE_TTL_SECS: i64 = 600;

/// Remembers the issued state in an encrypted cookie for the callback to check.
pub fn remember_state(jar: PrivateCookieJar, state: &str) -> PrivateCookieJar {
    let cookie = Cookie::build((STATE_COOKIE, state.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(STATE_TTL_SECS));

    jar.add(cookie)
}

/// Reads the issued state and clears the cookie; a state is good for one callback only.
pub fn take_state(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    let state = jar.get(STATE_COOKIE).map(|c| c.value().to_owned());

    let removal_cookie = Cookie::build((STATE_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::seconds(-1));

    (jar.add(removal_cookie), state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    #[test]
    fn remembered_state_is_read_back() {
        let jar = PrivateCookieJar::new(Key::generate());
        let jar = remember_state(jar, "abc123");

        let (_, state) = take_state(jar);
        assert_eq!(state.as_deref(), Some("abc123"));
    }

    #[test]
    fn empty_jar_has_no_state() {
        let (_, state) = take_state(PrivateCookieJar::new(Key::generate()));
        assert_eq!(state, None);
    }
}
