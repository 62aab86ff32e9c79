use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sid";

/// In-process one-shot message store, keyed by the client's session cookie.
/// A message is shown exactly once: `take` reads and clears atomically under
/// the same lock.
#[derive(Clone, Default)]
pub struct FlashStore {
    inner: Arc<Mutex<HashMap<Uuid, String>>>,
}

impl FlashStore {
    pub fn set(&self, sid: Uuid, message: impl Into<String>) {
        self.inner
            .lock()
            .expect("flash store lock poisoned")
            .insert(sid, message.into());
    }

    pub fn take(&self, sid: Uuid) -> Option<String> {
        self.inner
            .lock()
            .expect("flash store lock poisoned")
            .remove(&sid)
    }
}

/// Reads the session id from the jar, minting a new one (and its cookie)
/// when the client has none yet.
pub fn session_id(jar: CookieJar) -> (Uuid, CookieJar) {
    if let Some(sid) = jar
        .get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<Uuid>().ok())
    {
        return (sid, jar);
    }
    let sid = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, sid.to_string()))
        .http_only(true)
        .same_site(SameSite::Strict)
        .path("/")
        .build();
    (sid, jar.add(cookie))
}

/// Stashes a one-shot message for the session behind the jar, returning the
/// jar so the session cookie reaches the response.
pub fn stash(store: &FlashStore, jar: CookieJar, message: &str) -> CookieJar {
    let (sid, jar) = session_id(jar);
    store.set(sid, message);
    jar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_returns_message_exactly_once() {
        let store = FlashStore::default();
        let sid = Uuid::new_v4();
        store.set(sid, "Raqueta creada");
        assert_eq!(store.take(sid), Some("Raqueta creada".to_string()));
        assert_eq!(store.take(sid), None);
    }

    #[test]
    fn take_on_unknown_session_is_none() {
        let store = FlashStore::default();
        assert_eq!(store.take(Uuid::new_v4()), None);
    }

    #[test]
    fn later_set_overwrites_earlier_message() {
        let store = FlashStore::default();
        let sid = Uuid::new_v4();
        store.set(sid, "primera");
        store.set(sid, "segunda");
        assert_eq!(store.take(sid), Some("segunda".to_string()));
    }

    #[test]
    fn session_id_reuses_existing_cookie() {
        let sid = Uuid::new_v4();
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, sid.to_string()));
        let (got, _) = session_id(jar);
        assert_eq!(got, sid);
    }

    #[test]
    fn session_id_mints_cookie_when_absent() {
        let (sid, jar) = session_id(CookieJar::new());
        let cookie = jar.get(SESSION_COOKIE).expect("sid cookie set");
        assert_eq!(cookie.value(), sid.to_string());
        assert_eq!(cookie.http_only(), Some(true));
    }
}
