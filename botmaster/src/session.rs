//! Per-browser display state, keyed by a random session cookie.

use {
    rand::{rngs::OsRng, RngCore},
    std::{
        collections::HashMap,
        sync::{Mutex, PoisonError},
    },
};

/// Name of the cookie carrying the [SessionId].
pub const SESSION_COOKIE: &str = "botmaster_session";

/// Random 128-bit session identifier, hex encoded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);

        Self(hex::encode(bytes))
    }

    /// Accepts only values this server could have issued.
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed =
            value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit());

        well_formed.then(|| Self(value.to_ascii_lowercase()))
    }

    /// Finds a well-formed session id in a `Cookie` request header.
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(name, _)| *name == SESSION_COOKIE)
            .find_map(|(_, value)| Self::parse(value.trim()))
    }

    /// `Set-Cookie` header value for this id.
    pub fn cookie(&self) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.0
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    /// Whether the "how to use" panel is shown.
    pub show_help: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { show_help: true }
    }
}

/// Session states that differ from [SessionState::default]. Sessions that never
/// closed the help panel take no space.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `id`, or the fresh-session state for unknown ids.
    pub fn get(&self, id: &SessionId) -> SessionState {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .copied()
            .unwrap_or_default()
    }

    /// Hides the help panel for `id` until the session ends.
    pub fn close_help(&self, id: &SessionId) {
        self.update(id, |state| state.show_help = false);
    }

    fn update(&self, id: &SessionId, f: impl FnOnce(&mut SessionState)) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut state = sessions.get(id).copied().unwrap_or_default();
        f(&mut state);

        if state == SessionState::default() {
            sessions.remove(id);
        } else {
            sessions.insert(id.clone(), state);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
