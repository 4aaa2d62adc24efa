use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const SESSION_USER_KEY: &str = "session_user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Owner,
    Barber,
    Admin,
}

impl UserRole {
    /// Salon-side accounts handle incoming booking requests.
    pub fn is_vendor(self) -> bool {
        matches!(self, UserRole::Owner | UserRole::Barber | UserRole::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub role: UserRole,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn is_vendor(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.role.is_vendor())
    }
}

/// Persists the signed-in user's tokens. Login and logout live elsewhere;
/// the booking client only reads the access token.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Session;
    fn save(&self, session: Session);
    fn clear(&self);

    fn access_token(&self) -> Option<String> {
        self.get().access_token.filter(|token| !token.is_empty())
    }
}

/// Process-local session, used during server rendering and in tests.
#[derive(Debug, Default)]
pub struct MemorySession {
    inner: RwLock<Session>,
}

impl MemorySession {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: RwLock::new(Session {
                access_token: Some(token.into()),
                ..Session::default()
            }),
        }
    }
}

impl SessionStore for MemorySession {
    fn get(&self) -> Session {
        self.inner
            .read()
            .map(|session| session.clone())
            .unwrap_or_default()
    }

    fn save(&self, session: Session) {
        if let Ok(mut current) = self.inner.write() {
            *current = session;
        }
    }

    fn clear(&self) {
        self.save(Session::default());
    }
}

/// Browser session kept in `localStorage`. Tokens are stored as raw strings
/// so other scripts on the page can read them unchanged.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageSession;

#[cfg(target_arch = "wasm32")]
impl SessionStore for LocalStorageSession {
    fn get(&self) -> Session {
        use gloo::storage::{LocalStorage, Storage};

        let raw = LocalStorage::raw();
        let read = |key: &str| raw.get_item(key).ok().flatten();
        Session {
            access_token: read(ACCESS_TOKEN_KEY),
            refresh_token: read(REFRESH_TOKEN_KEY),
            user: LocalStorage::get(SESSION_USER_KEY).ok(),
        }
    }

    fn save(&self, session: Session) {
        use gloo::storage::{LocalStorage, Storage};

        let raw = LocalStorage::raw();
        for (key, value) in [
            (ACCESS_TOKEN_KEY, session.access_token),
            (REFRESH_TOKEN_KEY, session.refresh_token),
        ] {
            let _ = match value {
                Some(value) => raw.set_item(key, &value),
                None => raw.remove_item(key),
            };
        }
        match session.user {
            Some(user) => {
                if let Err(err) = LocalStorage::set(SESSION_USER_KEY, &user) {
                    tracing::warn!(%err, "could not persist session user");
                }
            }
            None => LocalStorage::delete(SESSION_USER_KEY),
        }
    }

    fn clear(&self) {
        self.save(Session::default());
    }
}

/// Picks the storage that fits the target: `localStorage` in the browser,
/// memory everywhere else.
pub fn default_store() -> Arc<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(LocalStorageSession)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Arc::new(MemorySession::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_session_round_trips_and_clears() {
        let store = MemorySession::default();
        assert_eq!(store.access_token(), None);

        store.save(Session {
            access_token: Some("abc".into()),
            refresh_token: Some("def".into()),
            user: Some(SessionUser {
                id: "u1".into(),
                role: UserRole::Customer,
                email: None,
            }),
        });
        assert_eq!(store.access_token().as_deref(), Some("abc"));
        assert_eq!(store.get().user.map(|u| u.role), Some(UserRole::Customer));

        store.clear();
        assert_eq!(store.get(), Session::default());
    }

    #[test]
    fn empty_token_counts_as_signed_out() {
        let store = MemorySession::with_token("");
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn only_salon_accounts_are_vendors() {
        let mut session = Session::default();
        assert!(!session.is_vendor());

        session.user = Some(SessionUser {
            id: "u2".into(),
            role: UserRole::Customer,
            email: None,
        });
        assert!(!session.is_vendor());

        session.user = session.user.map(|user| SessionUser {
            role: UserRole::Barber,
            ..user
        });
        assert!(session.is_vendor());
    }
}
