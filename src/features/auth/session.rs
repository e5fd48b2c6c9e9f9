//! Auth session state and context for the frontend. The session record
//! (bearer token + cached user snapshot) lives in durable storage as one
//! versioned document; the provider hydrates it once on mount and exposes
//! derived auth signals for guards and routes. Signal writes after every
//! store mutation are the cross-component "auth changed" broadcast.

use crate::app_lib::{read_versioned, write_versioned, AppError, BrowserLocal, KeyValue};
use crate::features::auth::types::{SessionRecord, UserSnapshot};
use crate::features::me;
use leptos::prelude::*;

const SESSION_KEY: &str = "cardcrm.session";
const SESSION_SCHEMA_VERSION: u32 = 1;

/// Synchronous wrapper over the durable session document. The token and the
/// user snapshot are written together; a reader can never observe one
/// updated without the other.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStore<S: KeyValue> {
    store: S,
}

impl<S: KeyValue> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Last persisted session, or `None` when absent, stale, or malformed.
    pub fn get(&self) -> Option<SessionRecord> {
        read_versioned(&self.store, SESSION_KEY, SESSION_SCHEMA_VERSION)
    }

    pub fn set(&self, token: &str, user: &UserSnapshot) -> Result<(), AppError> {
        let record = SessionRecord {
            token: token.to_string(),
            user: user.clone(),
        };
        write_versioned(&self.store, SESSION_KEY, SESSION_SCHEMA_VERSION, &record)
    }

    /// Overwrites the cached user snapshot, keeping the current token.
    pub fn update_user(&self, user: &UserSnapshot) -> Result<(), AppError> {
        match self.get() {
            Some(record) => self.set(&record.token, user),
            None => Err(AppError::Storage("No session to update.".to_string())),
        }
    }

    pub fn clear(&self) {
        self.store.remove(SESSION_KEY);
    }
}

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    store: SessionStore<BrowserLocal>,
    pub session: RwSignal<Option<SessionRecord>>,
    pub is_authenticated: Signal<bool>,
}

impl AuthContext {
    /// Builds a context around the provided session signal.
    fn new(store: SessionStore<BrowserLocal>, session: RwSignal<Option<SessionRecord>>) -> Self {
        let is_authenticated = Signal::derive(move || session.get().is_some());
        Self {
            store,
            session,
            is_authenticated,
        }
    }

    /// Persists the session, then broadcasts the change. A storage failure
    /// here is the fatal "cannot authenticate" case: the signal stays unset
    /// and the caller keeps the logged-out UI.
    pub fn log_in(&self, token: String, user: UserSnapshot) -> Result<(), AppError> {
        self.store.set(&token, &user)?;
        self.session.set(Some(SessionRecord { token, user }));
        Ok(())
    }

    /// Clears the persisted session and broadcasts the change. Navigation is
    /// the caller's responsibility.
    pub fn log_out(&self) {
        self.store.clear();
        self.session.set(None);
    }

    pub fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|session| session.as_ref().map(|record| record.token.clone()))
    }

    pub fn user(&self) -> Option<UserSnapshot> {
        self.session
            .with_untracked(|session| session.as_ref().map(|record| record.user.clone()))
    }

    /// Applies a server-confirmed snapshot over the cached copy, persisting
    /// token and user together.
    pub fn apply_user(&self, user: UserSnapshot) -> Result<(), AppError> {
        self.store.update_user(&user)?;
        if let Some(mut record) = self.session.get_untracked() {
            record.user = user;
            self.session.set(Some(record));
        }
        Ok(())
    }

    /// Re-fetches the profile and rewrites the cached copy. On failure the
    /// stale cache remains authoritative and the error goes to the caller.
    pub async fn refresh(&self) -> Result<UserSnapshot, AppError> {
        let token = self
            .token()
            .ok_or_else(|| AppError::Config("You are signed out.".to_string()))?;
        let user = me::client::fetch_profile(Some(&token)).await?;
        self.apply_user(user.clone())?;
        Ok(user)
    }
}

/// Provides auth context, hydrated once from durable storage.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let store = SessionStore::new(BrowserLocal);
    let session = RwSignal::new(store.get());
    let auth = AuthContext::new(store, session);
    provide_context(auth);

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        AuthContext::new(SessionStore::new(BrowserLocal), RwSignal::new(None))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::storage::MemoryStore;

    fn snapshot(id: &str, email: &str) -> UserSnapshot {
        serde_json::from_str(&format!(r#"{{"id":"{id}","email":"{email}"}}"#)).expect("snapshot")
    }

    #[test]
    fn login_round_trips_token_and_user() {
        let store = SessionStore::new(MemoryStore::default());
        let user = snapshot("u1", "a@b.com");

        store.set("jwt-abc", &user).expect("set");

        let record = store.get().expect("session present");
        assert_eq!(record.token, "jwt-abc");
        assert_eq!(record.user, user);
    }

    #[test]
    fn logout_leaves_both_absent() {
        let store = SessionStore::new(MemoryStore::default());
        store.set("jwt-abc", &snapshot("u1", "a@b.com")).expect("set");

        store.clear();

        assert_eq!(store.get(), None);
    }

    #[test]
    fn update_user_keeps_token() {
        let store = SessionStore::new(MemoryStore::default());
        store.set("jwt-abc", &snapshot("u1", "a@b.com")).expect("set");

        let refreshed = snapshot("u1", "new@b.com");
        store.update_user(&refreshed).expect("update");

        let record = store.get().expect("session present");
        assert_eq!(record.token, "jwt-abc");
        assert_eq!(record.user.email, "new@b.com");
    }

    #[test]
    fn update_user_without_session_is_an_error() {
        let store = SessionStore::new(MemoryStore::default());
        assert!(store.update_user(&snapshot("u1", "a@b.com")).is_err());
    }

    #[test]
    fn stale_schema_reads_as_logged_out() {
        let backing = MemoryStore::default();
        backing
            .write("cardcrm.session", r#"{"version":0,"data":{"token":"t"}}"#)
            .expect("write");
        let store = SessionStore::new(backing);

        assert_eq!(store.get(), None);
    }
}
