//! Operator session state, the admin-view gate, and session events.
//!
//! [`SessionContext`] is an explicit context object handed to routes through
//! application state - no ambient globals. It owns the in-memory session, the
//! durable [`SessionStore`], and a broadcast channel so every open view (and
//! the navigation chrome) observes logins and logouts without a reload.
//!
//! # Gate
//!
//! Entering a protected view runs the gate:
//!
//! - no stored token -> [`GateState::Anonymous`] -> redirect to login
//! - stored token -> [`GateState::Verifying`] -> `GET /auth/verify`;
//!   success stores the returned identity and yields
//!   [`GateState::Authenticated`]; any failure clears the stored session,
//!   emits one [`SessionEvent::LoggedOut`], and yields [`GateState::Invalid`]
//!   -> redirect to login.
//!
//! Once authenticated, the state is trusted for the life of the process; a
//! backend `Unauthorized` answer on any later call invalidates it the same
//! way a failed verify does.

mod store;

pub use store::{SessionStore, StoredSession};

use std::sync::{Arc, RwLock};

use secrecy::SecretString;
use tokio::sync::broadcast;
use tracing::instrument;

use alkhair_core::{Operator, StoreError};

use crate::backend::StoreClient;

/// Capacity of the session event channel. Events are tiny and rare; a
/// lagging subscriber only misses chrome updates.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Broadcast notification of a session change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A login completed; carries the operator identity for display.
    LoggedIn(Operator),
    /// The session ended - explicit logout or credential invalidation.
    LoggedOut,
}

/// Where the gate landed for this view entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// No stored credential; go log in.
    Anonymous,
    /// A stored credential exists but has not been verified yet.
    Verifying,
    /// Verified; the operator identity came from the backend.
    Authenticated(Operator),
    /// Verification failed; the stored session has been cleared.
    Invalid,
}

/// In-memory session: the bearer token plus the operator it belongs to.
#[derive(Clone)]
pub struct Session {
    pub token: SecretString,
    pub operator: Operator,
}

enum SessionSlot {
    /// No session at all.
    Anonymous,
    /// Loaded from disk at startup, not yet verified against the backend.
    Unverified(Session),
    /// Verified (or freshly logged in).
    Authenticated(Session),
}

struct SessionContextInner {
    store: SessionStore,
    slot: RwLock<SessionSlot>,
    events: broadcast::Sender<SessionEvent>,
}

/// Shared, cloneable session context.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionContextInner>,
}

impl SessionContext {
    /// Create a context backed by the given durable store, loading any
    /// persisted session as unverified.
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        let slot = match store.load() {
            Some(stored) => SessionSlot::Unverified(Session {
                token: SecretString::from(stored.token),
                operator: stored.operator,
            }),
            None => SessionSlot::Anonymous,
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            inner: Arc::new(SessionContextInner {
                store,
                slot: RwLock::new(slot),
                events,
            }),
        }
    }

    /// Subscribe to login/logout notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// The authenticated operator, if any.
    #[must_use]
    pub fn current(&self) -> Option<Operator> {
        match &*self.read_slot() {
            SessionSlot::Authenticated(session) => Some(session.operator.clone()),
            _ => None,
        }
    }

    /// The bearer token of the authenticated session, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match &*self.read_slot() {
            SessionSlot::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        }
    }

    /// The gate state on entering a protected view, before any network call.
    #[must_use]
    pub fn entry_state(&self) -> GateState {
        match &*self.read_slot() {
            SessionSlot::Anonymous => GateState::Anonymous,
            SessionSlot::Unverified(_) => GateState::Verifying,
            SessionSlot::Authenticated(session) => {
                GateState::Authenticated(session.operator.clone())
            }
        }
    }

    /// Drive a `Verifying` entry to its terminal state.
    ///
    /// Verifies the stored token against the backend. On success the
    /// returned identity replaces the stored one. On any failure - network,
    /// rejection, anything - the stored session is cleared, one
    /// [`SessionEvent::LoggedOut`] is emitted, and the gate lands on
    /// [`GateState::Invalid`].
    #[instrument(skip(self, client))]
    pub async fn verify(&self, client: &StoreClient) -> GateState {
        let token = {
            match &*self.read_slot() {
                SessionSlot::Anonymous => return GateState::Anonymous,
                SessionSlot::Authenticated(session) => {
                    return GateState::Authenticated(session.operator.clone());
                }
                SessionSlot::Unverified(session) => session.token.clone(),
            }
        };

        match client.verify(&token).await {
            Ok(operator) => {
                let session = Session {
                    token,
                    operator: operator.clone(),
                };
                self.persist(&session);
                *self.write_slot() = SessionSlot::Authenticated(session);
                GateState::Authenticated(operator)
            }
            Err(err) => {
                tracing::info!(%err, "stored session failed verification");
                self.clear_session();
                GateState::Invalid
            }
        }
    }

    /// Log in with email/password credentials.
    ///
    /// On success the session is persisted, the slot becomes authenticated,
    /// and a [`SessionEvent::LoggedIn`] is broadcast.
    ///
    /// # Errors
    ///
    /// Propagates the backend's [`StoreError`]; state is untouched on
    /// failure.
    #[instrument(skip(self, client, password), fields(email = %email))]
    pub async fn login(
        &self,
        client: &StoreClient,
        email: &str,
        password: &str,
    ) -> Result<Operator, StoreError> {
        let (token, operator) = client.login(email, password).await?;

        let session = Session {
            token: SecretString::from(token),
            operator: operator.clone(),
        };
        self.persist(&session);
        *self.write_slot() = SessionSlot::Authenticated(session);
        let _ = self.inner.events.send(SessionEvent::LoggedIn(operator.clone()));

        Ok(operator)
    }

    /// Explicit logout: clear the stored session and broadcast the event.
    pub fn logout(&self) {
        self.clear_session();
    }

    /// React to an invalid-credential signal from any backend call.
    pub fn invalidate(&self) {
        self.clear_session();
    }

    /// Clear token and identity together and emit exactly one `LoggedOut`
    /// if there was a session to clear.
    fn clear_session(&self) {
        let had_session = {
            let mut slot = self.write_slot();
            match &*slot {
                SessionSlot::Anonymous => false,
                _ => {
                    *slot = SessionSlot::Anonymous;
                    true
                }
            }
        };

        if had_session {
            self.inner.store.clear();
            let _ = self.inner.events.send(SessionEvent::LoggedOut);
        }
    }

    fn persist(&self, session: &Session) {
        use secrecy::ExposeSecret;

        let stored = StoredSession {
            token: session.token.expose_secret().to_owned(),
            operator: session.operator.clone(),
        };
        if let Err(err) = self.inner.store.save(&stored) {
            tracing::warn!(%err, "failed to persist session; it will not survive a restart");
        }
    }

    fn read_slot(&self) -> std::sync::RwLockReadGuard<'_, SessionSlot> {
        self.inner.slot.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, SessionSlot> {
        self.inner.slot.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &tempfile::TempDir) -> SessionContext {
        SessionContext::new(SessionStore::new(dir.path().join("session.json")))
    }

    #[test]
    fn test_entry_state_without_stored_token_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir);
        assert_eq!(ctx.entry_state(), GateState::Anonymous);
        assert!(ctx.current().is_none());
        assert!(ctx.token().is_none());
    }

    #[test]
    fn test_entry_state_with_stored_token_is_verifying() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        store
            .save(&StoredSession {
                token: "tok".to_owned(),
                operator: Operator {
                    name: "Samir".to_owned(),
                    email: None,
                },
            })
            .unwrap();

        let ctx = context_in(&dir);
        assert_eq!(ctx.entry_state(), GateState::Verifying);
        // Unverified sessions expose no token to callers.
        assert!(ctx.token().is_none());
    }

    #[test]
    fn test_logout_without_session_emits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(&dir);
        let mut events = ctx.subscribe();

        ctx.logout();
        assert!(matches!(
            events.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }
}
