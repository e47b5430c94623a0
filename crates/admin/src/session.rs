//! The admin session gate.
//!
//! A small state machine over the local key-value store. The persisted
//! record is `{ "email": ..., "expiry": <epoch millis> }` under the
//! `luxe_admin` key; validity is a fixed 24-hour window from login, never
//! refreshed by activity. Expiry is checked lazily on every query, and a
//! stale or corrupt record is deleted as a side effect of being seen.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use luxe_core::{Email, KeyValueStore, StorageError};

/// Key the session record is stored under.
pub const SESSION_STORAGE_KEY: &str = "luxe_admin";

/// Hours an admin session stays valid after login.
pub const SESSION_VALIDITY_HOURS: i64 = 24;

/// Errors from gate mutations that write the session record.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The local store rejected the write.
    #[error("session record could not be persisted: {0}")]
    Storage(#[from] StorageError),

    /// The record could not be encoded.
    #[error("session record could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The client-cached admin session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Identity the session was established for.
    pub email: Email,
    /// Absolute expiry, stored as epoch milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expiry: DateTime<Utc>,
}

impl AdminSession {
    /// Whether the session is still valid at `now`.
    ///
    /// A session expiring exactly at `now` is no longer valid.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expiry
    }
}

/// Authorization state for the current client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessState {
    /// Not yet determined (nothing read from the store).
    #[default]
    Unknown,
    /// No valid session; admin views stay hidden.
    Guest,
    /// Valid, unexpired session; admin views may render.
    Admin,
}

/// Gate deciding whether admin views should render for this client.
///
/// Advisory only - privileged data operations are re-validated by the
/// platform's own access rules.
pub struct SessionGate<S> {
    store: S,
    state: AccessState,
    session: Option<AdminSession>,
}

impl<S> std::fmt::Debug for SessionGate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("state", &self.state)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> SessionGate<S> {
    /// Create a gate in the `Unknown` state without touching the store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            state: AccessState::Unknown,
            session: None,
        }
    }

    /// Create a gate and immediately resolve `Unknown` from the persisted
    /// record.
    #[must_use]
    pub fn load(store: S) -> Self {
        Self::load_at(store, Utc::now())
    }

    /// [`Self::load`] with an explicit clock, for tests.
    #[must_use]
    pub fn load_at(store: S, now: DateTime<Utc>) -> Self {
        let mut gate = Self::new(store);
        gate.resolve(now);
        gate
    }

    /// Read the persisted record and leave `Unknown`.
    fn resolve(&mut self, now: DateTime<Utc>) {
        let record = match self.store.get(SESSION_STORAGE_KEY) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(error = %err, "session record unreadable, treating as guest");
                self.state = AccessState::Guest;
                return;
            }
        };

        let Some(record) = record else {
            self.state = AccessState::Guest;
            return;
        };

        match serde_json::from_str::<AdminSession>(&record) {
            Ok(session) if session.is_valid_at(now) => {
                self.session = Some(session);
                self.state = AccessState::Admin;
            }
            Ok(_) => {
                self.discard_record("expired");
                self.state = AccessState::Guest;
            }
            Err(err) => {
                tracing::warn!(error = %err, "discarding corrupt session record");
                self.discard_record("corrupt");
                self.state = AccessState::Guest;
            }
        }
    }

    fn discard_record(&mut self, reason: &str) {
        self.session = None;
        if let Err(err) = self.store.remove(SESSION_STORAGE_KEY) {
            tracing::warn!(error = %err, reason, "failed to delete stale session record");
        }
    }

    /// Current state, re-checking expiry lazily.
    pub fn status(&mut self) -> AccessState {
        self.status_at(Utc::now())
    }

    /// [`Self::status`] with an explicit clock, for tests.
    pub fn status_at(&mut self, now: DateTime<Utc>) -> AccessState {
        match self.state {
            AccessState::Unknown => self.resolve(now),
            AccessState::Admin => {
                let expired = self
                    .session
                    .as_ref()
                    .is_none_or(|session| !session.is_valid_at(now));
                if expired {
                    self.discard_record("expired");
                    self.state = AccessState::Guest;
                }
            }
            AccessState::Guest => {}
        }
        self.state
    }

    /// The current session record, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&AdminSession> {
        self.session.as_ref()
    }

    /// Establish a fresh 24-hour session for `email` (successful login).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the record cannot be persisted; the
    /// gate stays in its previous state in that case.
    pub fn establish(&mut self, email: Email) -> Result<AdminSession, SessionError> {
        self.establish_at(email, Utc::now())
    }

    /// [`Self::establish`] with an explicit clock, for tests.
    pub fn establish_at(
        &mut self,
        email: Email,
        now: DateTime<Utc>,
    ) -> Result<AdminSession, SessionError> {
        let session = AdminSession {
            email,
            expiry: now + Duration::hours(SESSION_VALIDITY_HOURS),
        };
        let record = serde_json::to_string(&session)?;
        self.store.set(SESSION_STORAGE_KEY, &record)?;

        self.session = Some(session.clone());
        self.state = AccessState::Admin;
        Ok(session)
    }

    /// Explicit logout: delete the record and drop to `Guest`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the delete fails; the in-memory state
    /// still drops to `Guest`.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.session = None;
        self.state = AccessState::Guest;
        self.store.remove(SESSION_STORAGE_KEY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use luxe_platform::MemoryStore;

    fn email() -> Email {
        Email::parse("admin@store.com").unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_no_record_resolves_to_guest() {
        let mut gate = SessionGate::load_at(MemoryStore::new(), at(9));
        assert_eq!(gate.status_at(at(9)), AccessState::Guest);
    }

    #[test]
    fn test_valid_record_resolves_to_admin() {
        let store = MemoryStore::new();
        let login_time = at(9);
        {
            let mut gate = SessionGate::new(&store);
            gate.establish_at(email(), login_time).unwrap();
        }

        let mut gate = SessionGate::load_at(&store, at(10));
        assert_eq!(gate.status_at(at(10)), AccessState::Admin);
        assert_eq!(gate.session().unwrap().email, email());
    }

    #[test]
    fn test_session_window_is_exactly_24_hours() {
        let store = MemoryStore::new();
        let mut gate = SessionGate::new(&store);
        let session = gate.establish_at(email(), at(9)).unwrap();

        // valid strictly before expiry
        assert!(session.is_valid_at(session.expiry - Duration::seconds(1)));
        assert_eq!(
            gate.status_at(session.expiry - Duration::seconds(1)),
            AccessState::Admin
        );

        // invalid at and after expiry
        let mut gate = SessionGate::load_at(&store, at(9));
        assert_eq!(gate.status_at(session.expiry), AccessState::Guest);
    }

    #[test]
    fn test_stale_record_is_deleted_when_seen() {
        let store = MemoryStore::new();
        {
            let mut gate = SessionGate::new(&store);
            gate.establish_at(email(), at(9)).unwrap();
        }

        // two days later the record is stale
        let later = at(9) + Duration::days(2);
        let mut gate = SessionGate::load_at(&store, later);
        assert_eq!(gate.status_at(later), AccessState::Guest);
        assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_record_is_deleted_and_guest() {
        let store = MemoryStore::with_entries([(
            SESSION_STORAGE_KEY.to_owned(),
            "{broken".to_owned(),
        )]);
        let mut gate = SessionGate::load_at(&store, at(9));
        assert_eq!(gate.status_at(at(9)), AccessState::Guest);
        assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_expiry_is_checked_lazily_between_queries() {
        let store = MemoryStore::new();
        let mut gate = SessionGate::new(&store);
        gate.establish_at(email(), at(9)).unwrap();

        assert_eq!(gate.status_at(at(10)), AccessState::Admin);
        // same gate instance, queried after the window has passed
        assert_eq!(gate.status_at(at(9) + Duration::hours(25)), AccessState::Guest);
        assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_logout_deletes_record() {
        let store = MemoryStore::new();
        let mut gate = SessionGate::new(&store);
        gate.establish_at(email(), at(9)).unwrap();

        gate.logout().unwrap();
        assert_eq!(gate.status_at(at(9)), AccessState::Guest);
        assert_eq!(store.get(SESSION_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_record_uses_epoch_millis() {
        let session = AdminSession {
            email: email(),
            expiry: Utc.timestamp_millis_opt(1_772_000_000_000).unwrap(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["expiry"], 1_772_000_000_000_i64);
    }
}
