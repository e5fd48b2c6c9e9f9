//! Pending-verification handshake: the short-lived marker tying an email to
//! an in-progress signup. Created at signup submission, checked on entry to
//! the OTP page, extended by a successful resend, and deleted on completion
//! or expiry. Only one signup-in-flight is supported at a time.

use crate::app_lib::{now_millis, read_versioned, write_versioned, AppError, KeyValue};
use crate::features::auth::types::UserType;
use serde::{Deserialize, Serialize};

/// How long an OTP verification window stays open.
pub const SESSION_TIMEOUT_MS: u64 = 15 * 60 * 1000;
/// Failed OTP submissions allowed before the form locks until a resend.
pub const MAX_ATTEMPTS: u32 = 5;

const HANDSHAKE_KEY: &str = "cardcrm.pending_verification";
const HANDSHAKE_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandshakeRecord {
    pub email: String,
    pub timestamp: u64,
    pub account_type: UserType,
}

/// Outcome of checking the handshake on entry to the OTP page.
#[derive(Clone, Debug, PartialEq)]
pub enum HandshakeCheck {
    /// No signup in flight; the visitor belongs back on the signup page.
    NoSession,
    /// The window lapsed; the record has been removed.
    Expired,
    Active {
        email: String,
        account_type: UserType,
        remaining_millis: u64,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HandshakeTracker<S: KeyValue> {
    store: S,
}

impl<S: KeyValue> HandshakeTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Starts a new handshake, overwriting any prior one.
    pub fn begin(&self, email: &str, account_type: UserType) -> Result<(), AppError> {
        self.begin_at(email, account_type, now_millis())
    }

    pub fn begin_at(&self, email: &str, account_type: UserType, now: u64) -> Result<(), AppError> {
        let record = HandshakeRecord {
            email: email.to_string(),
            timestamp: now,
            account_type,
        };
        write_versioned(&self.store, HANDSHAKE_KEY, HANDSHAKE_SCHEMA_VERSION, &record)
    }

    pub fn check(&self) -> HandshakeCheck {
        self.check_at(now_millis())
    }

    /// Reads and time-checks the record. An expired record is removed before
    /// the caller sees the outcome, so a follow-up check reports `NoSession`.
    pub fn check_at(&self, now: u64) -> HandshakeCheck {
        let Some(record) = read_versioned::<HandshakeRecord, _>(
            &self.store,
            HANDSHAKE_KEY,
            HANDSHAKE_SCHEMA_VERSION,
        ) else {
            return HandshakeCheck::NoSession;
        };

        let elapsed = now.saturating_sub(record.timestamp);
        if elapsed > SESSION_TIMEOUT_MS {
            self.store.remove(HANDSHAKE_KEY);
            return HandshakeCheck::Expired;
        }

        HandshakeCheck::Active {
            email: record.email,
            account_type: record.account_type,
            remaining_millis: SESSION_TIMEOUT_MS - elapsed,
        }
    }

    /// Resets the window after a successful OTP resend.
    pub fn touch(&self) -> Result<(), AppError> {
        self.touch_at(now_millis())
    }

    pub fn touch_at(&self, now: u64) -> Result<(), AppError> {
        let Some(mut record) = read_versioned::<HandshakeRecord, _>(
            &self.store,
            HANDSHAKE_KEY,
            HANDSHAKE_SCHEMA_VERSION,
        ) else {
            return Err(AppError::Storage("No verification in progress.".to_string()));
        };
        record.timestamp = now;
        write_versioned(&self.store, HANDSHAKE_KEY, HANDSHAKE_SCHEMA_VERSION, &record)
    }

    /// Deletes the record after successful verification or an explicit exit.
    pub fn complete(&self) {
        self.store.remove(HANDSHAKE_KEY);
    }
}

/// In-memory failed-attempt counter for the OTP form. Never persisted; the
/// count survives only as long as the page, and only a successful resend
/// resets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttemptCounter {
    failures: u32,
}

impl AttemptCounter {
    pub fn record_failure(&mut self) -> u32 {
        self.failures = self.failures.saturating_add(1);
        self.failures
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn remaining(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.failures)
    }

    pub fn is_locked(&self) -> bool {
        self.failures >= MAX_ATTEMPTS
    }

    pub fn reset(&mut self) {
        self.failures = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::storage::MemoryStore;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn check_just_before_expiry_is_active() {
        let tracker = HandshakeTracker::new(MemoryStore::default());
        tracker
            .begin_at("a@b.com", UserType::Individual, T0)
            .expect("begin");

        let outcome = tracker.check_at(T0 + SESSION_TIMEOUT_MS - 1_000);
        assert_eq!(
            outcome,
            HandshakeCheck::Active {
                email: "a@b.com".to_string(),
                account_type: UserType::Individual,
                remaining_millis: 1_000,
            }
        );
    }

    #[test]
    fn check_past_expiry_removes_record() {
        let tracker = HandshakeTracker::new(MemoryStore::default());
        tracker
            .begin_at("a@b.com", UserType::Individual, T0)
            .expect("begin");

        assert_eq!(
            tracker.check_at(T0 + SESSION_TIMEOUT_MS + 1),
            HandshakeCheck::Expired
        );
        // The record is gone, so a second look reports no session at all.
        assert_eq!(tracker.check_at(T0 + SESSION_TIMEOUT_MS + 2), HandshakeCheck::NoSession);
    }

    #[test]
    fn touch_extends_the_window() {
        let tracker = HandshakeTracker::new(MemoryStore::default());
        tracker
            .begin_at("a@b.com", UserType::Organization, T0)
            .expect("begin");

        tracker.touch_at(T0 + SESSION_TIMEOUT_MS).expect("touch");

        match tracker.check_at(T0 + SESSION_TIMEOUT_MS + 1) {
            HandshakeCheck::Active {
                remaining_millis, ..
            } => assert_eq!(remaining_millis, SESSION_TIMEOUT_MS - 1),
            other => panic!("expected active, got {other:?}"),
        }
    }

    #[test]
    fn begin_overwrites_prior_handshake() {
        let tracker = HandshakeTracker::new(MemoryStore::default());
        tracker
            .begin_at("first@b.com", UserType::Individual, T0)
            .expect("begin");
        tracker
            .begin_at("second@b.com", UserType::Organization, T0 + 5_000)
            .expect("begin");

        match tracker.check_at(T0 + 6_000) {
            HandshakeCheck::Active {
                email,
                account_type,
                ..
            } => {
                assert_eq!(email, "second@b.com");
                assert_eq!(account_type, UserType::Organization);
            }
            other => panic!("expected active, got {other:?}"),
        }
    }

    #[test]
    fn signup_verify_lifecycle() {
        let tracker = HandshakeTracker::new(MemoryStore::default());
        tracker
            .begin_at("a@b.com", UserType::Individual, T0)
            .expect("begin");

        assert!(matches!(
            tracker.check_at(T0 + 1_000),
            HandshakeCheck::Active { .. }
        ));

        tracker.complete();

        assert_eq!(tracker.check_at(T0 + 2_000), HandshakeCheck::NoSession);
    }

    #[test]
    fn malformed_record_reads_as_no_session() {
        let backing = MemoryStore::default();
        backing
            .write("cardcrm.pending_verification", "{broken")
            .expect("write");
        let tracker = HandshakeTracker::new(backing);

        assert_eq!(tracker.check_at(T0), HandshakeCheck::NoSession);
    }

    #[test]
    fn attempt_cap_locks_after_five_failures() {
        let mut counter = AttemptCounter::default();
        for _ in 0..4 {
            counter.record_failure();
            assert!(!counter.is_locked());
        }

        counter.record_failure();
        assert!(counter.is_locked());
        assert_eq!(counter.remaining(), 0);

        // Only a successful resend unlocks the form.
        counter.reset();
        assert!(!counter.is_locked());
        assert_eq!(counter.remaining(), MAX_ATTEMPTS);
    }
}
