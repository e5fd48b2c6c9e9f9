//! Invitation acceptance flow logic: the tab-scoped markers that carry an
//! invite across the login/signup/verify detour, the flow state machine, and
//! the auto-accept gate for invited signups.

use crate::app_lib::{read_versioned, write_versioned, AppError, KeyValue};
use crate::features::invitations::types::{Invitation, InvitationStatus};

const PENDING_INVITE_KEY: &str = "cardcrm.pending_invite";
const JUST_SIGNED_UP_KEY: &str = "cardcrm.just_signed_up";
const MARKER_SCHEMA_VERSION: u32 = 1;

/// Tab-scoped markers written before redirecting an unauthenticated visitor
/// away from an invite link, and consumed right after verification.
#[derive(Clone, Copy, Debug, Default)]
pub struct InviteMarkers<S: KeyValue> {
    store: S,
}

impl<S: KeyValue> InviteMarkers<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Remembers the invite token so the login/signup detour cannot lose it.
    pub fn remember_invite(&self, token: &str) -> Result<(), AppError> {
        write_versioned(
            &self.store,
            PENDING_INVITE_KEY,
            MARKER_SCHEMA_VERSION,
            &token.to_string(),
        )
    }

    pub fn pending_invite(&self) -> Option<String> {
        read_versioned(&self.store, PENDING_INVITE_KEY, MARKER_SCHEMA_VERSION)
    }

    /// Set immediately after a successful invited signup so the acceptance
    /// flow knows it may finish without a second manual click.
    pub fn mark_just_signed_up(&self) -> Result<(), AppError> {
        write_versioned(&self.store, JUST_SIGNED_UP_KEY, MARKER_SCHEMA_VERSION, &true)
    }

    pub fn just_signed_up(&self) -> bool {
        read_versioned(&self.store, JUST_SIGNED_UP_KEY, MARKER_SCHEMA_VERSION).unwrap_or(false)
    }

    /// Removes both markers; called once they are consumed or declined.
    pub fn clear(&self) {
        self.store.remove(PENDING_INVITE_KEY);
        self.store.remove(JUST_SIGNED_UP_KEY);
    }
}

/// Flow states for the acceptance page. `Pending` is the only non-terminal
/// state besides `Loading`. `Declined` may carry no invitation when the
/// decline shortcut ran before any details were fetched.
#[derive(Clone, Debug, PartialEq)]
pub enum InviteFlowState {
    Loading,
    NotFound,
    Pending(Invitation),
    Expired(Invitation),
    Accepted(Invitation),
    Declined(Option<Invitation>),
}

/// Maps a fetched invitation to its display state. Expiry wins over a stale
/// `pending` status from the server.
pub fn classify_invitation(invitation: Invitation, now_millis: u64) -> InviteFlowState {
    match invitation.status {
        InvitationStatus::Accepted => InviteFlowState::Accepted(invitation),
        InvitationStatus::Declined => InviteFlowState::Declined(Some(invitation)),
        InvitationStatus::Expired => InviteFlowState::Expired(invitation),
        InvitationStatus::Pending => {
            if invitation.is_expired(now_millis) {
                InviteFlowState::Expired(invitation)
            } else {
                InviteFlowState::Pending(invitation)
            }
        }
    }
}

/// Auto-accept fires only for a just-completed signup whose stored invite
/// token matches the route, and only while the invitation is still pending.
/// Everything else requires an explicit click.
pub fn should_auto_accept(
    just_signed_up: bool,
    pending_token: Option<&str>,
    route_token: &str,
    state: &InviteFlowState,
) -> bool {
    just_signed_up
        && pending_token == Some(route_token)
        && matches!(state, InviteFlowState::Pending(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_lib::storage::MemoryStore;
    use chrono::TimeZone;

    const NOW: u64 = 1_700_000_000_000;

    fn invitation(status: InvitationStatus, expires_offset_ms: i64) -> Invitation {
        Invitation {
            id: Some("inv-1".to_string()),
            email: "a@b.com".to_string(),
            role: "member".to_string(),
            token: Some("TOK123".to_string()),
            status,
            expires_at: chrono::Utc
                .timestamp_millis_opt(NOW as i64 + expires_offset_ms)
                .unwrap(),
            invited_by_name: Some("Grace".to_string()),
            organization_name: Some("Acme".to_string()),
            organization_slug: None,
        }
    }

    #[test]
    fn invite_marker_survives_the_detour() {
        let markers = InviteMarkers::new(MemoryStore::default());
        markers.remember_invite("TOK123").expect("remember");

        assert_eq!(markers.pending_invite().as_deref(), Some("TOK123"));

        markers.clear();
        assert_eq!(markers.pending_invite(), None);
        assert!(!markers.just_signed_up());
    }

    #[test]
    fn auto_accept_requires_all_three_conditions() {
        let pending = classify_invitation(invitation(InvitationStatus::Pending, 86_400_000), NOW);

        assert!(should_auto_accept(true, Some("TOK123"), "TOK123", &pending));

        // Not fresh from signup.
        assert!(!should_auto_accept(false, Some("TOK123"), "TOK123", &pending));
        // Stored token belongs to a different invitation.
        assert!(!should_auto_accept(true, Some("OTHER"), "TOK123", &pending));
        // No marker at all.
        assert!(!should_auto_accept(true, None, "TOK123", &pending));
    }

    #[test]
    fn auto_accept_never_fires_on_terminal_states() {
        let accepted = classify_invitation(invitation(InvitationStatus::Accepted, 86_400_000), NOW);
        let expired = classify_invitation(invitation(InvitationStatus::Pending, -1), NOW);

        assert!(!should_auto_accept(true, Some("TOK123"), "TOK123", &accepted));
        assert!(!should_auto_accept(true, Some("TOK123"), "TOK123", &expired));
    }

    #[test]
    fn client_side_expiry_beats_stale_pending_status() {
        let state = classify_invitation(invitation(InvitationStatus::Pending, -1_000), NOW);
        assert!(matches!(state, InviteFlowState::Expired(_)));
    }

    #[test]
    fn terminal_statuses_classify_directly() {
        assert!(matches!(
            classify_invitation(invitation(InvitationStatus::Accepted, 86_400_000), NOW),
            InviteFlowState::Accepted(_)
        ));
        assert!(matches!(
            classify_invitation(invitation(InvitationStatus::Declined, 86_400_000), NOW),
            InviteFlowState::Declined(Some(_))
        ));
        assert!(matches!(
            classify_invitation(invitation(InvitationStatus::Expired, 86_400_000), NOW),
            InviteFlowState::Expired(_)
        ));
    }

    #[test]
    fn invited_signup_consumes_markers_once() {
        let markers = InviteMarkers::new(MemoryStore::default());
        markers.remember_invite("TOK123").expect("remember");
        markers.mark_just_signed_up().expect("mark");

        let pending = classify_invitation(invitation(InvitationStatus::Pending, 86_400_000), NOW);
        let fire = should_auto_accept(
            markers.just_signed_up(),
            markers.pending_invite().as_deref(),
            "TOK123",
            &pending,
        );
        assert!(fire);

        markers.clear();
        let fire_again = should_auto_accept(
            markers.just_signed_up(),
            markers.pending_invite().as_deref(),
            "TOK123",
            &pending,
        );
        assert!(!fire_again);
    }
}
