//! Domain-level frontend features (auth, organizations, invitations,
//! payments, profile) and their shared logic. Routes import these modules to
//! keep view code focused while keeping session and API handling in
//! dedicated feature areas.

pub(crate) mod auth;
pub(crate) mod invitations;
pub(crate) mod me;
pub(crate) mod orgs;
pub(crate) mod payments;
