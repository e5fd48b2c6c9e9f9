//! Auth feature module covering registration, OTP verification, password
//! reset, and session state. It keeps authentication logic out of the UI and
//! must stay aligned with backend contract expectations. This module touches
//! security boundaries and must avoid logging secrets or token material.
//!
//! Flow Overview: Signup registers the account and opens a 15-minute
//! verification handshake. The OTP page consumes the handshake and, on
//! success, stores the returned `{token, user}` session and routes by
//! account type. Login hydrates the same session record directly.

pub(crate) mod client;
mod guards;
pub(crate) mod handshake;
pub(crate) mod session;
pub(crate) mod types;

pub(crate) use guards::RequireAuth;
