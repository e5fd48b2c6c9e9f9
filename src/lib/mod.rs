//! Shared frontend utilities for API access, configuration, errors, storage,
//! and the wall clock.
//!
//! ## Core Authentication Flows
//!
//! ### Signup & OTP Verification
//!
//! 1. **Register:** The client POSTs to `/auth/register` (or
//!    `/auth/register-organization`) and records a pending-verification
//!    handshake in tab-scoped storage.
//! 2. **Verify:** The OTP page checks the handshake (15-minute window),
//!    submits the 6-digit code to `/auth/verify-email`, and on success stores
//!    the returned `{token, user}` session atomically.
//! 3. **Route:** The verified account is routed by its type — organization
//!    signups to the organization dashboard, individual signups to the
//!    personal dashboard or straight into a pending invitation.
//!
//! ### Session & Tenant Context
//!
//! The durable session record (bearer token + cached user snapshot) is a
//! cache, never authoritative: dashboard surfaces re-fetch the profile and
//! overwrite the cached copy before making any routing decision.
//!
//! Centralizing these helpers keeps network behavior consistent and avoids
//! duplicated logic in routes and features.

pub(crate) mod api;
pub(crate) mod clock;
pub(crate) mod config;
pub(crate) mod errors;
pub(crate) mod storage;

pub(crate) const GIT_COMMIT_HASH: &str = env!("CARDCRM_WEB_GIT_SHA");

pub(crate) use api::{get_json, get_optional_json, post_empty, post_json, put_json};
pub(crate) use clock::now_millis;
pub(crate) use errors::AppError;
pub(crate) use storage::{
    read_versioned, write_versioned, BrowserLocal, BrowserSession, KeyValue,
};
