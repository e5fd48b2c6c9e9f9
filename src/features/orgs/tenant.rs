//! Tenant context resolution: after any authentication event, decide whether
//! the session is acting as an individual or inside an organization, using
//! the freshly fetched profile. The locally cached `user_type` never decides
//! routing; an individual may have been made an organization owner since the
//! cache was written.

use crate::app_lib::AppError;
use crate::features::auth::session::AuthContext;
use crate::features::auth::types::{UserSnapshot, UserType};
use crate::features::orgs::{client, types::Organization};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DashboardTarget {
    Individual,
    Organization,
}

impl DashboardTarget {
    pub fn path(&self) -> &'static str {
        match self {
            DashboardTarget::Individual => "/dashboard",
            DashboardTarget::Organization => "/organization/dashboard",
        }
    }
}

pub fn dashboard_for(user_type: UserType) -> DashboardTarget {
    match user_type {
        UserType::Individual => DashboardTarget::Individual,
        UserType::Organization => DashboardTarget::Organization,
    }
}

/// Routing decision for a freshly fetched snapshot. Takes no cached state on
/// purpose: whatever triggered the navigation is irrelevant once the server
/// has answered.
pub fn routing_target(fresh: &UserSnapshot) -> DashboardTarget {
    dashboard_for(fresh.user_type)
}

/// Outcome of fetching the organization record for an organization-typed
/// account.
#[derive(Clone, Debug, PartialEq)]
pub enum OrgResolution {
    Attached(Organization),
    /// Organization-typed but no organization record yet; a valid state that
    /// renders a degraded view rather than redirecting away.
    NoOrganizationYet,
    /// Transient failure; callers keep whatever they already had and show a
    /// non-blocking warning.
    Unavailable(AppError),
}

pub fn resolve_org_outcome(outcome: Result<Option<Organization>, AppError>) -> OrgResolution {
    match outcome {
        Ok(Some(organization)) => OrgResolution::Attached(organization),
        Ok(None) => OrgResolution::NoOrganizationYet,
        Err(err) if err.is_not_found() => OrgResolution::NoOrganizationYet,
        Err(err) => OrgResolution::Unavailable(err),
    }
}

#[derive(Clone, Debug)]
pub struct TenantResolution {
    pub user: UserSnapshot,
    pub target: DashboardTarget,
    /// Present only for organization-typed accounts.
    pub organization: Option<OrgResolution>,
}

/// Resolves the tenant context from server state. Fetches the authoritative
/// profile (overwriting the cached snapshot, `active_organization_id`
/// included), then the organization record when the account is
/// organization-typed.
pub async fn resolve(auth: &AuthContext) -> Result<TenantResolution, AppError> {
    let user = auth.refresh().await?;
    let target = routing_target(&user);

    let organization = match target {
        DashboardTarget::Organization => {
            let token = auth.token();
            Some(resolve_org_outcome(
                client::fetch_my_organization(token.as_deref()).await,
            ))
        }
        DashboardTarget::Individual => None,
    };

    Ok(TenantResolution {
        user,
        target,
        organization,
    })
}

/// Switches the active organization context (`None` selects the personal
/// context), then forces a full reload. The reload is the consistency
/// boundary: every context-dependent view re-derives from scratch instead of
/// being patched in place.
pub async fn switch_and_reload(
    organization_id: Option<String>,
    auth: &AuthContext,
) -> Result<(), AppError> {
    let token = auth.token();
    client::switch_organization(organization_id, token.as_deref()).await?;
    reload();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn reload() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn reload() {}

#[cfg(test)]
mod tests {
    use super::*;

    fn org(id: &str) -> Organization {
        Organization {
            id: id.to_string(),
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            logo: None,
            role: Some("owner".to_string()),
            created_at: None,
        }
    }

    fn snapshot(user_type: &str) -> UserSnapshot {
        serde_json::from_str(&format!(
            r#"{{"id":"u1","email":"a@b.com","userType":"{user_type}"}}"#
        ))
        .expect("snapshot")
    }

    #[test]
    fn resolution_is_idempotent() {
        let fresh = snapshot("organization");
        let first = routing_target(&fresh);
        let second = routing_target(&fresh);
        assert_eq!(first, second);

        let outcome_a = resolve_org_outcome(Ok(Some(org("org-1"))));
        let outcome_b = resolve_org_outcome(Ok(Some(org("org-1"))));
        assert_eq!(outcome_a, outcome_b);
    }

    #[test]
    fn missing_org_record_is_not_an_error() {
        assert_eq!(resolve_org_outcome(Ok(None)), OrgResolution::NoOrganizationYet);
        assert_eq!(
            resolve_org_outcome(Err(AppError::Http {
                status: 404,
                code: None,
                message: "Not found".to_string(),
            })),
            OrgResolution::NoOrganizationYet
        );
    }

    #[test]
    fn transient_failures_keep_prior_state() {
        let err = AppError::Network("connection refused".to_string());
        assert_eq!(
            resolve_org_outcome(Err(err.clone())),
            OrgResolution::Unavailable(err)
        );
    }

    #[test]
    fn fresh_profile_overrides_stale_cache() {
        // Cache still says individual; the server has since promoted the
        // account. Routing consults only the fresh snapshot.
        let cached = snapshot("individual");
        let fresh = snapshot("organization");
        assert_eq!(routing_target(&cached), DashboardTarget::Individual);
        assert_eq!(routing_target(&fresh), DashboardTarget::Organization);
        assert_eq!(routing_target(&fresh).path(), "/organization/dashboard");
    }

    #[test]
    fn individual_accounts_skip_the_org_fetch() {
        assert_eq!(
            dashboard_for(UserType::Individual),
            DashboardTarget::Individual
        );
        assert_eq!(dashboard_for(UserType::Individual).path(), "/dashboard");
    }
}
