//! Organization dashboard. Entry resolves the tenant context from server
//! state: the fresh profile decides whether this surface applies at all, and
//! a missing organization record renders the degraded "no organization yet"
//! view instead of redirecting away.

use crate::components::{Alert, AlertKind, AppShell, Spinner};
use crate::features::auth::session::use_auth;
use crate::features::auth::RequireAuth;
use crate::features::orgs::tenant::{self, DashboardTarget, OrgResolution};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

#[component]
pub fn OrganizationDashboardPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AppShell>
                <OrganizationOverview />
            </AppShell>
        </RequireAuth>
    }
}

#[component]
fn OrganizationOverview() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (resolution, set_resolution) = signal::<Option<OrgResolution>>(None);
    let (warning, set_warning) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(true);

    let (requested, set_requested) = signal(false);
    Effect::new(move |_| {
        if requested.get_untracked() || !auth.is_authenticated.get_untracked() {
            return;
        }
        set_requested.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match tenant::resolve(&auth).await {
                Ok(resolved) => {
                    if resolved.target == DashboardTarget::Individual {
                        // The server says this account is not organization-typed,
                        // whatever the cache believed when navigation happened.
                        navigate(resolved.target.path(), Default::default());
                        return;
                    }
                    match resolved.organization {
                        Some(OrgResolution::Unavailable(err)) => {
                            set_warning.set(Some(err.to_string()));
                            set_resolution.set(None);
                        }
                        other => set_resolution.set(other),
                    }
                    set_loading.set(false);
                }
                Err(err) => {
                    log::warn!("Tenant resolution failed: {err}");
                    set_warning.set(Some(err.to_string()));
                    set_loading.set(false);
                }
            }
        });
    });

    view! {
        <div class="max-w-3xl mx-auto space-y-6">
            {move || {
                warning
                    .get()
                    .map(|message| view! { <Alert kind=AlertKind::Warning message=message /> })
            }}
            {move || {
                if loading.get() {
                    return view! {
                        <div class="mt-10 text-center">
                            <Spinner />
                            <p class="mt-3 text-sm text-gray-500 dark:text-gray-400">
                                "Loading your workspace..."
                            </p>
                        </div>
                    }
                    .into_any();
                }
                match resolution.get() {
                    Some(OrgResolution::Attached(org)) => view! {
                        <section>
                            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                {org.name.clone()}
                            </h1>
                            <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                                {format!("cardcrm.app/{}", org.slug)}
                            </p>
                            <div class="mt-6 grid gap-4 sm:grid-cols-2">
                                <div class="rounded-lg border border-gray-200 bg-white p-5 dark:border-gray-700 dark:bg-gray-800">
                                    <h2 class="text-sm font-semibold text-gray-900 dark:text-white">
                                        "Your role"
                                    </h2>
                                    <p class="mt-1 text-sm capitalize text-gray-500 dark:text-gray-400">
                                        {org.role.clone().unwrap_or_else(|| "owner".to_string())}
                                    </p>
                                </div>
                                <div class="rounded-lg border border-gray-200 bg-white p-5 dark:border-gray-700 dark:bg-gray-800">
                                    <h2 class="text-sm font-semibold text-gray-900 dark:text-white">
                                        "Members"
                                    </h2>
                                    <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                                        "Invite and manage your team."
                                    </p>
                                    <A
                                        href="/organization/members"
                                        {..}
                                        class="mt-2 inline-block text-sm text-blue-700 hover:underline dark:text-blue-500"
                                    >
                                        "Open members"
                                    </A>
                                </div>
                            </div>
                        </section>
                    }
                    .into_any(),
                    _ => {
                        if warning.get().is_some() {
                            // Transient failure: the warning banner above is
                            // the message; nothing to render below it.
                            view! {
                                <section class="text-center py-12">
                                    <p class="text-sm text-gray-500 dark:text-gray-400">
                                        "Workspace details are temporarily unavailable."
                                    </p>
                                </section>
                            }
                            .into_any()
                        } else {
                            // Organization-typed but no organization record
                            // yet: a valid state, shown as an empty workspace.
                            view! {
                                <section class="text-center py-12">
                                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                        "No organization yet"
                                    </h1>
                                    <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                                        "Your account is set up for an organization, but the workspace hasn't been created. Contact support if this persists."
                                    </p>
                                </section>
                            }
                            .into_any()
                        }
                    }
                }
            }}
        </div>
    }
}
