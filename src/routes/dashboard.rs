//! Individual dashboard: profile summary and editing, plus the organizations
//! the user belongs to as a member. The cached snapshot is refreshed from the
//! server on entry; membership is listed for explicit switching only and
//! never changes the primary context by itself.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::session::use_auth;
use crate::features::auth::RequireAuth;
use crate::features::me::{client as me_client, types::ProfileUpdate};
use crate::features::orgs::{client as orgs_client, tenant, types::UserOrganization};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;

fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .map(|window| window.confirm_with_message(message).unwrap_or(false))
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        false
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AppShell>
                <DashboardContent />
            </AppShell>
        </RequireAuth>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();

    let banner = move || {
        let query = query.get();
        if query.get("verified").as_deref() == Some("true") {
            Some("Email verified. Welcome to Card CRM!".to_string())
        } else if query.get("joined").as_deref() == Some("true") {
            Some("You joined the organization. Find it in your organizations list below.".to_string())
        } else {
            None
        }
    };

    // Refresh the cached snapshot once on entry; a failure leaves the stale
    // cache in place and the page still renders from it.
    let (refreshed, set_refreshed) = signal(false);
    Effect::new(move |_| {
        if refreshed.get_untracked() || !auth.is_authenticated.get_untracked() {
            return;
        }
        set_refreshed.set(true);
        spawn_local(async move {
            if let Err(err) = auth.refresh().await {
                log::warn!("Profile refresh failed, keeping cached snapshot: {err}");
            }
        });
    });

    let (orgs, set_orgs) = signal::<Option<Vec<UserOrganization>>>(None);
    let (orgs_error, set_orgs_error) = signal::<Option<String>>(None);
    let load_orgs = move || {
        spawn_local(async move {
            let token = auth.token();
            match orgs_client::list_my_organizations(token.as_deref()).await {
                Ok(list) => set_orgs.set(Some(list)),
                Err(err) if err.is_not_found() => set_orgs.set(Some(Vec::new())),
                Err(err) => {
                    log::warn!("Failed to load organizations: {err}");
                    set_orgs_error.set(Some(err.to_string()));
                }
            }
        });
    };

    let (orgs_requested, set_orgs_requested) = signal(false);
    Effect::new(move |_| {
        if orgs_requested.get_untracked() {
            return;
        }
        set_orgs_requested.set(true);
        load_orgs();
    });

    let (switch_error, set_switch_error) = signal::<Option<String>>(None);
    let on_switch = move |organization_id: Option<String>| {
        spawn_local(async move {
            if let Err(err) = tenant::switch_and_reload(organization_id, &auth).await {
                log::warn!("Failed to switch organization: {err}");
                set_switch_error.set(Some(err.to_string()));
            }
        });
    };

    let leave_action = Action::new_local(move |organization_id: &String| {
        let organization_id = organization_id.clone();
        async move {
            let token = auth.token();
            orgs_client::leave_organization(&organization_id, token.as_deref()).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = leave_action.value().get() {
            match result {
                Ok(_) => load_orgs(),
                Err(err) => set_orgs_error.set(Some(err.to_string())),
            }
        }
    });

    let on_leave = move |organization_id: String, name: String| {
        if confirm(&format!("Leave {name}? You will lose access to its shared contacts.")) {
            leave_action.dispatch(organization_id);
        }
    };

    let user = move || auth.session.get().map(|record| record.user);

    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            {move || {
                banner()
                    .map(|message| view! { <Alert kind=AlertKind::Success message=message /> })
            }}
            <section>
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                    {move || {
                        user()
                            .map(|user| format!("Welcome, {}", user.display_name()))
                            .unwrap_or_else(|| "Welcome".to_string())
                    }}
                </h1>
                {move || {
                    user()
                        .and_then(|user| user.subscription_status.clone().map(|status| (user, status)))
                        .map(|(user, status)| {
                            let credits = user
                                .credits_remaining
                                .map(|credits| format!(" · {credits} credits"))
                                .unwrap_or_default();
                            view! {
                                <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                                    {format!("Subscription: {status}{credits}")}
                                </p>
                            }
                        })
                }}
            </section>

            <ProfileSection />

            <section>
                <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                    "Your organizations"
                </h2>
                <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                    "Workspaces you belong to as a member. Switching reloads the app in that context."
                </p>
                {move || {
                    switch_error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-3">
                                    <Alert kind=AlertKind::Warning message=message />
                                </div>
                            }
                        })
                }}
                {move || {
                    orgs_error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-3">
                                    <Alert kind=AlertKind::Warning message=message />
                                </div>
                            }
                        })
                }}
                {move || match orgs.get() {
                    None => view! { <div class="mt-4"><Spinner /></div> }.into_any(),
                    Some(list) if list.is_empty() => view! {
                        <p class="mt-4 text-sm text-gray-500 dark:text-gray-400">
                            "You're not a member of any organization yet."
                        </p>
                    }
                    .into_any(),
                    Some(list) => view! {
                        <ul class="mt-4 divide-y divide-gray-100 rounded-lg border border-gray-200 bg-white dark:divide-gray-700 dark:border-gray-700 dark:bg-gray-800">
                            {list
                                .into_iter()
                                .map(|org| {
                                    let switch_id = org.id.clone();
                                    let leave_id = org.id.clone();
                                    let leave_name = org.name.clone();
                                    let is_active = user()
                                        .and_then(|user| user.active_organization_id)
                                        .as_deref()
                                        == Some(org.id.as_str());
                                    view! {
                                        <li class="flex items-center justify-between gap-4 px-4 py-3">
                                            <div class="min-w-0">
                                                <p class="truncate font-medium text-gray-900 dark:text-white">
                                                    {org.name.clone()}
                                                    {is_active.then_some(view! {
                                                        <span class="ml-2 rounded bg-blue-100 px-2 py-0.5 text-xs text-blue-700 dark:bg-blue-900 dark:text-blue-200">
                                                            "active"
                                                        </span>
                                                    })}
                                                </p>
                                                <p class="text-xs capitalize text-gray-500 dark:text-gray-400">
                                                    {org.role.clone()}
                                                </p>
                                            </div>
                                            <div class="flex shrink-0 gap-2">
                                                <button
                                                    type="button"
                                                    class="rounded-lg border border-gray-200 px-3 py-1.5 text-sm text-gray-700 hover:bg-gray-100 dark:border-gray-600 dark:text-gray-200 dark:hover:bg-gray-700"
                                                    on:click=move |_| on_switch(Some(switch_id.clone()))
                                                >
                                                    "Switch"
                                                </button>
                                                <button
                                                    type="button"
                                                    class="rounded-lg border border-red-200 px-3 py-1.5 text-sm text-red-600 hover:bg-red-50 dark:border-red-800 dark:text-red-400 dark:hover:bg-red-900/20"
                                                    on:click=move |_| on_leave(leave_id.clone(), leave_name.clone())
                                                >
                                                    "Leave"
                                                </button>
                                            </div>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any(),
                }}
                {move || {
                    user()
                        .and_then(|user| user.active_organization_id)
                        .map(|_| {
                            view! {
                                <div class="mt-4">
                                    <button
                                        type="button"
                                        class="text-sm text-blue-700 hover:underline dark:text-blue-500"
                                        on:click=move |_| on_switch(None)
                                    >
                                        "Switch back to personal context"
                                    </button>
                                </div>
                            }
                        })
                }}
            </section>
        </div>
    }
}

#[component]
fn ProfileSection() -> impl IntoView {
    let auth = use_auth();
    // RequireAuth redirects before this renders without a session; an empty
    // snapshot just keeps the form inert in the meantime.
    let current = auth.user().unwrap_or_default();

    let (first_name, set_first_name) = signal(current.first_name.clone());
    let (last_name, set_last_name) = signal(current.last_name.clone());
    let (phone_number, set_phone_number) = signal(current.phone_number.clone().unwrap_or_default());
    let (bio, set_bio) = signal(current.bio.clone().unwrap_or_default());
    let (saved, set_saved) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let save_action = Action::new_local(move |update: &ProfileUpdate| {
        let update = update.clone();
        async move {
            let token = auth.token();
            me_client::update_profile(&update, token.as_deref()).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = save_action.value().get() {
            match result {
                Ok(user) => {
                    // Server answer overwrites the cache; views re-derive.
                    if let Err(err) = auth.apply_user(user) {
                        set_error.set(Some(err.to_string()));
                        return;
                    }
                    set_saved.set(true);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_saved.set(false);
        set_error.set(None);

        let first_value = first_name.get_untracked().trim().to_string();
        let last_value = last_name.get_untracked().trim().to_string();
        if first_value.is_empty() || last_value.is_empty() {
            set_error.set(Some("First and last name are required.".to_string()));
            return;
        }

        let phone_value = phone_number.get_untracked().trim().to_string();
        let bio_value = bio.get_untracked().trim().to_string();
        save_action.dispatch(ProfileUpdate {
            first_name: Some(first_value),
            last_name: Some(last_value),
            phone_number: (!phone_value.is_empty()).then_some(phone_value),
            bio: (!bio_value.is_empty()).then_some(bio_value),
        });
    };

    view! {
        <section class="rounded-lg border border-gray-200 bg-white p-5 dark:border-gray-700 dark:bg-gray-800">
            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">"Profile"</h2>
            <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                {current.email.clone()}
            </p>
            <form class="mt-4 space-y-4" on:submit=on_submit>
                <div class="grid gap-4 sm:grid-cols-2">
                    <div>
                        <label
                            class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                            for="profile_first_name"
                        >
                            "First name"
                        </label>
                        <input
                            id="profile_first_name"
                            type="text"
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                            prop:value=move || first_name.get()
                            on:input=move |event| set_first_name.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label
                            class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                            for="profile_last_name"
                        >
                            "Last name"
                        </label>
                        <input
                            id="profile_last_name"
                            type="text"
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                            prop:value=move || last_name.get()
                            on:input=move |event| set_last_name.set(event_target_value(&event))
                        />
                    </div>
                </div>
                <div>
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="profile_phone"
                    >
                        "Phone number"
                    </label>
                    <input
                        id="profile_phone"
                        type="tel"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        prop:value=move || phone_number.get()
                        on:input=move |event| set_phone_number.set(event_target_value(&event))
                    />
                </div>
                <div>
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="profile_bio"
                    >
                        "Bio"
                    </label>
                    <textarea
                        id="profile_bio"
                        rows="3"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        prop:value=move || bio.get()
                        on:input=move |event| set_bio.set(event_target_value(&event))
                    ></textarea>
                </div>
                <Button button_type="submit" disabled=save_action.pending()>
                    "Save changes"
                </Button>
                {move || {
                    saved
                        .get()
                        .then_some(view! {
                            <Alert kind=AlertKind::Success message="Profile updated.".to_string() />
                        })
                }}
                {move || {
                    error
                        .get()
                        .map(|message| view! { <Alert kind=AlertKind::Error message=message /> })
                }}
            </form>
        </section>
    }
}
