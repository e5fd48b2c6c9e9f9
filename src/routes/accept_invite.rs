//! Invitation acceptance flow. Unauthenticated visitors have the invite
//! token parked in tab storage before being sent through login, so the
//! signup/verify detour cannot lose it. A just-verified signup whose parked
//! token matches the route is accepted automatically; anything else requires
//! an explicit click. Accepting lands on the personal dashboard — new
//! members discover the organization from their own organization list.

use crate::app_lib::{now_millis, BrowserSession};
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::session::use_auth;
use crate::features::invitations::{
    client,
    flow::{classify_invitation, should_auto_accept, InviteFlowState, InviteMarkers},
    types::Invitation,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};

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
pub fn AcceptInvitePage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let params = use_params_map();
    let query = use_query_map();
    let markers = InviteMarkers::new(BrowserSession);

    let route_token = move || params.get_untracked().get("token").unwrap_or_default();

    let (state, set_state) = signal(InviteFlowState::Loading);
    let (error, set_error) = signal::<Option<String>>(None);
    let (auto_tried, set_auto_tried) = signal(false);

    let fetch_invitation = move || {
        let token_value = route_token();
        spawn_local(async move {
            let bearer = auth.token();
            match client::fetch_by_token(&token_value, bearer.as_deref()).await {
                Ok(Some(invitation)) => {
                    set_state.set(classify_invitation(invitation, now_millis()));
                }
                Ok(None) => set_state.set(InviteFlowState::NotFound),
                Err(err) => {
                    log::warn!("Failed to load invitation: {err}");
                    set_error.set(Some(err.to_string()));
                    set_state.set(InviteFlowState::NotFound);
                }
            }
        });
    };

    let accept_action = Action::new_local(move |token_value: &String| {
        let token_value = token_value.clone();
        async move {
            let bearer = auth.token();
            client::accept(&token_value, bearer.as_deref()).await
        }
    });

    let decline_action = Action::new_local(move |token_value: &String| {
        let token_value = token_value.clone();
        async move {
            let bearer = auth.token();
            client::decline(&token_value, bearer.as_deref()).await
        }
    });

    let navigate_accepted = navigate.clone();
    Effect::new(move |_| {
        if let Some(result) = accept_action.value().get() {
            match result {
                Ok(_) => {
                    markers.clear();
                    navigate_accepted("/dashboard?joined=true", Default::default());
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    Effect::new(move |_| {
        if let Some(result) = decline_action.value().get() {
            match result {
                Ok(_) => {
                    markers.clear();
                    // Flip the local state; no refetch needed for a terminal
                    // transition we just performed ourselves.
                    let prior = match state.get_untracked() {
                        InviteFlowState::Pending(invitation) => Some(invitation),
                        _ => None,
                    };
                    set_state.set(InviteFlowState::Declined(prior));
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    // Entry: park the token and detour through login when unauthenticated,
    // honor the decline shortcut, otherwise fetch the invitation.
    let navigate_entry = navigate.clone();
    let (entered, set_entered) = signal(false);
    Effect::new(move |_| {
        if entered.get_untracked() {
            return;
        }
        set_entered.set(true);

        let token_value = route_token();
        if token_value.is_empty() {
            navigate_entry("/login", Default::default());
            return;
        }

        if !auth.is_authenticated.get_untracked() {
            if let Err(err) = markers.remember_invite(&token_value) {
                log::warn!("Could not park invite token: {err}");
            }
            navigate_entry(
                &format!("/login?redirect=/accept-invite/{token_value}"),
                Default::default(),
            );
            return;
        }

        let wants_decline = query.get_untracked().get("action").as_deref() == Some("decline");
        if wants_decline && confirm("Are you sure you want to decline this invitation?") {
            decline_action.dispatch(token_value);
            return;
        }

        fetch_invitation();
    });

    // Auto-accept: fires at most once, and only when every gate holds.
    Effect::new(move |_| {
        let current = state.get();
        if auto_tried.get_untracked() {
            return;
        }
        let token_value = route_token();
        if should_auto_accept(
            markers.just_signed_up(),
            markers.pending_invite().as_deref(),
            &token_value,
            &current,
        ) {
            set_auto_tried.set(true);
            markers.clear();
            accept_action.dispatch(token_value);
        }
    });

    let processing =
        Signal::derive(move || accept_action.pending().get() || decline_action.pending().get());

    let on_accept = move |_| {
        set_error.set(None);
        accept_action.dispatch(route_token());
    };

    let on_decline = move |_| {
        if !confirm("Are you sure you want to decline this invitation?") {
            return;
        }
        set_error.set(None);
        decline_action.dispatch(route_token());
    };

    view! {
        <AppShell>
            <div class="max-w-xl mx-auto">
                {move || {
                    error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mb-4">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
                {move || match state.get() {
                    InviteFlowState::Loading => view! {
                        <div class="mt-10 text-center"><Spinner /></div>
                    }
                    .into_any(),
                    InviteFlowState::NotFound => view! {
                        <div class="text-center py-12">
                            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                "Invitation not found"
                            </h1>
                            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                                "This invitation link is invalid or has been removed."
                            </p>
                            <div class="mt-6">
                                <A
                                    href="/dashboard"
                                    {..}
                                    class="text-sm text-blue-700 hover:underline dark:text-blue-500"
                                >
                                    "Go to dashboard"
                                </A>
                            </div>
                        </div>
                    }
                    .into_any(),
                    InviteFlowState::Pending(invitation) => view! {
                        <PendingInvitation
                            invitation=invitation
                            processing=processing
                            on_accept=Callback::new(on_accept)
                            on_decline=Callback::new(on_decline)
                        />
                    }
                    .into_any(),
                    InviteFlowState::Expired(invitation) => view! {
                        <div class="text-center py-12">
                            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                "Invitation expired"
                            </h1>
                            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                                {format!(
                                    "This invitation expired on {}. Ask {} for a new one.",
                                    invitation.expires_at.format("%B %d, %Y"),
                                    invitation
                                        .invited_by_name
                                        .clone()
                                        .unwrap_or_else(|| "the organization".to_string()),
                                )}
                            </p>
                        </div>
                    }
                    .into_any(),
                    InviteFlowState::Accepted(_) => view! {
                        <div class="text-center py-12">
                            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                "Already accepted"
                            </h1>
                            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                                "You've already joined this organization."
                            </p>
                            <div class="mt-6">
                                <A
                                    href="/dashboard"
                                    {..}
                                    class="text-sm text-blue-700 hover:underline dark:text-blue-500"
                                >
                                    "Go to dashboard"
                                </A>
                            </div>
                        </div>
                    }
                    .into_any(),
                    InviteFlowState::Declined(_) => view! {
                        <div class="text-center py-12">
                            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                                "Invitation declined"
                            </h1>
                            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                                "You declined this invitation."
                            </p>
                            <div class="mt-6">
                                <A
                                    href="/dashboard"
                                    {..}
                                    class="text-sm text-blue-700 hover:underline dark:text-blue-500"
                                >
                                    "Go to dashboard"
                                </A>
                            </div>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </AppShell>
    }
}

#[component]
fn PendingInvitation(
    invitation: Invitation,
    processing: Signal<bool>,
    on_accept: Callback<leptos::ev::MouseEvent>,
    on_decline: Callback<leptos::ev::MouseEvent>,
) -> impl IntoView {
    let organization = invitation
        .organization_name
        .clone()
        .unwrap_or_else(|| "an organization".to_string());
    let invited_by = invitation
        .invited_by_name
        .clone()
        .unwrap_or_else(|| "A teammate".to_string());
    let expires = invitation.expires_at.format("%B %d, %Y").to_string();

    view! {
        <div class="rounded-lg border border-gray-200 bg-white p-6 dark:border-gray-700 dark:bg-gray-800">
            <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                {format!("Join {organization}")}
            </h1>
            <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                {format!(
                    "{invited_by} has invited you to join {organization} as a {}.",
                    invitation.role
                )}
            </p>
            <dl class="mt-6 space-y-3 border-t border-gray-100 pt-4 text-sm dark:border-gray-700">
                <div class="flex justify-between">
                    <dt class="text-gray-500 dark:text-gray-400">"Organization"</dt>
                    <dd class="font-medium text-gray-900 dark:text-white">{organization.clone()}</dd>
                </div>
                <div class="flex justify-between">
                    <dt class="text-gray-500 dark:text-gray-400">"Your role"</dt>
                    <dd class="font-medium capitalize text-gray-900 dark:text-white">
                        {invitation.role.clone()}
                    </dd>
                </div>
                <div class="flex justify-between">
                    <dt class="text-gray-500 dark:text-gray-400">"Expires"</dt>
                    <dd class="text-gray-500 dark:text-gray-400">{expires}</dd>
                </div>
            </dl>
            <div class="mt-6 flex gap-3">
                <Button disabled=processing on_click=on_accept>
                    "Accept invitation"
                </Button>
                <button
                    type="button"
                    class="rounded-lg border border-gray-200 px-5 py-2.5 text-sm font-medium text-gray-700 hover:bg-gray-100 dark:border-gray-600 dark:text-gray-200 dark:hover:bg-gray-700"
                    disabled=move || processing.get()
                    on:click=move |event| on_decline.run(event)
                >
                    "Decline"
                </button>
            </div>
        </div>
    }
}
