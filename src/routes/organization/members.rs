//! Organization members page: joined members, pending invitations, and the
//! invite form.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::session::use_auth;
use crate::features::auth::RequireAuth;
use crate::features::orgs::{client as orgs_client, types::MembersData};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone)]
struct InviteInput {
    email: String,
    role: String,
}

#[component]
pub fn OrganizationMembersPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AppShell>
                <MembersContent />
            </AppShell>
        </RequireAuth>
    }
}

#[component]
fn MembersContent() -> impl IntoView {
    let auth = use_auth();

    let (members, set_members) = signal::<Option<MembersData>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);

    let load_members = move || {
        spawn_local(async move {
            let token = auth.token();
            match orgs_client::list_members(token.as_deref()).await {
                Ok(data) => set_members.set(Some(data)),
                Err(err) => {
                    log::warn!("Failed to load members: {err}");
                    set_load_error.set(Some(err.to_string()));
                }
            }
        });
    };

    let (requested, set_requested) = signal(false);
    Effect::new(move |_| {
        if requested.get_untracked() || !auth.is_authenticated.get_untracked() {
            return;
        }
        set_requested.set(true);
        load_members();
    });

    let (invite_email, set_invite_email) = signal(String::new());
    let (invite_role, set_invite_role) = signal("member".to_string());
    let (invite_error, set_invite_error) = signal::<Option<String>>(None);
    let (invite_sent, set_invite_sent) = signal(false);

    let invite_action = Action::new_local(move |input: &InviteInput| {
        let input = input.clone();
        async move {
            let token = auth.token();
            orgs_client::invite_member(&input.email, &input.role, token.as_deref()).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = invite_action.value().get() {
            match result {
                Ok(_) => {
                    set_invite_sent.set(true);
                    set_invite_email.set(String::new());
                    load_members();
                }
                Err(err) => set_invite_error.set(Some(err.to_string())),
            }
        }
    });

    let on_invite = move |event: SubmitEvent| {
        event.prevent_default();
        set_invite_error.set(None);
        set_invite_sent.set(false);

        let email_value = invite_email.get_untracked().trim().to_string();
        if !email_value.contains('@') {
            set_invite_error.set(Some("Please enter a valid email address.".to_string()));
            return;
        }

        invite_action.dispatch(InviteInput {
            email: email_value,
            role: invite_role.get_untracked(),
        });
    };

    view! {
        <div class="max-w-3xl mx-auto space-y-8">
            <section>
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Members"</h1>
                <p class="mt-1 text-sm text-gray-500 dark:text-gray-400">
                    "People in your organization and invitations still waiting on an answer."
                </p>
            </section>

            <section class="rounded-lg border border-gray-200 bg-white p-5 dark:border-gray-700 dark:bg-gray-800">
                <h2 class="text-sm font-semibold text-gray-900 dark:text-white">"Invite someone"</h2>
                <form class="mt-4 flex flex-col gap-3 sm:flex-row" on:submit=on_invite>
                    <input
                        id="invite_email"
                        type="email"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        placeholder="teammate@company.com"
                        prop:value=move || invite_email.get()
                        required
                        on:input=move |event| set_invite_email.set(event_target_value(&event))
                    />
                    <select
                        id="invite_role"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        on:change=move |event| set_invite_role.set(event_target_value(&event))
                    >
                        <option value="member" selected>"Member"</option>
                        <option value="admin">"Admin"</option>
                    </select>
                    <Button button_type="submit" disabled=invite_action.pending()>
                        "Send invite"
                    </Button>
                </form>
                {move || {
                    invite_sent
                        .get()
                        .then_some(view! {
                            <div class="mt-3">
                                <Alert kind=AlertKind::Success message="Invitation sent.".to_string() />
                            </div>
                        })
                }}
                {move || {
                    invite_error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-3">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
            </section>

            {move || {
                load_error
                    .get()
                    .map(|message| view! { <Alert kind=AlertKind::Warning message=message /> })
            }}

            {move || match members.get() {
                None => view! { <div class="text-center"><Spinner /></div> }.into_any(),
                Some(data) => view! {
                    <section class="space-y-6">
                        <div>
                            <h2 class="text-sm font-semibold text-gray-900 dark:text-white">
                                {format!("Joined ({})", data.joined.len())}
                            </h2>
                            <ul class="mt-3 divide-y divide-gray-100 rounded-lg border border-gray-200 bg-white dark:divide-gray-700 dark:border-gray-700 dark:bg-gray-800">
                                {data
                                    .joined
                                    .iter()
                                    .map(|member| {
                                        view! {
                                            <li class="flex items-center justify-between px-4 py-3">
                                                <div class="min-w-0">
                                                    <p class="truncate font-medium text-gray-900 dark:text-white">
                                                        {member.name.clone()}
                                                    </p>
                                                    <p class="truncate text-xs text-gray-500 dark:text-gray-400">
                                                        {member.email.clone()}
                                                    </p>
                                                </div>
                                                <span class="rounded bg-gray-100 px-2 py-0.5 text-xs capitalize text-gray-700 dark:bg-gray-700 dark:text-gray-200">
                                                    {member.role.clone()}
                                                </span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                        <div>
                            <h2 class="text-sm font-semibold text-gray-900 dark:text-white">
                                {format!("Pending invitations ({})", data.pending.len())}
                            </h2>
                            {if data.pending.is_empty() {
                                view! {
                                    <p class="mt-3 text-sm text-gray-500 dark:text-gray-400">
                                        "No pending invitations."
                                    </p>
                                }
                                .into_any()
                            } else {
                                view! {
                                    <ul class="mt-3 divide-y divide-gray-100 rounded-lg border border-gray-200 bg-white dark:divide-gray-700 dark:border-gray-700 dark:bg-gray-800">
                                        {data
                                            .pending
                                            .iter()
                                            .map(|invitation| {
                                                view! {
                                                    <li class="flex items-center justify-between px-4 py-3">
                                                        <p class="truncate text-sm text-gray-900 dark:text-white">
                                                            {invitation.email.clone()}
                                                        </p>
                                                        <span class="rounded bg-amber-100 px-2 py-0.5 text-xs capitalize text-amber-700 dark:bg-amber-900 dark:text-amber-200">
                                                            {invitation.role.clone()}
                                                        </span>
                                                    </li>
                                                }
                                            })
                                            .collect_view()}
                                    </ul>
                                }
                                .into_any()
                            }}
                        </div>
                    </section>
                }
                .into_any(),
            }}
        </div>
    }
}
