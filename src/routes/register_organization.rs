//! Organization signup route. The backend creates the owner account and the
//! organization record atomically; the client only validates, derives the
//! slug, and opens the verification handshake.

use crate::app_lib::BrowserSession;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::handshake::HandshakeTracker;
use crate::features::auth::types::{RegisterOrganizationRequest, UserType};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

const MIN_PASSWORD_LENGTH: usize = 6;
const MIN_SLUG_LENGTH: usize = 3;

/// Derives a URL-safe slug from an organization name: lowercase, runs of
/// non-alphanumerics collapsed to single hyphens, no leading or trailing
/// hyphen.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut previous_hyphen = true;
    for character in name.chars() {
        let lowered = character.to_ascii_lowercase();
        if lowered.is_ascii_lowercase() || lowered.is_ascii_digit() {
            slug.push(lowered);
            previous_hyphen = false;
        } else if !previous_hyphen {
            slug.push('-');
            previous_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

fn valid_slug(slug: &str) -> bool {
    slug.len() >= MIN_SLUG_LENGTH
        && slug
            .chars()
            .all(|character| character.is_ascii_lowercase() || character.is_ascii_digit() || character == '-')
}

#[derive(Clone)]
struct OrgSignupInput {
    full_name: String,
    email: String,
    password: String,
    org_name: String,
    org_slug: String,
}

#[component]
pub fn RegisterOrganizationPage() -> impl IntoView {
    let navigate = use_navigate();
    let (full_name, set_full_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (org_name, set_org_name) = signal(String::new());
    let (org_slug, set_org_slug) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let signup_action = Action::new_local(move |input: &OrgSignupInput| {
        let input = input.clone();
        async move {
            let mut parts = input.full_name.splitn(2, ' ');
            let first_name = parts.next().unwrap_or_default().to_string();
            let last_name = parts.next().unwrap_or_default().to_string();
            let request = RegisterOrganizationRequest {
                email: input.email.clone(),
                password: input.password,
                first_name,
                last_name,
                org_name: input.org_name,
                org_slug: input.org_slug,
            };
            client::register_organization(&request)
                .await
                .map(|_| input.email)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(email_value) => {
                    let tracker = HandshakeTracker::new(BrowserSession);
                    if let Err(err) = tracker.begin(&email_value, UserType::Organization) {
                        set_error.set(Some(err.to_string()));
                        return;
                    }
                    navigate("/verify-otp", Default::default());
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    // Keep the slug tracking the name until the user edits it by hand.
    let on_org_name_input = move |event| {
        let name = event_target_value(&event);
        set_org_slug.set(slugify(&name));
        set_org_name.set(name);
    };

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let name_value = full_name.get_untracked().trim().to_string();
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        let confirm_value = confirm_password.get_untracked();
        let org_name_value = org_name.get_untracked().trim().to_string();
        let org_slug_value = org_slug.get_untracked().trim().to_string();

        if name_value.len() < 2 {
            set_error.set(Some("Full name is required.".to_string()));
            return;
        }
        if !email_value.contains('@') {
            set_error.set(Some("Please enter a valid email address.".to_string()));
            return;
        }
        if password_value.len() < MIN_PASSWORD_LENGTH {
            set_error.set(Some(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters."
            )));
            return;
        }
        if password_value != confirm_value {
            set_error.set(Some("Passwords don't match.".to_string()));
            return;
        }
        if org_name_value.len() < 2 {
            set_error.set(Some("Organization name is required.".to_string()));
            return;
        }
        if !valid_slug(&org_slug_value) {
            set_error.set(Some(
                "Slug must be at least 3 characters of lowercase letters, numbers, and hyphens."
                    .to_string(),
            ));
            return;
        }

        signup_action.dispatch(OrgSignupInput {
            full_name: name_value,
            email: email_value,
            password: password_value,
            org_name: org_name_value,
            org_slug: org_slug_value,
        });
    };

    view! {
        <AppShell>
            <form class="max-w-md mx-auto" on:submit=on_submit>
                <h1 class="mb-2 text-2xl font-semibold text-gray-900 dark:text-white">
                    "Register your organization"
                </h1>
                <p class="mb-6 text-sm text-gray-500 dark:text-gray-400">
                    "Create the workspace and its owner account in one step."
                </p>
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="full_name"
                    >
                        "Your full name"
                    </label>
                    <input
                        id="full_name"
                        type="text"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        autocomplete="name"
                        required
                        on:input=move |event| set_full_name.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="email"
                    >
                        "Work email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        autocomplete="email"
                        placeholder="name@company.com"
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div class="grid gap-5 sm:grid-cols-2 mb-5">
                    <div>
                        <label
                            class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                            for="password"
                        >
                            "Password"
                        </label>
                        <input
                            id="password"
                            type="password"
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                            autocomplete="new-password"
                            required
                            on:input=move |event| set_password.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label
                            class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                            for="confirm_password"
                        >
                            "Confirm password"
                        </label>
                        <input
                            id="confirm_password"
                            type="password"
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                            autocomplete="new-password"
                            required
                            on:input=move |event| {
                                set_confirm_password.set(event_target_value(&event));
                            }
                        />
                    </div>
                </div>
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="org_name"
                    >
                        "Organization name"
                    </label>
                    <input
                        id="org_name"
                        type="text"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        required
                        on:input=on_org_name_input
                    />
                </div>
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="org_slug"
                    >
                        "Workspace URL"
                    </label>
                    <input
                        id="org_slug"
                        type="text"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 font-mono dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        prop:value=move || org_slug.get()
                        required
                        on:input=move |event| set_org_slug.set(event_target_value(&event))
                    />
                    <p class="mt-1 text-xs text-gray-500 dark:text-gray-400">
                        "Lowercase letters, numbers, and hyphens."
                    </p>
                </div>
                <Button button_type="submit" disabled=signup_action.pending()>
                    "Create organization"
                </Button>
                {move || {
                    signup_action
                        .pending()
                        .get()
                        .then_some(view! { <div class="mt-4"><Spinner /></div> })
                }}
                {move || {
                    error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-4">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
            </form>
        </AppShell>
    }
}

#[cfg(test)]
mod tests {
    use super::{slugify, valid_slug};

    #[test]
    fn slugify_collapses_and_trims() {
        assert_eq!(slugify("Acme Corp"), "acme-corp");
        assert_eq!(slugify("  Acme -- Corp!  "), "acme-corp");
        assert_eq!(slugify("Café 24/7"), "caf-24-7");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn slug_validation() {
        assert!(valid_slug("acme-corp"));
        assert!(valid_slug("a2z"));
        assert!(!valid_slug("ab"));
        assert!(!valid_slug("Acme"));
        assert!(!valid_slug("acme corp"));
    }
}
