//! Individual signup route. It validates inputs locally, registers the
//! account, then opens the pending-verification handshake and hands off to
//! the OTP page. The handshake is the only state carried between the two
//! pages.

use crate::app_lib::BrowserSession;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::handshake::HandshakeTracker;
use crate::features::auth::types::{RegisterRequest, UserType};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

/// Minimum password length enforced by the client for early UX feedback.
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Clone)]
/// Captures signup form input for the async action without borrowing signals.
struct SignupInput {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

/// Maps the reason codes the OTP page redirects back with.
fn reason_banner(reason: &str) -> Option<&'static str> {
    match reason {
        "no_session" => Some("Start by creating your account below."),
        "session_expired" => {
            Some("Your verification session expired. Please sign up again to get a new code.")
        }
        "invalid_session" => Some("Something went wrong with your signup. Please try again."),
        _ => None,
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let navigate = use_navigate();
    let query = use_query_map();
    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let notice = move || {
        query
            .get()
            .get("error")
            .and_then(|reason| reason_banner(&reason))
            .map(str::to_string)
    };

    let signup_action = Action::new_local(move |input: &SignupInput| {
        let input = input.clone();
        async move {
            let request = RegisterRequest {
                email: input.email.clone(),
                password: input.password,
                first_name: input.first_name,
                last_name: input.last_name,
            };
            client::register(&request).await.map(|_| input.email)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = signup_action.value().get() {
            match result {
                Ok(email_value) => {
                    let tracker = HandshakeTracker::new(BrowserSession);
                    if let Err(err) = tracker.begin(&email_value, UserType::Individual) {
                        set_error.set(Some(err.to_string()));
                        return;
                    }
                    navigate("/verify-otp", Default::default());
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let first_value = first_name.get_untracked().trim().to_string();
        let last_value = last_name.get_untracked().trim().to_string();
        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        let confirm_value = confirm_password.get_untracked();

        if first_value.len() < 2 || last_value.len() < 2 {
            set_error.set(Some("First and last name are required.".to_string()));
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

        signup_action.dispatch(SignupInput {
            first_name: first_value,
            last_name: last_value,
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <AppShell>
            <form class="max-w-md mx-auto" on:submit=on_submit>
                <h1 class="mb-2 text-2xl font-semibold text-gray-900 dark:text-white">
                    "Create your account"
                </h1>
                <p class="mb-6 text-sm text-gray-500 dark:text-gray-400">
                    "Enter your details to get started with Card CRM."
                </p>
                {move || {
                    notice()
                        .map(|message| {
                            view! {
                                <div class="mb-5">
                                    <Alert kind=AlertKind::Info message=message />
                                </div>
                            }
                        })
                }}
                <div class="grid gap-5 sm:grid-cols-2 mb-5">
                    <div>
                        <label
                            class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                            for="first_name"
                        >
                            "First name"
                        </label>
                        <input
                            id="first_name"
                            type="text"
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                            autocomplete="given-name"
                            required
                            on:input=move |event| set_first_name.set(event_target_value(&event))
                        />
                    </div>
                    <div>
                        <label
                            class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                            for="last_name"
                        >
                            "Last name"
                        </label>
                        <input
                            id="last_name"
                            type="text"
                            class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                            autocomplete="family-name"
                            required
                            on:input=move |event| set_last_name.set(event_target_value(&event))
                        />
                    </div>
                </div>
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="email"
                    >
                        "Email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        autocomplete="email"
                        placeholder="name@example.com"
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
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
                <div class="mb-5">
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
                <Button button_type="submit" disabled=signup_action.pending()>
                    "Create account"
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
