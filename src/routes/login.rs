//! Login route. On success it stores the `{token, user}` session atomically,
//! broadcasts the auth change, then honors an explicit `?redirect=` return
//! path before falling back to type-based dashboard routing. Routing uses
//! the user returned by the server, never a cached snapshot.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::session::use_auth;
use crate::features::auth::types::LoginRequest;
use crate::features::auth::client;
use crate::features::orgs::tenant::routing_target;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let query = use_query_map();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let banner = move || {
        let query = query.get();
        if query.get("verified").as_deref() == Some("true") {
            Some("Email verified successfully! You can now log in.".to_string())
        } else if query.get("reset").as_deref() == Some("true") {
            Some("Password updated. Sign in with your new password.".to_string())
        } else {
            None
        }
    };

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        async move {
            let request = LoginRequest {
                email: input.email,
                password: input.password,
            };
            client::login(&request).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = login_action.value().get() {
            match result {
                Ok(response) => {
                    let target = routing_target(&response.user).path().to_string();
                    if let Err(err) = auth.log_in(response.token, response.user) {
                        set_error.set(Some(err.to_string()));
                        return;
                    }
                    let redirect = query
                        .get_untracked()
                        .get("redirect")
                        .filter(|path| path.starts_with('/'))
                        .unwrap_or(target);
                    navigate(&redirect, Default::default());
                }
                Err(err) => {
                    if err.is_code("EMAIL_NOT_VERIFIED") {
                        set_error.set(Some(
                            "Your email is not verified. Please check your inbox for the verification code."
                                .to_string(),
                        ));
                    } else {
                        set_error.set(Some(err.to_string()));
                    }
                }
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.trim().is_empty() {
            set_error.set(Some("Email and password are required.".to_string()));
            return;
        }
        if !email_value.contains('@') {
            set_error.set(Some("Email address looks invalid.".to_string()));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto" on:submit=on_submit>
                <h1 class="mb-6 text-2xl font-semibold text-gray-900 dark:text-white">"Sign in"</h1>
                {move || {
                    banner()
                        .map(|message| {
                            view! {
                                <div class="mb-5">
                                    <Alert kind=AlertKind::Success message=message />
                                </div>
                            }
                        })
                }}
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="email"
                    >
                        "Your email"
                    </label>
                    <input
                        id="email"
                        type="email"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white"
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
                        "Your password"
                    </label>
                    <input
                        id="password"
                        type="password"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white"
                        autocomplete="current-password"
                        required
                        on:input=move |event| set_password.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5 text-sm">
                    <a href="/forgot-password" class="text-blue-700 hover:underline dark:text-blue-500">
                        "Forgot your password?"
                    </a>
                </div>
                <Button button_type="submit" disabled=login_action.pending()>
                    "Sign In"
                </Button>
                {move || {
                    login_action
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
                <p class="mt-6 text-sm text-gray-500 dark:text-gray-400">
                    "New to Card CRM? "
                    <a href="/select-type" class="text-blue-700 hover:underline dark:text-blue-500">
                        "Create an account"
                    </a>
                </p>
            </form>
        </AppShell>
    }
}
