//! Password reset request route. The backend emails an OTP; the follow-up
//! form on `/reset-password` consumes it.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let (email, set_email) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let request_action = Action::new_local(move |email_value: &String| {
        let email_value = email_value.clone();
        async move {
            client::request_password_reset(&email_value)
                .await
                .map(|_| email_value)
        }
    });

    Effect::new(move |_| {
        if let Some(result) = request_action.value().get() {
            match result {
                Ok(email_value) => {
                    navigate(
                        &format!("/reset-password?email={email_value}"),
                        Default::default(),
                    );
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        if !email_value.contains('@') {
            set_error.set(Some("Please enter a valid email address.".to_string()));
            return;
        }

        request_action.dispatch(email_value);
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto" on:submit=on_submit>
                <h1 class="mb-2 text-2xl font-semibold text-gray-900 dark:text-white">
                    "Forgot your password?"
                </h1>
                <p class="mb-6 text-sm text-gray-500 dark:text-gray-400">
                    "Enter your email and we'll send you a reset code."
                </p>
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
                <Button button_type="submit" disabled=request_action.pending()>
                    "Send reset code"
                </Button>
                {move || {
                    request_action
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
