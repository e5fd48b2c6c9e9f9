//! Password reset completion route: email, the emailed OTP, and the new
//! password go to the backend together; success lands back on login.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::types::ResetPasswordRequest;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

const MIN_PASSWORD_LENGTH: usize = 6;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let navigate = use_navigate();
    let query = use_query_map();
    let initial_email = query.get_untracked().get("email").unwrap_or_default();
    let (email, set_email) = signal(initial_email);
    let (otp, set_otp) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let reset_action = Action::new_local(move |request: &ResetPasswordRequest| {
        let request = request.clone();
        async move { client::reset_password(&request).await }
    });

    Effect::new(move |_| {
        if let Some(result) = reset_action.value().get() {
            match result {
                Ok(_) => navigate("/login?reset=true", Default::default()),
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let otp_value = otp.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        let confirm_value = confirm_password.get_untracked();

        if !email_value.contains('@') {
            set_error.set(Some("Please enter a valid email address.".to_string()));
            return;
        }
        if otp_value.len() != 6 || !otp_value.chars().all(|c| c.is_ascii_digit()) {
            set_error.set(Some("The reset code is 6 digits.".to_string()));
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

        reset_action.dispatch(ResetPasswordRequest {
            email: email_value,
            otp: otp_value,
            new_password: password_value,
        });
    };

    view! {
        <AppShell>
            <form class="max-w-sm mx-auto" on:submit=on_submit>
                <h1 class="mb-2 text-2xl font-semibold text-gray-900 dark:text-white">
                    "Reset your password"
                </h1>
                <p class="mb-6 text-sm text-gray-500 dark:text-gray-400">
                    "Enter the code from your email and choose a new password."
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
                        prop:value=move || email.get()
                        required
                        on:input=move |event| set_email.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="otp"
                    >
                        "Reset code"
                    </label>
                    <input
                        id="otp"
                        type="text"
                        inputmode="numeric"
                        maxlength="6"
                        placeholder="000000"
                        class="bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 font-mono dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                        autocomplete="one-time-code"
                        required
                        on:input=move |event| set_otp.set(event_target_value(&event))
                    />
                </div>
                <div class="mb-5">
                    <label
                        class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                        for="new_password"
                    >
                        "New password"
                    </label>
                    <input
                        id="new_password"
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
                        "Confirm new password"
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
                <Button button_type="submit" disabled=reset_action.pending()>
                    "Reset password"
                </Button>
                {move || {
                    reset_action
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
