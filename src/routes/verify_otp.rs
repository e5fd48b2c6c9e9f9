//! OTP verification route. Entry is guarded by the pending-verification
//! handshake: no handshake sends the visitor back to signup with a reason
//! code, an expired one does the same after removing the record. A visible
//! countdown mirrors the 15-minute window; failed submissions are capped at
//! five until a resend. Success stores the issued session and routes by the
//! account type recorded at signup.

use crate::app_lib::BrowserSession;
use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::client;
use crate::features::auth::handshake::{
    AttemptCounter, HandshakeCheck, HandshakeTracker, MAX_ATTEMPTS, SESSION_TIMEOUT_MS,
};
use crate::features::auth::session::use_auth;
use crate::features::auth::types::{UserType, VerifyEmailRequest};
use crate::features::invitations::flow::InviteMarkers;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

const OTP_LENGTH: usize = 6;

fn format_time(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[component]
pub fn VerifyOtpPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let tracker = HandshakeTracker::new(BrowserSession);
    let markers = InviteMarkers::new(BrowserSession);

    let (email, set_email) = signal(String::new());
    let (account_type, set_account_type) = signal(UserType::Individual);
    let (remaining_secs, set_remaining) = signal(0u64);
    let (checked, set_checked) = signal(false);
    let (otp, set_otp) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (resend_ok, set_resend_ok) = signal(false);
    let (attempts, set_attempts) = signal(AttemptCounter::default());

    // Handshake guard: runs once, before anything renders meaningfully.
    let navigate_guard = navigate.clone();
    Effect::new(move |_| {
        if checked.get_untracked() {
            return;
        }
        match tracker.check() {
            HandshakeCheck::NoSession => {
                navigate_guard("/signup?error=no_session", Default::default());
            }
            HandshakeCheck::Expired => {
                navigate_guard("/signup?error=session_expired", Default::default());
            }
            HandshakeCheck::Active {
                email: stored_email,
                account_type: stored_type,
                remaining_millis,
            } => {
                set_email.set(stored_email);
                set_account_type.set(stored_type);
                set_remaining.set(remaining_millis / 1000);
                set_checked.set(true);
            }
        }
    });

    // One-second countdown. The liveness flag keeps a torn-down page from
    // ticking (or redirecting) after the user has navigated away.
    let alive = Arc::new(AtomicBool::new(true));
    let alive_task = alive.clone();
    leptos::task::spawn_local(async move {
        loop {
            gloo_timers::future::sleep(Duration::from_secs(1)).await;
            if !alive_task.load(Ordering::Relaxed) {
                break;
            }
            if !checked.get_untracked() {
                continue;
            }
            let seconds = remaining_secs.get_untracked();
            if seconds > 0 {
                set_remaining.set(seconds - 1);
            }
        }
    });
    on_cleanup(move || alive.store(false, Ordering::Relaxed));

    // Reaching zero is the same transition as server-side expiry.
    let navigate_expired = navigate.clone();
    Effect::new(move |_| {
        if checked.get() && remaining_secs.get() == 0 {
            tracker.complete();
            navigate_expired("/signup?error=session_expired", Default::default());
        }
    });

    let verify_action = Action::new_local(move |otp_value: &String| {
        let request = VerifyEmailRequest {
            email: email.get_untracked(),
            otp: otp_value.clone(),
        };
        async move { client::verify_email(&request).await }
    });

    let navigate_verified = navigate.clone();
    Effect::new(move |_| {
        if let Some(result) = verify_action.value().get() {
            match result {
                Ok(response) => {
                    if let Err(err) = auth.log_in(response.token, response.user) {
                        set_error.set(Some(err.to_string()));
                        return;
                    }
                    tracker.complete();
                    let destination = match account_type.get_untracked() {
                        UserType::Organization => "/organization/dashboard?verified=true".to_string(),
                        UserType::Individual => match markers.pending_invite() {
                            Some(invite_token) => {
                                let _ = markers.mark_just_signed_up();
                                format!("/accept-invite/{invite_token}")
                            }
                            None => "/dashboard?verified=true".to_string(),
                        },
                    };
                    navigate_verified(&destination, Default::default());
                }
                Err(err) => {
                    set_attempts.update(|counter| {
                        counter.record_failure();
                    });
                    let counter = attempts.get_untracked();
                    if counter.is_locked() {
                        set_error.set(Some(format!(
                            "Too many failed attempts ({MAX_ATTEMPTS}/{MAX_ATTEMPTS}). Please request a new code."
                        )));
                    } else {
                        let remaining = counter.remaining();
                        set_error.set(Some(format!("{err} {remaining} attempts remaining.")));
                    }
                    set_otp.set(String::new());
                }
            }
        }
    });

    let resend_action = Action::new_local(move |_: &()| {
        let email_value = email.get_untracked();
        async move { client::resend_otp(&email_value).await }
    });

    Effect::new(move |_| {
        if let Some(result) = resend_action.value().get() {
            match result {
                Ok(_) => {
                    // A fresh code restarts the window and unlocks the form.
                    let _ = tracker.touch();
                    set_attempts.update(AttemptCounter::reset);
                    set_remaining.set(SESSION_TIMEOUT_MS / 1000);
                    set_resend_ok.set(true);
                    set_error.set(None);
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_error.set(None);
        set_resend_ok.set(false);

        if attempts.get_untracked().is_locked() {
            set_error.set(Some(
                "Too many failed attempts. Please request a new code.".to_string(),
            ));
            return;
        }

        let otp_value = otp.get_untracked().trim().to_string();
        if otp_value.len() != OTP_LENGTH || !otp_value.chars().all(|c| c.is_ascii_digit()) {
            set_error.set(Some("The code is 6 digits.".to_string()));
            return;
        }

        verify_action.dispatch(otp_value);
    };

    let on_resend = move |_| {
        set_resend_ok.set(false);
        set_error.set(None);
        resend_action.dispatch(());
    };

    let locked = move || attempts.get().is_locked();

    view! {
        <AppShell>
            <div class="max-w-md mx-auto">
                <Show
                    when=move || checked.get()
                    fallback=move || view! { <div class="mt-10 text-center"><Spinner /></div> }
                >
                    <form on:submit=on_submit>
                        <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">
                            "Verify your email"
                        </h1>
                        <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                            "We sent a 6-digit verification code to "
                            <span class="font-medium text-gray-900 dark:text-white">
                                {move || email.get()}
                            </span>
                        </p>
                        <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                            "Session expires in "
                            <span class="font-mono">
                                {move || format_time(remaining_secs.get())}
                            </span>
                        </p>
                        <div class="mt-6">
                            <label
                                class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                                for="otp"
                            >
                                "Enter code"
                            </label>
                            <input
                                id="otp"
                                type="text"
                                inputmode="numeric"
                                maxlength="6"
                                placeholder="000000"
                                class="bg-gray-50 border border-gray-300 text-gray-900 text-2xl tracking-widest font-mono text-center rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white"
                                autocomplete="one-time-code"
                                prop:value=move || otp.get()
                                disabled=locked
                                on:input=move |event| set_otp.set(event_target_value(&event))
                            />
                            {move || {
                                let failures = attempts.get().failures();
                                (failures > 0 && !attempts.get().is_locked())
                                    .then_some(view! {
                                        <p class="mt-2 text-xs text-amber-600 dark:text-amber-400">
                                            {format!("Failed attempts: {failures}/{MAX_ATTEMPTS}")}
                                        </p>
                                    })
                            }}
                        </div>
                        <div class="mt-4">
                            <Button button_type="submit" disabled=Signal::derive(move || {
                                verify_action.pending().get() || attempts.get().is_locked()
                            })>
                                {move || if locked() { "Locked - request a new code" } else { "Verify email" }}
                            </Button>
                        </div>
                        {move || {
                            verify_action
                                .pending()
                                .get()
                                .then_some(view! { <div class="mt-4"><Spinner /></div> })
                        }}
                        {move || {
                            resend_ok
                                .get()
                                .then_some(view! {
                                    <div class="mt-4">
                                        <Alert
                                            kind=AlertKind::Success
                                            message="A new code is on the way. Check your email.".to_string()
                                        />
                                    </div>
                                })
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
                        <div class="mt-6 text-center text-sm text-gray-500 dark:text-gray-400">
                            "Didn't receive the code? "
                            <button
                                type="button"
                                class="font-medium text-blue-700 hover:underline disabled:opacity-50 dark:text-blue-500"
                                disabled=move || resend_action.pending().get() || verify_action.pending().get()
                                on:click=on_resend
                            >
                                {move || if resend_action.pending().get() { "Resending..." } else { "Resend code" }}
                            </button>
                        </div>
                        <div class="mt-4 text-center text-sm">
                            <a href="/signup" class="text-blue-700 hover:underline dark:text-blue-500">
                                "Back to sign up"
                            </a>
                        </div>
                    </form>
                </Show>
            </div>
        </AppShell>
    }
}

#[cfg(test)]
mod tests {
    use super::format_time;

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(899), "14:59");
        assert_eq!(format_time(900), "15:00");
    }
}
