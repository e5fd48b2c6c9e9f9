//! Pricing page: plan listing, current subscription status, and checkout.
//! `ACTIVE_SUBSCRIPTION_EXISTS` from the payment endpoint is a recognized
//! outcome rendered as information, never as a failure.

use crate::components::{Alert, AlertKind, AppShell, Button, Spinner};
use crate::features::auth::session::use_auth;
use crate::features::payments::{
    client::{self, ACTIVE_SUBSCRIPTION_EXISTS},
    types::{Plan, SubscriptionStatusData},
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

#[derive(Clone, Debug, PartialEq)]
enum CheckoutOutcome {
    Paid { credits: i64 },
    AlreadySubscribed,
}

#[component]
pub fn PricingPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (plans, set_plans) = signal::<Option<Vec<Plan>>>(None);
    let (status, set_status) = signal::<Option<SubscriptionStatusData>>(None);
    let (load_error, set_load_error) = signal::<Option<String>>(None);
    let (outcome, set_outcome) = signal::<Option<CheckoutOutcome>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    let (requested, set_requested) = signal(false);
    Effect::new(move |_| {
        if requested.get_untracked() {
            return;
        }
        set_requested.set(true);
        spawn_local(async move {
            let token = auth.token();
            match client::fetch_plans(token.as_deref()).await {
                Ok(list) => set_plans.set(Some(list)),
                Err(err) => {
                    log::warn!("Failed to load plans: {err}");
                    set_load_error.set(Some(err.to_string()));
                }
            }
            if token.is_some() {
                match client::fetch_status(token.as_deref()).await {
                    Ok(data) => set_status.set(Some(data)),
                    Err(err) => log::warn!("Failed to load subscription status: {err}"),
                }
            }
        });
    });

    let checkout_action = Action::new_local(move |plan_id: &String| {
        let plan_id = plan_id.clone();
        async move {
            let token = auth.token();
            client::create_payment(&plan_id, token.as_deref()).await
        }
    });

    Effect::new(move |_| {
        if let Some(result) = checkout_action.value().get() {
            match result {
                Ok(payment) => set_outcome.set(Some(CheckoutOutcome::Paid {
                    credits: payment.data.credits,
                })),
                Err(err) if err.is_code(ACTIVE_SUBSCRIPTION_EXISTS) => {
                    set_outcome.set(Some(CheckoutOutcome::AlreadySubscribed));
                }
                Err(err) => set_error.set(Some(err.to_string())),
            }
        }
    });

    // Checkout from a signed-out session detours through login; the signal
    // keeps the non-Send navigate handle out of the button callbacks.
    let (redirect_login, set_redirect_login) = signal(false);
    Effect::new(move |_| {
        if redirect_login.get() {
            navigate("/login?redirect=/pricing", Default::default());
        }
    });

    let on_select = move |plan_id: String| {
        set_outcome.set(None);
        set_error.set(None);
        if !auth.is_authenticated.get_untracked() {
            set_redirect_login.set(true);
            return;
        }
        checkout_action.dispatch(plan_id);
    };

    view! {
        <AppShell>
            <div class="max-w-4xl mx-auto">
                <div class="text-center">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Pricing"</h1>
                    <p class="mt-2 text-sm text-gray-500 dark:text-gray-400">
                        "Pick the plan that fits how you work."
                    </p>
                </div>
                {move || {
                    status
                        .get()
                        .map(|data| {
                            let summary = format!(
                                "Current plan: {} ({})",
                                data.individual.plan_id, data.individual.status
                            );
                            view! {
                                <div class="mt-6">
                                    <Alert kind=AlertKind::Info message=summary />
                                </div>
                            }
                        })
                }}
                {move || {
                    outcome
                        .get()
                        .map(|result| {
                            let (kind, message) = match result {
                                CheckoutOutcome::Paid { credits } => (
                                    AlertKind::Success,
                                    format!("Payment confirmed. {credits} credits added to your account."),
                                ),
                                CheckoutOutcome::AlreadySubscribed => (
                                    AlertKind::Info,
                                    "You already have an active subscription. It keeps running unchanged."
                                        .to_string(),
                                ),
                            };
                            view! {
                                <div class="mt-6">
                                    <Alert kind=kind message=message />
                                </div>
                            }
                        })
                }}
                {move || {
                    error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-6">
                                    <Alert kind=AlertKind::Error message=message />
                                </div>
                            }
                        })
                }}
                {move || {
                    load_error
                        .get()
                        .map(|message| {
                            view! {
                                <div class="mt-6">
                                    <Alert kind=AlertKind::Warning message=message />
                                </div>
                            }
                        })
                }}
                {move || match plans.get() {
                    None => view! { <div class="mt-10 text-center"><Spinner /></div> }.into_any(),
                    Some(list) => view! {
                        <div class="mt-8 grid gap-6 md:grid-cols-3">
                            {list
                                .into_iter()
                                .map(|plan| {
                                    let plan_id = plan.id.clone();
                                    let highlight = plan.is_popular;
                                    view! {
                                        <div
                                            class="flex flex-col rounded-xl border bg-white p-6 dark:bg-gray-800"
                                            class:border-blue-500=move || highlight
                                            class:border-gray-200=move || !highlight
                                        >
                                            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">
                                                {plan.name.clone()}
                                            </h2>
                                            <p class="mt-2 text-3xl font-bold text-gray-900 dark:text-white">
                                                {plan.display_price()}
                                                <span class="text-sm font-normal text-gray-500 dark:text-gray-400">
                                                    {format!(" / {}", plan.interval)}
                                                </span>
                                            </p>
                                            <ul class="mt-4 flex-1 space-y-2 text-sm text-gray-600 dark:text-gray-300">
                                                {plan
                                                    .features
                                                    .iter()
                                                    .map(|feature| view! { <li>{format!("· {feature}")}</li> })
                                                    .collect_view()}
                                            </ul>
                                            <div class="mt-6">
                                                <Button
                                                    disabled=checkout_action.pending()
                                                    on_click=Callback::new(move |_| on_select(plan_id.clone()))
                                                >
                                                    "Choose plan"
                                                </Button>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </AppShell>
    }
}
