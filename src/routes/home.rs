//! Landing page. Marketing copy stays minimal; authenticated visitors get a
//! shortcut to their dashboard.

use crate::components::AppShell;
use crate::features::auth::session::use_auth;
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let is_authenticated = auth.is_authenticated;

    view! {
        <AppShell>
            <div class="max-w-2xl mx-auto py-16 text-center">
                <h1 class="text-4xl font-bold text-gray-900 dark:text-white">
                    "Your network, organized."
                </h1>
                <p class="mt-4 text-lg text-gray-500 dark:text-gray-400">
                    "Card CRM turns business cards into a living contact base — for you and for your whole team."
                </p>
                <div class="mt-8 flex items-center justify-center gap-4">
                    <Show
                        when=move || is_authenticated.get()
                        fallback=move || {
                            view! {
                                <A
                                    href="/select-type"
                                    attr:class="rounded-lg bg-blue-700 px-5 py-2.5 text-sm font-medium text-white hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700".to_string()
                                >
                                    "Get started"
                                </A>
                                <A
                                    href="/login"
                                    attr:class="rounded-lg border border-gray-200 px-5 py-2.5 text-sm font-medium text-gray-700 hover:bg-gray-100 dark:border-gray-600 dark:text-gray-200 dark:hover:bg-gray-700".to_string()
                                >
                                    "Sign in"
                                </A>
                            }
                        }
                    >
                        <A
                            href="/dashboard"
                            attr:class="rounded-lg bg-blue-700 px-5 py-2.5 text-sm font-medium text-white hover:bg-blue-800 dark:bg-blue-600 dark:hover:bg-blue-700".to_string()
                        >
                            "Open your dashboard"
                        </A>
                    </Show>
                </div>
            </div>
        </AppShell>
    }
}
